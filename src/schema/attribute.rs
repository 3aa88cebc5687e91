//! Attribute descriptors.

use std::fmt;
use std::sync::Arc;

use super::EntityRef;
use crate::Result;

type AttributeReadFn = dyn Fn(EntityRef<'_>) -> Result<serde_json::Value> + Send + Sync;

/// One attribute field on a resource type, with its JSON accessor.
#[derive(Clone)]
pub struct AttributeDescriptor {
    inner: Arc<AttributeInner>,
}

struct AttributeInner {
    owner: String,
    name: String,
    read: Box<AttributeReadFn>,
}

impl AttributeDescriptor {
    pub(crate) fn new<F>(owner: impl Into<String>, name: impl Into<String>, read: F) -> Self
    where
        F: Fn(EntityRef<'_>) -> Result<serde_json::Value> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(AttributeInner {
                owner: owner.into(),
                name: name.into(),
                read: Box::new(read),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn owner(&self) -> &str {
        &self.inner.owner
    }

    pub fn read(&self, entity: EntityRef<'_>) -> Result<serde_json::Value> {
        (self.inner.read)(entity)
    }
}

impl PartialEq for AttributeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.inner.owner == other.inner.owner && self.inner.name == other.inner.name
    }
}

impl Eq for AttributeDescriptor {}

impl fmt::Debug for AttributeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeDescriptor({}.{})", self.inner.owner, self.inner.name)
    }
}
