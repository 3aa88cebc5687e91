//! Relationship descriptors.
//!
//! Cardinality is fixed when a relationship is registered. The reader is a
//! type-erased accessor built from a typed closure on the owning entity.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Error, Result};

/// A borrowed entity of any registered resource type.
pub type EntityRef<'a> = &'a dyn Any;

/// Erased relationship reader.
pub type ReadFn = dyn for<'a> Fn(EntityRef<'a>) -> Result<Related<'a>> + Send + Sync;

/// To-one or to-many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    ToOne,
    ToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::ToOne => write!(f, "to-one"),
            Cardinality::ToMany => write!(f, "to-many"),
        }
    }
}

/// What a relationship reader found on an entity.
#[derive(Clone)]
pub enum Related<'a> {
    /// The data layer did not load this relationship.
    NotLoaded,
    /// To-one value; `None` when known to be absent.
    One(Option<EntityRef<'a>>),
    /// To-many values in data-layer order.
    Many(Vec<EntityRef<'a>>),
}

impl Related<'_> {
    /// Shape of a loaded value; `None` for `NotLoaded`.
    pub fn cardinality(&self) -> Option<Cardinality> {
        match self {
            Related::NotLoaded => None,
            Related::One(_) => Some(Cardinality::ToOne),
            Related::Many(_) => Some(Cardinality::ToMany),
        }
    }
}

impl fmt::Debug for Related<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Related::NotLoaded => write!(f, "NotLoaded"),
            Related::One(value) => write!(f, "One({})", if value.is_some() { "Some(..)" } else { "None" }),
            Related::Many(values) => write!(f, "Many(len={})", values.len()),
        }
    }
}

/// One relationship field on a resource type.
///
/// Two descriptors are the same relationship iff they name the same field
/// on the same owning type; the reader takes no part in equality.
#[derive(Clone)]
pub struct RelationshipDescriptor {
    inner: Arc<RelationshipInner>,
}

struct RelationshipInner {
    owner: String,
    name: String,
    cardinality: Cardinality,
    target: String,
    read: Box<ReadFn>,
}

impl RelationshipDescriptor {
    /// Register a relationship with an arbitrary reader, e.g. a synchronous
    /// loader. The reader's result shape is checked against `cardinality`
    /// on every read.
    pub fn with_reader<F>(
        owner: impl Into<String>,
        name: impl Into<String>,
        cardinality: Cardinality,
        target: impl Into<String>,
        read: F,
    ) -> Self
    where
        F: for<'a> Fn(EntityRef<'a>) -> Result<Related<'a>> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(RelationshipInner {
                owner: owner.into(),
                name: name.into(),
                cardinality,
                target: target.into(),
                read: Box::new(read),
            }),
        }
    }

    /// Public relationship name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Resource type that declares the relationship.
    pub fn owner(&self) -> &str {
        &self.inner.owner
    }

    pub fn cardinality(&self) -> Cardinality {
        self.inner.cardinality
    }

    /// Resource type the relationship points at.
    pub fn target(&self) -> &str {
        &self.inner.target
    }

    /// Read the related value(s) off `entity`.
    pub fn read<'a>(&self, entity: EntityRef<'a>) -> Result<Related<'a>> {
        (self.inner.read)(entity)
    }
}

impl PartialEq for RelationshipDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.inner.owner == other.inner.owner && self.inner.name == other.inner.name
    }
}

impl Eq for RelationshipDescriptor {}

impl Hash for RelationshipDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.owner.hash(state);
        self.inner.name.hash(state);
    }
}

impl fmt::Debug for RelationshipDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationshipDescriptor")
            .field("owner", &self.inner.owner)
            .field("name", &self.inner.name)
            .field("cardinality", &self.inner.cardinality)
            .field("target", &self.inner.target)
            .finish()
    }
}

impl fmt::Display for RelationshipDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.inner.owner, self.inner.name)
    }
}

/// Downcast an erased entity to the accessor's owning type.
pub(crate) fn downcast<'a, E: Any>(entity: EntityRef<'a>, owner: &str, field: &str) -> Result<&'a E> {
    entity.downcast_ref::<E>().ok_or_else(|| {
        Error::Configuration(format!(
            "'{owner}.{field}' expects an entity of type {}",
            std::any::type_name::<E>()
        ))
    })
}
