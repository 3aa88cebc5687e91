//! Per-type resource registration.
//!
//! A [`ResourceDefinition`] is written against the concrete entity type and
//! erased into a [`ResourceContext`] when added to the graph.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;

use super::relationship::downcast;
use super::{AttributeDescriptor, Cardinality, EntityRef, Related, RelationshipDescriptor};
use crate::Result;

type IdReadFn = dyn Fn(EntityRef<'_>) -> Result<Option<String>> + Send + Sync;

/// Typed builder for one resource type.
///
/// ```rust
/// use jsonapi_rs::ResourceDefinition;
///
/// struct Comment { id: u64, body: String }
///
/// let comments = ResourceDefinition::<Comment>::new("comments", |c| Some(c.id.to_string()))
///     .attribute("body", |c| c.body.clone());
/// assert_eq!(comments.name(), "comments");
/// ```
pub struct ResourceDefinition<E> {
    name: String,
    id: Arc<IdReadFn>,
    attributes: Vec<AttributeDescriptor>,
    relationships: Vec<RelationshipDescriptor>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Any> ResourceDefinition<E> {
    /// `id` returns `None` for entities that have no identity yet.
    pub fn new<F>(name: impl Into<String>, id: F) -> Self
    where
        F: Fn(&E) -> Option<String> + Send + Sync + 'static,
    {
        let name = name.into();
        let owner = name.clone();
        Self {
            name,
            id: Arc::new(move |entity: EntityRef<'_>| -> Result<Option<String>> {
                Ok(id(downcast::<E>(entity, &owner, "id")?))
            }),
            attributes: Vec::new(),
            relationships: Vec::new(),
            _entity: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute serialized under `name`.
    pub fn attribute<V, F>(mut self, name: &str, read: F) -> Self
    where
        V: Serialize,
        F: Fn(&E) -> V + Send + Sync + 'static,
    {
        let owner = self.name.clone();
        let field = name.to_owned();
        self.attributes.push(AttributeDescriptor::new(
            self.name.clone(),
            name,
            move |entity: EntityRef<'_>| -> Result<serde_json::Value> {
                let entity = downcast::<E>(entity, &owner, &field)?;
                Ok(serde_json::to_value(read(entity))?)
            },
        ));
        self
    }

    /// To-one relationship that is always loaded.
    pub fn to_one<R, F>(self, name: &str, target: &str, read: F) -> Self
    where
        R: Any,
        F: Fn(&E) -> Option<&R> + Send + Sync + 'static,
    {
        self.to_one_lazy::<R, _>(name, target, move |entity| Some(read(entity)))
    }

    /// To-one relationship; the outer `None` means "not loaded".
    pub fn to_one_lazy<R, F>(mut self, name: &str, target: &str, read: F) -> Self
    where
        R: Any,
        F: Fn(&E) -> Option<Option<&R>> + Send + Sync + 'static,
    {
        let owner = self.name.clone();
        let field = name.to_owned();
        self.relationships.push(RelationshipDescriptor::with_reader(
            self.name.clone(),
            name,
            Cardinality::ToOne,
            target,
            move |entity| {
                let entity = downcast::<E>(entity, &owner, &field)?;
                Ok(match read(entity) {
                    None => Related::NotLoaded,
                    Some(related) => Related::One(related.map(|r| r as &dyn Any)),
                })
            },
        ));
        self
    }

    /// To-many relationship that is always loaded.
    pub fn to_many<R, F>(self, name: &str, target: &str, read: F) -> Self
    where
        R: Any,
        F: Fn(&E) -> &[R] + Send + Sync + 'static,
    {
        self.to_many_lazy::<R, _>(name, target, move |entity| Some(read(entity)))
    }

    /// To-many relationship; `None` means "not loaded".
    pub fn to_many_lazy<R, F>(mut self, name: &str, target: &str, read: F) -> Self
    where
        R: Any,
        F: Fn(&E) -> Option<&[R]> + Send + Sync + 'static,
    {
        let owner = self.name.clone();
        let field = name.to_owned();
        self.relationships.push(RelationshipDescriptor::with_reader(
            self.name.clone(),
            name,
            Cardinality::ToMany,
            target,
            move |entity| {
                let entity = downcast::<E>(entity, &owner, &field)?;
                Ok(match read(entity) {
                    None => Related::NotLoaded,
                    Some(items) => Related::Many(items.iter().map(|r| r as &dyn Any).collect()),
                })
            },
        ));
        self
    }

    /// Add a relationship built elsewhere, e.g. with a custom loader.
    pub fn relationship(mut self, relationship: RelationshipDescriptor) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub(crate) fn into_context(self) -> ResourceContext {
        ResourceContext {
            name: self.name,
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
            id: self.id,
            attributes: self.attributes,
            relationships: self.relationships,
        }
    }
}

/// A registered resource type: name, identity accessor, and fields in
/// registration order.
pub struct ResourceContext {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    id: Arc<IdReadFn>,
    attributes: Vec<AttributeDescriptor>,
    relationships: Vec<RelationshipDescriptor>,
}

impl ResourceContext {
    /// Public resource type name (the wire `type`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type the context was registered for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn relationships(&self) -> &[RelationshipDescriptor] {
        &self.relationships
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|r| r.name() == name)
    }

    /// The entity's id, `None` if it has none.
    pub fn id_of(&self, entity: EntityRef<'_>) -> Result<Option<String>> {
        (self.id)(entity)
    }
}

impl std::fmt::Debug for ResourceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceContext")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("attributes", &self.attributes)
            .field("relationships", &self.relationships)
            .finish()
    }
}
