//! Field visibility policies.
//!
//! The host decides which attributes and relationship slots each resource
//! exposes. `via` is the relationship an included resource was reached
//! through (`None` for primary data), so per-relationship fieldsets such as
//! `fields[author]=name` can narrow included resources only.

use hashbrown::HashMap;

use crate::schema::{AttributeDescriptor, RelationshipDescriptor, ResourceContext};
use crate::{Error, Result};

/// Visibility policy consulted once per built resource object.
pub trait FieldPolicy {
    /// Attributes to serialize, in output order.
    fn allowed_attributes(
        &self,
        resource: &ResourceContext,
        via: Option<&RelationshipDescriptor>,
    ) -> Result<Vec<AttributeDescriptor>>;

    /// Relationship slots to create, in output order.
    fn allowed_relationships(
        &self,
        resource: &ResourceContext,
        via: Option<&RelationshipDescriptor>,
    ) -> Result<Vec<RelationshipDescriptor>>;
}

/// Every registered field, in registration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllFields;

impl FieldPolicy for AllFields {
    fn allowed_attributes(
        &self,
        resource: &ResourceContext,
        _via: Option<&RelationshipDescriptor>,
    ) -> Result<Vec<AttributeDescriptor>> {
        Ok(resource.attributes().to_vec())
    }

    fn allowed_relationships(
        &self,
        resource: &ResourceContext,
        _via: Option<&RelationshipDescriptor>,
    ) -> Result<Vec<RelationshipDescriptor>> {
        Ok(resource.relationships().to_vec())
    }
}

/// Name-based sparse fieldsets.
///
/// Lookup order for attributes: the originating relationship's list, then
/// the resource type's list, then everything. Relationship slots are
/// restricted per resource type only.
#[derive(Debug, Clone, Default)]
pub struct SparseFieldsets {
    by_type: HashMap<String, Vec<String>>,
    by_relationship: HashMap<String, Vec<String>>,
    relationships: HashMap<String, Vec<String>>,
}

impl SparseFieldsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes visible on `resource_type` (`fields[articles]=title`).
    pub fn fields<I, S>(mut self, resource_type: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_type.insert(resource_type.to_owned(), names.into_iter().map(Into::into).collect());
        self
    }

    /// Attributes visible on resources included through `relationship`
    /// (`fields[author]=name`).
    pub fn fields_via<I, S>(mut self, relationship: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_relationship.insert(relationship.to_owned(), names.into_iter().map(Into::into).collect());
        self
    }

    /// Relationship slots visible on `resource_type`.
    pub fn relationships<I, S>(mut self, resource_type: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.insert(resource_type.to_owned(), names.into_iter().map(Into::into).collect());
        self
    }
}

impl FieldPolicy for SparseFieldsets {
    fn allowed_attributes(
        &self,
        resource: &ResourceContext,
        via: Option<&RelationshipDescriptor>,
    ) -> Result<Vec<AttributeDescriptor>> {
        let names = via
            .and_then(|r| self.by_relationship.get(r.name()))
            .or_else(|| self.by_type.get(resource.name()));
        let Some(names) = names else {
            return Ok(resource.attributes().to_vec());
        };
        names
            .iter()
            .map(|name| {
                resource.attribute(name).cloned().ok_or_else(|| Error::UnknownField {
                    resource_type: resource.name().to_owned(),
                    field: name.clone(),
                })
            })
            .collect()
    }

    fn allowed_relationships(
        &self,
        resource: &ResourceContext,
        _via: Option<&RelationshipDescriptor>,
    ) -> Result<Vec<RelationshipDescriptor>> {
        let Some(names) = self.relationships.get(resource.name()) else {
            return Ok(resource.relationships().to_vec());
        };
        names
            .iter()
            .map(|name| {
                resource.relationship(name).cloned().ok_or_else(|| Error::UnknownField {
                    resource_type: resource.name().to_owned(),
                    field: name.clone(),
                })
            })
            .collect()
    }
}
