//! Entity → resource object conversion.

use crate::config::SerializerSettings;
use crate::model::{Linkage, ResourceIdentifier, ResourceObject};
use crate::schema::{
    AttributeDescriptor, Cardinality, EntityRef, Related, RelationshipDescriptor, ResourceContext,
    ResourceGraph,
};
use crate::{Error, Result};

/// Linkage of one relationship plus the entities it points at.
#[derive(Debug)]
pub struct Resolved<'e> {
    pub data: Linkage,
    pub related: Vec<EntityRef<'e>>,
}

/// Converts one entity into a resource object. Never follows relationships
/// on its own; it only reads linkage when asked.
#[derive(Debug, Clone, Copy)]
pub struct ResourceObjectBuilder<'r> {
    graph: &'r ResourceGraph,
    settings: &'r SerializerSettings,
}

impl<'r> ResourceObjectBuilder<'r> {
    pub fn new(graph: &'r ResourceGraph, settings: &'r SerializerSettings) -> Self {
        Self { graph, settings }
    }

    pub fn graph(&self) -> &'r ResourceGraph {
        self.graph
    }

    /// Build `{type, id, attributes}` plus one unpopulated slot per allowed
    /// relationship, keyed by public name in the given order.
    pub fn build(
        &self,
        entity: EntityRef<'_>,
        attributes: &[AttributeDescriptor],
        relationships: &[RelationshipDescriptor],
    ) -> Result<ResourceObject> {
        let context = self.graph.context_of(entity)?;
        let mut resource = ResourceObject::new(self.graph.identify(entity, None)?);

        for attribute in attributes {
            check_declared(context, attribute.owner(), attribute.name(), context.attribute(attribute.name()).is_some())?;
            let value = attribute.read(entity)?;
            if self.settings.omits(&value) {
                continue;
            }
            resource.attributes.insert(attribute.name().to_owned(), value);
        }

        for relationship in relationships {
            check_declared(
                context,
                relationship.owner(),
                relationship.name(),
                context.relationship(relationship.name()).is_some(),
            )?;
            resource.relationship_slot(relationship.name());
        }

        Ok(resource)
    }

    pub fn identifier(
        &self,
        entity: EntityRef<'_>,
        via: Option<&RelationshipDescriptor>,
    ) -> Result<ResourceIdentifier> {
        self.graph.identify(entity, via)
    }

    /// Read `relationship` off `entity` and turn the result into linkage.
    ///
    /// Not loaded → `Unset`; to-one absent → `Single(None)`; to-many →
    /// every loaded identifier, possibly none. A reader whose result shape
    /// contradicts the declared cardinality is an error.
    pub fn linkage<'e>(
        &self,
        relationship: &RelationshipDescriptor,
        entity: EntityRef<'e>,
    ) -> Result<Resolved<'e>> {
        let related = relationship.read(entity)?;
        match (relationship.cardinality(), related) {
            (_, Related::NotLoaded) => Ok(Resolved { data: Linkage::Unset, related: Vec::new() }),
            (Cardinality::ToOne, Related::One(None)) => {
                Ok(Resolved { data: Linkage::Single(None), related: Vec::new() })
            }
            (Cardinality::ToOne, Related::One(Some(target))) => Ok(Resolved {
                data: Linkage::Single(Some(self.related_identifier(relationship, target)?)),
                related: vec![target],
            }),
            (Cardinality::ToMany, Related::Many(targets)) => {
                let identifiers = targets
                    .iter()
                    .map(|target| self.related_identifier(relationship, *target))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Resolved { data: Linkage::Many(identifiers), related: targets })
            }
            (declared, found) => Err(Error::CardinalityMismatch {
                relationship: relationship.to_string(),
                declared,
                found: found.cardinality().unwrap_or(declared),
            }),
        }
    }

    fn related_identifier(
        &self,
        relationship: &RelationshipDescriptor,
        target: EntityRef<'_>,
    ) -> Result<ResourceIdentifier> {
        let identifier = self.graph.identify(target, Some(relationship))?;
        if identifier.resource_type != relationship.target() {
            return Err(Error::Configuration(format!(
                "relationship '{relationship}' declares target '{}' but read a '{}' resource",
                relationship.target(),
                identifier.resource_type
            )));
        }
        Ok(identifier)
    }
}

fn check_declared(context: &ResourceContext, owner: &str, field: &str, declared: bool) -> Result<()> {
    if owner != context.name() || !declared {
        return Err(Error::Configuration(format!(
            "field '{owner}.{field}' is not declared on resource type '{}'",
            context.name()
        )));
    }
    Ok(())
}
