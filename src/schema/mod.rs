//! # Resource Graph
//!
//! The registered schema for every resource type the builder may encounter.
//! Built once at startup, shared read-only by every response.
//!
//! ```text
//! ResourceDefinition<Article> ─┐
//! ResourceDefinition<Person>  ─┼─ ResourceGraph::builder().add(..).build()
//! ResourceDefinition<Comment> ─┘        │
//!                                       ├─ context_of(&entity)   (by TypeId)
//!                                       ├─ context("articles")   (by name)
//!                                       └─ inclusion_chain("articles", "author.articles")
//! ```

pub mod attribute;
pub mod relationship;
pub mod resource;

use std::any::{Any, TypeId};

use hashbrown::{HashMap, HashSet};

use crate::include::{InclusionChain, Includes};
use crate::model::ResourceIdentifier;
use crate::{Error, Result};

pub use attribute::AttributeDescriptor;
pub use relationship::{Cardinality, EntityRef, Related, RelationshipDescriptor};
pub use resource::{ResourceContext, ResourceDefinition};

// ============================================================================
// ResourceGraph
// ============================================================================

/// All registered resource types, indexed by Rust type and by public name.
#[derive(Debug)]
pub struct ResourceGraph {
    resources: Vec<ResourceContext>,
    by_type: HashMap<TypeId, usize>,
    by_name: HashMap<String, usize>,
}

impl ResourceGraph {
    pub fn builder() -> ResourceGraphBuilder {
        ResourceGraphBuilder::default()
    }

    pub fn resources(&self) -> &[ResourceContext] {
        &self.resources
    }

    /// Context registered under the public type name.
    pub fn context(&self, name: &str) -> Option<&ResourceContext> {
        self.by_name.get(name).map(|&i| &self.resources[i])
    }

    /// Context for the entity's concrete type.
    pub fn context_of(&self, entity: EntityRef<'_>) -> Result<&ResourceContext> {
        let type_id = <dyn Any>::type_id(entity);
        self.by_type
            .get(&type_id)
            .map(|&i| &self.resources[i])
            .ok_or_else(|| Error::Configuration("entity type is not registered in the resource graph".into()))
    }

    /// `{type, id}` of an entity. `via` names the relationship it was
    /// reached through and only feeds the error message.
    pub fn identify(
        &self,
        entity: EntityRef<'_>,
        via: Option<&RelationshipDescriptor>,
    ) -> Result<ResourceIdentifier> {
        let context = self.context_of(entity)?;
        match context.id_of(entity)? {
            Some(id) => Ok(ResourceIdentifier::new(context.name(), id)),
            None => Err(Error::MissingIdentity {
                resource_type: context.name().to_owned(),
                via: via.map_or_else(|| "primary data".to_owned(), |r| format!("'{r}'")),
            }),
        }
    }

    /// Resolve a dotted include path (`"author.articles"`) starting at `root`.
    pub fn inclusion_chain(&self, root: &str, path: &str) -> Result<InclusionChain> {
        let mut current = self.context(root).ok_or_else(|| {
            Error::Configuration(format!("resource type '{root}' is not registered"))
        })?;
        let mut hops = Vec::new();
        for name in path.split('.') {
            let relationship = current.relationship(name).ok_or_else(|| Error::UnknownField {
                resource_type: current.name().to_owned(),
                field: name.to_owned(),
            })?;
            hops.push(relationship.clone());
            current = self.context(relationship.target()).ok_or_else(|| {
                Error::Configuration(format!(
                    "relationship '{relationship}' targets unregistered type '{}'",
                    relationship.target()
                ))
            })?;
        }
        Ok(InclusionChain::from(hops))
    }

    /// Resolve several include paths into a chain set.
    pub fn includes<I, S>(&self, root: &str, paths: I) -> Result<Includes>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|path| self.inclusion_chain(root, path.as_ref()))
            .collect()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects resource definitions and validates them as a whole.
#[derive(Default)]
pub struct ResourceGraphBuilder {
    resources: Vec<ResourceContext>,
}

impl ResourceGraphBuilder {
    pub fn add<E: Any>(mut self, definition: ResourceDefinition<E>) -> Self {
        self.resources.push(definition.into_context());
        self
    }

    /// Fails on duplicate type names, duplicate Rust types, duplicate field
    /// names within a type, or relationships pointing at unregistered types.
    pub fn build(self) -> Result<ResourceGraph> {
        let mut by_type = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, context) in self.resources.iter().enumerate() {
            if by_name.insert(context.name().to_owned(), index).is_some() {
                return Err(Error::Configuration(format!(
                    "resource type '{}' registered twice",
                    context.name()
                )));
            }
            if by_type.insert(context.entity_type_id(), index).is_some() {
                return Err(Error::Configuration(format!(
                    "{} registered under more than one resource type",
                    context.type_name()
                )));
            }

            let mut fields = HashSet::new();
            let names = context
                .attributes()
                .iter()
                .map(AttributeDescriptor::name)
                .chain(context.relationships().iter().map(RelationshipDescriptor::name));
            for name in names {
                if !fields.insert(name) {
                    return Err(Error::Configuration(format!(
                        "field '{name}' declared twice on '{}'",
                        context.name()
                    )));
                }
            }

            for relationship in context.relationships() {
                if relationship.owner() != context.name() {
                    return Err(Error::Configuration(format!(
                        "relationship '{relationship}' registered on '{}'",
                        context.name()
                    )));
                }
            }
        }

        for context in &self.resources {
            for relationship in context.relationships() {
                if !by_name.contains_key(relationship.target()) {
                    return Err(Error::Configuration(format!(
                        "relationship '{relationship}' targets unregistered type '{}'",
                        relationship.target()
                    )));
                }
            }
        }

        tracing::debug!(resources = self.resources.len(), "resource graph built");

        Ok(ResourceGraph {
            resources: self.resources,
            by_type,
            by_name,
        })
    }
}
