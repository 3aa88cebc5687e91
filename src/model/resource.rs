//! Resource object: the wire form of one entity.

use indexmap::IndexMap;
use serde::Serialize;

use super::{Attributes, Links, Meta, RelationshipEntry, ResourceIdentifier};

/// `{type, id, attributes?, relationships?, links?, meta?}`.
///
/// `type` and `id` are fixed once built; attributes and relationship slots
/// may be enriched in place while inclusion chains visit the resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    /// Keyed by public relationship name, in policy order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub relationships: IndexMap<String, RelationshipEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ResourceObject {
    pub fn new(identifier: ResourceIdentifier) -> Self {
        Self {
            resource_type: identifier.resource_type,
            id: identifier.id,
            attributes: Attributes::new(),
            relationships: IndexMap::new(),
            links: None,
            meta: None,
        }
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type.clone(), self.id.clone())
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipEntry> {
        self.relationships.get(name)
    }

    /// Slot for `name`, appended after the existing ones when missing.
    pub fn relationship_slot(&mut self, name: &str) -> &mut RelationshipEntry {
        self.relationships.entry(name.to_owned()).or_default()
    }

    /// Drop every relationship entry that carries neither linkage nor links.
    pub fn prune_relationships(&mut self) {
        self.relationships.retain(|_, entry| !entry.is_empty());
    }
}
