//! Top-level documents.

use serde::Serialize;

use super::{Linkage, Links, Meta, PrimaryData, ResourceIdentifier, ResourceObject};
use crate::Result;

/// `{data, included?, links?, meta?}`.
///
/// `data` is always present. Primary resources are never deduplicated
/// against `included`: a resource may legitimately appear in both.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompoundDocument {
    pub data: PrimaryData,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<ResourceObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl CompoundDocument {
    /// Included resource with the given identity, if any.
    pub fn find_included(&self, identifier: &ResourceIdentifier) -> Option<&ResourceObject> {
        self.included
            .iter()
            .find(|r| r.resource_type == identifier.resource_type && r.id == identifier.id)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Document served from a relationship endpoint
/// (`/articles/1/relationships/author`): `data` is linkage only.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelationshipDocument {
    pub data: Linkage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl RelationshipDocument {
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
