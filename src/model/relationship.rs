//! Relationship entry: one value of a resource object's `relationships` map.

use serde::Serialize;

use super::{Data, Linkage, Links, Meta};

/// `{data?, links?, meta?}` for a single relationship.
///
/// An entry with unset linkage and no links is "empty" and must never reach
/// the wire: JSON:API forbids `{}` relationship objects.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RelationshipEntry {
    #[serde(skip_serializing_if = "Data::is_unset")]
    pub data: Linkage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl RelationshipEntry {
    /// A slot with no linkage and no links.
    pub fn unpopulated() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Linkage) -> Self {
        self.data = data;
        self
    }

    pub fn with_links(mut self, links: Option<Links>) -> Self {
        self.links = links;
        self
    }

    pub fn is_populated(&self) -> bool {
        self.data.is_populated()
    }

    /// True when linkage points at at least one resource.
    pub fn has_resource(&self) -> bool {
        self.data.has_resource()
    }

    /// Neither linkage nor links; pruned before serialization.
    pub fn is_empty(&self) -> bool {
        self.data.is_unset() && self.links.is_none() && self.meta.is_none()
    }

    /// Fold in linkage read on a later visit.
    ///
    /// To-many linkage is an ordered union. Unset never clears earlier
    /// linkage, and a to-one `null` never replaces a resolved resource.
    pub fn merge_data(&mut self, data: Linkage) {
        match (&mut self.data, data) {
            (_, Data::Unset) | (Data::Single(Some(_)), Data::Single(None)) => {}
            (Data::Many(existing), Data::Many(items)) => {
                for item in items {
                    if !existing.contains(&item) {
                        existing.push(item);
                    }
                }
            }
            (slot, data) => *slot = data,
        }
    }
}
