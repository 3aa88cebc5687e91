//! Link construction.

use serde_json::Value;

use crate::config::LinkSettings;
use crate::model::{Links, ResourceIdentifier};
use crate::schema::RelationshipDescriptor;

/// Builds `links` members. Returning `None` omits the member.
pub trait LinkBuilder {
    /// Resource-level links (`self`).
    fn resource_links(&self, resource_type: &str, id: &str) -> Option<Links>;

    /// Links for `relationship` on the resource `owner`.
    fn relationship_links(
        &self,
        relationship: &RelationshipDescriptor,
        owner: &ResourceIdentifier,
    ) -> Option<Links>;
}

/// Emits no links at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLinks;

impl LinkBuilder for NoLinks {
    fn resource_links(&self, _resource_type: &str, _id: &str) -> Option<Links> {
        None
    }

    fn relationship_links(
        &self,
        _relationship: &RelationshipDescriptor,
        _owner: &ResourceIdentifier,
    ) -> Option<Links> {
        None
    }
}

/// Conventional JSON:API URLs under a base URL:
///
/// ```text
/// resource      self    {base}/{type}/{id}
/// relationship  self    {base}/{type}/{id}/relationships/{name}
///               related {base}/{type}/{id}/{name}
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlLinkBuilder {
    settings: LinkSettings,
}

impl UrlLinkBuilder {
    pub fn new(settings: LinkSettings) -> Self {
        Self { settings }
    }

    fn base(&self) -> &str {
        self.settings.base_url.trim_end_matches('/')
    }
}

impl LinkBuilder for UrlLinkBuilder {
    fn resource_links(&self, resource_type: &str, id: &str) -> Option<Links> {
        if !self.settings.resource_links {
            return None;
        }
        let mut links = Links::new();
        links.insert("self".into(), Value::String(format!("{}/{resource_type}/{id}", self.base())));
        Some(links)
    }

    fn relationship_links(
        &self,
        relationship: &RelationshipDescriptor,
        owner: &ResourceIdentifier,
    ) -> Option<Links> {
        if !self.settings.relationship_links {
            return None;
        }
        let resource = format!("{}/{}/{}", self.base(), owner.resource_type, owner.id);
        let name = relationship.name();
        let mut links = Links::new();
        links.insert("self".into(), Value::String(format!("{resource}/relationships/{name}")));
        links.insert("related".into(), Value::String(format!("{resource}/{name}")));
        Some(links)
    }
}
