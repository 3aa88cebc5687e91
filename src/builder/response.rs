//! Primary-resource assembly: per-relationship linkage, inclusion, links.

use tracing::{debug, trace};

use super::{IncludedCollector, ResourceObjectBuilder};
use crate::include::Includes;
use crate::links::LinkBuilder;
use crate::model::{RelationshipEntry, ResourceIdentifier, ResourceObject};
use crate::policy::FieldPolicy;
use crate::schema::{EntityRef, RelationshipDescriptor};
use crate::Result;

/// Builds primary resource objects and drives the included collector.
pub struct ResponseAssembler<'r> {
    objects: ResourceObjectBuilder<'r>,
    policy: &'r dyn FieldPolicy,
    links: &'r dyn LinkBuilder,
    included: IncludedCollector<'r>,
}

impl<'r> ResponseAssembler<'r> {
    pub fn new(
        objects: ResourceObjectBuilder<'r>,
        policy: &'r dyn FieldPolicy,
        links: &'r dyn LinkBuilder,
    ) -> Self {
        Self {
            objects,
            policy,
            links,
            included: IncludedCollector::new(objects, policy, links),
        }
    }

    /// One primary resource: attributes, every allowed relationship that
    /// survives pruning, resource links. Requested chains are expanded into
    /// the collector as a side effect.
    pub fn build_resource(&mut self, entity: EntityRef<'_>, includes: &Includes) -> Result<ResourceObject> {
        let context = self.objects.graph().context_of(entity)?;
        let attributes = self.policy.allowed_attributes(context, None)?;
        let relationships = self.policy.allowed_relationships(context, None)?;

        let mut resource = self.objects.build(entity, &attributes, &relationships)?;
        let identifier = resource.identifier();

        for relationship in &relationships {
            match self.build_relationship_entry(relationship, entity, &identifier, includes)? {
                Some(entry) => {
                    resource.relationships.insert(relationship.name().to_owned(), entry);
                }
                None => {
                    resource.relationships.shift_remove(relationship.name());
                }
            }
        }

        resource.links = self.links.resource_links(&identifier.resource_type, &identifier.id);
        Ok(resource)
    }

    /// Entry for `relationship` on `entity`, or `None` when it would be empty
    /// (no linkage, no links) and must be omitted.
    pub fn build_relationship_entry(
        &mut self,
        relationship: &RelationshipDescriptor,
        entity: EntityRef<'_>,
        owner: &ResourceIdentifier,
        includes: &Includes,
    ) -> Result<Option<RelationshipEntry>> {
        let resolved = self.objects.linkage(relationship, entity)?;

        let continuations = includes.continuations(relationship);
        if !continuations.is_empty() && resolved.data.has_resource() {
            debug!(
                owner = %owner,
                relationship = relationship.name(),
                related = resolved.related.len(),
                chains = continuations.len(),
                "including related resources"
            );
            for related in &resolved.related {
                for continuation in &continuations {
                    self.included.include(relationship, *related, continuation.hops())?;
                }
            }
        }

        let links = self.links.relationship_links(relationship, owner);
        if links.is_none() && resolved.data.is_unset() {
            trace!(owner = %owner, relationship = relationship.name(), "omitting empty relationship");
            return Ok(None);
        }
        Ok(Some(RelationshipEntry::unpopulated().with_data(resolved.data).with_links(links)))
    }

    /// Finalize the included set.
    pub fn into_included(self) -> Vec<ResourceObject> {
        self.included.build()
    }
}
