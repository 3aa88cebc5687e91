//! The `included` accumulator.
//!
//! Resources are stored once per `(type, id)` and mutated in place, so a
//! resource reached through several chains ends up as a single object
//! carrying the union of the linkage each chain resolved.

use hashbrown::HashSet;
use indexmap::IndexMap;
use tracing::{debug, trace};

use super::ResourceObjectBuilder;
use crate::include::InclusionChain;
use crate::links::LinkBuilder;
use crate::model::{ResourceIdentifier, ResourceObject};
use crate::policy::FieldPolicy;
use crate::schema::{EntityRef, RelationshipDescriptor};
use crate::Result;

/// Deduplicating collector of included resources. One per response.
pub struct IncludedCollector<'r> {
    objects: ResourceObjectBuilder<'r>,
    policy: &'r dyn FieldPolicy,
    links: &'r dyn LinkBuilder,
    included: IndexMap<ResourceIdentifier, ResourceObject>,
    /// `(resource, entity address, remaining chain)` triples already expanded.
    expanded: HashSet<(ResourceIdentifier, usize, InclusionChain)>,
}

impl<'r> IncludedCollector<'r> {
    pub fn new(
        objects: ResourceObjectBuilder<'r>,
        policy: &'r dyn FieldPolicy,
        links: &'r dyn LinkBuilder,
    ) -> Self {
        Self {
            objects,
            policy,
            links,
            included: IndexMap::new(),
            expanded: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn get(&self, identifier: &ResourceIdentifier) -> Option<&ResourceObject> {
        self.included.get(identifier)
    }

    /// Follow `chain` from `root`. The root itself is not added; every
    /// resource reached along the chain is.
    pub fn walk(&mut self, chain: &[RelationshipDescriptor], root: EntityRef<'_>) -> Result<()> {
        let Some((head, tail)) = chain.split_first() else {
            return Ok(());
        };
        let resolved = self.objects.linkage(head, root)?;
        for related in resolved.related {
            self.include(head, related, tail)?;
        }
        Ok(())
    }

    /// Add `entity` (reached through `via`), merge its linkage for the next
    /// hop of `remaining`, and keep walking.
    ///
    /// Recursion depth is bounded by `remaining.len()`, so cycles in the
    /// entity graph terminate. The same entity instance is expanded once per
    /// remaining chain; another instance with the same identity is still
    /// read, since the data layer may have loaded different relationships
    /// on it.
    pub fn include(
        &mut self,
        via: &RelationshipDescriptor,
        entity: EntityRef<'_>,
        remaining: &[RelationshipDescriptor],
    ) -> Result<()> {
        let index = self.get_or_create(entity, via)?;
        let Some((next, rest)) = remaining.split_first() else {
            return Ok(());
        };

        let identifier = self.included[index].identifier();
        let instance = std::ptr::from_ref(entity).cast::<()>() as usize;
        if !self.expanded.insert((identifier.clone(), instance, InclusionChain::from(remaining))) {
            trace!(resource = %identifier, relationship = %next, "chain already expanded from this entity");
            return Ok(());
        }

        // Slots exist for exactly the relationships the policy allowed.
        let Some(slot) = self.included[index].relationships.get_mut(next.name()) else {
            trace!(resource = %identifier, relationship = %next, "relationship hidden by policy");
            return Ok(());
        };
        let resolved = self.objects.linkage(next, entity)?;
        slot.merge_data(resolved.data);

        for related in resolved.related {
            self.include(next, related, rest)?;
        }
        Ok(())
    }

    /// Index of the entity's resource object, building and inserting it on
    /// first sight. Revisits return the existing object untouched.
    pub fn get_or_create(&mut self, entity: EntityRef<'_>, via: &RelationshipDescriptor) -> Result<usize> {
        let identifier = self.objects.identifier(entity, Some(via))?;
        if let Some(index) = self.included.get_index_of(&identifier) {
            return Ok(index);
        }

        let context = self.objects.graph().context_of(entity)?;
        let attributes = self.policy.allowed_attributes(context, Some(via))?;
        let relationships = self.policy.allowed_relationships(context, Some(via))?;
        let mut resource = self.objects.build(entity, &attributes, &relationships)?;
        for relationship in &relationships {
            resource.relationship_slot(relationship.name()).links =
                self.links.relationship_links(relationship, &identifier);
        }

        debug!(
            resource_type = %identifier.resource_type,
            id = %identifier.id,
            via = %via,
            "included resource"
        );
        let (index, _) = self.included.insert_full(identifier, resource);
        Ok(index)
    }

    /// Prune empty relationship entries, attach resource links, and return
    /// the resources in first-reached order.
    pub fn build(self) -> Vec<ResourceObject> {
        let links = self.links;
        self.included
            .into_values()
            .map(|mut resource| {
                resource.prune_relationships();
                resource.links = links.resource_links(&resource.resource_type, &resource.id);
                resource
            })
            .collect()
    }
}
