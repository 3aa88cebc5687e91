//! # Document Builders
//!
//! ```text
//! DocumentBuilder ── per call ──> ResponseAssembler ──> ResourceObjectBuilder
//!                                      │                      ▲
//!                                      └──> IncludedCollector ┘
//!                                             (one per response)
//! ```
//!
//! The [`DocumentBuilder`] holds the request-independent pieces (graph,
//! policy, link builder, settings). Every `single`/`many` call starts from a
//! fresh assembler and collector, so no state leaks between responses.

pub mod resource_object;
pub mod included;
pub mod response;

use std::any::Any;

use tracing::{debug, debug_span};

use crate::config::SerializerSettings;
use crate::include::Includes;
use crate::links::{LinkBuilder, NoLinks};
use crate::model::{CompoundDocument, Data, Links, Meta, PrimaryData, RelationshipDocument};
use crate::policy::{AllFields, FieldPolicy};
use crate::schema::ResourceGraph;
use crate::{Error, Result};

pub use included::IncludedCollector;
pub use resource_object::{Resolved, ResourceObjectBuilder};
pub use response::ResponseAssembler;

/// Entry point: turns primary entities into documents.
pub struct DocumentBuilder<'r> {
    graph: &'r ResourceGraph,
    policy: &'r dyn FieldPolicy,
    link_builder: &'r dyn LinkBuilder,
    settings: SerializerSettings,
    links: Option<Links>,
    meta: Option<Meta>,
}

impl<'r> DocumentBuilder<'r> {
    /// All fields visible, no links, default settings.
    pub fn new(graph: &'r ResourceGraph) -> Self {
        Self {
            graph,
            policy: &AllFields,
            link_builder: &NoLinks,
            settings: SerializerSettings::default(),
            links: None,
            meta: None,
        }
    }

    pub fn with_policy(mut self, policy: &'r dyn FieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_link_builder(mut self, link_builder: &'r dyn LinkBuilder) -> Self {
        self.link_builder = link_builder;
        self
    }

    pub fn with_settings(mut self, settings: SerializerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Top-level `links` for every document built.
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Top-level `meta` for every document built.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Document for a single resource; `None` yields `"data": null`.
    pub fn single<E: Any>(&self, root: Option<&E>, includes: &Includes) -> Result<CompoundDocument> {
        let _span = debug_span!("single_document", includes = includes.len()).entered();
        let mut assembler = self.assembler();
        let data = match root {
            Some(entity) => Some(assembler.build_resource(entity, includes)?),
            None => None,
        };
        Ok(self.finish(Data::Single(data), assembler))
    }

    /// Document for a collection; an empty collection yields `"data": []`.
    pub fn many<'e, E, I>(&self, roots: I, includes: &Includes) -> Result<CompoundDocument>
    where
        E: Any,
        I: IntoIterator<Item = &'e E>,
    {
        let _span = debug_span!("collection_document", includes = includes.len()).entered();
        let mut assembler = self.assembler();
        let data = roots
            .into_iter()
            .map(|entity| assembler.build_resource(entity, includes))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.finish(Data::Many(data), assembler))
    }

    /// Relationship endpoint document (`/articles/1/relationships/author`):
    /// linkage only, never `included`. The relationship must be loaded.
    pub fn relationship<E: Any>(&self, entity: &E, name: &str) -> Result<RelationshipDocument> {
        let context = self.graph.context_of(entity)?;
        let relationship = context.relationship(name).ok_or_else(|| Error::UnknownField {
            resource_type: context.name().to_owned(),
            field: name.to_owned(),
        })?;

        let objects = ResourceObjectBuilder::new(self.graph, &self.settings);
        let owner = objects.identifier(entity, None)?;
        let resolved = objects.linkage(relationship, entity)?;
        if resolved.data.is_unset() {
            return Err(Error::NotLoaded { relationship: relationship.to_string() });
        }

        Ok(RelationshipDocument {
            data: resolved.data,
            links: self.link_builder.relationship_links(relationship, &owner),
            meta: self.meta.clone(),
        })
    }

    fn assembler(&self) -> ResponseAssembler<'_> {
        let objects = ResourceObjectBuilder::new(self.graph, &self.settings);
        ResponseAssembler::new(objects, self.policy, self.link_builder)
    }

    fn finish(&self, data: PrimaryData, assembler: ResponseAssembler<'_>) -> CompoundDocument {
        let included = assembler.into_included();
        debug!(primary = data.len(), included = included.len(), "document assembled");
        CompoundDocument {
            data,
            included,
            links: self.links.clone(),
            meta: self.meta.clone(),
        }
    }
}
