//! # jsonapi-rs: JSON:API Compound Document Builder
//!
//! Turns an already-loaded entity graph into a JSON:API response document:
//! primary `data`, per-resource `relationships` with correct linkage, and a
//! deduplicated `included` array for every requested inclusion path.
//!
//! ## Design Principles
//!
//! 1. **Schema, not reflection**: every resource type is registered once in a
//!    [`ResourceGraph`] with typed accessors for its id, attributes and
//!    relationships
//! 2. **Clean DTOs**: [`model`] is pure wire data, serialized by serde
//! 3. **Identity-keyed inclusion**: one included resource per `(type, id)`,
//!    enriched in place no matter how many chains reach it
//! 4. **Collaborators as traits**: field visibility ([`FieldPolicy`]) and
//!    link construction ([`LinkBuilder`]) are supplied by the host
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonapi_rs::{DocumentBuilder, ResourceDefinition, ResourceGraph};
//!
//! struct Person { id: String, name: String }
//! struct Article { id: String, title: String, author: Option<Person> }
//!
//! # fn example() -> jsonapi_rs::Result<()> {
//! let graph = ResourceGraph::builder()
//!     .add(
//!         ResourceDefinition::<Person>::new("people", |p| Some(p.id.clone()))
//!             .attribute("name", |p| p.name.clone()),
//!     )
//!     .add(
//!         ResourceDefinition::<Article>::new("articles", |a| Some(a.id.clone()))
//!             .attribute("title", |a| a.title.clone())
//!             .to_one("author", "people", |a| a.author.as_ref()),
//!     )
//!     .build()?;
//!
//! let article = Article {
//!     id: "1".into(),
//!     title: "JSON:API paints my bikeshed!".into(),
//!     author: Some(Person { id: "9".into(), name: "Dan".into() }),
//! };
//!
//! let includes = graph.includes("articles", ["author"])?;
//! let doc = DocumentBuilder::new(&graph).single(Some(&article), &includes)?;
//!
//! assert_eq!(doc.included.len(), 1);
//! println!("{}", doc.to_json_pretty()?);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod schema;
pub mod include;
pub mod policy;
pub mod links;
pub mod config;
pub mod builder;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    CompoundDocument, RelationshipDocument, ResourceObject, RelationshipEntry,
    ResourceIdentifier, Data, Linkage, PrimaryData, Attributes, Links, Meta,
};

// ============================================================================
// Re-exports: Schema
// ============================================================================

pub use schema::{
    ResourceGraph, ResourceGraphBuilder, ResourceDefinition, ResourceContext,
    AttributeDescriptor, RelationshipDescriptor, Cardinality, Related, EntityRef,
};

// ============================================================================
// Re-exports: Inclusion, policy, links, settings
// ============================================================================

pub use include::{InclusionChain, Includes};
pub use policy::{FieldPolicy, AllFields, SparseFieldsets};
pub use links::{LinkBuilder, NoLinks, UrlLinkBuilder};
pub use config::{SerializerSettings, LinkSettings};

// ============================================================================
// Re-exports: Builders
// ============================================================================

pub use builder::{
    DocumentBuilder, ResponseAssembler, IncludedCollector, ResourceObjectBuilder, Resolved,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Policy and schema disagree, or an entity type was never registered.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing identity: '{resource_type}' resource reached via {via} has no id")]
    MissingIdentity { resource_type: String, via: String },

    #[error("Cardinality mismatch on '{relationship}': declared {declared}, read {found}")]
    CardinalityMismatch {
        relationship: String,
        declared: Cardinality,
        found: Cardinality,
    },

    /// A relationship endpoint was asked for linkage the data layer never loaded.
    #[error("Relationship '{relationship}' was not loaded")]
    NotLoaded { relationship: String },

    #[error("Unknown field '{field}' on resource type '{resource_type}'")]
    UnknownField { resource_type: String, field: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
