//! # JSON:API Wire Model
//!
//! DTOs that define the serialized shape of a response document.
//! Builders produce them, serde writes them out.
//!
//! Design rule: no policy, no schema, no entity access here.
//! This module is pure data.

pub mod identifier;
pub mod data;
pub mod relationship;
pub mod resource;
pub mod document;

pub use identifier::ResourceIdentifier;
pub use data::{Data, Linkage, PrimaryData};
pub use relationship::RelationshipEntry;
pub use resource::ResourceObject;
pub use document::{CompoundDocument, RelationshipDocument};

/// Attribute values keyed by public name, in policy order.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A `links` member (`self`, `related`, ...).
pub type Links = serde_json::Map<String, serde_json::Value>;

/// A free-form `meta` member.
pub type Meta = serde_json::Map<String, serde_json::Value>;
