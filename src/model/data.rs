//! `Data<T>`: the "data" member shared by documents and relationship entries.
//!
//! Three states matter on the wire:
//!
//! | State | Document | Relationship entry |
//! |-------|----------|--------------------|
//! | `Unset` | `"data": null` | key omitted |
//! | `Single(None)` | `"data": null` | `"data": null` |
//! | `Single(Some(x))` / `Many(v)` | object / array | object / array |
//!
//! Keeping "never assigned" as its own variant means the populated flag and
//! the value can never disagree.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use super::{ResourceIdentifier, ResourceObject};

/// Single-or-many data with an explicit "not populated" state.
#[derive(Debug, Clone, PartialEq)]
pub enum Data<T> {
    /// Never assigned.
    Unset,
    /// To-one: the related resource, or `None` when known to be absent.
    Single(Option<T>),
    /// To-many: possibly empty, order preserved.
    Many(Vec<T>),
}

/// Primary data of a compound document.
pub type PrimaryData = Data<ResourceObject>;

/// Linkage of a relationship entry.
pub type Linkage = Data<ResourceIdentifier>;

impl<T> Data<T> {
    /// True once a value (including an explicit null) has been assigned.
    pub fn is_populated(&self) -> bool {
        !matches!(self, Data::Unset)
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Data::Unset)
    }

    /// Populated and pointing at at least one concrete resource.
    pub fn has_resource(&self) -> bool {
        match self {
            Data::Unset | Data::Single(None) => false,
            Data::Single(Some(_)) => true,
            Data::Many(items) => !items.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Data::Unset | Data::Single(None) => 0,
            Data::Single(Some(_)) => 1,
            Data::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Data::Unset | Data::Single(None) => Default::default(),
            Data::Single(Some(item)) => std::slice::from_ref(item).iter(),
            Data::Many(items) => items.iter(),
        }
    }
}

impl<T> Default for Data<T> {
    fn default() -> Self {
        Data::Unset
    }
}

/// `Unset` serializes as `null`; containers that must omit it (relationship
/// entries) skip the field with `Data::is_unset`.
impl<T: Serialize> Serialize for Data<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Data::Unset | Data::Single(None) => serializer.serialize_none(),
            Data::Single(Some(item)) => item.serialize(serializer),
            Data::Many(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}
