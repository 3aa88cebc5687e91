//! Inclusion chains: which relationships to follow into `included`.
//!
//! A chain is root-relative: `[author, articles]` means "follow `author`
//! from the primary resource, then `articles` from each author". The set of
//! chains for a request comes from the host (parsed from `?include=`).

use std::fmt;

use smallvec::SmallVec;

use crate::schema::RelationshipDescriptor;

/// Ordered relationship hops. Most chains are a handful of hops long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InclusionChain {
    hops: SmallVec<[RelationshipDescriptor; 4]>,
}

impl InclusionChain {
    pub fn new(hops: impl IntoIterator<Item = RelationshipDescriptor>) -> Self {
        Self { hops: hops.into_iter().collect() }
    }

    pub fn hops(&self) -> &[RelationshipDescriptor] {
        &self.hops
    }

    pub fn head(&self) -> Option<&RelationshipDescriptor> {
        self.hops.first()
    }

    /// Everything after the head; empty for chains of length <= 1.
    pub fn tail(&self) -> &[RelationshipDescriptor] {
        self.hops.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Dotted form, e.g. `author.articles`.
    pub fn path(&self) -> String {
        self.hops.iter().map(RelationshipDescriptor::name).collect::<Vec<_>>().join(".")
    }
}

impl From<Vec<RelationshipDescriptor>> for InclusionChain {
    fn from(hops: Vec<RelationshipDescriptor>) -> Self {
        Self::new(hops)
    }
}

impl From<&[RelationshipDescriptor]> for InclusionChain {
    fn from(hops: &[RelationshipDescriptor]) -> Self {
        Self { hops: SmallVec::from(hops) }
    }
}

impl fmt::Display for InclusionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The requested chains of one request, duplicate-free, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Includes {
    chains: Vec<InclusionChain>,
}

impl Includes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chain. Empty and already-present chains are ignored.
    pub fn insert(&mut self, chain: InclusionChain) -> bool {
        if chain.is_empty() || self.chains.contains(&chain) {
            return false;
        }
        self.chains.push(chain);
        true
    }

    pub fn chains(&self) -> &[InclusionChain] {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Chains headed by `relationship`, with the head stripped.
    ///
    /// Empty when the relationship is not requested. A single-hop chain
    /// yields one empty continuation: include the related resource, go no
    /// further.
    pub fn continuations(&self, relationship: &RelationshipDescriptor) -> Vec<InclusionChain> {
        let mut continuations: Vec<InclusionChain> = Vec::new();
        for chain in &self.chains {
            if chain.head() != Some(relationship) {
                continue;
            }
            let continuation = InclusionChain::from(chain.tail());
            if !continuations.contains(&continuation) {
                continuations.push(continuation);
            }
        }
        continuations
    }
}

impl FromIterator<InclusionChain> for Includes {
    fn from_iter<I: IntoIterator<Item = InclusionChain>>(iter: I) -> Self {
        let mut includes = Includes::new();
        for chain in iter {
            includes.insert(chain);
        }
        includes
    }
}
