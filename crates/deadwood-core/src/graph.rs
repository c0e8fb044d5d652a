//! Reference graph: the set of identities referenced anywhere in the project.
//!
//! Only membership is tracked. Who referenced an identity, and how often, is not
//! needed by the analysis.

use crate::types::ResolvedIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of every [`ResolvedIdentity`] observed during a scan.
///
/// Built once by the scan and read-only afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGraph {
    identities: BTreeSet<ResolvedIdentity>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reference. Returns `false` if it was already present.
    pub fn insert(&mut self, identity: ResolvedIdentity) -> bool {
        self.identities.insert(identity)
    }

    /// Whether `identity` is referenced anywhere.
    pub fn contains(&self, identity: &str) -> bool {
        self.identities.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Identities in sorted order.
    pub fn sorted(&self) -> Vec<&ResolvedIdentity> {
        self.identities.iter().collect()
    }
}

impl Extend<ResolvedIdentity> for ReferenceGraph {
    fn extend<T: IntoIterator<Item = ResolvedIdentity>>(&mut self, iter: T) {
        self.identities.extend(iter);
    }
}

impl FromIterator<ResolvedIdentity> for ReferenceGraph {
    fn from_iter<T: IntoIterator<Item = ResolvedIdentity>>(iter: T) -> Self {
        Self {
            identities: iter.into_iter().collect(),
        }
    }
}
