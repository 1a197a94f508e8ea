//! Edge deduplication - composite key per collection, first occurrence
//! wins, first-seen order preserved.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use super::types::GraphDocument;

/// Retain the first element per key.
pub fn dedupe_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = FxHashSet::default();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(key(&item)) {
            out.push(item);
        }
    }
    out
}

impl GraphDocument {
    /// Collapse duplicate relationship records in every edge collection.
    /// Idempotent: a second run is a no-op.
    pub fn dedupe_edges(&mut self) {
        let dependencies = std::mem::take(&mut self.dependencies);
        self.dependencies = dedupe_by_key(dependencies, |e| {
            (
                e.from_fqn.clone(),
                e.to_fqn.clone(),
                e.via,
                e.file.clone(),
            )
        });

        let calls = std::mem::take(&mut self.calls);
        self.calls = dedupe_by_key(calls, |e| {
            (
                e.from_owner_fqn.clone(),
                e.from_signature.clone(),
                e.to_owner_fqn.clone(),
                e.to_signature.clone(),
                e.file.clone(),
            )
        });

        let extends = std::mem::take(&mut self.extends);
        self.extends = dedupe_by_key(extends, |e| (e.child_fqn.clone(), e.parent_fqn.clone()));

        let implements = std::mem::take(&mut self.implements);
        self.implements = dedupe_by_key(implements, |e| (e.child_fqn.clone(), e.iface_fqn.clone()));
    }
}
