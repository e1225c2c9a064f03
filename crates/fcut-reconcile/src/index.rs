//! Selector-keyed lookup over an observed routing table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::{ContentFingerprint, ObservedModuleRecord, Selector};

/// What the live routing table says about one selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub fingerprint: ContentFingerprint,
    pub origin_address: String,
}

/// Selector -> serving module, built once per reconciliation run.
///
/// Read-only after [`RoutingIndex::build`]. Iteration order is not part of any
/// contract; callers needing order walk the observed records instead.
#[derive(Clone, Debug, Default)]
pub struct RoutingIndex {
    entries: HashMap<Selector, IndexEntry>,
}

impl RoutingIndex {
    /// Single linear pass over the observed snapshot.
    ///
    /// The observed table must route each selector to one module. If a
    /// selector shows up under two records anyway, the first record wins.
    pub fn build(observed: &[ObservedModuleRecord]) -> Self {
        let capacity = observed.iter().map(|r| r.selectors.len()).sum();
        let mut entries: HashMap<Selector, IndexEntry> = HashMap::with_capacity(capacity);

        for record in observed {
            for selector in &record.selectors {
                if let Entry::Vacant(slot) = entries.entry(selector.clone()) {
                    slot.insert(IndexEntry {
                        fingerprint: record.fingerprint.clone(),
                        origin_address: record.address.clone(),
                    });
                }
            }
        }

        Self { entries }
    }

    pub fn get(&self, selector: &Selector) -> Option<&IndexEntry> {
        self.entries.get(selector)
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.entries.contains_key(selector)
    }

    pub fn fingerprint_of(&self, selector: &Selector) -> Option<&ContentFingerprint> {
        self.entries.get(selector).map(|e| &e.fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_every_observed_selector() {
        let observed = vec![
            ObservedModuleRecord::new("0xaa", ["0x01", "0x02"], "h1"),
            ObservedModuleRecord::new("0xbb", ["0x03"], "h2"),
        ];
        let idx = RoutingIndex::build(&observed);

        assert_eq!(idx.len(), 3);
        let e = idx.get(&Selector::new("0x03")).unwrap();
        assert_eq!(e.origin_address, "0xbb");
        assert_eq!(e.fingerprint, ContentFingerprint::new("h2"));
        assert!(!idx.contains(&Selector::new("0x04")));
    }

    #[test]
    fn lookup_is_case_insensitive_through_normalisation() {
        let observed = vec![ObservedModuleRecord::new("0xaa", ["0xABCDEF01"], "h1")];
        let idx = RoutingIndex::build(&observed);
        assert!(idx.contains(&Selector::new("0xabcdef01")));
    }

    #[test]
    fn first_owner_wins_on_duplicate_ownership() {
        let observed = vec![
            ObservedModuleRecord::new("0xaa", ["0x01"], "h1"),
            ObservedModuleRecord::new("0xbb", ["0x01"], "h2"),
        ];
        let idx = RoutingIndex::build(&observed);
        assert_eq!(idx.len(), 1);
        assert_eq!(
            idx.fingerprint_of(&Selector::new("0x01")),
            Some(&ContentFingerprint::new("h1"))
        );
    }

    #[test]
    fn empty_snapshot_builds_empty_index() {
        assert!(RoutingIndex::build(&[]).is_empty());
    }
}
