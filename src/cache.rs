//! Per-graph memo of computed invariants.

use fxhash::FxHashMap;

/// Tags for the invariants that are memoized per graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invariant {
    ChromaticNumber,
    EdgeChromaticNumber,
    MinEdgeCut,
}

/// A memoized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Count(usize),
    Edges(Vec<(usize, usize)>),
}

/// Unbounded memo table, living next to the graph it describes. Entries are
/// written once per tag and never invalidated; the graph they were computed
/// against cannot change.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    entries: FxHashMap<Invariant, CachedValue>,
}

impl ResultCache {

    pub fn new() -> Self {
        ResultCache {
            entries: FxHashMap::default(),
        }
    }

    /// Checks if a value for `tag` was saved.
    pub fn check(&self, tag: Invariant) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Returns the saved value for `tag`, if any.
    pub fn recall(&self, tag: Invariant) -> Option<&CachedValue> {
        self.entries.get(&tag)
    }

    /// Saves `value` under `tag`.
    pub fn save(&mut self, tag: Invariant, value: CachedValue) {
        self.entries.insert(tag, value);
    }

}
