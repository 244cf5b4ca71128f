use std::collections::HashMap;

use crate::{canonical::CanonicalFen, types::ProbeAnswer};

/// Answers received so far, keyed by canonical position.
///
/// Entries live as long as the cache itself. Nothing is evicted.
#[derive(Debug, Default, Clone)]
pub struct ResultCache {
    entries: HashMap<CanonicalFen, ProbeAnswer>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: &CanonicalFen) -> Option<&ProbeAnswer> {
        self.entries.get(position)
    }

    pub fn insert(&mut self, position: CanonicalFen, answer: ProbeAnswer) {
        self.entries.insert(position, answer);
    }

    pub fn contains(&self, position: &CanonicalFen) -> bool {
        self.entries.contains_key(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
