//! `TieredMemory` - unified store bundle for one agent process.
//!
//! Owns one store per tier and routes items by their tier tag. The retrieval
//! engine, lifecycle manager, and shared context stay separate, injectable
//! collaborators — pass `stores()` to whichever needs to scan.

use crate::item::{MemoryItem, Tier};
use crate::store::{MemoryStore, TemporalStore};

/// The four tier stores of a single agent process.
///
/// Identifiers are unique across all tiers combined: cross-tier lookups
/// visit tiers in canonical order and stop at the first hit.
pub struct TieredMemory {
    immediate: MemoryStore,
    episodic: MemoryStore,
    semantic: MemoryStore,
    temporal: TemporalStore,
}

impl Default for TieredMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl TieredMemory {
    /// Creates an empty store bundle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            immediate: MemoryStore::new(Tier::Immediate),
            episodic: MemoryStore::new(Tier::Episodic),
            semantic: MemoryStore::new(Tier::Semantic),
            temporal: TemporalStore::new(),
        }
    }

    /// Returns the immediate (working) store.
    #[must_use]
    pub const fn immediate(&self) -> &MemoryStore {
        &self.immediate
    }

    /// Returns the episodic store.
    #[must_use]
    pub const fn episodic(&self) -> &MemoryStore {
        &self.episodic
    }

    /// Returns the semantic store.
    #[must_use]
    pub const fn semantic(&self) -> &MemoryStore {
        &self.semantic
    }

    /// Returns the temporal store, with its metric-ingestion capability.
    #[must_use]
    pub const fn temporal(&self) -> &TemporalStore {
        &self.temporal
    }

    /// Returns the store serving a tier.
    #[must_use]
    pub const fn store(&self, tier: Tier) -> &MemoryStore {
        match tier {
            Tier::Immediate => &self.immediate,
            Tier::Episodic => &self.episodic,
            Tier::Semantic => &self.semantic,
            Tier::Temporal => self.temporal.store(),
        }
    }

    /// Returns all stores in canonical tier order, for retrieval and
    /// lifecycle scans.
    #[must_use]
    pub const fn stores(&self) -> [&MemoryStore; 4] {
        [
            &self.immediate,
            &self.episodic,
            &self.semantic,
            self.temporal.store(),
        ]
    }

    /// Inserts an item into the store matching its tier tag
    /// (last-write-wins on duplicate id).
    ///
    /// # Returns
    ///
    /// The replaced item if one existed.
    pub fn insert(&self, item: MemoryItem) -> Option<MemoryItem> {
        self.store(item.tier).insert(item)
    }

    /// Looks an id up across all tiers, recording the read on a hit.
    pub fn get(&self, id: &str) -> Option<MemoryItem> {
        self.stores().iter().find_map(|store| store.get(id))
    }

    /// Looks an id up across all tiers without touching access metadata.
    #[must_use]
    pub fn peek(&self, id: &str) -> Option<MemoryItem> {
        self.stores().iter().find_map(|store| store.peek(id))
    }

    /// Removes an id from whichever tier holds it. Absent ids are a no-op.
    pub fn remove(&self, id: &str) -> Option<MemoryItem> {
        self.stores().iter().find_map(|store| store.remove(id))
    }

    /// Returns the total item count across all tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores().iter().map(|store| store.len()).sum()
    }

    /// Returns true if every tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores().iter().all(|store| store.is_empty())
    }

    /// Clears every tier.
    pub fn clear(&self) {
        for store in self.stores() {
            store.clear();
        }
    }
}
