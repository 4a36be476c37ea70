//! Shared context blackboard for cross-agent visibility.
//!
//! High-relevance items are surfaced here so every agent in the process can
//! see them. The broadcast threshold decision belongs to the caller, not the
//! retrieval engine — see [`broadcast_above`].

use crate::item::MemoryItem;
use crate::retrieval::ScoredItem;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A process-wide blackboard of broadcast items.
///
/// Thread-safe and explicitly owned: inject one instance wherever cross-agent
/// visibility is needed rather than reaching for a global.
pub struct SharedContext {
    blackboard: RwLock<FxHashMap<String, MemoryItem>>,
}

impl Default for SharedContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedContext {
    /// Creates an empty blackboard.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blackboard: RwLock::new(FxHashMap::default()),
        }
    }

    /// Broadcasts an item to all agents.
    ///
    /// Idempotent upsert by id: re-broadcasting replaces the existing entry.
    pub fn broadcast(&self, item: MemoryItem) {
        tracing::debug!(id = %item.id, tier = %item.tier, "broadcasting memory");
        self.blackboard.write().insert(item.id.clone(), item);
    }

    /// Returns the broadcast context for an agent.
    ///
    /// Agent-specific filtering is out of scope here: every agent sees the
    /// same global set. `agent_id` is carried for trace context.
    #[must_use]
    pub fn get_context(&self, agent_id: &str) -> Vec<MemoryItem> {
        let items: Vec<MemoryItem> = self.blackboard.read().values().cloned().collect();
        tracing::debug!(agent_id, items = items.len(), "shared context read");
        items
    }

    /// Returns true if an id has been broadcast.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.blackboard.read().contains_key(id)
    }

    /// Returns the number of broadcast items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blackboard.read().len()
    }

    /// Returns true if nothing has been broadcast.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blackboard.read().is_empty()
    }

    /// Clears the blackboard.
    pub fn clear(&self) {
        self.blackboard.write().clear();
    }
}

/// Broadcasts every result scoring strictly above `threshold`.
///
/// This is the caller-side forwarding step that keeps the retrieval engine
/// pure: retrieve first, then hand qualifying results to the sink.
///
/// # Returns
///
/// The number of items broadcast.
pub fn broadcast_above(sink: &SharedContext, results: &[ScoredItem], threshold: f32) -> usize {
    let mut sent = 0;
    for result in results {
        if result.score > threshold {
            sink.broadcast(result.item.clone());
            sent += 1;
        }
    }
    sent
}
