//! Tier-tagged memory stores.
//!
//! A store owns its items exclusively while they are active: an item lives in
//! at most one store at a time, keyed by identifier. Reads through [`MemoryStore::get`]
//! track access metadata; scans through [`MemoryStore::snapshot`] do not, which is what
//! keeps retrieval side-effect-free.

use crate::item::{clamp_unit, now_secs, MemoryItem, MemoryStatus, Tier};
use indexmap::IndexMap;
use parking_lot::RwLock;

/// An arena of memory items for a single tier.
///
/// All operations serialize against concurrent mutation through one lock per
/// store. Iteration order is insertion order, so snapshots are deterministic
/// for an unchanged store — downstream scoring and sorting rely on that.
pub struct MemoryStore {
    tier: Tier,
    items: RwLock<IndexMap<String, MemoryItem>>,
}

impl MemoryStore {
    /// Creates an empty store for the given tier.
    #[must_use]
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            items: RwLock::new(IndexMap::new()),
        }
    }

    /// Returns the tier this store serves.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Inserts an item, overwriting any existing item with the same id
    /// (last-write-wins).
    ///
    /// # Returns
    ///
    /// The replaced item if one existed.
    pub fn insert(&self, item: MemoryItem) -> Option<MemoryItem> {
        self.items.write().insert(item.id.clone(), item)
    }

    /// Returns the item if present, recording the read.
    ///
    /// On a hit, `last_accessed` is set to now and `access_count` is
    /// incremented before the item is returned. A missing id is an expected
    /// outcome, signaled as `None`.
    pub fn get(&self, id: &str) -> Option<MemoryItem> {
        let mut items = self.items.write();
        let item = items.get_mut(id)?;
        item.touch(now_secs());
        Some(item.clone())
    }

    /// Returns the item if present, without touching access metadata.
    #[must_use]
    pub fn peek(&self, id: &str) -> Option<MemoryItem> {
        self.items.read().get(id).cloned()
    }

    /// Returns a consistent copy of all items, in insertion order.
    ///
    /// Taken under the read lock in one step, so a snapshot never observes a
    /// mid-mutation state. Does not touch access metadata.
    #[must_use]
    pub fn snapshot(&self) -> Vec<MemoryItem> {
        self.items.read().values().cloned().collect()
    }

    /// Removes an item by id. Removing an absent id is a no-op.
    ///
    /// # Returns
    ///
    /// The removed item if one existed.
    pub fn remove(&self, id: &str) -> Option<MemoryItem> {
        // shift_remove keeps insertion order intact for later snapshots
        self.items.write().shift_remove(id)
    }

    /// Marks an item as consolidated and raises its importance by `bump`,
    /// clamped to 1.0.
    ///
    /// This is the only path that ever increases importance.
    ///
    /// # Returns
    ///
    /// `false` if the id is absent.
    pub fn mark_consolidated(&self, id: &str, bump: f32) -> bool {
        let mut items = self.items.write();
        let Some(item) = items.get_mut(id) else {
            return false;
        };
        item.status = MemoryStatus::Consolidated;
        item.importance = clamp_unit(item.importance + bump);
        true
    }

    /// Returns the number of items in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns true if the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Removes all items.
    pub fn clear(&self) {
        self.items.write().clear();
    }
}

/// Temporal-tier store with metric ingestion.
///
/// Wraps a [`MemoryStore`] tagged [`Tier::Temporal`] and adds the capability
/// to synthesize items from raw `(metric, value, timestamp)` triples. The
/// derived identifier combines metric name and timestamp so successive
/// samples of the same metric never collide.
pub struct TemporalStore {
    inner: MemoryStore,
}

impl Default for TemporalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemporalStore {
    /// Creates an empty temporal store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(Tier::Temporal),
        }
    }

    /// Returns the underlying store, for retrieval and lifecycle scans.
    #[must_use]
    pub const fn store(&self) -> &MemoryStore {
        &self.inner
    }

    /// Records a metric sample taken at `timestamp` (Unix seconds).
    ///
    /// Synthesizes a memory item with id `"{metric}_{timestamp}"`, content
    /// `"{metric}: {value}"`, and the triple mirrored into metadata. The
    /// item itself is stamped with ingestion time; the sample timestamp
    /// lives in the metadata.
    ///
    /// # Returns
    ///
    /// The derived item id.
    pub fn record_metric(&self, metric: &str, value: f64, timestamp: i64) -> String {
        let id = format!("{metric}_{timestamp}");
        let mut metadata = serde_json::Map::new();
        metadata.insert("metric".to_string(), metric.into());
        metadata.insert("value".to_string(), value.into());
        metadata.insert("timestamp".to_string(), timestamp.into());

        let item = MemoryItem::new(id.clone(), format!("{metric}: {value}"), Tier::Temporal)
            .with_metadata(metadata);
        self.inner.insert(item);
        id
    }

    /// Records a metric sample stamped with the current time.
    pub fn record_metric_now(&self, metric: &str, value: f64) -> String {
        self.record_metric(metric, value, now_secs())
    }
}
