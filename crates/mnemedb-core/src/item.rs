//! Memory item data structure — the unit stored, scored, and archived.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current Unix timestamp in seconds.
#[must_use]
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Memory tier classification.
///
/// Tiers determine retention and access patterns, not behavior: every tier is
/// served by the same store type, tagged with its variant. Only the temporal
/// tier carries an extra ingestion capability (see `TemporalStore`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Short-term working memory.
    Immediate,
    /// Event-based long-term memory.
    Episodic,
    /// Structured facts and knowledge.
    Semantic,
    /// Time-series trends and metrics.
    Temporal,
}

impl Tier {
    /// All tiers, in canonical scan order.
    pub const ALL: [Self; 4] = [Self::Immediate, Self::Episodic, Self::Semantic, Self::Temporal];

    /// Returns the tier name as a lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Episodic => "episodic",
            Self::Semantic => "semantic",
            Self::Temporal => "temporal",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an item while it lives in an active store.
///
/// `Active` and `Consolidated` may alternate across maintenance passes.
/// Archival is positional (membership in the archive), not a field state,
/// and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryStatus {
    /// Normal in-rotation state.
    #[default]
    Active,
    /// Marked by the lifecycle manager as frequently accessed.
    Consolidated,
}

/// An item in the context store.
///
/// An item consists of:
/// - A unique identifier (unique across all tiers combined)
/// - Textual content and arbitrary JSON metadata
/// - A base importance in `[0, 1]`
/// - Access-tracking timestamps and counter
/// - An optional embedding vector (empty = no embedding)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    /// Unique identifier for the item.
    pub id: String,

    /// Textual content.
    pub content: String,

    /// Tier classification.
    pub tier: Tier,

    /// Arbitrary key-value metadata (order-irrelevant).
    #[serde(default)]
    pub metadata: JsonMap<String, JsonValue>,

    /// Base significance in `[0, 1]`. Set at creation; raised only by the
    /// explicit consolidation step, never by decay.
    pub importance: f32,

    /// Lifecycle marker maintained by the lifecycle manager.
    #[serde(default)]
    pub status: MemoryStatus,

    /// Creation timestamp (Unix seconds). Immutable after construction.
    pub created_at: i64,

    /// Last read timestamp (Unix seconds). Updated on every tracked read.
    pub last_accessed: i64,

    /// Number of tracked reads. Monotonically non-decreasing.
    pub access_count: u64,

    /// Embedding vector. Empty is the valid "no embedding" state.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl MemoryItem {
    /// Creates a new item with default importance 1.0 and no embedding.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `content` - Textual content
    /// * `tier` - Tier classification
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>, tier: Tier) -> Self {
        let now = now_secs();
        Self {
            id: id.into(),
            content: content.into(),
            tier,
            metadata: JsonMap::new(),
            importance: 1.0,
            status: MemoryStatus::Active,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            embedding: Vec::new(),
        }
    }

    /// Sets the base importance, clamped to `[0, 1]`.
    ///
    /// Non-finite input falls back to the creation default of 1.0.
    #[must_use]
    pub fn with_importance(mut self, importance: f32) -> Self {
        self.importance = clamp_unit(importance);
        self
    }

    /// Sets the embedding vector.
    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    /// Sets the metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: JsonMap<String, JsonValue>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Backdates the item to specific timestamps (Unix seconds).
    ///
    /// Useful for items that were created in the past. `last_accessed` is
    /// raised to `created_at` if it would otherwise precede it.
    #[must_use]
    pub fn with_timestamps(mut self, created_at: i64, last_accessed: i64) -> Self {
        self.created_at = created_at;
        self.last_accessed = last_accessed.max(created_at);
        self
    }

    /// Returns the dimension of the embedding vector.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }

    /// Returns true if this item carries an embedding.
    #[must_use]
    pub fn has_embedding(&self) -> bool {
        !self.embedding.is_empty()
    }

    /// Records a tracked read: bumps `last_accessed` and `access_count`.
    pub(crate) fn touch(&mut self, now: i64) {
        self.last_accessed = now.max(self.created_at);
        self.access_count = self.access_count.saturating_add(1);
    }
}

/// Clamps a value to `[0, 1]`, mapping non-finite input to 1.0.
pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        1.0
    }
}
