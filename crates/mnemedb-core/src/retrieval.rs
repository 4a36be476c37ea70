//! Cross-tier retrieval: scan, score, rank, truncate.
//!
//! Retrieval is a full scan over store snapshots — no index is assumed at
//! the working-set sizes this engine targets. The scan is read-only: access
//! metadata moves only through the explicit [`RetrievalEngine::mark_accessed`]
//! step, never as a side effect of ranking.

use crate::item::{now_secs, MemoryItem};
use crate::scoring::ScoringConfig;
use crate::store::MemoryStore;
use serde::{Deserialize, Serialize};

/// A retrieval result: an item together with its per-query relevance score.
///
/// The score is transient — computed against one query at one instant and
/// never written back to the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    /// The matching item.
    pub item: MemoryItem,

    /// Composite relevance score for the query.
    pub score: f32,
}

impl ScoredItem {
    /// Creates a new scored result.
    #[must_use]
    pub const fn new(item: MemoryItem, score: f32) -> Self {
        Self { item, score }
    }
}

/// Ranks items from any number of stores against a query vector.
pub struct RetrievalEngine {
    scoring: ScoringConfig,
}

impl RetrievalEngine {
    /// Creates an engine with the given scoring configuration.
    #[must_use]
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    /// Returns the scoring configuration.
    #[must_use]
    pub const fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Retrieves the `top_k` highest-scoring items across all stores.
    ///
    /// Gathers a consistent snapshot of every store in the order given,
    /// scores each candidate at a single instant, sorts descending by score
    /// (stable — ties keep scan order), and returns the first `top_k`.
    /// Fewer candidates than `top_k` returns all of them; `top_k == 0`
    /// returns an empty vector.
    ///
    /// `query_text` is carried for trace context; ranking uses the
    /// precomputed `query_vector`.
    ///
    /// This call never mutates access metadata: two calls against unchanged
    /// stores return identical results.
    #[must_use]
    pub fn retrieve(
        &self,
        query_text: &str,
        query_vector: &[f32],
        stores: &[&MemoryStore],
        top_k: usize,
    ) -> Vec<ScoredItem> {
        let now = now_secs();
        let mut candidates: Vec<ScoredItem> = Vec::new();

        for store in stores {
            for item in store.snapshot() {
                let score = self.scoring.score(&item, query_vector, now);
                candidates.push(ScoredItem::new(item, score));
            }
        }

        let scanned = candidates.len();
        // Stable sort: equal scores retain scan order for determinism.
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(top_k);

        tracing::debug!(
            query = query_text,
            scanned,
            returned = candidates.len(),
            top_k,
            "retrieval scan complete"
        );

        candidates
    }

    /// Marks the given ids as accessed, wherever they live.
    ///
    /// This is the caller's explicit follow-up to [`Self::retrieve`]: each
    /// id found in one of the stores gets its `last_accessed` refreshed and
    /// its `access_count` incremented. Ids are unique across tiers, so the
    /// first store that holds an id wins.
    ///
    /// # Returns
    ///
    /// The number of items actually touched.
    pub fn mark_accessed<S: AsRef<str>>(&self, stores: &[&MemoryStore], ids: &[S]) -> usize {
        let mut touched = 0;
        for id in ids {
            for store in stores {
                if store.get(id.as_ref()).is_some() {
                    touched += 1;
                    break;
                }
            }
        }
        touched
    }
}
