//! Composite relevance scoring.
//!
//! Combines three weighted terms — similarity, recency, importance — into a
//! single per-query score. Scoring is a pure function of
//! `(item, query_vector, now)`: it never touches access metadata, which is
//! what makes repeated retrieval idempotent.

use crate::error::{Error, Result};
use crate::item::MemoryItem;
use crate::similarity::SimilarityMetric;
use serde::{Deserialize, Serialize};

/// Fixed similarity used when an item has no embedding, the query vector is
/// empty, or dimensions mismatch. Recovered locally; never an error.
pub const NEUTRAL_SIMILARITY: f32 = 0.5;

const SECONDS_PER_HOUR: f32 = 3600.0;

/// Scoring weights and recency decay.
///
/// The weights are conventionally chosen to sum to 1.0 but the sum is not
/// enforced; only finiteness and non-negativity are. The final score is
/// unclamped and may exceed `[0, 1]` when weights or raw similarity do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the similarity term (w1).
    pub similarity_weight: f32,
    /// Weight of the recency term (w2).
    pub recency_weight: f32,
    /// Weight of the importance term (w3).
    pub importance_weight: f32,
    /// Recency decay constant (per idle hour).
    pub recency_lambda: f32,
    /// Similarity metric applied to embeddings.
    pub metric: SimilarityMetric,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.6,
            recency_weight: 0.2,
            importance_weight: 0.2,
            recency_lambda: 0.01,
            metric: SimilarityMetric::DotProduct,
        }
    }
}

impl ScoringConfig {
    /// Creates a scoring configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if any weight or the decay constant is negative or
    /// non-finite. Weights are NOT required to sum to 1.0.
    pub fn new(
        similarity_weight: f32,
        recency_weight: f32,
        importance_weight: f32,
        recency_lambda: f32,
    ) -> Result<Self> {
        let config = Self {
            similarity_weight,
            recency_weight,
            importance_weight,
            recency_lambda,
            metric: SimilarityMetric::default(),
        };
        config.ensure_valid()?;
        Ok(config)
    }

    /// Selects the similarity metric.
    #[must_use]
    pub fn with_metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Validates weights and decay constant.
    ///
    /// # Errors
    ///
    /// Returns an error on any negative or non-finite value.
    pub fn ensure_valid(&self) -> Result<()> {
        for (key, value) in [
            ("similarity_weight", self.similarity_weight),
            ("recency_weight", self.recency_weight),
            ("importance_weight", self.importance_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidWeight { key, value });
            }
        }
        if !self.recency_lambda.is_finite() || self.recency_lambda < 0.0 {
            return Err(Error::InvalidDecay {
                key: "recency_lambda",
                value: self.recency_lambda,
            });
        }
        Ok(())
    }

    /// Computes the similarity term for an item against a query vector.
    ///
    /// Falls back to [`NEUTRAL_SIMILARITY`] when either vector is empty, the
    /// dimensions mismatch, or the metric produces a non-finite value.
    #[must_use]
    pub fn similarity(&self, item: &MemoryItem, query_vector: &[f32]) -> f32 {
        if !item.has_embedding()
            || query_vector.is_empty()
            || item.dimension() != query_vector.len()
        {
            return NEUTRAL_SIMILARITY;
        }
        let raw = self.metric.calculate(&item.embedding, query_vector);
        if raw.is_finite() {
            raw
        } else {
            NEUTRAL_SIMILARITY
        }
    }

    /// Computes the recency term: `1 / (1 + lambda * hours_idle)`.
    ///
    /// Strictly decreasing in idle time and bounded in `(0, 1]`. Clock skew
    /// (a `last_accessed` in the future) counts as zero idle time.
    #[must_use]
    pub fn recency(&self, item: &MemoryItem, now: i64) -> f32 {
        let idle_secs = (now - item.last_accessed).max(0) as f32;
        1.0 / (1.0 + self.recency_lambda * (idle_secs / SECONDS_PER_HOUR))
    }

    /// Computes the composite relevance score at time `now`.
    ///
    /// `score = w1 * similarity + w2 * recency + w3 * importance`.
    /// Pure and side-effect-free.
    #[must_use]
    pub fn score(&self, item: &MemoryItem, query_vector: &[f32], now: i64) -> f32 {
        self.similarity_weight * self.similarity(item, query_vector)
            + self.recency_weight * self.recency(item, now)
            + self.importance_weight * item.importance
    }
}
