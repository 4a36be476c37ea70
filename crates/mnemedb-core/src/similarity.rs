//! Similarity metrics for embedding comparison.
//!
//! The scoring engine treats the metric as a pluggable collaborator: vectors
//! arrive precomputed, and the metric only combines them. Dot product is the
//! default and is deliberately NOT normalized — callers working with
//! unnormalized embeddings who want cosine semantics must select `Cosine`
//! explicitly.

use serde::{Deserialize, Serialize};

/// Similarity metric for embedding comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Dot product (inner product). The raw sum of pairwise products;
    /// equals cosine similarity only for pre-normalized vectors.
    #[default]
    DotProduct,

    /// Cosine similarity. Magnitude-invariant; zero-magnitude input
    /// yields 0.0.
    Cosine,
}

impl SimilarityMetric {
    /// Calculates the similarity between two equal-length vectors.
    ///
    /// # Arguments
    ///
    /// * `a` - First vector
    /// * `b` - Second vector
    ///
    /// Callers are expected to pass equal-length vectors; extra trailing
    /// components on either side are ignored.
    #[must_use]
    #[inline]
    pub fn calculate(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::DotProduct => dot(a, b),
            Self::Cosine => cosine(a, b),
        }
    }
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = dot(a, b);
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
