use std::sync::Arc;
use tracing::debug;

use crate::embedding::TextEmbedder;

use super::error::ScoringError;

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Returns `0.0` for empty or zero-norm vectors. The result is not clamped.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scores a student answer against the reference answer.
#[derive(Clone)]
pub struct SimilarityScorer {
    embedder: Arc<dyn TextEmbedder>,
}

impl std::fmt::Debug for SimilarityScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityScorer")
            .field("embedding_dim", &self.embedder.embedding_dim())
            .field("stub", &self.embedder.is_stub())
            .finish()
    }
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &Arc<dyn TextEmbedder> {
        &self.embedder
    }

    /// Similarity of `candidate` to `reference`, typically in `[-1, 1]`.
    ///
    /// A blank candidate scores exactly `0.0` and never reaches the embedder.
    pub fn score(&self, reference: &str, candidate: &str) -> Result<f32, ScoringError> {
        if candidate.trim().is_empty() {
            return Ok(0.0);
        }

        let reference_vec = self.embedder.embed(reference)?;
        let candidate_vec = self.embedder.embed(candidate)?;

        if reference_vec.len() != candidate_vec.len() {
            return Err(ScoringError::DimensionMismatch {
                reference: reference_vec.len(),
                candidate: candidate_vec.len(),
            });
        }

        let similarity = cosine_similarity(&reference_vec, &candidate_vec);
        debug!(
            reference_len = reference.len(),
            candidate_len = candidate.len(),
            similarity,
            "Scored answer"
        );

        Ok(similarity)
    }
}
