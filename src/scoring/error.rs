use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("embedding dimensions differ: reference {reference}, candidate {candidate}")]
    DimensionMismatch { reference: usize, candidate: usize },
}
