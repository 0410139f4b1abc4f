use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the sentence encoder or embedding text.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// A required model file is missing.
    #[error("embedding model file not found: {path}")]
    ModelNotFound { path: PathBuf },

    /// Model files exist but could not be parsed or mapped.
    #[error("failed to load embedding model: {reason}")]
    ModelLoadFailed { reason: String },

    /// The forward pass or pooling failed.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
