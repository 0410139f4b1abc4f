//! Embedding + model utilities.
//!
//! - [`minilm`] provides sentence embeddings (BERT / all-MiniLM-L6-v2 layout).
//! - [`TextEmbedder`] is the seam the scorer depends on, so tests can count
//!   or replace model calls.

/// BERT sentence encoder with mean pooling.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// MiniLM sentence embedder.
pub mod minilm;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use minilm::{EmbedderConfig, MINILM_EMBEDDING_DIM, MINILM_MAX_SEQ_LEN, MiniLmEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use mock::CountingEmbedder;

/// Text -> fixed-length vector, loaded once per process.
pub trait TextEmbedder: Send + Sync {
    /// Embeds a single string.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Output vector length.
    fn embedding_dim(&self) -> usize;

    /// Returns `true` when no real model is loaded.
    fn is_stub(&self) -> bool;
}
