//! Call-counting embedder for tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::EmbeddingError;
use super::minilm::MiniLmEmbedder;
use super::TextEmbedder;

/// Stub embedder that records how many times [`TextEmbedder::embed`] ran.
///
/// Clones share the counter, so a test can keep one handle and give the other
/// to the scorer.
#[derive(Clone)]
pub struct CountingEmbedder {
    inner: Arc<MiniLmEmbedder>,
    calls: Arc<AtomicUsize>,
}

impl CountingEmbedder {
    pub fn new() -> Result<Self, EmbeddingError> {
        Ok(Self {
            inner: Arc::new(MiniLmEmbedder::stub()?),
            calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Number of `embed` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl TextEmbedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }

    fn is_stub(&self) -> bool {
        true
    }
}
