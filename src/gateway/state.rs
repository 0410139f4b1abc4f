use std::sync::Arc;
use std::time::Duration;

use crate::extraction::DocumentText;
use crate::scoring::SimilarityScorer;
use crate::storage::Database;

use super::auth::SessionStore;

#[derive(Clone)]
pub struct HandlerState {
    pub database: Arc<Database>,

    pub scorer: Arc<SimilarityScorer>,

    pub extractor: Arc<dyn DocumentText>,

    pub sessions: SessionStore,

    pub max_upload_bytes: usize,
}

impl HandlerState {
    pub fn new(
        database: Arc<Database>,
        scorer: Arc<SimilarityScorer>,
        extractor: Arc<dyn DocumentText>,
        session_ttl: Duration,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            database,
            scorer,
            extractor,
            sessions: SessionStore::new(session_ttl),
            max_upload_bytes,
        }
    }
}
