//! Bearer-token sessions for logged-in teachers.
//!
//! Tokens are random UUIDs handed out at login. The store only keeps their
//! BLAKE3 hash, mapped to the teacher id, and forgets idle sessions after the
//! configured TTL.

use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use moka::sync::Cache;
use tracing::debug;

use super::error::GatewayError;
use super::state::HandlerState;

/// In-memory session table keyed by token hash.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<[u8; 32], i64>,
}

impl SessionStore {
    const DEFAULT_CAPACITY: u64 = 10_000;

    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(Self::DEFAULT_CAPACITY)
                .time_to_idle(ttl)
                .build(),
        }
    }

    /// Starts a session for `teacher_id` and returns its bearer token.
    pub fn issue(&self, teacher_id: i64) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(token_key(&token), teacher_id);
        debug!(teacher_id, "Session issued");
        token
    }

    /// Teacher id for a live token, refreshing its idle timer.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        self.sessions.get(&token_key(token))
    }

    pub fn revoke(&self, token: &str) {
        self.sessions.invalidate(&token_key(token));
    }
}

fn token_key(token: &str) -> [u8; 32] {
    *blake3::hash(token.as_bytes()).as_bytes()
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Extractor for handlers that need a logged-in teacher.
#[derive(Debug, Clone)]
pub struct AuthenticatedTeacher {
    pub teacher_id: i64,
    pub token: String,
}

impl FromRequestParts<HandlerState> for AuthenticatedTeacher {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &HandlerState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(GatewayError::Unauthorized)?;
        let teacher_id = state
            .sessions
            .resolve(token)
            .ok_or(GatewayError::Unauthorized)?;

        Ok(Self {
            teacher_id,
            token: token.to_string(),
        })
    }
}
