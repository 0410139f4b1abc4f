//! HTTP gateway (Axum) for teacher accounts, grading uploads and the results dashboard.
//!
//! This module is primarily used by the `grader` server binary.

#![allow(missing_docs)]

pub mod auth;
pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use auth::{AuthenticatedTeacher, SessionStore};
pub use error::GatewayError;
pub use handler::{
    add_class_handler, dashboard_handler, grade_handler, login_handler, logout_handler,
    register_handler, results_handler,
};
pub use state::HandlerState;

use crate::constants::{
    GRADER_STATUS_ERROR, GRADER_STATUS_HEADER, GRADER_STATUS_HEALTHY, GRADER_STATUS_READY,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/teachers", post(register_handler))
        .route("/api/login", post(login_handler))
        .route("/api/logout", post(logout_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/classes", post(add_class_handler))
        .route("/api/results", get(results_handler))
        .route("/api/grade", post(grade_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub database: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        GRADER_STATUS_HEADER,
        HeaderValue::from_static(GRADER_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let database_status = if state.database.ping() {
        GRADER_STATUS_READY
    } else {
        GRADER_STATUS_ERROR
    };

    let embedder_mode = if state.scorer.embedder().is_stub() {
        "stub"
    } else {
        "real"
    };

    let components = ComponentStatus {
        http: GRADER_STATUS_READY,
        database: database_status,
        embedding: GRADER_STATUS_READY,
        embedder_mode,
    };

    let is_ready = components.database == GRADER_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(
        GRADER_STATUS_HEADER,
        HeaderValue::from_static(if is_ready {
            GRADER_STATUS_READY
        } else {
            GRADER_STATUS_ERROR
        }),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
