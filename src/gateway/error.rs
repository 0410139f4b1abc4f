use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::GRADER_STATUS_HEADER;
use crate::grading::GradingError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("missing or expired session")]
    Unauthorized,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("upload exceeds the size limit")]
    PayloadTooLarge,

    #[error(transparent)]
    Grading(#[from] GradingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::Unauthorized | GatewayError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            GatewayError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            GatewayError::Grading(e) => match e {
                GradingError::AnswerKeyMismatch { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "answer_key_mismatch")
                }
                GradingError::InvalidConfig(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_config")
                }
                GradingError::Extraction { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "unreadable_document")
                }
                GradingError::Scoring { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "scoring_error")
                }
                GradingError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            },
            GatewayError::Storage(e) => match e {
                StorageError::DuplicateEmail { .. } => (StatusCode::CONFLICT, "duplicate_email"),
                StorageError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
                StorageError::TeacherNotFound { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
                StorageError::Sqlite(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            },
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, grader_status) = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(GRADER_STATUS_HEADER, HeaderValue::from_static(grader_status));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
