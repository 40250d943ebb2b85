use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    #[error("invalid topic: {0}")]
    InvalidTopic(String),

    #[error("failed to start QA script: {0}")]
    Spawn(String),

    #[error("QA script exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    /// Message carried by an `error` frame, passed through verbatim.
    #[error("{0}")]
    Script(String),

    #[error("processing timed out after {0}s, please try again later")]
    Timeout(u64),

    #[error("no valid result produced")]
    NoResult,

    #[error("invalid result format: {0}")]
    InvalidResult(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QaError>;

impl QaError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QaError::InvalidTopic(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            QaError::InvalidTopic(_) => "invalid topic".to_string(),
            other => format!("error processing request: {}", other),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
