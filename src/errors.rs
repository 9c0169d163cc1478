use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields: endpoint, apiKey, model, or messages";

/// Failures of the relay endpoint, each mapped to the JSON envelope the
/// browser client understands.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Upstream answered with something that is not JSON.
    #[error("Invalid response from AI API")]
    InvalidUpstreamResponse { details: String },

    /// Upstream answered with JSON and a non-2xx status.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> RelayError {
    RelayError::Internal(err.to_string())
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingFields | RelayError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidUpstreamResponse { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Upstream { status, .. } => *status,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            RelayError::MissingFields => json!({ "error": MISSING_FIELDS_MESSAGE }),
            RelayError::InvalidBody(details) => json!({
                "error": "Invalid request body",
                "details": details,
            }),
            RelayError::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            RelayError::InvalidUpstreamResponse { details } => json!({
                "error": "Invalid response from AI API",
                "details": details,
            }),
            RelayError::Upstream { status, message } => json!({
                "error": message,
                "status": status.as_u16(),
            }),
            RelayError::Internal(message) => json!({
                "error": "Internal server error",
                "message": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
