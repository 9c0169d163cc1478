use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;
use crate::domain::translate::dto::translation_request::TranslationRequest;
use crate::domain::translate::service::relay_service::RelayReply;
use crate::errors::RelayError;

pub struct TranslateController;

impl TranslateController {
    /// `POST /api/translate`
    ///
    /// The body is decoded by hand so that a missing `Content-Type` or a
    /// partial object still yields the relay's own error envelope.
    pub async fn translate(
        State(state): State<AppState>,
        body: Bytes,
    ) -> Result<RelayReply, RelayError> {
        let payload = TranslationRequest::from_body(&body)?;
        state.relay_service.relay(payload).await
    }

    pub async fn method_not_allowed() -> RelayError {
        RelayError::MethodNotAllowed
    }
}

impl IntoResponse for RelayReply {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}
