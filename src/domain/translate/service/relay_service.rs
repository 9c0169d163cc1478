// src/domain/translate/service/relay_service.rs
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::translate::dto::translation_request::{TranslationRequest, ValidatedTranslation};
use crate::domain::translate::dto::upstream_chat_payload::UpstreamChatPayload;
use crate::errors::{internal_error, RelayError};

/// Upstream bodies that fail to parse are echoed back cut to this many chars.
pub const DETAILS_EXCERPT_CHARS: usize = 200;
const DEFAULT_UPSTREAM_ERROR: &str = "API request failed";

/// Raw upstream JSON returned on success, passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub body: String,
}

/// Forwards translation requests to the caller-chosen chat-completion endpoint.
pub struct RelayService {
    client: Client,
}

impl RelayService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn relay(&self, payload: TranslationRequest) -> Result<RelayReply, RelayError> {
        let request = payload.into_validated()?;
        let request_id = Uuid::new_v4();

        info!(
            %request_id,
            endpoint = %request.endpoint,
            model = %request.model,
            messages = request.messages.len(),
            "Relaying translation request"
        );

        self.forward(&request).await.map_err(|e| {
            if let RelayError::Internal(ref message) = e {
                error!(%request_id, "Translation relay failed: {}", message);
            }
            e
        })
    }

    async fn forward(&self, request: &ValidatedTranslation) -> Result<RelayReply, RelayError> {
        let body = UpstreamChatPayload {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        let resp = self
            .client
            .post(&request.endpoint)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| internal_error(redact(e.to_string(), &request.api_key)))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| internal_error(redact(e.to_string(), &request.api_key)))?;

        debug!(status = status.as_u16(), bytes = text.len(), "Upstream responded");

        let data: Value = match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(e) => {
                let details = excerpt(&text, DETAILS_EXCERPT_CHARS);
                warn!(status = status.as_u16(), "Failed to parse upstream response ({}): {}", e, details);
                return Err(RelayError::InvalidUpstreamResponse { details });
            }
        };

        if !status.is_success() {
            let message = upstream_error_message(&data);
            warn!(status = status.as_u16(), "Upstream rejected request: {}", message);
            return Err(RelayError::Upstream { status, message });
        }

        Ok(RelayReply { body: text })
    }
}

/// Pick the most specific message out of an upstream error body:
/// `error.message`, then `message`, then a generic fallback.
pub fn upstream_error_message(data: &Value) -> String {
    data.pointer("/error/message")
        .and_then(non_empty_str)
        .or_else(|| data.get("message").and_then(non_empty_str))
        .unwrap_or(DEFAULT_UPSTREAM_ERROR)
        .to_string()
}

fn non_empty_str(v: &Value) -> Option<&str> {
    v.as_str().filter(|s| !s.is_empty())
}

fn excerpt(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn redact(text: String, secret: &str) -> String {
    if secret.is_empty() || !text.contains(secret) {
        text
    } else {
        text.replace(secret, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn request_for(endpoint: &str) -> TranslationRequest {
        serde_json::from_value(json!({
            "endpoint": endpoint,
            "apiKey": "sk-live-abcdef123456",
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "You are a professional translator." },
                { "role": "user", "content": "Hello" }
            ]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn success_body_is_passed_through_verbatim() {
        let raw = r#"{ "choices": [ { "message": { "content": "Hola" } } ], "id":"x" }"#;
        let upstream = spawn_upstream(StatusCode::OK, raw).await;
        let service = RelayService::new(Client::new());

        let reply = service.relay(request_for(&upstream.url)).await.unwrap();

        assert_eq!(reply.body, raw);
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forwards_bearer_token_defaults_and_non_streaming_flag() {
        let upstream = spawn_upstream(StatusCode::OK, r#"{"choices":[]}"#).await;
        let service = RelayService::new(Client::new());

        service.relay(request_for(&upstream.url)).await.unwrap();

        let auth = upstream.last_authorization.lock().unwrap().clone();
        assert_eq!(auth.as_deref(), Some("Bearer sk-live-abcdef123456"));

        let sent = upstream.last_body.lock().unwrap().clone().unwrap();
        assert_eq!(sent["model"], "gpt-4o-mini");
        assert_eq!(sent["temperature"], 0.3);
        assert_eq!(sent["max_tokens"], 2000);
        assert_eq!(sent["stream"], false);
        assert_eq!(sent["messages"][1]["role"], "user");
        assert_eq!(sent["messages"][1]["content"], "Hello");
        assert!(sent.get("apiKey").is_none());
        assert!(sent.get("endpoint").is_none());
    }

    #[tokio::test]
    async fn extra_message_fields_are_forwarded() {
        let upstream = spawn_upstream(StatusCode::OK, r#"{"choices":[]}"#).await;
        let service = RelayService::new(Client::new());

        let req: TranslationRequest = serde_json::from_value(json!({
            "endpoint": upstream.url,
            "apiKey": "sk-live-abcdef123456",
            "model": "gpt-4o-mini",
            "messages": [ { "role": "user", "content": "x", "name": "bob" } ]
        }))
        .unwrap();
        service.relay(req).await.unwrap();

        let sent = upstream.last_body.lock().unwrap().clone().unwrap();
        assert_eq!(
            sent["messages"],
            json!([ { "role": "user", "content": "x", "name": "bob" } ])
        );
    }

    #[tokio::test]
    async fn missing_field_never_reaches_upstream() {
        let upstream = spawn_upstream(StatusCode::OK, "{}").await;
        let service = RelayService::new(Client::new());

        let mut req = request_for(&upstream.url);
        req.model = None;

        let result = service.relay(req).await;
        assert!(matches!(result, Err(RelayError::MissingFields)));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn non_json_body_becomes_bad_gateway_with_truncated_details() {
        let html = format!("<html>{}</html>", "x".repeat(500));
        let upstream = spawn_upstream(StatusCode::OK, html).await;
        let service = RelayService::new(Client::new());

        let err = service.relay(request_for(&upstream.url)).await.unwrap_err();

        match err {
            RelayError::InvalidUpstreamResponse { details } => {
                assert_eq!(details.chars().count(), DETAILS_EXCERPT_CHARS);
                assert!(details.starts_with("<html>"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_failure_status_is_propagated() {
        let upstream = spawn_upstream(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"bad key","type":"invalid_request_error"}}"#,
        )
        .await;
        let service = RelayService::new(Client::new());

        let err = service.relay(request_for(&upstream.url)).await.unwrap_err();

        match err {
            RelayError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "bad key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_upstream_is_internal_error_without_key() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = RelayService::new(Client::new());
        let err = service
            .relay(request_for(&format!("http://{addr}/v1/chat/completions")))
            .await
            .unwrap_err();

        match err {
            RelayError::Internal(message) => {
                assert!(!message.is_empty());
                assert!(!message.contains("sk-live-abcdef123456"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_message_precedence() {
        assert_eq!(
            upstream_error_message(&json!({"error": {"message": "nested"}, "message": "top"})),
            "nested"
        );
        assert_eq!(
            upstream_error_message(&json!({"error": "flat string", "message": "top"})),
            "top"
        );
        assert_eq!(upstream_error_message(&json!({"error": {}})), "API request failed");
        assert_eq!(upstream_error_message(&json!([1, 2])), "API request failed");
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let s = "é".repeat(300);
        let cut = excerpt(&s, 200);
        assert_eq!(cut.chars().count(), 200);
    }

    #[test]
    fn redact_replaces_secret() {
        assert_eq!(redact("bad sk-1 here".into(), "sk-1"), "bad *** here");
        assert_eq!(redact("plain".into(), ""), "plain");
    }
}
