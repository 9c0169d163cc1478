use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::translate::dto::translation_request::TranslationRequest;

use super::error::ClientError;

/// Path the relay serves translations on.
pub const RELAY_PATH: &str = "/api/translate";

/// Status and decoded JSON body returned by the relay. A body that is not
/// JSON decodes as `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: Value,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a built request to the relay.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn submit(&self, request: &TranslationRequest) -> Result<RelayResponse, ClientError>;
}

/// Talks to a relay over HTTP.
pub struct HttpRelayTransport {
    client: Client,
    url: String,
}

impl HttpRelayTransport {
    /// `base_url` is the relay origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), RELAY_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RelayTransport for HttpRelayTransport {
    async fn submit(&self, request: &TranslationRequest) -> Result<RelayResponse, ClientError> {
        let resp = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let text = resp
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok(RelayResponse { status, body })
    }
}
