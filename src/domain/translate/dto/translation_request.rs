use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::chat_message::ChatMessage;
use crate::errors::RelayError;

pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Body accepted by `POST /api/translate`.
///
/// Every field is optional at the wire level so that an incomplete body is
/// reported as missing fields rather than as a decoding failure.
#[derive(Clone, Default, Serialize, Deserialize, Validate)]
pub struct TranslationRequest {
    #[validate(required, length(min = 1))]
    pub endpoint: Option<String>,

    #[serde(rename = "apiKey")]
    #[validate(required, length(min = 1))]
    pub api_key: Option<String>,

    #[validate(required, length(min = 1))]
    pub model: Option<String>,

    #[validate(required, length(min = 1))]
    pub messages: Option<Vec<ChatMessage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A request that passed validation, with defaults applied.
pub struct ValidatedTranslation {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl TranslationRequest {
    /// Decode a raw request body. An empty body counts as an empty object.
    pub fn from_body(body: &[u8]) -> Result<Self, RelayError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body).map_err(|e| RelayError::InvalidBody(e.to_string()))
    }

    pub fn into_validated(self) -> Result<ValidatedTranslation, RelayError> {
        self.validate().map_err(|_| RelayError::MissingFields)?;

        let (Some(endpoint), Some(api_key), Some(model), Some(messages)) =
            (self.endpoint, self.api_key, self.model, self.messages)
        else {
            return Err(RelayError::MissingFields);
        };

        Ok(ValidatedTranslation {
            endpoint,
            api_key,
            model,
            messages,
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }

    /// Mask the api key for safe display (keeps last 4 chars).
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_secret)
    }
}

pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        "***".into()
    } else {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }
}

impl fmt::Debug for TranslationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationRequest")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.masked_api_key())
            .field("model", &self.model)
            .field("messages", &self.messages)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
