use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::translate::dto::translation_request::mask_secret;

pub const SETTINGS_KEY: &str = "quickTranslateSettings";
pub const FORMALITY_KEY: &str = "quickTranslateFormality";
pub const CUSTOM_PROMPT_KEY: &str = "quickTranslateCustomPrompt";
pub const DRAFT_KEY: &str = "quickTranslateDraft";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Upstream connection settings chosen by the user.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TranslationSettings {
    pub endpoint: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    pub model: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: String::new(),
            model: DEFAULT_MODEL.into(),
        }
    }
}

/// Saved shape; any missing or blank field falls back to its default.
#[derive(Deserialize)]
struct StoredSettings {
    endpoint: Option<String>,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
    model: Option<String>,
}

impl<'de> Deserialize<'de> for TranslationSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let stored = StoredSettings::deserialize(deserializer)?;
        let defaults = TranslationSettings::default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        Ok(TranslationSettings {
            endpoint: non_empty(stored.endpoint).unwrap_or(defaults.endpoint),
            api_key: non_empty(stored.api_key).unwrap_or(defaults.api_key),
            model: non_empty(stored.model).unwrap_or(defaults.model),
        })
    }
}

impl TranslationSettings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for TranslationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &mask_secret(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}
