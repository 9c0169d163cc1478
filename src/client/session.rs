use std::fmt;

use anyhow::Context;
use tracing::{debug, info, warn};

use crate::core::persistence::preferences::preference_store_trait::PreferenceStore;

use super::error::ClientError;
use super::formality::Formality;
use super::language::{is_known, next_language, AUTO_DETECT_CODE, DEFAULT_TARGET_CODE};
use super::prompt::{build_translation_request, PromptOptions};
use super::response::extract_translation;
use super::settings::{
    TranslationSettings, CUSTOM_PROMPT_KEY, DRAFT_KEY, FORMALITY_KEY, SETTINGS_KEY,
};
use super::transport::RelayTransport;

/// Soft limit on source text length.
pub const CHAR_LIMIT: usize = 5000;
const WARNING_THRESHOLD: usize = 4000;
const CRITICAL_THRESHOLD: usize = 4500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCountLevel {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub count: usize,
    pub limit: usize,
}

impl CharCount {
    pub fn level(&self) -> CharCountLevel {
        if self.count > CRITICAL_THRESHOLD {
            CharCountLevel::Critical
        } else if self.count > WARNING_THRESHOLD {
            CharCountLevel::Warning
        } else {
            CharCountLevel::Normal
        }
    }
}

impl fmt::Display for CharCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.count, self.limit)
    }
}

/// State behind one translation form, with explicit commands in place of UI events.
///
/// `translate` borrows the session mutably, so only one request can be in
/// flight per session.
pub struct TranslatorSession<S, T> {
    store: S,
    transport: T,
    settings: TranslationSettings,
    source_language: String,
    target_language: String,
    formality: Formality,
    custom_instruction: String,
    source_text: String,
    translation: Option<String>,
}

impl<S, T> TranslatorSession<S, T>
where
    S: PreferenceStore,
    T: RelayTransport,
{
    /// Restore settings, tone preferences and any saved draft from `store`.
    pub fn load(store: S, transport: T) -> Result<Self, ClientError> {
        let settings = match store.get(SETTINGS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable saved settings: {}", e);
                TranslationSettings::default()
            }),
            None => TranslationSettings::default(),
        };

        let formality = store
            .get(FORMALITY_KEY)?
            .and_then(|code| Formality::from_code(&code))
            .unwrap_or_default();
        let custom_instruction = store.get(CUSTOM_PROMPT_KEY)?.unwrap_or_default();
        let source_text = store.get(DRAFT_KEY)?.unwrap_or_default();

        debug!(?settings, formality = formality.as_code(), "Loaded translator session");

        Ok(Self {
            store,
            transport,
            settings,
            source_language: AUTO_DETECT_CODE.into(),
            target_language: DEFAULT_TARGET_CODE.into(),
            formality,
            custom_instruction,
            source_text,
            translation: None,
        })
    }

    pub fn settings(&self) -> &TranslationSettings {
        &self.settings
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn formality(&self) -> Formality {
        self.formality
    }

    pub fn custom_instruction(&self) -> &str {
        &self.custom_instruction
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    /// True until an API key has been configured.
    pub fn needs_configuration(&self) -> bool {
        !self.settings.has_api_key()
    }

    pub fn char_count(&self) -> CharCount {
        CharCount {
            count: self.source_text.chars().count(),
            limit: CHAR_LIMIT,
        }
    }

    /// Translate the current source text.
    pub async fn translate(&mut self) -> Result<String, ClientError> {
        let text = self.source_text.trim();
        if text.is_empty() {
            return Err(ClientError::EmptySourceText);
        }
        if !self.settings.has_api_key() {
            return Err(ClientError::MissingApiKey);
        }

        let options = PromptOptions {
            source_language: &self.source_language,
            target_language: &self.target_language,
            formality: self.formality,
            custom_instruction: &self.custom_instruction,
        };
        let request = build_translation_request(&self.settings, &options, text)?;

        self.translation = None;

        let response = self.transport.submit(&request).await.map_err(|e| {
            warn!("Translation error: {}", e);
            e
        })?;
        let translation = extract_translation(&response).map_err(|e| {
            warn!(status = response.status, "Translation error: {}", e);
            e
        })?;

        info!(
            source = %self.source_language,
            target = %self.target_language,
            chars = translation.chars().count(),
            "Translation completed"
        );

        self.translation = Some(translation.clone());
        if let Err(e) = self.store.remove(DRAFT_KEY) {
            warn!("Failed to clear draft: {}", e);
        }

        Ok(translation)
    }

    /// Exchange source and target, carrying a finished translation back into the input.
    pub fn swap_languages(&mut self) -> Result<(), ClientError> {
        if self.source_language == AUTO_DETECT_CODE {
            return Err(ClientError::CannotSwapAutoDetect);
        }

        std::mem::swap(&mut self.source_language, &mut self.target_language);

        if let Some(translated) = self.translation.take().filter(|t| !t.is_empty()) {
            let previous_source = std::mem::replace(&mut self.source_text, translated);
            self.translation = Some(previous_source).filter(|s| !s.is_empty());
        }

        Ok(())
    }

    pub fn set_source_language(&mut self, code: &str) -> Result<(), ClientError> {
        if code != AUTO_DETECT_CODE && !is_known(code) {
            return Err(ClientError::UnknownLanguage(code.to_string()));
        }

        self.source_language = code.to_string();
        if code != AUTO_DETECT_CODE && code == self.target_language {
            self.target_language = next_language(code).to_string();
        }
        Ok(())
    }

    pub fn set_target_language(&mut self, code: &str) -> Result<(), ClientError> {
        if !is_known(code) {
            return Err(ClientError::UnknownLanguage(code.to_string()));
        }

        self.target_language = code.to_string();
        if self.source_language == code {
            self.source_language = AUTO_DETECT_CODE.to_string();
        }
        Ok(())
    }

    /// Replace the source text and keep it as a draft.
    pub fn set_source_text(&mut self, text: impl Into<String>) -> Result<(), ClientError> {
        self.source_text = text.into();
        self.store.set(DRAFT_KEY, &self.source_text)?;
        Ok(())
    }

    pub fn clear_source(&mut self) -> Result<(), ClientError> {
        self.source_text.clear();
        self.translation = None;
        self.store.remove(DRAFT_KEY)?;
        Ok(())
    }

    pub fn save_settings(&mut self, settings: TranslationSettings) -> Result<(), ClientError> {
        let raw = serde_json::to_string(&settings).context("Failed to encode settings")?;
        self.store.set(SETTINGS_KEY, &raw)?;
        self.settings = settings;
        info!("Settings saved successfully");
        Ok(())
    }

    pub fn set_formality(&mut self, formality: Formality) -> Result<(), ClientError> {
        self.store.set(FORMALITY_KEY, formality.as_code())?;
        self.formality = formality;
        Ok(())
    }

    pub fn set_custom_instruction(&mut self, text: impl Into<String>) -> Result<(), ClientError> {
        let text = text.into();
        self.store.set(CUSTOM_PROMPT_KEY, &text)?;
        self.custom_instruction = text;
        Ok(())
    }
}
