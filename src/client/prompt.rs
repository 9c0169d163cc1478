use crate::domain::translate::dto::chat_message::ChatMessage;
use crate::domain::translate::dto::translation_request::{
    TranslationRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};

use super::error::ClientError;
use super::formality::Formality;
use super::language::{display_name, source_label};
use super::settings::TranslationSettings;

/// Everything besides the text itself that shapes the prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptOptions<'a> {
    pub source_language: &'a str,
    pub target_language: &'a str,
    pub formality: Formality,
    pub custom_instruction: &'a str,
}

pub fn build_system_prompt(
    source_label: &str,
    target_label: &str,
    formality: Formality,
    custom_instruction: &str,
) -> String {
    let custom = custom_instruction.trim();
    let custom = if custom.is_empty() {
        String::new()
    } else {
        format!("{} ", custom)
    };

    format!(
        "You are a professional translator. Translate the following text from {} to {}.\n\
         {}{}Provide only the translation without any explanations or additional text.\n\
         Maintain the original formatting as much as possible.",
        source_label,
        target_label,
        formality.directive(),
        custom
    )
}

/// Assemble the relay request for `text` (already trimmed by the caller).
pub fn build_translation_request(
    settings: &TranslationSettings,
    options: &PromptOptions<'_>,
    text: &str,
) -> Result<TranslationRequest, ClientError> {
    let source = source_label(options.source_language)
        .ok_or_else(|| ClientError::UnknownLanguage(options.source_language.to_string()))?;
    let target = display_name(options.target_language)
        .ok_or_else(|| ClientError::UnknownLanguage(options.target_language.to_string()))?;

    let system_prompt =
        build_system_prompt(source, target, options.formality, options.custom_instruction);

    Ok(TranslationRequest {
        endpoint: Some(settings.endpoint.clone()),
        api_key: Some(settings.api_key.clone()),
        model: Some(settings.model.clone()),
        messages: Some(vec![ChatMessage::system(system_prompt), ChatMessage::user(text)]),
        temperature: Some(DEFAULT_TEMPERATURE),
        max_tokens: Some(DEFAULT_MAX_TOKENS),
    })
}
