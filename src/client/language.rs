/// Code used for automatic source-language detection.
pub const AUTO_DETECT_CODE: &str = "auto";
/// What the prompt calls the source language when it is detected automatically.
pub const AUTO_DETECT_LABEL: &str = "auto-detect";
pub const DEFAULT_TARGET_CODE: &str = "en";

/// Selectable languages, in menu order.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese (Simplified)"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("tr", "Turkish"),
    ("vi", "Vietnamese"),
    ("th", "Thai"),
    ("id", "Indonesian"),
];

pub fn display_name(code: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Name used for the source language in the prompt.
pub fn source_label(code: &str) -> Option<&'static str> {
    if code == AUTO_DETECT_CODE {
        Some(AUTO_DETECT_LABEL)
    } else {
        display_name(code)
    }
}

pub fn is_known(code: &str) -> bool {
    display_name(code).is_some()
}

/// The language after `code` in menu order, or English past the end.
pub fn next_language(code: &str) -> &'static str {
    LANGUAGES
        .iter()
        .position(|(c, _)| *c == code)
        .and_then(|i| LANGUAGES.get(i + 1))
        .map(|(c, _)| *c)
        .unwrap_or(DEFAULT_TARGET_CODE)
}
