use serde::{Deserialize, Serialize};

/// Tone requested for the translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Formal,
    Informal,
    #[default]
    None,
}

impl Formality {
    pub fn as_code(&self) -> &'static str {
        match self {
            Formality::Formal => "formal",
            Formality::Informal => "informal",
            Formality::None => "none",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "formal" => Some(Formality::Formal),
            "informal" => Some(Formality::Informal),
            "none" | "" => Some(Formality::None),
            _ => None,
        }
    }

    /// Sentence spliced into the system prompt, with its trailing space.
    pub fn directive(&self) -> &'static str {
        match self {
            Formality::Formal => {
                "Use formal, professional language with proper grammar and sophisticated vocabulary. "
            }
            Formality::Informal => {
                "Use casual, conversational language as if speaking to a friend. Include colloquialisms where appropriate. "
            }
            Formality::None => "",
        }
    }
}
