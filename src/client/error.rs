use thiserror::Error;

/// Failures surfaced to the user by the translation client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please enter text to translate")]
    EmptySourceText,

    #[error("Please configure your API key in settings")]
    MissingApiKey,

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Cannot swap when auto-detect is selected")]
    CannotSwapAutoDetect,

    /// Relay answered with a non-success status.
    #[error("{message}")]
    Relay { status: u16, message: String },

    #[error("Unexpected API response format. Please check your API configuration.")]
    UnexpectedFormat,

    #[error("{0}")]
    Transport(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ClientError {
    /// Local validation failures never reach the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::EmptySourceText
                | ClientError::MissingApiKey
                | ClientError::UnknownLanguage(_)
                | ClientError::CannotSwapAutoDetect
        )
    }
}
