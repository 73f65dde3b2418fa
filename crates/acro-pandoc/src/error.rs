//! Error types for the pandoc host.

use acro_core::{DefinitionError, TranslateError};

/// Error returned while filtering a pandoc document.
#[derive(Debug, thiserror::Error)]
pub enum PandocError {
    /// Input or output is not valid JSON.
    #[error("invalid pandoc JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON is well-formed but not a pandoc document.
    #[error("invalid pandoc document: {0}")]
    InvalidDocument(&'static str),
    /// The `acronyms` metadata cannot be turned into definitions.
    #[error("invalid acronyms metadata: {0}")]
    InvalidMetadata(String),
    /// A marker could not be translated.
    #[error(transparent)]
    Translate(#[from] TranslateError),
}

impl From<DefinitionError> for PandocError {
    fn from(err: DefinitionError) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}
