//! CLI error types.

use acro_config::ConfigError;
use acro_core::TranslateError;
use acro_pandoc::PandocError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pandoc(#[from] PandocError),

    #[error("{0}")]
    Translate(#[from] TranslateError),
}
