//! `acro expand` command implementation.

use std::io::Write;
use std::path::PathBuf;

use acro_config::CliSettings;
use acro_core::OutputMode;
use clap::Args;

use super::{SourceArgs, translate_text};
use crate::error::CliError;

/// Arguments for the expand command.
#[derive(Args)]
pub(crate) struct ExpandArgs {
    /// Text document, optionally with YAML front matter.
    file: PathBuf,

    /// Output format: plain or latex (overrides config).
    #[arg(short, long)]
    format: Option<OutputMode>,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ExpandArgs {
    /// Expand markers and print the document body.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or any marker fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let settings = CliSettings {
            format: self.format,
            ..CliSettings::default()
        };
        let config = self.source.load_config(settings)?;
        let translated = translate_text(&self.file, &config)?;

        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", translated.document)?;
        stdout.flush()?;
        Ok(())
    }
}
