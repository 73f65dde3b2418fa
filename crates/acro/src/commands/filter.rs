//! `acro [FORMAT]` pandoc filter implementation.

use std::io::{Read, Write};

use acro_config::CliSettings;
use acro_core::OutputMode;
use acro_pandoc::AcroFilter;
use clap::Args;

use super::SourceArgs;
use crate::error::CliError;

/// Arguments for filter mode.
#[derive(Args)]
pub(crate) struct FilterArgs {
    /// Pandoc output format, passed by pandoc (`latex` and `beamer` emit acro macros).
    pub format: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl FilterArgs {
    /// Read pandoc JSON from stdin and write the filtered document to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, parsing or translation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let settings = CliSettings {
            format: self.format.as_deref().map(OutputMode::from_pandoc_format),
            ..CliSettings::default()
        };
        let config = self.source.load_config(settings)?;

        let filter = AcroFilter::new(config.output.format)
            .with_translator_config(config.translator_config())
            .with_listing(config.listing.filter, config.listing.sort)
            .with_silent(config.acronyms_resolved.silent)
            .with_acronyms(config.load_acronyms()?);

        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;

        let output = filter.run_json(&input)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
