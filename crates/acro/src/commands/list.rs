//! `acro list` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use acro_config::{CliSettings, Config};
use acro_core::{AcronymMetadata, ListFilter, ListSort, OutputMode, UsageRegistry, list};
use acro_pandoc::{AcroFilter, PandocDocument};
use clap::Args;

use super::{SourceArgs, translate_text};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// Document to scan: pandoc JSON (`.json`) or text with front matter.
    /// Without a document, every definition from the acronyms file is listed.
    file: Option<PathBuf>,

    /// List every defined acronym.
    #[arg(long, conflicts_with = "used")]
    all: bool,

    /// List only acronyms used in the document.
    #[arg(long)]
    used: bool,

    /// Listing order: alphabetical or first-use (overrides config).
    #[arg(short, long)]
    sort: Option<ListSort>,

    /// Output format: plain or latex (overrides config).
    #[arg(short, long)]
    format: Option<OutputMode>,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ListArgs {
    /// Print one listing entry per line.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or translated.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let settings = CliSettings {
            format: self.format,
            filter: self.filter_override(),
            sort: self.sort,
            ..CliSettings::default()
        };
        let config = self.source.load_config(settings)?;

        let (metadata, registry, filter) = match &self.file {
            Some(path) => {
                let (metadata, registry) = scan(path, &config)?;
                (metadata, registry, config.listing.filter)
            }
            None => {
                if self.used {
                    Output::new().warning("No document given, nothing is used");
                }
                let filter = if self.used {
                    ListFilter::Used
                } else {
                    ListFilter::All
                };
                (config.load_acronyms()?, UsageRegistry::new(), filter)
            }
        };

        let mut stdout = std::io::stdout().lock();
        let entries = list(
            &metadata.table,
            &registry,
            config.output.format,
            filter,
            config.listing.sort,
        );
        for entry in entries {
            writeln!(stdout, "{}", entry.text)?;
        }
        stdout.flush()?;
        Ok(())
    }

    fn filter_override(&self) -> Option<ListFilter> {
        if self.all {
            Some(ListFilter::All)
        } else if self.used {
            Some(ListFilter::Used)
        } else {
            None
        }
    }
}

/// Translate a document and return its definitions and usage.
fn scan(path: &Path, config: &Config) -> Result<(AcronymMetadata, UsageRegistry), CliError> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let input = std::fs::read_to_string(path)?;
        let filtered = AcroFilter::new(config.output.format)
            .with_translator_config(config.translator_config())
            .with_silent(config.acronyms_resolved.silent)
            .with_acronyms(config.load_acronyms()?)
            .run(PandocDocument::from_json(&input)?)?;
        Ok((filtered.metadata, filtered.registry))
    } else {
        let translated = translate_text(path, config)?;
        Ok((translated.metadata, translated.registry))
    }
}
