//! CLI command implementations.

pub(crate) mod expand;
pub(crate) mod filter;
pub(crate) mod list;

use std::path::{Path, PathBuf};

use acro_config::{CliSettings, Config, split_front_matter};
use acro_core::{AcronymMetadata, OutputMode, TokenDocument, UsageRegistry, translate_document};
use clap::Args;

use crate::error::CliError;

pub(crate) use expand::ExpandArgs;
pub(crate) use filter::FilterArgs;
pub(crate) use list::ListArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover acro.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML file with acronym definitions (overrides config).
    #[arg(short, long)]
    acronyms: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SourceArgs {
    /// Load config with `settings`, adding the acronyms file override.
    pub(crate) fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            acronyms_file: self.acronyms.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// A text document after translation.
pub(crate) struct TranslatedText {
    pub document: TokenDocument,
    pub metadata: AcronymMetadata,
    pub registry: UsageRegistry,
}

/// Translate a text file with optional front matter.
///
/// Front matter definitions override those from the configured file. The
/// front matter itself is not part of the output.
pub(crate) fn translate_text(path: &Path, config: &Config) -> Result<TranslatedText, CliError> {
    let content = std::fs::read_to_string(path)?;
    let front = split_front_matter(&content);

    let mut metadata = config.load_acronyms()?;
    metadata.merge(front.acronyms()?);

    if !config.acronyms_resolved.silent {
        for problem in metadata.options.validate() {
            tracing::warn!("acro option: {problem}");
        }
    }

    let mode: OutputMode = config.output.format;
    let single = config.usage.single || metadata.options.single();
    let translator = config.translator_config().with_single(single);

    let (document, registry) = translate_document(
        TokenDocument::parse(front.body),
        &metadata.table,
        mode,
        translator,
    )?;
    tracing::info!(
        path = %path.display(),
        %mode,
        markers = registry.snapshot().values().sum::<usize>(),
        "Expanded document"
    );

    Ok(TranslatedText {
        document,
        metadata,
        registry,
    })
}
