//! Configuration management for acro.
//!
//! Parses `acro.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! Acronym definitions can live in a standalone YAML file
//! (`[acronyms] file = "..."`) or in a document's YAML front matter; see
//! [`load_acronyms_file`] and [`split_front_matter`].

mod yaml;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use acro_core::{
    AcronymMetadata, DEFAULT_PLURAL_SUFFIX, DefinitionError, ListFilter, ListSort, OutputMode,
    TranslatorConfig,
};

pub use yaml::{FrontMatter, load_acronyms_file, parse_acronyms_yaml, split_front_matter};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output format.
    pub format: Option<OutputMode>,
    /// Override acronym definitions file.
    pub acronyms_file: Option<PathBuf>,
    /// Override listing filter.
    pub filter: Option<ListFilter>,
    /// Override listing order.
    pub sort: Option<ListSort>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "acro.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,
    /// First-use tracking policy.
    pub usage: UsageConfig,
    /// Pluralization configuration.
    pub plural: PluralConfig,
    /// Acronym listing defaults.
    pub listing: ListingConfig,
    /// Acronym source configuration (paths are relative strings from TOML).
    acronyms: AcronymsConfigRaw,

    /// Resolved acronym source configuration (set after loading).
    #[serde(skip)]
    pub acronyms_resolved: AcronymsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output mode when the caller does not name one.
    pub format: OutputMode,
}

/// First-use tracking policy.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// Whether LONG/SHORT/FULL markers consume the first use.
    pub forced_forms_mark_used: bool,
    /// Render acronyms used only once in their long form.
    pub single: bool,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            forced_forms_mark_used: true,
            single: false,
        }
    }
}

/// Pluralization configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PluralConfig {
    /// Ending appended when a definition has no plural override.
    pub suffix: String,
}

impl Default for PluralConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_PLURAL_SUFFIX.to_owned(),
        }
    }
}

/// Acronym listing defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Which acronyms to list.
    pub filter: ListFilter,
    /// Listing order.
    pub sort: ListSort,
}

/// Raw acronym source configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AcronymsConfigRaw {
    file: Option<String>,
    silent: Option<bool>,
}

/// Resolved acronym source configuration with absolute paths.
#[derive(Debug, Default)]
pub struct AcronymsConfig {
    /// YAML file with shared acronym definitions.
    pub file: Option<PathBuf>,
    /// Suppress warnings about invalid package options.
    pub silent: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Invalid acronym definition.
    #[error("{0}")]
    Definition(#[from] DefinitionError),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `acro.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(format) = settings.format {
            self.output.format = format;
        }
        if let Some(file) = &settings.acronyms_file {
            self.acronyms_resolved.file = Some(file.clone());
        }
        if let Some(filter) = settings.filter {
            self.listing.filter = filter;
        }
        if let Some(sort) = settings.sort {
            self.listing.sort = sort;
        }
    }

    /// Translator policy derived from `[usage]` and `[plural]`.
    #[must_use]
    pub fn translator_config(&self) -> TranslatorConfig {
        TranslatorConfig::new()
            .with_forced_forms_mark_used(self.usage.forced_forms_mark_used)
            .with_single(self.usage.single)
            .with_plural_suffix(self.plural.suffix.clone())
    }

    /// Load the shared acronym file, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load_acronyms(&self) -> Result<AcronymMetadata, ConfigError> {
        match &self.acronyms_resolved.file {
            Some(path) => load_acronyms_file(path),
            None => Ok(AcronymMetadata::new()),
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.plural.suffix, "plural.suffix")?;
        if let Some(file) = &self.acronyms.file {
            require_non_empty(file, "acronyms.file")?;
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.acronyms_resolved = AcronymsConfig {
            file: self.acronyms.file.as_deref().map(|f| config_dir.join(f)),
            silent: self.acronyms.silent.unwrap_or(false),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.format, OutputMode::Plain);
        assert!(config.usage.forced_forms_mark_used);
        assert!(!config.usage.single);
        assert_eq!(config.plural.suffix, "s");
        assert_eq!(config.listing.filter, ListFilter::Used);
        assert_eq!(config.listing.sort, ListSort::Alphabetical);
        assert!(config.acronyms_resolved.file.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.format, OutputMode::Plain);
        assert_eq!(config.plural.suffix, "s");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[output]
format = "latex"

[usage]
forced_forms_mark_used = false
single = true

[plural]
suffix = "es"

[listing]
filter = "all"
sort = "first-use"

[acronyms]
file = "shared/acronyms.yaml"
silent = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.output.format, OutputMode::Latex);
        assert!(!config.usage.forced_forms_mark_used);
        assert!(config.usage.single);
        assert_eq!(config.plural.suffix, "es");
        assert_eq!(config.listing.filter, ListFilter::All);
        assert_eq!(config.listing.sort, ListSort::FirstUse);
        assert_eq!(
            config.acronyms_resolved.file,
            Some(PathBuf::from("/project/shared/acronyms.yaml"))
        );
        assert!(config.acronyms_resolved.silent);
    }

    #[test]
    fn test_invalid_format_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[output]\nformat = \"html\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_plural_suffix_is_invalid() {
        let config: Config = toml::from_str("[plural]\nsuffix = \"\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("plural.suffix"));
    }

    #[test]
    fn test_translator_config() {
        let config: Config =
            toml::from_str("[usage]\nsingle = true\n\n[plural]\nsuffix = \"en\"\n").unwrap();
        let translator = config.translator_config();
        assert!(translator.single);
        assert!(translator.forced_forms_mark_used);
        assert_eq!(translator.plural_suffix, "en");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            format: Some(OutputMode::Latex),
            sort: Some(ListSort::FirstUse),
            acronyms_file: Some(PathBuf::from("/tmp/acronyms.yaml")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output.format, OutputMode::Latex);
        assert_eq!(config.listing.sort, ListSort::FirstUse);
        assert_eq!(config.listing.filter, ListFilter::Used); // Unchanged
        assert_eq!(
            config.acronyms_resolved.file,
            Some(PathBuf::from("/tmp/acronyms.yaml"))
        );
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/acro.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acro.toml");
        std::fs::write(&path, "[acronyms]\nfile = \"acronyms.yaml\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.acronyms_resolved.file,
            Some(dir.path().join("acronyms.yaml"))
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("chapters").join("one");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("acro.toml"), "").unwrap();

        let found = Config::discover_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("acro.toml"));
    }

    #[test]
    fn test_load_acronyms_from_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("acronyms.yaml"),
            "ml:\n  long: machine learning\n  short: ML\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("acro.toml"),
            "[acronyms]\nfile = \"acronyms.yaml\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&dir.path().join("acro.toml")), None).unwrap();
        let metadata = config.load_acronyms().unwrap();
        assert_eq!(metadata.table.lookup("ml").unwrap().short, "ML");
    }

    #[test]
    fn test_load_acronyms_without_file_is_empty() {
        let metadata = Config::default().load_acronyms().unwrap();
        assert!(metadata.table.is_empty());
    }
}
