//! YAML acronym definitions.
//!
//! Definitions map an identifier to its fields:
//!
//! ```yaml
//! ml:
//!   long: machine learning
//!   short: ML
//! options:
//!   first-style: short
//! ```
//!
//! The same mapping may appear under an `acronyms` key in a document's
//! YAML front matter.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use acro_core::AcronymMetadata;

use crate::ConfigError;

/// Front matter key holding acronym definitions.
const FRONT_MATTER_KEY: &str = "acronyms";

/// Document split into optional YAML front matter and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// YAML between the `---` delimiters, if present.
    pub yaml: Option<&'a str>,
    /// Everything after the closing delimiter.
    pub body: &'a str,
}

impl FrontMatter<'_> {
    /// Acronym definitions from the `acronyms` key.
    ///
    /// Returns empty metadata if there is no front matter or no such key.
    ///
    /// # Errors
    ///
    /// Returns error if the front matter is malformed.
    pub fn acronyms(&self) -> Result<AcronymMetadata, ConfigError> {
        let Some(yaml) = self.yaml.filter(|y| !y.trim().is_empty()) else {
            return Ok(AcronymMetadata::new());
        };
        let root: Value = serde_yaml::from_str(yaml)?;
        match root.get(FRONT_MATTER_KEY) {
            Some(Value::Mapping(map)) => metadata_from_mapping(map),
            Some(Value::Null) | None => Ok(AcronymMetadata::new()),
            Some(_) => Err(ConfigError::Validation(format!(
                "front matter '{FRONT_MATTER_KEY}' must be a mapping"
            ))),
        }
    }
}

/// Split leading `---` delimited YAML front matter from a document.
///
/// The closing delimiter is a line consisting of `---` or `...`. Without a
/// complete front matter block the whole input is the body.
#[must_use]
pub fn split_front_matter(content: &str) -> FrontMatter<'_> {
    let no_front_matter = FrontMatter {
        yaml: None,
        body: content,
    };

    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return no_front_matter;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "---" || trimmed == "..." {
            return FrontMatter {
                yaml: Some(&rest[..offset]),
                body: &rest[offset + line.len()..],
            };
        }
        offset += line.len();
    }
    no_front_matter
}

/// Parse a standalone acronym definitions file.
///
/// Empty content yields empty metadata.
///
/// # Errors
///
/// Returns error if the YAML is malformed or a definition is incomplete.
pub fn parse_acronyms_yaml(content: &str) -> Result<AcronymMetadata, ConfigError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(AcronymMetadata::new());
    }
    let map: Mapping = serde_yaml::from_str(trimmed)?;
    metadata_from_mapping(&map)
}

/// Read and parse an acronym definitions file.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed.
pub fn load_acronyms_file(path: &Path) -> Result<AcronymMetadata, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let metadata = parse_acronyms_yaml(&content)?;
    tracing::debug!(
        path = %path.display(),
        count = metadata.table.count(),
        "Loaded acronym definitions"
    );
    Ok(metadata)
}

fn metadata_from_mapping(map: &Mapping) -> Result<AcronymMetadata, ConfigError> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        let identifier = scalar(key)
            .ok_or_else(|| ConfigError::Validation("acronym identifier must be a scalar".into()))?;
        let Value::Mapping(fields) = value else {
            return Err(ConfigError::Validation(format!(
                "acronym '{identifier}' must be a mapping of fields"
            )));
        };
        let mut pairs = Vec::with_capacity(fields.len());
        for (field, field_value) in fields {
            let (Some(field), Some(field_value)) = (scalar(field), scalar(field_value)) else {
                return Err(ConfigError::Validation(format!(
                    "acronym '{identifier}' has a non-scalar field"
                )));
            };
            pairs.push((field, field_value));
        }
        entries.push((identifier, pairs));
    }
    Ok(AcronymMetadata::from_entries(entries)?)
}

/// Stringify a scalar YAML value.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_definitions() {
        let yaml = r#"
ml:
  long: machine learning
  short: ML
poi:
  long: point of interest
  short: POI
  long-plural-form: points of interest
  foreign: "Punkt"
"#;
        let metadata = parse_acronyms_yaml(yaml).unwrap();
        assert_eq!(metadata.table.count(), 2);
        let poi = metadata.table.lookup("poi").unwrap();
        assert_eq!(poi.long_plural_form.as_deref(), Some("points of interest"));
        assert_eq!(poi.extra.get("foreign").map(String::as_str), Some("Punkt"));
    }

    #[test]
    fn test_parse_options_are_stringified() {
        let yaml = "options:\n  single: true\n  list-style: 2\n";
        let metadata = parse_acronyms_yaml(yaml).unwrap();
        assert!(metadata.table.is_empty());
        assert_eq!(metadata.options.get("single"), Some("true"));
        assert_eq!(metadata.options.get("list-style"), Some("2"));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_acronyms_yaml("  \n").unwrap().table.is_empty());
    }

    #[test]
    fn test_parse_missing_short_is_definition_error() {
        let err = parse_acronyms_yaml("ml:\n  long: machine learning\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::Definition(_)),
            "Expected ConfigError::Definition, got {err:?}"
        );
    }

    #[test]
    fn test_parse_non_scalar_field_is_rejected() {
        let err = parse_acronyms_yaml("ml:\n  long: [a, b]\n  short: ML\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse_acronyms_yaml("ml: [invalid yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_split_front_matter() {
        let doc = "---\ntitle: Paper\n---\nBody ac:ml\n";
        let front = split_front_matter(doc);
        assert_eq!(front.yaml, Some("title: Paper\n"));
        assert_eq!(front.body, "Body ac:ml\n");
    }

    #[test]
    fn test_split_front_matter_dots_terminator() {
        let front = split_front_matter("---\na: 1\n...\ntext");
        assert_eq!(front.yaml, Some("a: 1\n"));
        assert_eq!(front.body, "text");
    }

    #[test]
    fn test_split_without_front_matter() {
        let front = split_front_matter("Just text --- here\n");
        assert_eq!(front.yaml, None);
        assert_eq!(front.body, "Just text --- here\n");
    }

    #[test]
    fn test_split_unterminated_front_matter() {
        let doc = "---\ntitle: Paper\nno end";
        let front = split_front_matter(doc);
        assert_eq!(front.yaml, None);
        assert_eq!(front.body, doc);
    }

    #[test]
    fn test_front_matter_acronyms() {
        let doc = "---\ntitle: Paper\nacronyms:\n  ml:\n    long: machine learning\n    short: ML\n---\nac:ml\n";
        let metadata = split_front_matter(doc).acronyms().unwrap();
        assert_eq!(metadata.table.lookup("ml").unwrap().long, "machine learning");
    }

    #[test]
    fn test_front_matter_without_acronyms_key() {
        let metadata = split_front_matter("---\ntitle: Paper\n---\n")
            .acronyms()
            .unwrap();
        assert!(metadata.table.is_empty());
    }

    #[test]
    fn test_load_acronyms_file_not_found() {
        let result = load_acronyms_file(Path::new("/nonexistent/acronyms.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
