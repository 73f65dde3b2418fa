//! Pandoc metadata: acronym definitions in, LaTeX preamble out.

use serde_json::{Map, Value, json};

use acro_core::{Acronym, AcronymMetadata};

use crate::document::PandocDocument;
use crate::error::PandocError;

/// Metadata key holding the acronym map.
pub const ACRONYMS_KEY: &str = "acronyms";

const HEADER_INCLUDES: &str = "header-includes";

impl PandocDocument {
    /// Acronym definitions from `meta.acronyms`.
    ///
    /// Returns `None` when the document has no `acronyms` metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PandocError::InvalidMetadata`] if the map is malformed or a
    /// definition lacks `long` or `short`.
    pub fn acronym_metadata(&self) -> Result<Option<AcronymMetadata>, PandocError> {
        let Some(acronyms) = self.meta().and_then(|meta| meta.get(ACRONYMS_KEY)) else {
            return Ok(None);
        };
        let entries = meta_map(acronyms, ACRONYMS_KEY)?;

        let mut parsed = Vec::with_capacity(entries.len());
        for (identifier, fields) in entries {
            let fields = meta_map(fields, identifier)?;
            let mut pairs = Vec::with_capacity(fields.len());
            for (field, value) in fields {
                let text = stringify_meta(value).ok_or_else(|| {
                    PandocError::InvalidMetadata(format!(
                        "'{identifier}.{field}' must be text, a string or a boolean"
                    ))
                })?;
                pairs.push((field.clone(), text));
            }
            parsed.push((identifier.clone(), pairs));
        }
        Ok(Some(AcronymMetadata::from_entries(parsed)?))
    }

    /// Append the acro package setup to `header-includes`.
    ///
    /// Adds `\usepackage{acro}`, `\acsetup{...}` when options are set, and
    /// one `\DeclareAcronym` per definition.
    pub fn add_preamble(&mut self, metadata: &AcronymMetadata) {
        let mut lines = vec![r"\usepackage{acro}".to_owned()];
        lines.extend(metadata.options.acsetup());
        lines.extend(
            metadata
                .table
                .iter()
                .map(|(id, acronym)| declare_acronym(id, acronym)),
        );

        let Some(meta) = self.meta_mut() else {
            return;
        };
        let mut includes = match meta.remove(HEADER_INCLUDES) {
            Some(Value::Object(mut existing)) if is_meta(&existing, "MetaList") => {
                match existing.remove("c") {
                    Some(Value::Array(items)) => items,
                    _ => Vec::new(),
                }
            }
            Some(existing) => vec![existing],
            None => Vec::new(),
        };
        includes.extend(lines.into_iter().map(|line| {
            json!({
                "t": "MetaInlines",
                "c": [{ "t": "RawInline", "c": ["latex", line] }],
            })
        }));
        meta.insert(
            HEADER_INCLUDES.to_owned(),
            json!({ "t": "MetaList", "c": includes }),
        );
    }
}

/// `\DeclareAcronym{id}{key = {value}, ...}`.
fn declare_acronym(identifier: &str, acronym: &Acronym) -> String {
    let options: Vec<String> = acronym
        .declaration_options()
        .into_iter()
        .map(|(key, value)| format!("  {key} = {{{value}}}"))
        .collect();
    format!(
        "\\DeclareAcronym{{{identifier}}}{{\n{}\n}}",
        options.join(",\n")
    )
}

fn is_meta(node: &Map<String, Value>, kind: &str) -> bool {
    node.get("t").and_then(Value::as_str) == Some(kind)
}

fn meta_map<'a>(value: &'a Value, name: &str) -> Result<&'a Map<String, Value>, PandocError> {
    match value {
        Value::Object(node) if is_meta(node, "MetaMap") => node
            .get("c")
            .and_then(Value::as_object)
            .ok_or_else(|| PandocError::InvalidMetadata(format!("'{name}' has no entries"))),
        _ => Err(PandocError::InvalidMetadata(format!(
            "'{name}' must be a map"
        ))),
    }
}

/// Plain text of a scalar metadata value.
///
/// Lists and maps have no text and yield `None`.
pub(crate) fn stringify_meta(value: &Value) -> Option<String> {
    let node = value.as_object()?;
    let content = node.get("c");
    match node.get("t").and_then(Value::as_str)? {
        "MetaString" => content?.as_str().map(str::to_owned),
        "MetaBool" => content?.as_bool().map(|b| b.to_string()),
        "MetaInlines" => {
            let mut out = String::new();
            stringify_inlines(content?, &mut out);
            Some(out)
        }
        "MetaBlocks" => {
            let blocks = content?.as_array()?;
            let paragraphs: Vec<String> = blocks
                .iter()
                .map(|block| {
                    let mut out = String::new();
                    stringify_inlines(block, &mut out);
                    out
                })
                .collect();
            Some(paragraphs.join("\n\n"))
        }
        _ => None,
    }
}

/// Concatenate the text of inline nodes.
///
/// Bare strings are attributes or targets and are skipped.
fn stringify_inlines(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| stringify_inlines(item, out)),
        Value::Object(node) => {
            let content = node.get("c");
            match node.get("t").and_then(Value::as_str) {
                Some("Str") => out.extend(content.and_then(Value::as_str)),
                Some("Space" | "SoftBreak" | "LineBreak") => out.push(' '),
                Some("Code" | "Math" | "RawInline") => {
                    out.extend(content.and_then(|c| c.get(1)).and_then(Value::as_str));
                }
                Some("Quoted") => {
                    let quote = match content
                        .and_then(|c| c.get(0))
                        .and_then(|q| q.get("t"))
                        .and_then(Value::as_str)
                    {
                        Some("SingleQuote") => '\'',
                        _ => '"',
                    };
                    out.push(quote);
                    if let Some(inlines) = content.and_then(|c| c.get(1)) {
                        stringify_inlines(inlines, out);
                    }
                    out.push(quote);
                }
                Some("Note") => {}
                Some(_) => {
                    if let Some(children) = content {
                        stringify_inlines(children, out);
                    }
                }
                None => {}
            }
        }
        _ => {}
    }
}
