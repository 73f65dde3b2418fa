//! The acronym filter over pandoc documents.

use serde_json::{Value, json};

use acro_core::{
    AcronymMetadata, AcronymTable, ListFilter, ListSort, OutputMode, TranslatorConfig,
    UsageRegistry, list, translate_document,
};

use crate::document::{ListingPlaceholder, PandocDocument, text_inlines};
use crate::error::PandocError;

/// Result of filtering one document.
#[derive(Debug)]
pub struct Filtered {
    /// The rewritten document.
    pub document: PandocDocument,
    /// Definitions in effect (shared file merged with document metadata).
    pub metadata: AcronymMetadata,
    /// Usage state after the pass.
    pub registry: UsageRegistry,
}

/// Expands acronym markers in pandoc documents.
///
/// # Example
///
/// ```
/// use acro_core::OutputMode;
/// use acro_pandoc::AcroFilter;
///
/// let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[]}"#;
/// let output = AcroFilter::new(OutputMode::Plain).run_json(input).unwrap();
/// assert!(output.contains("blocks"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AcroFilter {
    mode: OutputMode,
    translator: TranslatorConfig,
    filter: ListFilter,
    sort: ListSort,
    silent: bool,
    acronyms: AcronymMetadata,
}

impl AcroFilter {
    /// Create a filter for the given output mode.
    #[must_use]
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the translation policy.
    #[must_use]
    pub fn with_translator_config(mut self, config: TranslatorConfig) -> Self {
        self.translator = config;
        self
    }

    /// Set listing defaults for placeholders without their own settings.
    #[must_use]
    pub fn with_listing(mut self, filter: ListFilter, sort: ListSort) -> Self {
        self.filter = filter;
        self.sort = sort;
        self
    }

    /// Suppress warnings about invalid package options.
    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Set shared definitions; document metadata overrides them.
    #[must_use]
    pub fn with_acronyms(mut self, acronyms: AcronymMetadata) -> Self {
        self.acronyms = acronyms;
        self
    }

    /// Filter pandoc JSON text.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_json(&self, input: &str) -> Result<String, PandocError> {
        let filtered = self.run(PandocDocument::from_json(input)?)?;
        filtered.document.to_json()
    }

    /// Filter a parsed document.
    ///
    /// Documents without `acronyms` metadata pass through untouched unless
    /// shared definitions were supplied.
    ///
    /// # Errors
    ///
    /// Returns error for malformed metadata or any untranslatable marker;
    /// the document is not modified in that case.
    pub fn run(&self, document: PandocDocument) -> Result<Filtered, PandocError> {
        let own = document.acronym_metadata()?;
        if own.is_none() && self.acronyms.table.is_empty() {
            tracing::debug!("No acronyms metadata, leaving document unchanged");
            return Ok(Filtered {
                document,
                metadata: AcronymMetadata::new(),
                registry: UsageRegistry::new(),
            });
        }

        let mut metadata = self.acronyms.clone();
        if let Some(own) = own {
            metadata.merge(own);
        }

        if !self.silent {
            for problem in metadata.options.validate() {
                tracing::warn!("acro option: {problem}");
            }
        }

        let single = self.translator.single || metadata.options.single();
        let config = self.translator.clone().with_single(single);
        let (mut document, registry) =
            translate_document(document, &metadata.table, self.mode, config)?;

        if self.mode == OutputMode::Latex {
            document.add_preamble(&metadata);
        }

        let listings = document.replace_listings(|placeholder| {
            self.render_listing(placeholder, &metadata.table, &registry)
        });

        tracing::info!(
            mode = %self.mode,
            acronyms = metadata.table.count(),
            used = registry.len(),
            listings,
            "Filtered document"
        );

        Ok(Filtered {
            document,
            metadata,
            registry,
        })
    }

    fn render_listing(
        &self,
        placeholder: ListingPlaceholder,
        table: &AcronymTable,
        registry: &UsageRegistry,
    ) -> Value {
        if self.mode == OutputMode::Latex {
            return json!({ "t": "RawBlock", "c": ["latex", r"\printacronyms"] });
        }

        let filter = placeholder.filter.unwrap_or(self.filter);
        let sort = placeholder.sort.unwrap_or(self.sort);
        let items: Vec<Value> = list(table, registry, self.mode, filter, sort)
            .map(|entry| json!([{ "t": "Plain", "c": text_inlines(&entry.text) }]))
            .collect();
        json!({ "t": "BulletList", "c": items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acro_core::{Acronym, TranslateError};
    use pretty_assertions::assert_eq;

    fn meta_inlines(text: &str) -> Value {
        json!({ "t": "MetaInlines", "c": text_inlines(text) })
    }

    fn definition(long: &str, short: &str) -> Value {
        json!({ "t": "MetaMap", "c": {
            "long": meta_inlines(long),
            "short": meta_inlines(short),
        }})
    }

    fn para(words: &[&str]) -> Value {
        let mut inlines = Vec::new();
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                inlines.push(json!({ "t": "Space" }));
            }
            inlines.push(json!({ "t": "Str", "c": word }));
        }
        json!({ "t": "Para", "c": inlines })
    }

    fn document(blocks: Value) -> PandocDocument {
        PandocDocument::from_value(json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {
                "acronyms": { "t": "MetaMap", "c": {
                    "ml": definition("machine learning", "ML"),
                    "ai": definition("artificial intelligence", "AI"),
                }},
            },
            "blocks": blocks,
        }))
        .unwrap()
    }

    fn strs(value: &Value) -> Vec<String> {
        let mut out = Vec::new();
        collect_strs(value, &mut out);
        out
    }

    fn collect_strs(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Array(items) => items.iter().for_each(|item| collect_strs(item, out)),
            Value::Object(node) => match node.get("t").and_then(Value::as_str) {
                Some("Str") => out.push(node["c"].as_str().unwrap().to_owned()),
                Some("RawInline" | "RawBlock") => {
                    out.push(node["c"][1].as_str().unwrap().to_owned());
                }
                _ => {
                    if let Some(c) = node.get("c") {
                        collect_strs(c, out);
                    }
                }
            },
            _ => {}
        }
    }

    #[test]
    fn test_plain_first_use() {
        let doc = document(json!([para(&["ac:ml", "acs:ml", "Aacf:ml"])]));
        let filtered = AcroFilter::new(OutputMode::Plain).run(doc).unwrap();
        assert_eq!(
            strs(&filtered.document.as_value()["blocks"]),
            vec!["machine learning (ML)", "ML", "Machine learning (ML)"]
        );
        assert_eq!(filtered.registry.seen_count("ml"), 3);
    }

    #[test]
    fn test_latex_macros_and_preamble() {
        let doc = document(json!([para(&["Acp:ml.", "acs*:ai"])]));
        let filtered = AcroFilter::new(OutputMode::Latex).run(doc).unwrap();
        assert_eq!(
            strs(&filtered.document.as_value()["blocks"]),
            vec![r"\Acp{ml}.", r"\acs*{ai}"]
        );
        let includes = &filtered.document.meta().unwrap()["header-includes"]["c"];
        assert_eq!(includes[0]["c"][0]["c"][1], json!(r"\usepackage{acro}"));
        assert_eq!(includes.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_no_metadata_is_passthrough() {
        let doc = PandocDocument::from_value(json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [para(&["ac:ml"])],
        }))
        .unwrap();
        let filtered = AcroFilter::new(OutputMode::Plain).run(doc.clone()).unwrap();
        assert_eq!(filtered.document, doc);
        assert!(filtered.registry.is_empty());
    }

    #[test]
    fn test_shared_acronyms_without_document_metadata() {
        let doc = PandocDocument::from_value(json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {},
            "blocks": [para(&["acl:poi"])],
        }))
        .unwrap();
        let shared = AcronymMetadata {
            table: AcronymTable::new().with("poi", Acronym::new("point of interest", "POI")),
            ..AcronymMetadata::default()
        };
        let filtered = AcroFilter::new(OutputMode::Plain)
            .with_acronyms(shared)
            .run(doc)
            .unwrap();
        assert_eq!(
            strs(&filtered.document.as_value()["blocks"]),
            vec!["point of interest"]
        );
    }

    #[test]
    fn test_unknown_identifier_fails() {
        let doc = document(json!([para(&["ac:ml", "ac:nope"])]));
        let err = AcroFilter::new(OutputMode::Plain).run(doc).unwrap_err();
        assert!(
            matches!(
                err,
                PandocError::Translate(TranslateError::UnknownIdentifier { .. })
            ),
            "{err:?}"
        );
    }

    #[test]
    fn test_plain_listing_bullets() {
        let doc = document(json!([
            para(&["ac:ml", "ac:ai"]),
            { "t": "Div", "c": [["acronyms", [], [["sort", "first-use"]]], []] },
        ]));
        let filtered = AcroFilter::new(OutputMode::Plain).run(doc).unwrap();
        let listing = &filtered.document.as_value()["blocks"][1];
        assert_eq!(listing["t"], json!("BulletList"));
        assert_eq!(
            strs(listing),
            vec![
                "machine", "learning", "(ML)", "artificial", "intelligence", "(AI)",
            ]
        );
    }

    #[test]
    fn test_latex_listing_prints_acronyms() {
        let doc = document(json!([
            { "t": "Div", "c": [["acronyms", ["all"], []], []] },
        ]));
        let filtered = AcroFilter::new(OutputMode::Latex).run(doc).unwrap();
        assert_eq!(
            filtered.document.as_value()["blocks"][0],
            json!({ "t": "RawBlock", "c": ["latex", r"\printacronyms"] })
        );
    }

    #[test]
    fn test_single_option_from_metadata() {
        let doc = PandocDocument::from_value(json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {
                "acronyms": { "t": "MetaMap", "c": {
                    "ml": definition("machine learning", "ML"),
                    "options": { "t": "MetaMap", "c": {
                        "single": { "t": "MetaBool", "c": true },
                    }},
                }},
            },
            "blocks": [para(&["ac:ml"])],
        }))
        .unwrap();
        let filtered = AcroFilter::new(OutputMode::Plain).run(doc).unwrap();
        assert_eq!(
            strs(&filtered.document.as_value()["blocks"]),
            vec!["machine learning"]
        );
    }

    #[test]
    fn test_run_json_round_trip() {
        let input = r#"{"pandoc-api-version":[1,23,1],"meta":{"acronyms":{"t":"MetaMap","c":{"ml":{"t":"MetaMap","c":{"long":{"t":"MetaString","c":"machine learning"},"short":{"t":"MetaString","c":"ML"}}}}}},"blocks":[{"t":"Para","c":[{"t":"Str","c":"acs:ml"}]}]}"#;
        let output = AcroFilter::new(OutputMode::Plain).run_json(input).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["blocks"][0]["c"][0], json!({ "t": "Str", "c": "ML" }));
    }
}
