//! Stateful translation pass.
//!
//! Walks a document in reading order, resolves every marker against the
//! acronym table and renders it with the active backend.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::backend::{OutputMode, RenderBackend, RenderRequest, Variant};
use crate::document::{Document, Inline, NodeId};
use crate::error::TranslateError;
use crate::key::{Form, Key};
use crate::latex::LatexBackend;
use crate::plain::PlainBackend;
use crate::registry::{UsageClass, UsageRegistry};
use crate::replacements::Replacements;
use crate::table::{AcronymTable, DEFAULT_PLURAL_SUFFIX};

/// Translation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Whether LONG/SHORT/FULL markers consume the first use.
    ///
    /// Default: `true`
    pub forced_forms_mark_used: bool,
    /// Render acronyms referenced only once in their long form.
    ///
    /// Default: `false`
    pub single: bool,
    /// Plural ending for definitions without an override.
    ///
    /// Default: `"s"`
    pub plural_suffix: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslatorConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            forced_forms_mark_used: true,
            single: false,
            plural_suffix: DEFAULT_PLURAL_SUFFIX.to_owned(),
        }
    }

    /// Set whether forced forms consume the first use.
    #[must_use]
    pub fn with_forced_forms_mark_used(mut self, enabled: bool) -> Self {
        self.forced_forms_mark_used = enabled;
        self
    }

    /// Enable or disable the single-use policy.
    #[must_use]
    pub fn with_single(mut self, enabled: bool) -> Self {
        self.single = enabled;
        self
    }

    /// Set the default plural ending.
    #[must_use]
    pub fn with_plural_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.plural_suffix = suffix.into();
        self
    }
}

/// A parsed marker awaiting resolution.
struct PendingMarker<'d> {
    node: NodeId,
    raw: &'d str,
    key: Key,
}

/// Acronym translator with a pluggable output backend.
///
/// Owns the usage registry for its pass; reuse across documents requires
/// [`reset`](Self::reset).
///
/// # Example
///
/// ```
/// use acro_core::{Acronym, AcronymTable, PlainBackend, TokenDocument, Translator};
///
/// let table = AcronymTable::new().with("ml", Acronym::new("machine learning", "ML"));
/// let mut translator = Translator::<PlainBackend>::new(&table);
///
/// let doc = TokenDocument::parse("ac:ml then acs:ml and Aacf:ml");
/// let doc = translator.translate(doc).unwrap();
/// assert_eq!(
///     doc.to_string(),
///     "machine learning (ML) then ML and Machine learning (ML)"
/// );
/// ```
pub struct Translator<'a, B: RenderBackend> {
    table: &'a AcronymTable,
    registry: UsageRegistry,
    config: TranslatorConfig,
    _backend: PhantomData<B>,
}

impl<'a, B: RenderBackend> Translator<'a, B> {
    /// Create a translator with default configuration.
    #[must_use]
    pub fn new(table: &'a AcronymTable) -> Self {
        Self::with_config(table, TranslatorConfig::default())
    }

    /// Create a translator with custom configuration.
    #[must_use]
    pub fn with_config(table: &'a AcronymTable, config: TranslatorConfig) -> Self {
        Self {
            table,
            registry: UsageRegistry::new(),
            config,
            _backend: PhantomData,
        }
    }

    /// Usage state accumulated so far.
    #[must_use]
    pub fn registry(&self) -> &UsageRegistry {
        &self.registry
    }

    /// Consume the translator, keeping its usage state.
    #[must_use]
    pub fn into_registry(self) -> UsageRegistry {
        self.registry
    }

    /// Forget usage state before translating an unrelated document.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// Translate a document.
    ///
    /// Either every marker is replaced or, on the first error, the document
    /// is dropped and the registry keeps its previous state.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError`] for malformed markers, unknown identifiers
    /// and plurals no rule applies to.
    pub fn translate<D: Document>(&mut self, mut document: D) -> Result<D, TranslateError> {
        let replacements = self.plan(&document)?;
        document.apply(replacements);
        Ok(document)
    }

    /// Resolve every marker of a document without touching it.
    fn plan<D: Document>(&mut self, document: &D) -> Result<Replacements, TranslateError> {
        let markers = parse_markers(document)?;
        if markers.is_empty() {
            return Ok(Replacements::new());
        }

        let counts = if self.config.single {
            count_references(&markers)
        } else {
            HashMap::new()
        };

        let mut registry = self.registry.clone();
        let mut replacements = Replacements::new();
        for marker in &markers {
            let inline = self.resolve(&mut registry, &counts, marker)?;
            replacements.add(marker.node, inline);
        }

        tracing::info!(
            markers = markers.len(),
            acronyms = registry.len(),
            "Translated acronym markers"
        );
        self.registry = registry;
        Ok(replacements)
    }

    fn resolve(
        &self,
        registry: &mut UsageRegistry,
        counts: &HashMap<&str, usize>,
        marker: &PendingMarker<'_>,
    ) -> Result<Inline, TranslateError> {
        let key = &marker.key;
        let id = key.identifier.as_str();
        let acronym = self
            .table
            .lookup(id)
            .ok_or_else(|| TranslateError::UnknownIdentifier {
                marker: marker.raw.to_owned(),
                identifier: key.identifier.clone(),
            })?;

        let usage = if !key.counted {
            registry.classify(id)
        } else if key.form == Form::Auto || self.config.forced_forms_mark_used {
            registry.record_and_classify(id)
        } else {
            registry.note(id);
            registry.classify(id)
        };

        let variant = match (key.form, usage) {
            (Form::Short, _) | (Form::Auto, UsageClass::Repeat) => Variant::Short,
            (Form::Long, _) => Variant::Long,
            (Form::Full, _) => Variant::Full,
            (Form::Auto, UsageClass::First)
                if self.config.single && counts.get(id).copied().unwrap_or(0) <= 1 =>
            {
                Variant::Long
            }
            (Form::Auto, UsageClass::First) => Variant::Full,
        };

        let mut out = String::new();
        B::render(
            &RenderRequest {
                key,
                acronym,
                variant,
                plural_suffix: &self.config.plural_suffix,
            },
            &mut out,
        )
        .map_err(|source| TranslateError::AmbiguousPluralRule {
            marker: marker.raw.to_owned(),
            identifier: key.identifier.clone(),
            source,
        })?;
        out.push_str(&key.trailing);

        tracing::debug!(marker = marker.raw, ?variant, ?usage, "Resolved acronym");
        Ok(match B::RAW_FORMAT {
            Some(format) => Inline::raw(format, out),
            None => Inline::Text(out),
        })
    }
}

fn parse_markers<D: Document>(document: &D) -> Result<Vec<PendingMarker<'_>>, TranslateError> {
    let mut markers = Vec::new();
    for token in document.tokens() {
        if let Some(key) = Key::parse(token.text)? {
            markers.push(PendingMarker {
                node: token.node,
                raw: token.text,
                key,
            });
        }
    }
    Ok(markers)
}

/// Count counted references per identifier for the single-use policy.
fn count_references<'m>(markers: &'m [PendingMarker<'_>]) -> HashMap<&'m str, usize> {
    let mut counts = HashMap::new();
    for marker in markers.iter().filter(|m| m.key.counted) {
        *counts.entry(marker.key.identifier.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Translate a document with the backend selected by `mode`.
///
/// Returns the translated document and the usage state of the pass.
///
/// # Errors
///
/// See [`Translator::translate`].
pub fn translate_document<D: Document>(
    document: D,
    table: &AcronymTable,
    mode: OutputMode,
    config: TranslatorConfig,
) -> Result<(D, UsageRegistry), TranslateError> {
    match mode {
        OutputMode::Plain => run::<PlainBackend, D>(document, table, config),
        OutputMode::Latex => run::<LatexBackend, D>(document, table, config),
    }
}

fn run<B: RenderBackend, D: Document>(
    document: D,
    table: &AcronymTable,
    config: TranslatorConfig,
) -> Result<(D, UsageRegistry), TranslateError> {
    let mut translator = Translator::<B>::with_config(table, config);
    let document = translator.translate(document)?;
    Ok((document, translator.into_registry()))
}
