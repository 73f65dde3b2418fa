//! Acronym definitions and the read-only lookup table.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::{DefinitionError, RenderError};

/// Default plural ending appended to singular forms.
pub const DEFAULT_PLURAL_SUFFIX: &str = "s";

/// Which half of a definition to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Long,
    Short,
}

/// A single acronym definition.
///
/// Plural overrides follow acro's conventions: `long-plural`/`short-plural`
/// are endings appended to the singular, `long-plural-form`/`short-plural-form`
/// replace the singular entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acronym {
    /// Spelled-out form.
    pub long: String,
    /// Abbreviation.
    pub short: String,
    /// Plural ending for the long form.
    pub long_plural: Option<String>,
    /// Plural ending for the short form.
    pub short_plural: Option<String>,
    /// Irregular plural of the long form.
    pub long_plural_form: Option<String>,
    /// Irregular plural of the short form.
    pub short_plural_form: Option<String>,
    /// Other declaration options, passed through to the typesetting backend.
    pub extra: BTreeMap<String, String>,
}

impl Acronym {
    /// Create a definition from its long and short forms.
    #[must_use]
    pub fn new(long: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            long: long.into(),
            short: short.into(),
            ..Default::default()
        }
    }

    /// Set the irregular plural of the long form.
    #[must_use]
    pub fn with_long_plural_form(mut self, form: impl Into<String>) -> Self {
        self.long_plural_form = Some(form.into());
        self
    }

    /// Set the irregular plural of the short form.
    #[must_use]
    pub fn with_short_plural_form(mut self, form: impl Into<String>) -> Self {
        self.short_plural_form = Some(form.into());
        self
    }

    /// Set the plural ending of the long form.
    #[must_use]
    pub fn with_long_plural(mut self, ending: impl Into<String>) -> Self {
        self.long_plural = Some(ending.into());
        self
    }

    /// Set the plural ending of the short form.
    #[must_use]
    pub fn with_short_plural(mut self, ending: impl Into<String>) -> Self {
        self.short_plural = Some(ending.into());
        self
    }

    /// Build a definition from loader fields (`long`, `short`, plural keys,
    /// anything else is kept in [`extra`](Self::extra)).
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingField`] if `long` or `short` is absent.
    pub fn from_fields<I, K, V>(identifier: &str, fields: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut long = None;
        let mut short = None;
        let mut acronym = Self::default();

        for (key, value) in fields {
            let key = key.into();
            let value = value.into();
            match key.as_str() {
                "long" => long = Some(value),
                "short" => short = Some(value),
                "long-plural" => acronym.long_plural = Some(value),
                "short-plural" => acronym.short_plural = Some(value),
                "long-plural-form" => acronym.long_plural_form = Some(value),
                "short-plural-form" => acronym.short_plural_form = Some(value),
                _ => {
                    acronym.extra.insert(key, value);
                }
            }
        }

        let missing = |field| DefinitionError::MissingField {
            identifier: identifier.to_owned(),
            field,
        };
        acronym.long = long.ok_or_else(|| missing("long"))?;
        acronym.short = short.ok_or_else(|| missing("short"))?;
        Ok(acronym)
    }

    /// Singular text of one part.
    #[must_use]
    pub fn text(&self, part: Part) -> &str {
        match part {
            Part::Long => &self.long,
            Part::Short => &self.short,
        }
    }

    /// Plural text of one part.
    ///
    /// Uses the irregular form if defined, then the ending override, then
    /// `default_suffix`. The default suffix only applies to text ending in an
    /// alphanumeric character.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::AmbiguousPlural`] when no rule applies.
    pub fn plural(&self, part: Part, default_suffix: &str) -> Result<String, RenderError> {
        let (form, ending) = match part {
            Part::Long => (&self.long_plural_form, &self.long_plural),
            Part::Short => (&self.short_plural_form, &self.short_plural),
        };
        if let Some(form) = form {
            return Ok(form.clone());
        }

        let singular = self.text(part);
        if let Some(ending) = ending {
            return Ok(format!("{singular}{ending}"));
        }

        if singular.ends_with(char::is_alphanumeric) {
            Ok(format!("{singular}{default_suffix}"))
        } else {
            Err(RenderError::AmbiguousPlural {
                text: singular.to_owned(),
            })
        }
    }

    /// Text of one part, pluralized on request.
    ///
    /// # Errors
    ///
    /// See [`plural`](Self::plural).
    pub fn render_part(
        &self,
        part: Part,
        plural: bool,
        default_suffix: &str,
    ) -> Result<String, RenderError> {
        if plural {
            self.plural(part, default_suffix)
        } else {
            Ok(self.text(part).to_owned())
        }
    }

    /// All fields as `key = value` declaration options, in a stable order.
    #[must_use]
    pub fn declaration_options(&self) -> Vec<(&str, &str)> {
        let mut options = vec![("short", self.short.as_str()), ("long", self.long.as_str())];
        let optional = [
            ("short-plural", &self.short_plural),
            ("long-plural", &self.long_plural),
            ("short-plural-form", &self.short_plural_form),
            ("long-plural-form", &self.long_plural_form),
        ];
        options.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.as_deref().map(|v| (key, v))),
        );
        options.extend(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        options
    }
}

/// Read-only lookup of acronym definitions by identifier.
///
/// Iteration is sorted by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcronymTable {
    entries: BTreeMap<String, Acronym>,
}

impl AcronymTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition.
    pub fn insert(&mut self, identifier: impl Into<String>, acronym: Acronym) {
        self.entries.insert(identifier.into(), acronym);
    }

    /// Add a definition, builder style.
    #[must_use]
    pub fn with(mut self, identifier: impl Into<String>, acronym: Acronym) -> Self {
        self.insert(identifier, acronym);
        self
    }

    /// Look up a definition.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<&Acronym> {
        self.entries.get(identifier)
    }

    /// Check whether an identifier is defined.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Number of defined identifiers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(identifier, definition)` pairs sorted by identifier.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Acronym> {
        self.entries.iter()
    }

    /// Merge another table in; its definitions win on conflict.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }
}

impl FromIterator<(String, Acronym)> for AcronymTable {
    fn from_iter<I: IntoIterator<Item = (String, Acronym)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AcronymTable {
    type Item = (&'a String, &'a Acronym);
    type IntoIter = btree_map::Iter<'a, String, Acronym>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
