//! Acronym metadata as delivered by loaders.
//!
//! Loaders (YAML files, front matter, pandoc metadata) flatten their input
//! to string fields and build an [`AcronymMetadata`] from them.

use crate::error::DefinitionError;
use crate::options::PackageOptions;
use crate::table::{Acronym, AcronymTable};

/// Reserved key in the acronym map holding package options.
pub const OPTIONS_KEY: &str = "options";

/// Acronym definitions plus package options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcronymMetadata {
    pub table: AcronymTable,
    pub options: PackageOptions,
}

impl AcronymMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(id, fields)` entries. The entry named [`OPTIONS_KEY`]
    /// becomes the package options.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] for definitions lacking `long` or `short`.
    pub fn from_entries<I, F>(entries: I) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = (String, F)>,
        F: IntoIterator<Item = (String, String)>,
    {
        let mut metadata = Self::new();
        for (identifier, fields) in entries {
            if identifier == OPTIONS_KEY {
                metadata.options.merge(fields.into_iter().collect());
            } else {
                let acronym = Acronym::from_fields(&identifier, fields)?;
                metadata.table.insert(identifier, acronym);
            }
        }
        Ok(metadata)
    }

    /// Merge another set in; its definitions and options win.
    pub fn merge(&mut self, other: Self) {
        self.table.merge(other.table);
        self.options.merge(other.options);
    }
}
