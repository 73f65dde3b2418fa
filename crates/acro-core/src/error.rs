//! Error types for acronym translation.

/// Marker parsing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The base tag is present but the rest of the grammar is violated.
    #[error("Malformed acronym marker '{marker}': {reason}")]
    Malformed {
        /// Raw marker text.
        marker: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Error from a render backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// No irregular plural is defined and the default suffix does not apply.
    #[error("no plural rule applies to '{text}'")]
    AmbiguousPlural {
        /// Singular text that could not be pluralized.
        text: String,
    },
}

/// Acronym definition error raised by loaders.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// A required field is absent.
    #[error("Acronym '{identifier}' is missing the '{field}' field")]
    MissingField {
        /// Acronym id.
        identifier: String,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// Translation pass error.
///
/// Any of these aborts the whole pass; the document is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// Malformed marker.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The identifier is not in the acronym table.
    #[error("Unknown acronym '{identifier}' in marker '{marker}'")]
    UnknownIdentifier {
        /// Raw marker text.
        marker: String,
        /// Identifier that failed lookup.
        identifier: String,
    },

    /// Plural requested but no rule applies to the selected form.
    #[error("Cannot pluralize acronym '{identifier}' in marker '{marker}': {source}")]
    AmbiguousPluralRule {
        /// Raw marker text.
        marker: String,
        /// Acronym id.
        identifier: String,
        /// Underlying render error.
        source: RenderError,
    },
}

impl TranslateError {
    /// Raw marker text that caused the error.
    #[must_use]
    pub fn marker(&self) -> &str {
        match self {
            Self::Key(KeyError::Malformed { marker, .. })
            | Self::UnknownIdentifier { marker, .. }
            | Self::AmbiguousPluralRule { marker, .. } => marker,
        }
    }
}
