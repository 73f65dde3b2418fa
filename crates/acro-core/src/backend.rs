//! Output format abstraction.
//!
//! A [`RenderBackend`] turns a resolved acronym reference into output text.
//! The translator and the listing generator share the same backend so
//! inline references and catalogues look alike.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;
use crate::key::Key;
use crate::table::Acronym;

/// Form chosen for an occurrence after consulting first-use state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Short,
    Long,
    Full,
}

/// Everything a backend needs to render one occurrence.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub key: &'a Key,
    pub acronym: &'a Acronym,
    pub variant: Variant,
    /// Default plural ending for definitions without an override.
    pub plural_suffix: &'a str,
}

/// Format-specific rendering.
pub trait RenderBackend {
    /// Raw format tag for hosts that distinguish raw markup from text.
    ///
    /// `None` means the output is literal text.
    const RAW_FORMAT: Option<&'static str>;

    /// Render one occurrence, without the trailing text.
    fn render(request: &RenderRequest<'_>, out: &mut String) -> Result<(), RenderError>;

    /// Render one catalogue entry in canonical singular full form.
    fn listing_entry(identifier: &str, acronym: &Acronym, out: &mut String);
}

/// Output mode selected once per translation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum OutputMode {
    /// Literal resolved text.
    #[default]
    Plain,
    /// acro package macros.
    Latex,
}

impl OutputMode {
    /// Map a pandoc output format name to a mode.
    ///
    /// `latex` and `beamer` are typeset; everything else gets plain text.
    #[must_use]
    pub fn from_pandoc_format(format: &str) -> Self {
        match format {
            "latex" | "beamer" => Self::Latex,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Latex => "latex",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "latex" => Ok(Self::Latex),
            other => Err(format!(
                "unknown output mode '{other}' (expected 'plain' or 'latex')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pandoc_format() {
        assert_eq!(OutputMode::from_pandoc_format("latex"), OutputMode::Latex);
        assert_eq!(OutputMode::from_pandoc_format("beamer"), OutputMode::Latex);
        assert_eq!(OutputMode::from_pandoc_format("html5"), OutputMode::Plain);
        assert_eq!(OutputMode::from_pandoc_format(""), OutputMode::Plain);
    }

    #[test]
    fn test_parse_output_mode() {
        assert_eq!("plain".parse::<OutputMode>(), Ok(OutputMode::Plain));
        assert_eq!("latex".parse::<OutputMode>(), Ok(OutputMode::Latex));
        assert!("html".parse::<OutputMode>().is_err());
        assert_eq!(OutputMode::Latex.to_string(), "latex");
    }
}
