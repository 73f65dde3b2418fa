//! Acronym marker parsing.
//!
//! Parses marker tokens: `[A]ac[l|s|f][p][*]:identifier[trailing]`

use std::fmt;

use crate::error::KeyError;

/// Base tag selecting the acronym marker family.
const BASE_TAG: &str = "ac";
/// Explicit capitalization prefix (`Aacf:ml`).
const CAPITALIZE_PREFIX: char = 'A';
const PLURAL_SUFFIX: char = 'p';
const UNCOUNTED_SUFFIX: char = '*';
const DELIMITER: char = ':';

/// Requested form of an acronym.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Form {
    /// Defer to first-use state: full form first, short form after.
    #[default]
    Auto,
    /// Abbreviation only.
    Short,
    /// Spelled-out form only.
    Long,
    /// `long (short)`.
    Full,
}

impl Form {
    fn from_suffix(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'l' => Some(Self::Long),
            's' => Some(Self::Short),
            'f' => Some(Self::Full),
            _ => None,
        }
    }

    /// Suffix letter shared by the marker syntax and the acro macros.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Auto => "",
            Self::Short => "s",
            Self::Long => "l",
            Self::Full => "f",
        }
    }
}

/// Parsed acronym marker.
///
/// # Example
///
/// ```
/// use acro_core::{Form, Key};
///
/// let key = Key::parse("Acfp:ml's").unwrap().unwrap();
/// assert_eq!(key.identifier, "ml");
/// assert_eq!(key.form, Form::Full);
/// assert!(key.plural);
/// assert!(key.capitalize);
/// assert_eq!(key.trailing, "'s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// Acronym id referenced by the marker.
    pub identifier: String,
    /// Requested form.
    pub form: Form,
    /// Pluralize the rendered form.
    pub plural: bool,
    /// Uppercase the first character of the rendered form.
    pub capitalize: bool,
    /// Whether this occurrence advances first-use state (`false` for `*`).
    pub counted: bool,
    /// Text after the identifier, re-emitted verbatim.
    pub trailing: String,
}

impl Key {
    /// Create an AUTO key for `identifier`.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            form: Form::Auto,
            plural: false,
            capitalize: false,
            counted: true,
            trailing: String::new(),
        }
    }

    /// Parse a raw token.
    ///
    /// Returns `Ok(None)` when the token is not a marker at all; such tokens
    /// are left untouched by the translator.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Malformed`] when the marker header is present but
    /// the identifier is missing, or when the header suffix is not
    /// `[l|s|f][p][*]`.
    pub fn parse(token: &str) -> Result<Option<Self>, KeyError> {
        let Some((capitalize, header)) = split_base_tag(token) else {
            reject_invalid_suffix(token)?;
            return Ok(None);
        };

        let after = header.rest;
        let end = after
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(after.len());
        if end == 0 {
            return Err(KeyError::Malformed {
                marker: token.to_owned(),
                reason: "missing identifier",
            });
        }

        Ok(Some(Self {
            identifier: after[..end].to_owned(),
            form: header.form,
            plural: header.plural,
            capitalize,
            counted: header.counted,
            trailing: after[end..].to_owned(),
        }))
    }

    /// Check whether a token looks like a marker without validating it.
    #[must_use]
    pub fn is_marker(token: &str) -> bool {
        split_base_tag(token).is_some()
    }
}

impl fmt::Display for Key {
    /// Canonical marker syntax for this key.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.capitalize {
            f.write_str("A")?;
        }
        f.write_str(BASE_TAG)?;
        f.write_str(self.form.suffix())?;
        if self.plural {
            write!(f, "{PLURAL_SUFFIX}")?;
        }
        if !self.counted {
            write!(f, "{UNCOUNTED_SUFFIX}")?;
        }
        write!(f, "{DELIMITER}{}{}", self.identifier, self.trailing)
    }
}

/// Marker header: everything between the base tag and the identifier.
struct Header<'a> {
    form: Form,
    plural: bool,
    counted: bool,
    rest: &'a str,
}

/// Split the base tag and header off a token.
///
/// Tries the explicit `A` prefix first (`Aacs:x`), then the bare base tag
/// whose own first letter carries the capitalization (`Acs:x`).
fn split_base_tag(token: &str) -> Option<(bool, Header<'_>)> {
    if let Some(rest) = token.strip_prefix(CAPITALIZE_PREFIX)
        && let Some(after_tag) = strip_prefix_ignore_case(rest, BASE_TAG)
        && let Some(header) = parse_header(after_tag)
    {
        return Some((true, header));
    }

    let after_tag = strip_prefix_ignore_case(token, BASE_TAG)?;
    let header = parse_header(after_tag)?;
    let capitalize = token.starts_with(|c: char| c.is_uppercase());
    Some((capitalize, header))
}

/// Parse `[l|s|f][p][*]:` and return what follows the delimiter.
fn parse_header(s: &str) -> Option<Header<'_>> {
    let mut rest = s;

    let form = rest.chars().next().and_then(Form::from_suffix);
    if form.is_some() {
        rest = &rest[1..];
    }

    let plural = rest.starts_with(|c: char| c.eq_ignore_ascii_case(&PLURAL_SUFFIX));
    if plural {
        rest = &rest[1..];
    }

    let counted = !rest.starts_with(UNCOUNTED_SUFFIX);
    if !counted {
        rest = &rest[1..];
    }

    let rest = rest.strip_prefix(DELIMITER)?;
    Some(Header {
        form: form.unwrap_or_default(),
        plural,
        counted,
        rest,
    })
}

/// Reject `ac<letters>:identifier` tokens whose suffix run did not parse.
///
/// A letter run with nothing identifier-like after the delimiter stays plain
/// text, so prose such as `Accounts:` passes through.
fn reject_invalid_suffix(token: &str) -> Result<(), KeyError> {
    let prefixed = token
        .strip_prefix(CAPITALIZE_PREFIX)
        .and_then(|rest| strip_prefix_ignore_case(rest, BASE_TAG));
    let bare = strip_prefix_ignore_case(token, BASE_TAG);

    for after_tag in prefixed.into_iter().chain(bare) {
        let Some((suffix, rest)) = after_tag.split_once(DELIMITER) else {
            continue;
        };
        if suffix
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == UNCOUNTED_SUFFIX)
            && rest.starts_with(is_identifier_char)
        {
            return Err(KeyError::Malformed {
                marker: token.to_owned(),
                reason: "invalid suffix",
            });
        }
    }
    Ok(())
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Identifiers contain only alphanumeric characters, hyphens, and underscores.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_ok(token: &str) -> Key {
        Key::parse(token).unwrap().unwrap()
    }

    #[test]
    fn test_plain_auto_marker() {
        assert_eq!(parse_ok("ac:ml"), Key::new("ml"));
    }

    #[test]
    fn test_form_suffixes() {
        assert_eq!(parse_ok("acl:ml").form, Form::Long);
        assert_eq!(parse_ok("acs:ml").form, Form::Short);
        assert_eq!(parse_ok("acf:ml").form, Form::Full);
        assert_eq!(parse_ok("ac:ml").form, Form::Auto);
    }

    #[test]
    fn test_plural_suffix_alone_and_with_form() {
        let key = parse_ok("acp:ml");
        assert_eq!(key.form, Form::Auto);
        assert!(key.plural);

        let key = parse_ok("acsp:ml");
        assert_eq!(key.form, Form::Short);
        assert!(key.plural);
    }

    #[test]
    fn test_explicit_capitalize_prefix() {
        let key = parse_ok("Aacf:ml");
        assert!(key.capitalize);
        assert_eq!(key.form, Form::Full);
        assert_eq!(key.identifier, "ml");
    }

    #[test]
    fn test_capitalized_base_tag() {
        let key = parse_ok("Acf:ml");
        assert!(key.capitalize);
        assert_eq!(key.form, Form::Full);

        let key = parse_ok("ACSP:ml");
        assert!(key.capitalize);
        assert_eq!(key.form, Form::Short);
        assert!(key.plural);
    }

    #[test]
    fn test_only_leading_letter_is_case_sensitive() {
        let key = parse_ok("aCS:ml");
        assert!(!key.capitalize);
        assert_eq!(key.form, Form::Short);
    }

    #[test]
    fn test_uncounted_suffix() {
        let key = parse_ok("acfp*:ml");
        assert!(!key.counted);
        assert!(key.plural);
        assert_eq!(key.form, Form::Full);
        assert!(parse_ok("ac:ml").counted);
    }

    #[test]
    fn test_trailing_is_captured_verbatim() {
        assert_eq!(parse_ok("ac:ml.").trailing, ".");
        assert_eq!(parse_ok("ac:ml's").trailing, "'s");
        assert_eq!(parse_ok("ac:ml),").trailing, "),");
        assert_eq!(parse_ok("ac:ml").trailing, "");
    }

    #[test]
    fn test_identifier_charset() {
        let key = parse_ok("ac:rest-api_v2!");
        assert_eq!(key.identifier, "rest-api_v2");
        assert_eq!(key.trailing, "!");

        let key = parse_ok("ac:über.");
        assert_eq!(key.identifier, "über");
    }

    #[test]
    fn test_not_a_marker() {
        assert_eq!(Key::parse("regular").unwrap(), None);
        assert_eq!(Key::parse("").unwrap(), None);
        assert_eq!(Key::parse("actually").unwrap(), None);
        assert_eq!(Key::parse("acquire").unwrap(), None);
        assert_eq!(Key::parse("actually:").unwrap(), None);
        assert_eq!(Key::parse("Accounts:").unwrap(), None);
        assert_eq!(Key::parse("ac-ml").unwrap(), None);
        assert_eq!(Key::parse("Xac:ml").unwrap(), None);
        assert_eq!(Key::parse("a:ml").unwrap(), None);
        assert_eq!(Key::parse(" ac:ml").unwrap(), None);
    }

    #[test]
    fn test_missing_identifier_is_malformed() {
        let err = Key::parse("ac:").unwrap_err();
        assert_eq!(
            err,
            KeyError::Malformed {
                marker: "ac:".to_owned(),
                reason: "missing identifier",
            }
        );
        assert!(Key::parse("acs:.").is_err());
        assert!(Key::parse("Aacfp*:").is_err());
    }

    fn invalid_suffix(marker: &str) -> KeyError {
        KeyError::Malformed {
            marker: marker.to_owned(),
            reason: "invalid suffix",
        }
    }

    #[test]
    fn test_conflicting_forms_are_malformed() {
        assert_eq!(Key::parse("acfs:ml").unwrap_err(), invalid_suffix("acfs:ml"));
        assert_eq!(Key::parse("Aacls:ml").unwrap_err(), invalid_suffix("Aacls:ml"));
    }

    #[test]
    fn test_plural_before_form_is_malformed() {
        assert_eq!(Key::parse("acpl:ml").unwrap_err(), invalid_suffix("acpl:ml"));
        assert_eq!(Key::parse("ac*p:ml").unwrap_err(), invalid_suffix("ac*p:ml"));
    }

    #[test]
    fn test_unknown_suffix_letters_are_malformed() {
        assert_eq!(Key::parse("acsx:ml").unwrap_err(), invalid_suffix("acsx:ml"));
        assert_eq!(Key::parse("acq:ml").unwrap_err(), invalid_suffix("acq:ml"));
        assert_eq!(Key::parse("acx:ml").unwrap_err(), invalid_suffix("acx:ml"));
    }

    #[test]
    fn test_is_marker() {
        assert!(Key::is_marker("ac:ml"));
        assert!(Key::is_marker("ac:"));
        assert!(!Key::is_marker("acme"));
    }

    #[test]
    fn test_display_round_trips_canonical_syntax() {
        for marker in ["ac:ml", "Aacfp*:ml.", "acl:x-y's", "acsp:id"] {
            assert_eq!(parse_ok(marker).to_string(), marker);
        }
        assert_eq!(parse_ok("ACS:ml").to_string(), "Aacs:ml");
    }
}
