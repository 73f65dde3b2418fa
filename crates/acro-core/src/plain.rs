//! Plain text backend.
//!
//! Produces the resolved acronym text directly.

use crate::backend::{RenderBackend, RenderRequest, Variant};
use crate::error::RenderError;
use crate::table::{Acronym, Part};

/// Plain text render backend.
///
/// - short: `ML`
/// - long: `machine learning`
/// - full: `machine learning (ML)`
pub struct PlainBackend;

impl RenderBackend for PlainBackend {
    const RAW_FORMAT: Option<&'static str> = None;

    fn render(request: &RenderRequest<'_>, out: &mut String) -> Result<(), RenderError> {
        let RenderRequest {
            key,
            acronym,
            variant,
            plural_suffix,
        } = *request;

        let text = match variant {
            Variant::Short => acronym.render_part(Part::Short, key.plural, plural_suffix)?,
            Variant::Long => acronym.render_part(Part::Long, key.plural, plural_suffix)?,
            Variant::Full => full(
                &acronym.render_part(Part::Long, key.plural, plural_suffix)?,
                &acronym.render_part(Part::Short, key.plural, plural_suffix)?,
            ),
        };

        if key.capitalize {
            push_capitalized(&text, out);
        } else {
            out.push_str(&text);
        }
        Ok(())
    }

    fn listing_entry(_identifier: &str, acronym: &Acronym, out: &mut String) {
        out.push_str(&full(&acronym.long, &acronym.short));
    }
}

fn full(long: &str, short: &str) -> String {
    format!("{long} ({short})")
}

/// Uppercase the first character only.
fn push_capitalized(text: &str, out: &mut String) {
    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Form, Key};
    use pretty_assertions::assert_eq;

    fn render(key: &Key, acronym: &Acronym, variant: Variant) -> Result<String, RenderError> {
        let mut out = String::new();
        PlainBackend::render(
            &RenderRequest {
                key,
                acronym,
                variant,
                plural_suffix: "s",
            },
            &mut out,
        )?;
        Ok(out)
    }

    fn ml() -> Acronym {
        Acronym::new("machine learning", "ML")
    }

    #[test]
    fn test_variants() {
        let key = Key::new("ml");
        assert_eq!(render(&key, &ml(), Variant::Short).unwrap(), "ML");
        assert_eq!(
            render(&key, &ml(), Variant::Long).unwrap(),
            "machine learning"
        );
        assert_eq!(
            render(&key, &ml(), Variant::Full).unwrap(),
            "machine learning (ML)"
        );
    }

    #[test]
    fn test_capitalize_first_character_only() {
        let key = Key {
            capitalize: true,
            form: Form::Full,
            ..Key::new("ml")
        };
        assert_eq!(
            render(&key, &ml(), Variant::Full).unwrap(),
            "Machine learning (ML)"
        );

        let ipv6 = Acronym::new("internet protocol", "IPv6");
        assert_eq!(render(&key, &ipv6, Variant::Short).unwrap(), "IPv6");

        let lower = Acronym::new("mixture of experts", "moe");
        assert_eq!(render(&key, &lower, Variant::Short).unwrap(), "Moe");
    }

    #[test]
    fn test_plural_full_pluralizes_both_parts() {
        let key = Key {
            plural: true,
            capitalize: true,
            ..Key::new("ml")
        };
        let model = Acronym::new("language model", "LM");
        assert_eq!(
            render(&key, &model, Variant::Full).unwrap(),
            "Language models (LMs)"
        );
    }

    #[test]
    fn test_plural_uses_irregular_form() {
        let key = Key {
            plural: true,
            ..Key::new("fyi")
        };
        let acronym = Acronym::new("person of interest", "POI")
            .with_long_plural_form("people of interest");
        assert_eq!(
            render(&key, &acronym, Variant::Long).unwrap(),
            "people of interest"
        );
        assert_eq!(render(&key, &acronym, Variant::Short).unwrap(), "POIs");
    }

    #[test]
    fn test_plural_ambiguous_shape_fails() {
        let key = Key {
            plural: true,
            ..Key::new("cpp")
        };
        let acronym = Acronym::new("C plus plus", "C++");
        assert!(render(&key, &acronym, Variant::Short).is_err());
        assert!(render(&key, &acronym, Variant::Full).is_err());
        assert_eq!(
            render(&key, &acronym, Variant::Long).unwrap(),
            "C plus pluss"
        );
    }

    #[test]
    fn test_listing_entry() {
        let mut out = String::new();
        PlainBackend::listing_entry("ml", &ml(), &mut out);
        assert_eq!(out, "machine learning (ML)");
    }

    #[test]
    fn test_push_capitalized_empty() {
        let mut out = String::new();
        push_capitalized("", &mut out);
        assert_eq!(out, "");
    }
}
