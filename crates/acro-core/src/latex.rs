//! LaTeX backend for the acro package.
//!
//! Emits acro macros instead of resolved text, so the typesetting toolchain
//! can restyle acronyms and track first use itself.

use crate::backend::{RenderBackend, RenderRequest};
use crate::error::RenderError;
use crate::table::Acronym;

/// LaTeX render backend.
///
/// Macro name: `\` + `A`/`a` + `c` + form (`f`, `s`, `l` or none) + `p` if
/// plural + `*` if uncounted, followed by `{id}`.
pub struct LatexBackend;

impl RenderBackend for LatexBackend {
    const RAW_FORMAT: Option<&'static str> = Some("latex");

    fn render(request: &RenderRequest<'_>, out: &mut String) -> Result<(), RenderError> {
        let key = request.key;
        out.push('\\');
        out.push(if key.capitalize { 'A' } else { 'a' });
        out.push('c');
        out.push_str(key.form.suffix());
        if key.plural {
            out.push('p');
        }
        if !key.counted {
            out.push('*');
        }
        push_argument(&key.identifier, out);
        Ok(())
    }

    fn listing_entry(identifier: &str, _acronym: &Acronym, out: &mut String) {
        out.push_str("\\acf*");
        push_argument(identifier, out);
    }
}

fn push_argument(value: &str, out: &mut String) {
    out.push('{');
    out.push_str(value);
    out.push('}');
}
