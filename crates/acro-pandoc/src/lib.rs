//! Pandoc JSON filter host for acro.
//!
//! Reads a pandoc document, takes acronym definitions from
//! `meta.acronyms`, expands markers found in `Str` inlines and replaces
//! `::: {#acronyms}` placeholders with the acronym listing.
//!
//! For `latex`/`beamer` output the markers become acro package macros and
//! the package setup is appended to `header-includes`.
//!
//! # Example
//!
//! ```
//! use acro_core::OutputMode;
//! use acro_pandoc::AcroFilter;
//!
//! let input = r#"{
//!   "pandoc-api-version": [1, 23, 1],
//!   "meta": {"acronyms": {"t": "MetaMap", "c": {"ml": {"t": "MetaMap", "c": {
//!     "long": {"t": "MetaString", "c": "machine learning"},
//!     "short": {"t": "MetaString", "c": "ML"}}}}}},
//!   "blocks": [{"t": "Para", "c": [{"t": "Str", "c": "ac:ml"}]}]
//! }"#;
//!
//! let output = AcroFilter::new(OutputMode::Plain).run_json(input).unwrap();
//! assert!(output.contains(r#""c":"machine learning (ML)""#));
//! ```

mod document;
mod error;
mod filter;
mod meta;

pub use document::{LISTING_ID, ListingPlaceholder, PandocDocument};
pub use error::PandocError;
pub use filter::{AcroFilter, Filtered};
pub use meta::ACRONYMS_KEY;
