//! Acronym marker expansion with first-use tracking.
//!
//! This crate turns inline markers such as `ac:ml` or `Acfp:ml's` into
//! acronym text, rendering the full form on first use and the short form
//! afterwards.
//!
//! # Architecture
//!
//! - [`Key`]: parsed marker (`[A]ac[l|s|f][p][*]:id[trailing]`)
//! - [`AcronymTable`]: read-only definitions supplied by a loader
//! - [`UsageRegistry`]: per-document first-use state
//! - [`Translator`]: walks a [`Document`] and rewrites every marker
//! - [`list`]: catalogue of defined or used acronyms
//! - [`AcronymMetadata`]: definitions plus acro [`PackageOptions`], built by loaders
//!
//! Output format differences are handled by the [`RenderBackend`] trait:
//! - [`PlainBackend`]: resolved text
//! - [`LatexBackend`]: acro package macros
//!
//! # Example
//!
//! ```
//! use acro_core::{Acronym, AcronymTable, OutputMode, TokenDocument, TranslatorConfig};
//!
//! let table = AcronymTable::new().with("ml", Acronym::new("machine learning", "ML"));
//! let (doc, registry) = acro_core::translate_document(
//!     TokenDocument::parse("ac:ml, then acsp:ml."),
//!     &table,
//!     OutputMode::Plain,
//!     TranslatorConfig::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(doc.to_string(), "machine learning (ML), then MLs.");
//! assert_eq!(registry.seen_count("ml"), 2);
//! ```

mod backend;
mod document;
mod error;
mod key;
mod latex;
mod listing;
mod metadata;
mod options;
mod plain;
mod registry;
mod replacements;
mod table;
mod translator;

pub use backend::{OutputMode, RenderBackend, RenderRequest, Variant};
pub use document::{Document, Inline, NodeId, Token, TokenDocument};
pub use error::{DefinitionError, KeyError, RenderError, TranslateError};
pub use key::{Form, Key};
pub use latex::LatexBackend;
pub use listing::{ListFilter, ListSort, Listing, ListingEntry, list};
pub use metadata::{AcronymMetadata, OPTIONS_KEY};
pub use options::{PackageOptions, VALID_STYLES};
pub use plain::PlainBackend;
pub use registry::{UsageClass, UsageEntry, UsageRegistry};
pub use replacements::Replacements;
pub use table::{Acronym, AcronymTable, DEFAULT_PLURAL_SUFFIX, Part};
pub use translator::{Translator, TranslatorConfig, translate_document};
