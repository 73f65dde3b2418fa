//! Acronym catalogue generation.

use std::fmt;
use std::str::FromStr;

use crate::backend::{OutputMode, RenderBackend};
use crate::latex::LatexBackend;
use crate::plain::PlainBackend;
use crate::registry::UsageRegistry;
use crate::table::{Acronym, AcronymTable};

/// Which acronyms to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ListFilter {
    /// Every defined acronym.
    All,
    /// Only acronyms referenced at least once.
    #[default]
    Used,
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ListSort {
    /// By identifier.
    #[default]
    Alphabetical,
    /// By order of first use in the document.
    FirstUse,
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "used" => Ok(Self::Used),
            other => Err(format!(
                "unknown listing filter '{other}' (expected 'all' or 'used')"
            )),
        }
    }
}

impl FromStr for ListSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetical" => Ok(Self::Alphabetical),
            "first-use" => Ok(Self::FirstUse),
            other => Err(format!(
                "unknown listing sort '{other}' (expected 'alphabetical' or 'first-use')"
            )),
        }
    }
}

impl fmt::Display for ListSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alphabetical => "alphabetical",
            Self::FirstUse => "first-use",
        })
    }
}

/// One rendered catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry<'a> {
    pub identifier: &'a str,
    pub text: String,
}

type EntryFn = fn(&str, &Acronym, &mut String);

/// Lazy sequence of rendered catalogue entries.
///
/// Entries are rendered on demand; the sequence is consumed once.
pub struct Listing<'a> {
    table: &'a AcronymTable,
    ids: std::vec::IntoIter<&'a str>,
    entry: EntryFn,
}

impl<'a> Iterator for Listing<'a> {
    type Item = ListingEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Identifiers are pre-filtered against the table.
        let identifier = self.ids.next()?;
        let acronym = self.table.lookup(identifier)?;
        let mut text = String::new();
        (self.entry)(identifier, acronym, &mut text);
        Some(ListingEntry { identifier, text })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

/// List acronyms from `table`, using `registry` for usage state.
///
/// With [`ListSort::FirstUse`], acronyms never used (only possible with
/// [`ListFilter::All`]) come last, alphabetically.
///
/// # Example
///
/// ```
/// use acro_core::{Acronym, AcronymTable, ListFilter, ListSort, OutputMode, UsageRegistry, list};
///
/// let table = AcronymTable::new()
///     .with("ai", Acronym::new("artificial intelligence", "AI"))
///     .with("ml", Acronym::new("machine learning", "ML"));
/// let mut registry = UsageRegistry::new();
/// registry.record_and_classify("ml");
///
/// let entries: Vec<String> = list(
///     &table,
///     &registry,
///     OutputMode::Plain,
///     ListFilter::Used,
///     ListSort::Alphabetical,
/// )
/// .map(|entry| entry.text)
/// .collect();
/// assert_eq!(entries, vec!["machine learning (ML)"]);
/// ```
#[must_use]
pub fn list<'a>(
    table: &'a AcronymTable,
    registry: &'a UsageRegistry,
    mode: OutputMode,
    filter: ListFilter,
    sort: ListSort,
) -> Listing<'a> {
    let used = |id: &str| registry.seen_count(id) > 0;

    let ids: Vec<&'a str> = match sort {
        ListSort::Alphabetical => table
            .iter()
            .map(|(id, _)| id.as_str())
            .filter(|id| filter == ListFilter::All || used(*id))
            .collect(),
        ListSort::FirstUse => {
            let mut ids: Vec<&'a str> = registry
                .first_use_order()
                .into_iter()
                .filter(|id| table.contains(*id) && used(*id))
                .collect();
            if filter == ListFilter::All {
                ids.extend(
                    table
                        .iter()
                        .map(|(id, _)| id.as_str())
                        .filter(|id| !used(*id)),
                );
            }
            ids
        }
    };

    Listing {
        table,
        ids: ids.into_iter(),
        entry: entry_fn(mode),
    }
}

fn entry_fn(mode: OutputMode) -> EntryFn {
    match mode {
        OutputMode::Plain => PlainBackend::listing_entry,
        OutputMode::Latex => LatexBackend::listing_entry,
    }
}
