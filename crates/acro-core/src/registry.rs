//! Per-document first-use tracking.

use std::collections::{BTreeMap, HashMap};

/// Classification of an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageClass {
    /// First use of the identifier in this pass.
    First,
    /// Any later use.
    Repeat,
}

/// Usage state of one identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageEntry {
    /// Number of occurrences recorded.
    pub seen_count: usize,
    /// Whether the first use has already been consumed.
    pub first_use_rendered: bool,
    /// Position in first-seen order.
    seen_rank: usize,
    /// Position in first-use order, once consumed.
    first_use_rank: Option<usize>,
}

/// Usage registry for one translation pass.
///
/// Each identifier moves one way from unseen to seen; there is no reset
/// within a pass. Create a new registry (or call [`reset`](Self::reset))
/// for every independent document.
#[derive(Debug, Clone, Default)]
pub struct UsageRegistry {
    entries: HashMap<String, UsageEntry>,
    first_uses: usize,
}

impl UsageRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence and classify it.
    ///
    /// Returns [`UsageClass::First`] exactly once per identifier.
    pub fn record_and_classify(&mut self, identifier: &str) -> UsageClass {
        let next_rank = self.first_uses;
        let entry = self.entry(identifier);
        entry.seen_count += 1;
        if entry.first_use_rendered {
            return UsageClass::Repeat;
        }

        entry.first_use_rendered = true;
        entry.first_use_rank = Some(next_rank);
        self.first_uses += 1;
        UsageClass::First
    }

    /// Record an occurrence without consuming the first use.
    pub fn note(&mut self, identifier: &str) {
        self.entry(identifier).seen_count += 1;
    }

    /// Classify a would-be occurrence without recording it.
    #[must_use]
    pub fn classify(&self, identifier: &str) -> UsageClass {
        match self.entries.get(identifier) {
            Some(entry) if entry.first_use_rendered => UsageClass::Repeat,
            _ => UsageClass::First,
        }
    }

    /// Usage state of an identifier, if it was ever recorded.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&UsageEntry> {
        self.entries.get(identifier)
    }

    /// Number of recorded occurrences of an identifier.
    #[must_use]
    pub fn seen_count(&self, identifier: &str) -> usize {
        self.entries.get(identifier).map_or(0, |e| e.seen_count)
    }

    /// Snapshot of `identifier -> seen_count`.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        self.entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.seen_count))
            .collect()
    }

    /// Identifiers in first-use order.
    ///
    /// Identifiers that were seen but never rendered as a first use follow,
    /// in the order they were first seen.
    #[must_use]
    pub fn first_use_order(&self) -> Vec<&str> {
        let mut ids: Vec<(&str, &UsageEntry)> = self
            .entries
            .iter()
            .map(|(id, entry)| (id.as_str(), entry))
            .collect();
        ids.sort_by_key(|(_, entry)| {
            (
                entry.first_use_rank.is_none(),
                entry.first_use_rank,
                entry.seen_rank,
            )
        });
        ids.into_iter().map(|(id, _)| id).collect()
    }

    /// Number of distinct identifiers recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all state.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.first_uses = 0;
    }

    fn entry(&mut self, identifier: &str) -> &mut UsageEntry {
        let seen_rank = self.entries.len();
        self.entries
            .entry(identifier.to_owned())
            .or_insert_with(|| UsageEntry {
                seen_rank,
                ..UsageEntry::default()
            })
    }
}
