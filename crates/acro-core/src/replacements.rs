//! Planned node replacements.
//!
//! The translator collects every replacement for a document first and hands
//! them to the host in one go, so a failing marker never leaves a document
//! half translated.

use std::collections::BTreeMap;

use crate::document::{Inline, NodeId};

/// Collects node replacements for single-pass application.
///
/// # Example
///
/// ```
/// use acro_core::{Inline, NodeId, Replacements};
///
/// let mut replacements = Replacements::new();
/// replacements.add(NodeId(2), Inline::text("ML"));
/// assert_eq!(replacements.len(), 1);
/// assert_eq!(replacements.take(NodeId(2)), Some(Inline::text("ML")));
/// assert!(replacements.is_empty());
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Replacements {
    items: BTreeMap<NodeId, Inline>,
}

impl Replacements {
    /// Create a new empty replacements collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a replacement for a node.
    ///
    /// A later replacement for the same node wins.
    pub fn add(&mut self, node: NodeId, inline: Inline) {
        self.items.insert(node, inline);
    }

    /// Remove and return the replacement for a node.
    pub fn take(&mut self, node: NodeId) -> Option<Inline> {
        self.items.remove(&node)
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of registered replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over replacements in node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Inline)> {
        self.items.iter().map(|(node, inline)| (*node, inline))
    }
}
