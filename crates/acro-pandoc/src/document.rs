//! Pandoc JSON AST as a translatable document.
//!
//! Candidate tokens are the `Str` inlines under `blocks`, in document
//! order. Code, math and raw nodes are not visited, and neither is the
//! listing placeholder.

use serde_json::{Map, Value, json};

use acro_core::{Document, Inline, ListFilter, ListSort, NodeId, Replacements, Token};

use crate::error::PandocError;

/// Identifier of the `Div` replaced by the acronym listing.
pub const LISTING_ID: &str = "acronyms";

/// Node types whose content is never scanned for markers.
const OPAQUE: &[&str] = &["Code", "CodeBlock", "Math", "RawInline", "RawBlock"];

/// How the walker treats a JSON object.
enum NodeKind {
    /// `Str` inline carrying a candidate token.
    Str,
    /// Not scanned.
    Opaque,
    /// Typed node; children live under `c`.
    Element,
    /// Untyped object (citations); children are its values.
    Record,
}

fn node_type(node: &Map<String, Value>) -> Option<&str> {
    node.get("t").and_then(Value::as_str)
}

fn kind(node: &Map<String, Value>) -> NodeKind {
    match node_type(node) {
        Some("Str") if node.get("c").is_some_and(Value::is_string) => NodeKind::Str,
        Some(t) if OPAQUE.contains(&t) => NodeKind::Opaque,
        Some("Div") if div_id(node) == Some(LISTING_ID) => NodeKind::Opaque,
        Some(_) => NodeKind::Element,
        None => NodeKind::Record,
    }
}

/// Identifier of a `Div` (`c[0][0]`).
fn div_id(node: &Map<String, Value>) -> Option<&str> {
    node.get("c")?.get(0)?.get(0)?.as_str()
}

/// Listing settings read from a placeholder's attributes.
///
/// Classes `.all`/`.used` pick the filter; attribute `sort` picks the order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingPlaceholder {
    pub filter: Option<ListFilter>,
    pub sort: Option<ListSort>,
}

impl ListingPlaceholder {
    fn from_attr(attr: &Value) -> Self {
        let mut placeholder = Self::default();
        let classes = attr.get(1).and_then(Value::as_array).into_iter().flatten();
        for class in classes.filter_map(Value::as_str) {
            match class.parse::<ListFilter>() {
                Ok(filter) => placeholder.filter = Some(filter),
                Err(_) => tracing::debug!(class, "Ignoring listing class"),
            }
        }
        let pairs = attr.get(2).and_then(Value::as_array).into_iter().flatten();
        for pair in pairs {
            if pair.get(0).and_then(Value::as_str) != Some("sort") {
                continue;
            }
            let value = pair.get(1).and_then(Value::as_str).unwrap_or_default();
            match value.parse::<ListSort>() {
                Ok(sort) => placeholder.sort = Some(sort),
                Err(message) => tracing::warn!("{message}"),
            }
        }
        placeholder
    }
}

/// A pandoc document (`pandoc-api-version`, `meta`, `blocks`).
#[derive(Debug, Clone, PartialEq)]
pub struct PandocDocument {
    root: Map<String, Value>,
}

impl PandocDocument {
    /// Parse pandoc JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not JSON or lacks `blocks`.
    pub fn from_json(input: &str) -> Result<Self, PandocError> {
        Self::from_value(serde_json::from_str(input)?)
    }

    /// Wrap an already parsed AST.
    ///
    /// # Errors
    ///
    /// Returns [`PandocError::InvalidDocument`] if the root is not an object,
    /// `blocks` is not an array or `meta` is not an object.
    pub fn from_value(root: Value) -> Result<Self, PandocError> {
        let Value::Object(root) = root else {
            return Err(PandocError::InvalidDocument("root is not an object"));
        };
        if !root.get("blocks").is_some_and(Value::is_array) {
            return Err(PandocError::InvalidDocument("missing 'blocks' array"));
        }
        if root.get("meta").is_some_and(|meta| !meta.is_object()) {
            return Err(PandocError::InvalidDocument("'meta' is not an object"));
        }
        Ok(Self { root })
    }

    /// Serialize back to pandoc JSON.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json(&self) -> Result<String, PandocError> {
        Ok(serde_json::to_string(&self.root)?)
    }

    #[must_use]
    pub fn as_value(&self) -> &Map<String, Value> {
        &self.root
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Document metadata, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.root.get("meta").and_then(Value::as_object)
    }

    /// Mutable metadata, created when absent.
    pub(crate) fn meta_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.root
            .entry("meta")
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
    }

    /// Replace every listing placeholder with the block `render` returns.
    ///
    /// Returns the number of placeholders replaced.
    pub fn replace_listings<F>(&mut self, mut render: F) -> usize
    where
        F: FnMut(ListingPlaceholder) -> Value,
    {
        match self.root.get_mut("blocks") {
            Some(blocks) => replace_listings(blocks, &mut render),
            None => 0,
        }
    }
}

impl Document for PandocDocument {
    fn tokens(&self) -> Vec<Token<'_>> {
        let mut texts = Vec::new();
        if let Some(blocks) = self.root.get("blocks") {
            collect(blocks, &mut texts);
        }
        texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Token {
                node: NodeId(i),
                text,
            })
            .collect()
    }

    fn apply(&mut self, mut replacements: Replacements) {
        if replacements.is_empty() {
            return;
        }
        let mut next = 0;
        if let Some(blocks) = self.root.get_mut("blocks") {
            rewrite(blocks, &mut next, &mut replacements);
        }
    }
}

fn collect<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect(item, out)),
        Value::Object(node) => match kind(node) {
            NodeKind::Str => out.extend(node.get("c").and_then(Value::as_str)),
            NodeKind::Opaque => {}
            NodeKind::Element => {
                if let Some(children) = node.get("c") {
                    collect(children, out);
                }
            }
            NodeKind::Record => node.values().for_each(|child| collect(child, out)),
        },
        _ => {}
    }
}

/// Mirror of [`collect`] that numbers `Str` nodes the same way.
fn rewrite(value: &mut Value, next: &mut usize, replacements: &mut Replacements) {
    let replacement = match value {
        Value::Array(items) => {
            for item in items {
                rewrite(item, next, replacements);
            }
            None
        }
        Value::Object(node) => match kind(node) {
            NodeKind::Str => {
                let node_id = NodeId(*next);
                *next += 1;
                replacements.take(node_id).map(inline_node)
            }
            NodeKind::Opaque => None,
            NodeKind::Element => {
                if let Some(children) = node.get_mut("c") {
                    rewrite(children, next, replacements);
                }
                None
            }
            NodeKind::Record => {
                for child in node.values_mut() {
                    rewrite(child, next, replacements);
                }
                None
            }
        },
        _ => None,
    };
    if let Some(replacement) = replacement {
        *value = replacement;
    }
}

fn replace_listings<F>(value: &mut Value, render: &mut F) -> usize
where
    F: FnMut(ListingPlaceholder) -> Value,
{
    let placeholder = match value {
        Value::Object(node)
            if node_type(node) == Some("Div") && div_id(node) == Some(LISTING_ID) =>
        {
            let attr = node.get("c").and_then(|c| c.get(0));
            Some(attr.map(ListingPlaceholder::from_attr).unwrap_or_default())
        }
        _ => None,
    };
    if let Some(placeholder) = placeholder {
        *value = render(placeholder);
        return 1;
    }

    match value {
        Value::Array(items) => items
            .iter_mut()
            .map(|item| replace_listings(item, render))
            .sum(),
        Value::Object(node) => node
            .values_mut()
            .map(|child| replace_listings(child, render))
            .sum(),
        _ => 0,
    }
}

/// Pandoc node for a replacement inline.
pub(crate) fn inline_node(inline: Inline) -> Value {
    match inline {
        Inline::Text(text) => json!({ "t": "Str", "c": text }),
        Inline::Raw { format, content } => json!({ "t": "RawInline", "c": [format, content] }),
    }
}

/// Text as `Str`/`Space` inlines.
pub(crate) fn text_inlines(text: &str) -> Vec<Value> {
    let mut inlines = Vec::new();
    for (i, word) in text.split(' ').filter(|w| !w.is_empty()).enumerate() {
        if i > 0 {
            inlines.push(json!({ "t": "Space" }));
        }
        inlines.push(json!({ "t": "Str", "c": word }));
    }
    inlines
}
