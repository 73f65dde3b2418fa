//! Host document abstraction.
//!
//! The translator only needs a deterministic reading-order traversal of
//! candidate tokens and a way to replace them. Hosts (pandoc AST, plain
//! text) implement [`Document`].

use std::fmt;

use crate::replacements::Replacements;

/// Position of a token in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// Replacement content for a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text.
    Text(String),
    /// Raw markup for a specific output format.
    Raw { format: String, content: String },
}

impl Inline {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    #[must_use]
    pub fn raw(format: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Raw {
            format: format.into(),
            content: content.into(),
        }
    }

    /// Text or markup, regardless of kind.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Text(s) | Self::Raw { content: s, .. } => s,
        }
    }
}

/// A candidate marker token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub node: NodeId,
    pub text: &'a str,
}

/// A document the translator can rewrite.
pub trait Document {
    /// Candidate tokens in reading order.
    ///
    /// Node ids must be stable between this call and [`apply`](Self::apply).
    fn tokens(&self) -> Vec<Token<'_>>;

    /// Replace tokens. Nodes without a replacement stay byte-identical.
    fn apply(&mut self, replacements: Replacements);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Piece {
    text: String,
    whitespace: bool,
}

/// Plain text split into whitespace-separated tokens.
///
/// Whitespace is kept verbatim, so rendering an untouched document gives
/// back the input byte for byte.
///
/// # Example
///
/// ```
/// use acro_core::TokenDocument;
///
/// let doc = TokenDocument::parse("We use ac:ml.\n");
/// assert_eq!(doc.to_string(), "We use ac:ml.\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenDocument {
    pieces: Vec<Piece>,
}

impl TokenDocument {
    /// Split text into word and whitespace pieces.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut pieces: Vec<Piece> = Vec::new();
        for c in input.chars() {
            let whitespace = c.is_whitespace();
            match pieces.last_mut() {
                Some(piece) if piece.whitespace == whitespace => piece.text.push(c),
                _ => pieces.push(Piece {
                    text: c.to_string(),
                    whitespace,
                }),
            }
        }
        Self { pieces }
    }

    fn words_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.pieces.iter_mut().filter(|p| !p.whitespace)
    }
}

impl Document for TokenDocument {
    fn tokens(&self) -> Vec<Token<'_>> {
        self.pieces
            .iter()
            .filter(|p| !p.whitespace)
            .enumerate()
            .map(|(i, p)| Token {
                node: NodeId(i),
                text: &p.text,
            })
            .collect()
    }

    fn apply(&mut self, mut replacements: Replacements) {
        if replacements.is_empty() {
            return;
        }
        for (i, piece) in self.words_mut().enumerate() {
            if let Some(inline) = replacements.take(NodeId(i)) {
                piece.text = match inline {
                    Inline::Text(s) | Inline::Raw { content: s, .. } => s,
                };
            }
        }
    }
}

impl fmt::Display for TokenDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            f.write_str(&piece.text)?;
        }
        Ok(())
    }
}
