//! Source-sentence model: positions, spans, factored tokens.
//!
//! A token carries an ordered list of attribute slots (slot 0 is the
//! surface form by convention). Attributes may be absent, which matters
//! for unknown-word synthesis: missing slots are filled with
//! [`UNKNOWN_MARKER`] rather than copied.

use std::fmt;

/// Reserved attribute substituted for non-pass-through and missing
/// attributes when an option is synthesized for an uncovered position.
pub const UNKNOWN_MARKER: &str = "UNK";

/// A contiguous inclusive range of input positions `[start, end]`.
///
/// `start <= end` is enforced at construction, so a `Span` always covers
/// at least one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "invalid span: start {start} > end {end}");
        Self { start, end }
    }

    /// Single-position span.
    pub fn point(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered, always >= 1.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.start, self.end)
    }
}

/// One input position: ordered attribute slots, `None` = slot not set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    attrs: Vec<Option<String>>,
}

impl Token {
    /// Token with only the surface slot set.
    pub fn surface(s: impl Into<String>) -> Self {
        Self {
            attrs: vec![Some(s.into())],
        }
    }

    pub fn with_attrs(attrs: Vec<Option<String>>) -> Self {
        Self { attrs }
    }

    pub fn attr(&self, slot: usize) -> Option<&str> {
        self.attrs.get(slot).and_then(|a| a.as_deref())
    }

    pub fn attr_count(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the surface form carries an ASCII digit. Numeric tokens are
    /// exempt from the drop-unknown policy and get copied through instead.
    pub fn is_numeric(&self) -> bool {
        self.attr(0)
            .is_some_and(|s| s.chars().any(|c| c.is_ascii_digit()))
    }
}

/// The input sentence: a fixed sequence of factored tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Parse whitespace-separated tokens with `|`-separated attribute
    /// slots (`surface|lemma|pos ...`). An empty field leaves the slot
    /// unset.
    pub fn parse(line: &str) -> Self {
        let tokens = line
            .split_whitespace()
            .map(|word| {
                let attrs = word
                    .split('|')
                    .map(|a| if a.is_empty() { None } else { Some(a.to_string()) })
                    .collect();
                Token::with_attrs(attrs)
            })
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, pos: usize) -> &Token {
        &self.tokens[pos]
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}
