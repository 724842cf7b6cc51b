//! Table-lookup collaborator boundary.
//!
//! The decoder core never reads phrase tables itself; it asks a
//! [`TranslationTable`] for the raw candidates covering a span. What comes
//! back is a [`TargetPhraseCollection`], a value-owning group of scored
//! output phrases from one table entry, with the original's sort/prune
//! semantics around the table limit.

use crate::input::{Sentence, Span, Token};
use crate::ranking::{compare_desc, retain_top_by};

/// A raw candidate output phrase with its table score. May be empty:
/// drop-unknown synthesizes an empty phrase to delete a source token.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TargetPhrase {
    pub tokens: Vec<Token>,
    pub table_score: f32,
}

impl TargetPhrase {
    pub fn new(tokens: Vec<Token>, table_score: f32) -> Self {
        Self {
            tokens,
            table_score,
        }
    }

    /// The empty no-output phrase.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Scored candidate phrases from a single table entry.
#[derive(Debug, Clone, Default)]
pub struct TargetPhraseCollection {
    phrases: Vec<TargetPhrase>,
}

impl TargetPhraseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, phrase: TargetPhrase) {
        self.phrases.push(phrase);
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetPhrase> {
        self.phrases.iter()
    }

    /// Establish the boundary between the top `table_limit` phrases and
    /// the rest without discarding anything. No-op when `table_limit` is
    /// 0 (unlimited) or the collection fits within it.
    pub fn sort(&mut self, table_limit: usize) {
        if table_limit == 0 || self.phrases.len() <= table_limit {
            return;
        }
        self.phrases
            .select_nth_unstable_by(table_limit - 1, |a, b| {
                compare_desc(a.table_score, b.table_score)
            });
    }

    /// Keep exactly the top `table_limit` phrases by score, releasing the
    /// rest. After this, `len() <= table_limit` (unless unlimited).
    pub fn prune(&mut self, table_limit: usize) {
        retain_top_by(&mut self.phrases, table_limit, |p| p.table_score);
    }
}

impl IntoIterator for TargetPhraseCollection {
    type Item = TargetPhrase;
    type IntoIter = std::vec::IntoIter<TargetPhrase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phrases.into_iter()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TableError(pub String);

/// Lookup collaborator: raw candidates exactly covering one span.
///
/// Must be deterministic for identical inputs and configuration.
/// `adhere_to_limit = false` is the unknown-word bypass: the table may
/// return entries it would normally withhold under its own budget.
pub trait TranslationTable: Send + Sync {
    fn lookup(
        &self,
        stage: usize,
        sentence: &Sentence,
        span: Span,
        adhere_to_limit: bool,
    ) -> Result<TargetPhraseCollection, TableError>;
}
