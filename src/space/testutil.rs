//! Shared fixtures for search-space tests.

use crate::input::Token;
use crate::score::{ModelError, ModelScore, ScoringModel};
use crate::table::{TableError, TargetPhrase, TargetPhraseCollection, TranslationTable};

struct TableEntry {
    stage: usize,
    start: usize,
    end: usize,
    surface: String,
    score: f32,
    bypass_only: bool,
}

/// In-memory phrase table keyed by (stage, span).
#[derive(Default)]
pub(crate) struct TestTable {
    entries: Vec<TableEntry>,
}

impl TestTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage-0 entry.
    pub fn with(self, start: usize, end: usize, surface: &str, score: f32) -> Self {
        self.with_stage(0, start, end, surface, score)
    }

    pub fn with_stage(
        mut self,
        stage: usize,
        start: usize,
        end: usize,
        surface: &str,
        score: f32,
    ) -> Self {
        self.entries.push(TableEntry {
            stage,
            start,
            end,
            surface: surface.to_string(),
            score,
            bypass_only: false,
        });
        self
    }

    /// Entry only returned when the table limit is bypassed.
    pub fn with_bypass(mut self, start: usize, end: usize, surface: &str, score: f32) -> Self {
        self.entries.push(TableEntry {
            stage: 0,
            start,
            end,
            surface: surface.to_string(),
            score,
            bypass_only: true,
        });
        self
    }
}

impl TranslationTable for TestTable {
    fn lookup(
        &self,
        stage: usize,
        _sentence: &crate::input::Sentence,
        span: crate::input::Span,
        adhere_to_limit: bool,
    ) -> Result<TargetPhraseCollection, TableError> {
        let mut coll = TargetPhraseCollection::new();
        for entry in &self.entries {
            if entry.stage == stage
                && entry.start == span.start()
                && entry.end == span.end()
                && (!entry.bypass_only || !adhere_to_limit)
            {
                coll.push(TargetPhrase::new(
                    vec![Token::surface(entry.surface.clone())],
                    entry.score,
                ));
            }
        }
        Ok(coll)
    }
}

/// Table whose every lookup fails.
pub(crate) struct FailingTable;

impl TranslationTable for FailingTable {
    fn lookup(
        &self,
        _stage: usize,
        _sentence: &crate::input::Sentence,
        _span: crate::input::Span,
        _adhere_to_limit: bool,
    ) -> Result<TargetPhraseCollection, TableError> {
        Err(TableError("table backend unavailable".to_string()))
    }
}

/// Model scoring a fixed amount per output token.
pub(crate) struct PerTokenModel {
    pub name: &'static str,
    pub weight: f32,
    pub per_token: f32,
}

impl ScoringModel for PerTokenModel {
    fn name(&self) -> &str {
        self.name
    }
    fn weight(&self) -> f32 {
        self.weight
    }
    fn order(&self) -> usize {
        1
    }
    fn usable(&self, _phrase: &TargetPhrase) -> bool {
        true
    }
    fn score(&self, phrase: &TargetPhrase) -> Result<ModelScore, ModelError> {
        let value = self.per_token * phrase.len() as f32;
        Ok(ModelScore {
            full: value,
            ngram: value,
        })
    }
}

/// Model producing NaN for one specific surface, a clean score otherwise.
pub(crate) struct PoisonModel {
    pub poison_surface: &'static str,
}

impl ScoringModel for PoisonModel {
    fn name(&self) -> &str {
        "poison"
    }
    fn weight(&self) -> f32 {
        1.0
    }
    fn order(&self) -> usize {
        1
    }
    fn usable(&self, _phrase: &TargetPhrase) -> bool {
        true
    }
    fn score(&self, phrase: &TargetPhrase) -> Result<ModelScore, ModelError> {
        let poisoned = phrase
            .tokens
            .first()
            .and_then(|t| t.attr(0))
            .is_some_and(|s| s == self.poison_surface);
        if poisoned {
            Ok(ModelScore {
                full: f32::NAN,
                ngram: f32::NAN,
            })
        } else {
            Ok(ModelScore {
                full: 0.0,
                ngram: 0.0,
            })
        }
    }
}

/// Model whose evaluation always fails.
pub(crate) struct BrokenModel;

impl ScoringModel for BrokenModel {
    fn name(&self) -> &str {
        "broken"
    }
    fn weight(&self) -> f32 {
        1.0
    }
    fn order(&self) -> usize {
        1
    }
    fn usable(&self, _phrase: &TargetPhrase) -> bool {
        true
    }
    fn score(&self, _phrase: &TargetPhrase) -> Result<ModelScore, ModelError> {
        Err(ModelError::Evaluation {
            model: "broken".to_string(),
            reason: "backend unavailable".to_string(),
        })
    }
}
