//! Translation options and per-span option lists.

use crate::input::Span;
use crate::ranking::{compare_desc, retain_top_by};
use crate::score::{ModelError, ScoreAggregator, ScoreBreakdown};
use crate::table::TargetPhrase;

/// A scored candidate partial translation for one span at one stage.
/// Immutable once scored; owned by the span's list until pruned or the
/// space is dropped.
#[derive(Debug, Clone)]
pub struct TranslationOption {
    stage: usize,
    span: Span,
    target: TargetPhrase,
    total_score: f32,
    future_estimate: f32,
    breakdown: ScoreBreakdown,
}

impl TranslationOption {
    pub(crate) fn new(stage: usize, span: Span, target: TargetPhrase) -> Self {
        Self {
            stage,
            span,
            target,
            total_score: 0.0,
            future_estimate: 0.0,
            breakdown: ScoreBreakdown::default(),
        }
    }

    /// Fold the table score and all model contributions into the final
    /// totals. Called exactly once, before the option enters its list.
    pub(crate) fn finalize_score(&mut self, models: &ScoreAggregator) -> Result<(), ModelError> {
        let mut breakdown = models.new_breakdown();
        let totals = models.accumulate(&self.target, &mut breakdown, None, false)?;
        self.total_score = self.target.table_score + totals.full;
        self.future_estimate = self.total_score;
        self.breakdown = breakdown;
        Ok(())
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn target(&self) -> &TargetPhrase {
        &self.target
    }

    pub fn total_score(&self) -> f32 {
        self.total_score
    }

    /// Optimistic estimate used for ranking and future-cost seeding.
    pub fn future_estimate(&self) -> f32 {
        self.future_estimate
    }

    pub fn breakdown(&self) -> &ScoreBreakdown {
        &self.breakdown
    }
}

/// Ordered options for one (stage, span) cell. After construction
/// completes, size never exceeds the stage's table limit (0 = unlimited).
#[derive(Debug, Clone, Default)]
pub struct TranslationOptionList {
    options: Vec<TranslationOption>,
}

impl TranslationOptionList {
    pub(crate) fn push(&mut self, option: TranslationOption) {
        self.options.push(option);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&TranslationOption> {
        self.options.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationOption> {
        self.options.iter()
    }

    /// Stable descending order by estimate. Presentation order only;
    /// correctness never depends on it.
    pub(crate) fn sort(&mut self) {
        self.options
            .sort_by(|a, b| compare_desc(a.future_estimate, b.future_estimate));
    }

    /// Keep the top `limit` options, dropping and freeing the rest.
    pub fn rank_and_truncate(&mut self, limit: usize) {
        retain_top_by(&mut self.options, limit, |o| o.future_estimate);
    }
}

impl<'a> IntoIterator for &'a TranslationOptionList {
    type Item = &'a TranslationOption;
    type IntoIter = std::slice::Iter<'a, TranslationOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
