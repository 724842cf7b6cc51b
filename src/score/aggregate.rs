//! Ordered model registry and score accumulation.

use std::sync::Arc;

use super::breakdown::ScoreBreakdown;
use super::model::{ModelError, ScoringModel};
use crate::table::TargetPhrase;

/// The contiguous index range a model occupies in the global score
/// vector (half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub begin: usize,
    pub end: usize,
}

/// Weighted totals accumulated over all usable models.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateScore {
    pub full: f32,
    pub ngram: f32,
}

/// Ordered collection of scoring models. Built incrementally as models
/// register; read-only during decoding of any single sentence, and
/// shareable across sentence workers.
#[derive(Default)]
pub struct ScoreAggregator {
    models: Vec<Arc<dyn ScoringModel>>,
    slots: Vec<SlotRange>,
    max_order: usize,
    total_slots: usize,
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a model, assign its slot range, and fold its context order
    /// into the running maximum.
    pub fn register(&mut self, model: Arc<dyn ScoringModel>) {
        let begin = self.total_slots;
        self.total_slots += 1;
        self.slots.push(SlotRange {
            begin,
            end: self.total_slots,
        });
        self.max_order = self.max_order.max(model.order());
        self.models.push(model);
    }

    /// Longest context lookback required by any registered model.
    pub fn max_order(&self) -> usize {
        self.max_order
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn total_slots(&self) -> usize {
        self.total_slots
    }

    pub fn slot_range(&self, model_idx: usize) -> SlotRange {
        self.slots[model_idx]
    }

    /// Model names in registration order, labeling breakdown slots.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name())
    }

    /// Breakdown sized for this registry.
    pub fn new_breakdown(&self) -> ScoreBreakdown {
        ScoreBreakdown::with_slots(self.total_slots)
    }

    /// Score `phrase` with every usable model in registration order.
    ///
    /// Each model's contribution is assigned (overwriting) into
    /// `breakdown` at its slot (the ngram component when
    /// `use_ngram_as_total` is set, the full score otherwise) and
    /// optionally mirrored into `ngram_only`. Weighted contributions sum
    /// into the returned totals.
    ///
    /// A model reporting `!usable` is skipped. A usable model producing a
    /// non-finite value yields `ModelError::InvalidScore`; the caller
    /// refuses the option. Any other failure propagates and aborts the
    /// sentence.
    pub fn accumulate(
        &self,
        phrase: &TargetPhrase,
        breakdown: &mut ScoreBreakdown,
        mut ngram_only: Option<&mut ScoreBreakdown>,
        use_ngram_as_total: bool,
    ) -> Result<AggregateScore, ModelError> {
        let mut totals = AggregateScore::default();
        for (idx, model) in self.models.iter().enumerate() {
            if !model.usable(phrase) {
                continue;
            }
            let score = model.score(phrase)?;
            if !score.full.is_finite() || !score.ngram.is_finite() {
                return Err(ModelError::InvalidScore {
                    model: model.name().to_string(),
                    value: if score.full.is_finite() {
                        score.ngram
                    } else {
                        score.full
                    },
                });
            }

            let slot = self.slots[idx].begin;
            breakdown.assign(
                slot,
                if use_ngram_as_total {
                    score.ngram
                } else {
                    score.full
                },
            );
            if let Some(ngram_bd) = ngram_only.as_deref_mut() {
                ngram_bd.assign(slot, score.ngram);
            }

            let weight = model.weight();
            totals.full += score.full * weight;
            totals.ngram += score.ngram * weight;
        }
        Ok(totals)
    }
}
