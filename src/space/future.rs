//! Future-cost dynamic programming.
//!
//! For every span, the best score any single option achieves plus the
//! optimistic score reachable by decomposing the span into adjacent
//! sub-spans. The optimistic value is the admissible lookahead heuristic
//! the beam search consumes: it must never underestimate the achievable
//! score for a span.

use tracing::{debug_span, error};

use super::collection::OptionSpace;
use crate::input::Span;
use crate::matrix::{spans, SpanMatrix};

/// Clamp for a violated base-case invariant in release builds; keeps
/// downstream sums finite and ordered.
const FLOOR_SCORE: f32 = -1.0e10;

/// Raw best observed option score vs. the DP-combined optimistic score.
/// Both start at negative infinity (no known way to cover the span) and
/// only ever move upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanScore {
    pub best: f32,
    pub optimistic: f32,
}

impl Default for SpanScore {
    fn default() -> Self {
        Self {
            best: f32::NEG_INFINITY,
            optimistic: f32::NEG_INFINITY,
        }
    }
}

/// Per-stage triangular table of future-cost scores. Computed once the
/// option space is final; same sentence scope.
#[derive(Debug)]
pub struct FutureCostMatrix {
    stages: Vec<SpanMatrix<SpanScore>>,
}

impl FutureCostMatrix {
    /// Fold every option's estimate into its span's raw best, then run
    /// the split-point recurrence. Synthesized fallback options were
    /// inserted during construction, so every length-1 base case is
    /// seeded before the DP reads it.
    pub fn compute(space: &OptionSpace) -> Self {
        let _span = debug_span!("compute_future", len = space.len()).entered();
        let mut stages = Vec::with_capacity(space.stage_count());
        for stage in 0..space.stage_count() {
            let mut matrix = SpanMatrix::<SpanScore>::new(space.len());
            for span in spans(space.len()) {
                let cell = matrix.get_mut(span);
                for option in space.options(stage, span) {
                    if option.future_estimate() > cell.best {
                        cell.best = option.future_estimate();
                    }
                }
            }
            derive_optimistic_scores(&mut matrix);
            stages.push(matrix);
        }
        Self { stages }
    }

    /// The admissible lookahead estimate for a span.
    pub fn cost(&self, stage: usize, span: Span) -> f32 {
        self.stages[stage].get(span).optimistic
    }

    /// The raw best single-option score for a span (negative infinity if
    /// nothing covers it directly).
    pub fn best(&self, stage: usize, span: Span) -> f32 {
        self.stages[stage].get(span).best
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// Increasing-length DP combination: a span's optimistic score is the
/// best of covering it with one option or splitting it at any point into
/// two already-solved sub-spans.
fn derive_optimistic_scores(matrix: &mut SpanMatrix<SpanScore>) {
    let n = matrix.size();

    for pos in 0..n {
        let cell = matrix.get_mut(Span::point(pos));
        if cell.best == f32::NEG_INFINITY {
            debug_assert!(
                false,
                "no option covers position {pos}; fallback must run before future costs"
            );
            error!(pos, "no option covers position, clamping future cost");
            cell.best = FLOOR_SCORE;
        }
        cell.optimistic = cell.best;
    }

    for len in 2..=n {
        for start in 0..=n - len {
            let end = start + len - 1;
            let mut best = matrix.get(Span::new(start, end)).best;
            for split in start..end {
                let combined = matrix.get(Span::new(start, split)).optimistic
                    + matrix.get(Span::new(split + 1, end)).optimistic;
                if combined > best {
                    best = combined;
                }
            }
            matrix.get_mut(Span::new(start, end)).optimistic = best;
        }
    }
}
