//! Search-space construction: per-span translation options plus the
//! future-cost estimates a beam search needs to explore them.
//!
//! [`SearchSpace::build`] runs the whole pipeline for one sentence:
//! option-space construction (table lookups span by span, per-cell
//! ordering, unknown-input fallback, global pruning) followed by the
//! future-cost dynamic program over the finished space.

mod collection;
mod future;
mod options;

#[cfg(test)]
pub(crate) mod testutil;

#[cfg(test)]
mod tests;

use crate::input::{Sentence, Span};
use crate::score::{ModelError, ScoreAggregator};
use crate::settings::{ConfigError, DecoderConfig};
use crate::table::{TableError, TranslationTable};

pub use collection::{OptionSpace, PruneStats};
pub use future::{FutureCostMatrix, SpanScore};
pub use options::{TranslationOption, TranslationOptionList};

/// Failure while constructing one sentence's search space. Aborts that
/// sentence only; other sentences in a batch are unaffected. Config
/// errors are the exception: they are fatal before any sentence runs.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid decoder configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("table lookup failed for stage {stage} span {span}: {source}")]
    Table {
        stage: usize,
        span: Span,
        source: TableError,
    },
    #[error("scoring failed for stage {stage} span {span}: {source}")]
    Model {
        stage: usize,
        span: Span,
        source: ModelError,
    },
}

/// The finished per-sentence search space handed to the beam search.
#[derive(Debug)]
pub struct SearchSpace {
    options: OptionSpace,
    future: FutureCostMatrix,
}

impl SearchSpace {
    /// Construct the option space for `sentence` and compute its
    /// future-cost matrix.
    pub fn build(
        sentence: &Sentence,
        table: &dyn TranslationTable,
        models: &ScoreAggregator,
        config: &DecoderConfig,
    ) -> Result<Self, BuildError> {
        let options = OptionSpace::build(sentence, table, models, config)?;
        let future = FutureCostMatrix::compute(&options);
        Ok(Self { options, future })
    }

    /// Read-only view of one cell's options.
    pub fn options(&self, stage: usize, span: Span) -> &TranslationOptionList {
        self.options.options(stage, span)
    }

    /// The admissible lookahead estimate for a span.
    pub fn future_cost(&self, stage: usize, span: Span) -> f32 {
        self.future.cost(stage, span)
    }

    pub fn option_space(&self) -> &OptionSpace {
        &self.options
    }

    pub fn future(&self) -> &FutureCostMatrix {
        &self.future
    }
}
