//! Multi-model score aggregation.
//!
//! Heterogeneous scoring models (language models, feature functions)
//! register with a [`ScoreAggregator`] in a fixed order; option
//! evaluation asks the aggregator for weighted totals plus a labeled
//! per-model breakdown.

pub mod aggregate;
pub mod breakdown;
pub mod model;

pub use aggregate::{AggregateScore, ScoreAggregator, SlotRange};
pub use breakdown::ScoreBreakdown;
pub use model::{ModelError, ModelScore, ScoringModel};
