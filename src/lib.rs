//! Candidate search-space construction for a phrase-based translation
//! decoder.
//!
//! For every contiguous span of an input sentence, builds the list of
//! scored translation options a beam search will explore, applies per-span
//! table limits, guarantees coverage of every single position via
//! unknown-input fallback, and computes the admissible future-cost
//! estimates the search uses for lookahead pruning.

pub mod input;
pub mod matrix;
pub mod ranking;
pub mod score;
pub mod settings;
pub mod space;
pub mod table;
