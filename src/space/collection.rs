//! Option-space construction: span filling, unknown-input fallback,
//! global pruning.

use tracing::{debug, debug_span, warn};

use super::options::{TranslationOption, TranslationOptionList};
use super::BuildError;
use crate::input::{Sentence, Span, Token, UNKNOWN_MARKER};
use crate::matrix::{spans, SpanMatrix};
use crate::score::{ModelError, ScoreAggregator};
use crate::settings::{DecoderConfig, StageConfig};
use crate::table::{TargetPhrase, TargetPhraseCollection, TranslationTable};

/// Per-stage pruning diagnostics: options seen across all spans and
/// options discarded by the global limit pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub total: usize,
    pub pruned: usize,
}

/// The per-sentence search space: for each stage, a triangular matrix of
/// option lists indexed by span. Every in-range cell exists from
/// creation; cells are only ever truncated, never resized.
#[derive(Debug)]
pub struct OptionSpace {
    stages: Vec<SpanMatrix<TranslationOptionList>>,
    stats: Vec<PruneStats>,
    len: usize,
}

impl OptionSpace {
    /// Build the full option space for `sentence`.
    ///
    /// For each stage, spans are filled in increasing-length order from
    /// table lookups, each cell is sorted, uncovered single positions are
    /// resolved (limit-bypass retry, then synthesis), and oversized cells
    /// are pruned to the stage limit. On return every length-1 cell is
    /// non-empty; longer spans may legitimately stay empty.
    pub fn build(
        sentence: &Sentence,
        table: &dyn TranslationTable,
        models: &ScoreAggregator,
        config: &DecoderConfig,
    ) -> Result<Self, BuildError> {
        config.validate()?;
        let len = sentence.len();
        let _span = debug_span!("build_space", len, stages = config.stages.len()).entered();

        let mut space = Self {
            stages: (0..config.stages.len()).map(|_| SpanMatrix::new(len)).collect(),
            stats: vec![PruneStats::default(); config.stages.len()],
            len,
        };

        for stage in 0..config.stages.len() {
            for span in spans(len) {
                let raw = table
                    .lookup(stage, sentence, span, true)
                    .map_err(|source| BuildError::Table { stage, span, source })?;
                space.score_and_insert(stage, span, raw, models)?;
            }
            for span in spans(len) {
                let list = space.stages[stage].get_mut(span);
                if !list.is_empty() {
                    list.sort();
                }
            }
        }

        space.resolve_uncovered_positions(sentence, table, models, config)?;
        space.prune(config);
        Ok(space)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Read-only view of one cell.
    pub fn options(&self, stage: usize, span: Span) -> &TranslationOptionList {
        self.stages[stage].get(span)
    }

    pub fn prune_stats(&self, stage: usize) -> PruneStats {
        self.stats[stage]
    }

    /// Score each raw candidate and append it to the span's list. An
    /// option whose score comes back non-finite is discarded with a
    /// warning; any other model failure aborts the sentence.
    fn score_and_insert(
        &mut self,
        stage: usize,
        span: Span,
        raw: TargetPhraseCollection,
        models: &ScoreAggregator,
    ) -> Result<(), BuildError> {
        for phrase in raw {
            let mut option = TranslationOption::new(stage, span, phrase);
            match option.finalize_score(models) {
                Ok(()) => self.stages[stage].get_mut(span).push(option),
                Err(error @ ModelError::InvalidScore { .. }) => {
                    warn!(stage, %span, %error, "discarding option with invalid score");
                }
                Err(source) => return Err(BuildError::Model { stage, span, source }),
            }
        }
        Ok(())
    }

    /// Guarantee every single-position span has at least one option.
    ///
    /// First retries the table with the limit bypass; positions still
    /// uncovered get exactly one synthesized option, scored through the
    /// normal path.
    fn resolve_uncovered_positions(
        &mut self,
        sentence: &Sentence,
        table: &dyn TranslationTable,
        models: &ScoreAggregator,
        config: &DecoderConfig,
    ) -> Result<(), BuildError> {
        for (stage, stage_config) in config.stages.iter().enumerate() {
            for pos in 0..sentence.len() {
                let span = Span::point(pos);
                if !self.stages[stage].get(span).is_empty() {
                    continue;
                }
                let raw = table
                    .lookup(stage, sentence, span, false)
                    .map_err(|source| BuildError::Table { stage, span, source })?;
                self.score_and_insert(stage, span, raw, models)?;
            }

            for pos in 0..sentence.len() {
                let span = Span::point(pos);
                if !self.stages[stage].get(span).is_empty() {
                    continue;
                }
                debug!(stage, pos, "synthesizing option for uncovered position");
                let target = synthesize_unknown(
                    sentence.token(pos),
                    stage_config,
                    config.decoder.drop_unknown,
                );
                let mut raw = TargetPhraseCollection::new();
                raw.push(target);
                self.score_and_insert(stage, span, raw, models)?;
            }
        }
        Ok(())
    }

    /// Global pruning pass: truncate every oversized cell to the stage
    /// limit and record seen/discarded counts. Unlimited stages are
    /// skipped entirely.
    fn prune(&mut self, config: &DecoderConfig) {
        for (stage, stage_config) in config.stages.iter().enumerate() {
            let limit = stage_config.table_limit;
            if limit == 0 {
                continue;
            }
            let mut stats = PruneStats::default();
            for span in spans(self.len) {
                let list = self.stages[stage].get_mut(span);
                stats.total += list.len();
                if list.len() > limit {
                    stats.pruned += list.len() - limit;
                    list.rank_and_truncate(limit);
                }
            }
            debug!(stage, total = stats.total, pruned = stats.pruned, "pruned option space");
            self.stats[stage] = stats;
        }
    }
}

/// Build the one option covering an otherwise-uncovered token.
///
/// Pass-through attribute slots are copied verbatim from the source
/// token (missing ones become the unknown marker); all other slots get
/// the marker. With drop-unknown enabled, non-numeric tokens instead map
/// to the empty phrase, deleting the token from the translation.
fn synthesize_unknown(token: &Token, stage: &StageConfig, drop_unknown: bool) -> TargetPhrase {
    if drop_unknown && !token.is_numeric() {
        return TargetPhrase::empty();
    }

    let slot_count = token
        .attr_count()
        .max(stage.pass_through.last().map_or(0, |&s| s + 1));
    let attrs = (0..slot_count)
        .map(|slot| {
            let value = if stage.pass_through.contains(&slot) {
                token.attr(slot).unwrap_or(UNKNOWN_MARKER)
            } else {
                UNKNOWN_MARKER
            };
            Some(value.to_string())
        })
        .collect();
    TargetPhrase::new(vec![Token::with_attrs(attrs)], 0.0)
}
