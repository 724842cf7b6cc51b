use proptest::prelude::*;

use crate::input::{Sentence, Span, Token};
use crate::matrix::spans;
use crate::score::ScoreAggregator;
use crate::settings::DecoderConfig;
use crate::space::testutil::TestTable;
use crate::space::SearchSpace;

fn arb_case() -> impl Strategy<Value = (usize, Vec<(usize, usize, f32)>, usize)> {
    (1usize..6).prop_flat_map(|len| {
        (
            Just(len),
            prop::collection::vec((0..len, 0..len, -10.0f32..10.0), 0..16),
            0usize..4,
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn construction_invariants_hold((len, entries, limit) in arb_case()) {
        let sentence = Sentence::new((0..len).map(|i| Token::surface(format!("w{i}"))).collect());
        let mut table = TestTable::new();
        for (i, &(a, b, score)) in entries.iter().enumerate() {
            table = table.with(a.min(b), a.max(b), &format!("t{i}"), score);
        }

        let space = SearchSpace::build(
            &sentence,
            &table,
            &ScoreAggregator::new(),
            &DecoderConfig::single_stage(limit),
        )
        .unwrap();

        for span in spans(len) {
            let list = space.options(0, span);

            // coverage: every single position has at least one option
            if span.len() == 1 {
                prop_assert!(!list.is_empty(), "uncovered position {span}");
            }

            // limit: no cell exceeds the stage limit
            if limit > 0 {
                prop_assert!(list.len() <= limit, "{span} holds {} > {limit}", list.len());
            }

            // retained options are exactly the top-limit of what the
            // table offered for this span (fallback only fills empties)
            let mut offered: Vec<f32> = entries
                .iter()
                .filter(|&&(a, b, _)| a.min(b) == span.start() && a.max(b) == span.end())
                .map(|&(_, _, score)| score)
                .collect();
            if !offered.is_empty() {
                offered.sort_by(|a, b| b.total_cmp(a));
                if limit > 0 {
                    offered.truncate(limit);
                }
                let mut kept: Vec<f32> = list.iter().map(|o| o.total_score()).collect();
                kept.sort_by(|a, b| b.total_cmp(a));
                prop_assert_eq!(kept, offered, "wrong retained set for {}", span);
            }

            // future cost dominates the raw best and every split
            let future = space.future();
            let optimistic = future.cost(0, span);
            prop_assert!(optimistic >= future.best(0, span));
            for split in span.start()..span.end() {
                let combined = future.cost(0, Span::new(span.start(), split))
                    + future.cost(0, Span::new(split + 1, span.end()));
                prop_assert!(optimistic >= combined);
            }
        }
    }
}
