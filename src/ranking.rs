//! Partial-selection truncation for candidate lists.

use std::cmp::Ordering;

/// Keep the top `limit` elements of `items` by `score` (descending) and
/// drop the rest. `limit == 0` means unlimited; a list already within the
/// limit is left untouched, so the operation is idempotent.
///
/// Uses nth-element partial selection rather than a full sort: only the
/// boundary between kept and discarded elements is established. Order
/// within the kept prefix is unspecified. Ties at the boundary are broken
/// arbitrarily but deterministically for identical input.
pub fn retain_top_by<T, F>(items: &mut Vec<T>, limit: usize, score: F)
where
    F: Fn(&T) -> f32,
{
    if limit == 0 || items.len() <= limit {
        return;
    }
    items.select_nth_unstable_by(limit - 1, |a, b| compare_desc(score(a), score(b)));
    items.truncate(limit);
}

/// Descending total order on scores. NaN never appears in scored options
/// (non-finite scores are rejected at insertion), but `total_cmp` keeps
/// the comparator a total order regardless.
pub(crate) fn compare_desc(a: f32, b: f32) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(items: &[f32]) -> Vec<f32> {
        let mut v = items.to_vec();
        v.sort_by(|a, b| b.total_cmp(a));
        v
    }

    #[test]
    fn keeps_top_limit_by_score() {
        let mut items = vec![5.0_f32, 1.0, 4.0, 2.0, 3.0];
        retain_top_by(&mut items, 3, |x| *x);
        assert_eq!(scores(&items), vec![5.0, 4.0, 3.0]);

        let mut items = vec![5.0_f32, 1.0, 4.0, 2.0, 3.0];
        retain_top_by(&mut items, 2, |x| *x);
        assert_eq!(scores(&items), vec![5.0, 4.0]);
    }

    #[test]
    fn zero_limit_is_unlimited() {
        let mut items = vec![3.0_f32, 1.0, 2.0];
        retain_top_by(&mut items, 0, |x| *x);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn within_limit_is_untouched() {
        let mut items = vec![3.0_f32, 1.0, 2.0];
        retain_top_by(&mut items, 5, |x| *x);
        assert_eq!(items, vec![3.0, 1.0, 2.0]);

        // exactly at the limit
        retain_top_by(&mut items, 3, |x| *x);
        assert_eq!(items, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn idempotent_after_truncation() {
        let mut items = vec![5.0_f32, 1.0, 4.0, 2.0, 3.0];
        retain_top_by(&mut items, 2, |x| *x);
        let first = items.clone();
        retain_top_by(&mut items, 2, |x| *x);
        assert_eq!(items, first);
    }

    #[test]
    fn deterministic_on_ties() {
        let input = vec![(0, 2.0_f32), (1, 2.0), (2, 2.0), (3, 1.0)];
        let mut a = input.clone();
        let mut b = input.clone();
        retain_top_by(&mut a, 2, |x| x.1);
        retain_top_by(&mut b, 2, |x| x.1);
        assert_eq!(a, b);
        assert!(a.iter().all(|x| x.1 == 2.0));
    }
}
