//! Span-indexed triangular arena.
//!
//! One flat allocation holds a cell for every `(start, end)` with
//! `start <= end < size`, addressed by a computed offset. Avoids the
//! per-cell allocation churn of nested containers; the search space and
//! the future-cost table are both stored this way.

use crate::input::Span;

/// Triangular table over all in-range spans of a sentence.
#[derive(Debug, Clone)]
pub struct SpanMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

/// All spans of a `size`-token sentence in increasing-length order, the
/// order both construction and the future-cost recurrence require.
pub fn spans(size: usize) -> impl Iterator<Item = Span> {
    (1..=size)
        .flat_map(move |len| (0..=size - len).map(move |start| Span::new(start, start + len - 1)))
}

impl<T: Default + Clone> SpanMatrix<T> {
    /// Matrix for a `size`-token sentence with every cell defaulted.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![T::default(); size * (size + 1) / 2],
        }
    }
}

impl<T> SpanMatrix<T> {
    pub fn size(&self) -> usize {
        self.size
    }

    fn offset(&self, span: Span) -> usize {
        assert!(
            span.end() < self.size,
            "span {span} out of range for size {}",
            self.size
        );
        let start = span.start();
        // cells of rows 0..start, then the distance into row `start`
        start * (2 * self.size - start + 1) / 2 + (span.end() - start)
    }

    pub fn get(&self, span: Span) -> &T {
        &self.cells[self.offset(span)]
    }

    pub fn get_mut(&mut self, span: Span) -> &mut T {
        let idx = self.offset(span);
        &mut self.cells[idx]
    }

    pub fn iter_spans(&self) -> impl Iterator<Item = Span> {
        spans(self.size)
    }
}
