//! Core coordinate types for the tile grid.

use std::fmt;

/// A single tile position on the global grid.
///
/// Chunks are addressed by (column, row) with column increasing eastward
/// and row increasing southward. Coordinates are non-negative by
/// construction.
///
/// # Example
///
/// ```
/// use tilestitch::coord::Chunk;
///
/// let chunk = Chunk::new(1126, 695);
/// assert_eq!(chunk.col, 1126);
/// assert_eq!(chunk.row, 695);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chunk {
    /// Column index (west to east).
    pub col: u32,
    /// Row index (north to south).
    pub row: u32,
}

impl Chunk {
    /// Creates a new chunk coordinate.
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// An inclusive rectangular span of chunk coordinates.
///
/// The constructor normalizes its corners so that
/// `start.col <= end.col` and `start.row <= end.row` always hold,
/// regardless of the order the corners were given in. Iteration is
/// column-major: the outer loop walks columns, the inner loop walks rows.
///
/// # Example
///
/// ```
/// use tilestitch::coord::{Chunk, ChunkRange};
///
/// let range = ChunkRange::new(Chunk::new(1, 1), Chunk::new(2, 1));
/// let chunks: Vec<_> = range.iter().collect();
/// assert_eq!(chunks, vec![Chunk::new(1, 1), Chunk::new(2, 1)]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRange {
    start: Chunk,
    end: Chunk,
}

impl ChunkRange {
    /// Creates a range spanning the rectangle between two corners.
    ///
    /// The corners may be given in any order; each axis is normalized
    /// independently so the resulting range always iterates correctly.
    pub fn new(a: Chunk, b: Chunk) -> Self {
        Self {
            start: Chunk::new(a.col.min(b.col), a.row.min(b.row)),
            end: Chunk::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    /// The northwest corner (minimum column and row).
    pub fn start(&self) -> Chunk {
        self.start
    }

    /// The southeast corner (maximum column and row).
    pub fn end(&self) -> Chunk {
        self.end
    }

    /// Number of columns spanned, inclusive of both ends.
    pub fn cols(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Number of rows spanned, inclusive of both ends.
    pub fn rows(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Total number of chunks in the range.
    pub fn len(&self) -> usize {
        self.cols() as usize * self.rows() as usize
    }

    /// Always false: a range contains at least its start chunk.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the range in column-major order.
    ///
    /// The outer loop walks columns from `start.col` to `end.col`, the
    /// inner loop walks rows from `start.row` to `end.row`. This ordering
    /// fixes the order of fetch results downstream.
    pub fn iter(&self) -> ChunkRangeIter {
        ChunkRangeIter {
            range: *self,
            next: Some(self.start),
        }
    }
}

impl IntoIterator for ChunkRange {
    type Item = Chunk;
    type IntoIter = ChunkRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Column-major iterator over a [`ChunkRange`].
#[derive(Clone, Debug)]
pub struct ChunkRangeIter {
    range: ChunkRange,
    next: Option<Chunk>,
}

impl Iterator for ChunkRangeIter {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let current = self.next?;

        self.next = if current.row < self.range.end.row {
            Some(Chunk::new(current.col, current.row + 1))
        } else if current.col < self.range.end.col {
            Some(Chunk::new(current.col + 1, self.range.start.row))
        } else {
            None
        };

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(next) => {
                let cols_left = (self.range.end.col - next.col) as usize;
                let rows_left = (self.range.end.row - next.row + 1) as usize;
                cols_left * self.range.rows() as usize + rows_left
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkRangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_chunk_equality_and_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Chunk::new(1126, 695));
        set.insert(Chunk::new(1126, 695));
        set.insert(Chunk::new(695, 1126));

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_chunk_display() {
        assert_eq!(format!("{}", Chunk::new(1126, 695)), "1126,695");
    }

    #[test]
    fn test_single_chunk_range() {
        let range = ChunkRange::new(Chunk::new(5, 7), Chunk::new(5, 7));
        assert_eq!(range.len(), 1);
        let chunks: Vec<_> = range.iter().collect();
        assert_eq!(chunks, vec![Chunk::new(5, 7)]);
    }

    #[test]
    fn test_column_major_order() {
        let range = ChunkRange::new(Chunk::new(1, 10), Chunk::new(2, 12));
        let chunks: Vec<_> = range.iter().collect();
        assert_eq!(
            chunks,
            vec![
                Chunk::new(1, 10),
                Chunk::new(1, 11),
                Chunk::new(1, 12),
                Chunk::new(2, 10),
                Chunk::new(2, 11),
                Chunk::new(2, 12),
            ]
        );
    }

    #[test]
    fn test_normalizes_swapped_corners() {
        let range = ChunkRange::new(Chunk::new(9, 2), Chunk::new(3, 8));
        assert_eq!(range.start(), Chunk::new(3, 2));
        assert_eq!(range.end(), Chunk::new(9, 8));
        assert_eq!(range.len(), 7 * 7);
    }

    #[test]
    fn test_len_matches_grid_dimensions() {
        let range = ChunkRange::new(Chunk::new(1126, 695), Chunk::new(1129, 697));
        assert_eq!(range.cols(), 4);
        assert_eq!(range.rows(), 3);
        assert_eq!(range.len(), 12);
    }

    #[test]
    fn test_exact_size_iterator() {
        let range = ChunkRange::new(Chunk::new(0, 0), Chunk::new(3, 2));
        let mut iter = range.iter();
        assert_eq!(iter.len(), 12);
        iter.next();
        assert_eq!(iter.len(), 11);
        for _ in iter.by_ref() {}
        assert_eq!(iter.len(), 0);
    }

    proptest! {
        #[test]
        fn prop_iteration_count_matches_len(
            col_a in 0u32..500,
            row_a in 0u32..500,
            col_b in 0u32..500,
            row_b in 0u32..500,
        ) {
            let range = ChunkRange::new(Chunk::new(col_a, row_a), Chunk::new(col_b, row_b));
            prop_assert_eq!(range.iter().count(), range.len());
        }

        #[test]
        fn prop_iteration_is_column_major(
            col in 0u32..100,
            row in 0u32..100,
            width in 0u32..8,
            height in 0u32..8,
        ) {
            let range = ChunkRange::new(
                Chunk::new(col, row),
                Chunk::new(col + width, row + height),
            );
            let chunks: Vec<_> = range.iter().collect();
            for pair in chunks.windows(2) {
                // Either same column advancing a row, or next column
                // restarting at the first row.
                let ordered = (pair[1].col == pair[0].col && pair[1].row == pair[0].row + 1)
                    || (pair[1].col == pair[0].col + 1 && pair[1].row == range.start().row);
                prop_assert!(ordered);
            }
        }
    }
}
