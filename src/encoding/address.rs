//! Mapping from slot index to pixel coordinate.
//!
//! Encode and decode both walk the grid through [`Traversal`], which is
//! backed by the single [`address`] function.

use crate::params::{Direction, StegoParams};

/// Coordinate of the `index`-th slot, as `(row, col)`.
///
/// The result may lie outside the grid; callers treat `row >= rows` or
/// `col >= cols` as the end of the sequence. Arithmetic saturates, so a
/// huge index maps to an out-of-bounds coordinate instead of wrapping.
///
/// # Panics
///
/// Panics if `rows` or `cols` is zero.
pub fn address(
    index: usize,
    gap: usize,
    start_row: usize,
    start_col: usize,
    rows: usize,
    cols: usize,
    direction: Direction,
) -> (usize, usize) {
    let offset = index.saturating_mul(gap.saturating_add(1));

    match direction {
        Direction::RowMajor => {
            let total = start_row
                .saturating_mul(cols)
                .saturating_add(start_col)
                .saturating_add(offset);
            (total / cols, total % cols)
        }
        Direction::ColumnMajor => {
            let total = start_col
                .saturating_mul(rows)
                .saturating_add(start_row)
                .saturating_add(offset);
            (total % rows, total / rows)
        }
    }
}

/// The sequence of slots visited for one grid and parameter tuple.
#[derive(Debug, Clone, Copy)]
pub struct Traversal {
    rows: usize,
    cols: usize,
    start_row: usize,
    start_col: usize,
    gap: usize,
    direction: Direction,
}

impl Traversal {
    /// Traversal of a `rows x cols` grid; `params` must already be
    /// validated against these dimensions.
    pub fn new(rows: usize, cols: usize, params: &StegoParams) -> Self {
        Self {
            rows,
            cols,
            start_row: params.start_row,
            start_col: params.start_col,
            gap: params.gap,
            direction: params.direction,
        }
    }

    /// Coordinate of slot `index`, or `None` once the sequence is exhausted.
    pub fn slot(&self, index: usize) -> Option<(usize, usize)> {
        let (row, col) = address(
            index,
            self.gap,
            self.start_row,
            self.start_col,
            self.rows,
            self.cols,
            self.direction,
        );
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Iterate over slot coordinates until the grid is exhausted.
    pub fn iter(&self) -> Slots {
        Slots {
            traversal: *self,
            index: 0,
            done: false,
        }
    }
}

/// Iterator over the coordinates of a [`Traversal`].
#[derive(Debug, Clone)]
pub struct Slots {
    traversal: Traversal,
    index: usize,
    done: bool,
}

impl Iterator for Slots {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // Offsets grow monotonically, so the first miss ends the walk.
        match self.traversal.slot(self.index) {
            Some(coord) => {
                self.index += 1;
                Some(coord)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}
