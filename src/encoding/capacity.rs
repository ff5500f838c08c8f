//! Embeddable bit budget of a grid under a parameter tuple.

use crate::encoding::framer::{padded_len, BITS_PER_CHAR};
use crate::error::{Error, Result};
use crate::params::{Direction, StegoParams};
use serde::Serialize;

/// Pixels from `(start_row, start_col)` to the end of the grid in
/// traversal order.
///
/// The start position must lie inside the grid.
pub fn traversable_pixels(
    rows: usize,
    cols: usize,
    start_row: usize,
    start_col: usize,
    direction: Direction,
) -> usize {
    match direction {
        Direction::RowMajor => (cols - start_col) + (rows - start_row - 1) * cols,
        Direction::ColumnMajor => (rows - start_row) + (cols - start_col - 1) * rows,
    }
}

/// Bits needed for `message_chars` characters plus delimiters, rounded up
/// to whole pixels.
pub fn required_bits(
    message_chars: usize,
    delimiter_chars: usize,
    bits_per_pixel: usize,
) -> usize {
    padded_len((message_chars + delimiter_chars) * BITS_PER_CHAR, bits_per_pixel)
}

/// Derived capacity figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    pub traversable_pixels: usize,
    pub available_pixels: usize,
    pub bits_per_pixel: usize,
    pub available_bits: usize,
}

impl Capacity {
    /// Validate `params` against a `rows x cols` grid and compute its
    /// capacity.
    pub fn compute(rows: usize, cols: usize, params: &StegoParams) -> Result<Self> {
        params.validate_for(rows, cols)?;

        let traversable_pixels = traversable_pixels(
            rows,
            cols,
            params.start_row,
            params.start_col,
            params.direction,
        );
        let available_pixels = traversable_pixels / (params.gap.saturating_add(1));
        let bits_per_pixel = params.bits_per_pixel();

        Ok(Self {
            traversable_pixels,
            available_pixels,
            bits_per_pixel,
            available_bits: available_pixels * bits_per_pixel,
        })
    }

    /// Fail with [`Error::MessageTooLarge`] if `required` bits do not fit.
    pub fn check(&self, required: usize) -> Result<()> {
        if required > self.available_bits {
            return Err(Error::MessageTooLarge {
                required,
                available: self.available_bits,
            });
        }
        Ok(())
    }

    /// Longest message, in characters, that fits with the delimiters of
    /// `params`.
    pub fn max_message_chars(&self, params: &StegoParams) -> usize {
        // available_bits is pixel-aligned, so padding never pushes a
        // byte-aligned frame past it.
        let delimiter_chars =
            params.start_delimiter.chars().count() + params.end_delimiter.chars().count();
        (self.available_bits / BITS_PER_CHAR).saturating_sub(delimiter_chars)
    }
}
