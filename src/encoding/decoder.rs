//! Recovering a framed message from a pixel grid.
//!
//! Decoding always scans the whole traversable region; delimiters are
//! matched only after every slot has been converted to text.

use crate::config::plausibility;
use crate::encoding::address::Traversal;
use crate::encoding::channel::read_pixel;
use crate::encoding::framer::{unframe, TextAssembler};
use crate::error::Result;
use crate::grid::PixelGrid;
use crate::params::StegoParams;

/// All text recovered from the traversal, before delimiter stripping.
pub fn decode_raw(grid: &PixelGrid, params: &StegoParams) -> Result<String> {
    params.validate_for(grid.rows(), grid.cols())?;

    let traversal = Traversal::new(grid.rows(), grid.cols(), params);
    let mut text = TextAssembler::new();
    let mut slots = 0usize;
    for (row, col) in traversal.iter() {
        text.extend(read_pixel(
            grid.pixel(row, col),
            params.channels,
            params.bits_per_channel,
        ));
        slots += 1;
    }

    let raw = text.finish();
    tracing::debug!(slots, chars = raw.chars().count(), "Extracted raw text");
    Ok(raw)
}

/// Decode the message, surfacing configuration errors.
#[tracing::instrument(skip(grid, params), fields(rows = grid.rows(), cols = grid.cols()))]
pub fn try_decode(grid: &PixelGrid, params: &StegoParams) -> Result<String> {
    let raw = decode_raw(grid, params)?;
    Ok(unframe(&raw, &params.start_delimiter, &params.end_delimiter).to_string())
}

/// Decode the message; returns an empty string if `params` are invalid for
/// this grid.
///
/// Absence of a message is not an error: the result is then whatever text
/// the low bits happen to form.
pub fn decode(grid: &PixelGrid, params: &StegoParams) -> String {
    try_decode(grid, params).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Decode aborted");
        String::new()
    })
}

/// Non-empty and made only of printable ASCII.
pub fn is_plausible(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| (plausibility::MIN_CHAR..=plausibility::MAX_CHAR).contains(&c))
}

/// Decode and keep the result only if it looks like a real message.
pub fn detect(grid: &PixelGrid, params: &StegoParams) -> Option<String> {
    let message = decode(grid, params);
    is_plausible(&message).then_some(message)
}
