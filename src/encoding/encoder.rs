//! Embedding a framed message into a pixel grid.

use crate::encoding::address::Traversal;
use crate::encoding::capacity::Capacity;
use crate::encoding::channel::write_pixel;
use crate::encoding::framer::frame;
use crate::error::Result;
use crate::grid::PixelGrid;
use crate::params::StegoParams;
use serde::Serialize;

/// What an [`encode`] call wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    /// Pixel slots modified.
    pub pixels_written: usize,
    /// Bits written, padding included.
    pub bits_written: usize,
    /// Zero bits appended for pixel alignment.
    pub padding_bits: usize,
    pub capacity: Capacity,
}

/// Embed `message` into `grid` using `params`.
///
/// All validation happens before the first pixel is modified: on error the
/// grid is left exactly as it was.
///
/// # Example
///
/// ```
/// use lsb_stego::{decode, encode, PixelGrid, StegoParams};
///
/// let mut grid = PixelGrid::filled(4, 4, [0, 0, 0]);
/// let params = StegoParams::default();
///
/// encode(&mut grid, "Hi", &params).unwrap();
/// assert_eq!(decode(&grid, &params), "Hi");
/// ```
#[tracing::instrument(
    skip(grid, message, params),
    fields(rows = grid.rows(), cols = grid.cols(), chars = message.chars().count())
)]
pub fn encode(grid: &mut PixelGrid, message: &str, params: &StegoParams) -> Result<EncodeSummary> {
    let capacity = Capacity::compute(grid.rows(), grid.cols(), params)?;
    let stream = frame(
        message,
        &params.start_delimiter,
        &params.end_delimiter,
        capacity.bits_per_pixel,
    )?;
    capacity.check(stream.len())?;

    tracing::debug!(
        required = stream.len(),
        available = capacity.available_bits,
        bits_per_pixel = capacity.bits_per_pixel,
        "Capacity check passed"
    );

    let traversal = Traversal::new(grid.rows(), grid.cols(), params);
    let mut pixels_written = 0;
    for ((row, col), chunk) in traversal
        .iter()
        .zip(stream.pixel_chunks(capacity.bits_per_pixel))
    {
        let pixel = grid.pixel_mut(row, col);
        *pixel = write_pixel(*pixel, chunk, params.channels, params.bits_per_channel);
        pixels_written += 1;
    }
    debug_assert_eq!(pixels_written * capacity.bits_per_pixel, stream.len());

    tracing::info!(
        pixels = pixels_written,
        bits = stream.len(),
        padding = stream.padding(),
        "Message embedded"
    );

    Ok(EncodeSummary {
        pixels_written,
        bits_written: stream.len(),
        padding_bits: stream.padding(),
        capacity,
    })
}
