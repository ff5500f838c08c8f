//! Reading and writing the low bits of selected channels in one pixel.

use crate::grid::Rgb;
use crate::params::{BitDepth, ChannelSet};

/// Replace the low `depth` bits of each selected channel with the next
/// chunk of `bits` (most significant bit first), in R, G, B order.
///
/// Higher bits and unselected channels are left untouched. A short `bits`
/// slice is padded with zeros.
pub fn write_pixel(pixel: Rgb, bits: &[bool], channels: ChannelSet, depth: BitDepth) -> Rgb {
    let width = depth.get() as usize;
    debug_assert!(bits.len() <= channels.len() * width);

    let mut out = pixel;
    let mut chunks = bits.chunks(width);
    for channel in channels.iter() {
        let chunk = chunks.next().unwrap_or(&[]);
        let mut value = 0u8;
        for i in 0..width {
            value = (value << 1) | u8::from(chunk.get(i).copied().unwrap_or(false));
        }
        let slot = &mut out[channel.index()];
        *slot = (*slot & !depth.low_mask()) | value;
    }
    out
}

/// Low `depth` bits of each selected channel, concatenated in R, G, B
/// order, each chunk most significant bit first.
pub fn read_pixel(
    pixel: Rgb,
    channels: ChannelSet,
    depth: BitDepth,
) -> impl Iterator<Item = bool> {
    let width = depth.get();
    let mask = depth.low_mask();
    let values: Vec<u8> = channels.iter().map(|c| pixel[c.index()] & mask).collect();
    values
        .into_iter()
        .flat_map(move |value| (0..width).rev().map(move |i| (value >> i) & 1 == 1))
}
