//! LSB embedding core.
//!
//! ```text
//! message → frame (delimiters + padding) → slot addresses → channel low bits
//! ```
//!
//! Encode and decode share the same [`Traversal`] and [`Capacity`]
//! arithmetic, so a parameter tuple always addresses the same pixels on
//! both sides.

pub mod address;
pub mod capacity;
pub mod channel;
mod decoder;
mod encoder;
pub mod framer;

pub use address::{address, Traversal};
pub use capacity::{required_bits, traversable_pixels, Capacity};
pub use decoder::{decode, decode_raw, detect, is_plausible, try_decode};
pub use encoder::{encode, EncodeSummary};
