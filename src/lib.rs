//! LSB Image Steganography
//!
//! Hides a text message in the least-significant bits of selected color
//! channels of an RGB image and recovers it with the same structural key.
//!
//! # Features
//!
//! - **Structural key**: start position, channel set, bit depth (1-8),
//!   row- or column-major traversal, gap between slots, start/end delimiters
//! - **Exact capacity planning**: encode fails before touching a pixel if
//!   the framed message does not fit
//! - **Lenient decoding**: missing delimiters and noise bytes never abort a
//!   decode
//! - **CLI Interface**: encode, decode, detect, capacity, key generation
//!
//! # Architecture
//!
//! ```text
//! Message → Frame (delimiters + zero padding) → Traverse (start, gap, direction) → Write LSBs
//! ```
//!
//! The key is plain metadata, not cryptographic material, and the scheme
//! only survives lossless storage of the pixels.
//!
//! # Example
//!
//! ```rust
//! use lsb_stego::{decode, encode, BitDepth, Direction, PixelGrid, StegoParams};
//!
//! let mut grid = PixelGrid::filled(32, 32, [120, 64, 200]);
//! let params = StegoParams {
//!     start_row: 2,
//!     start_col: 5,
//!     gap: 1,
//!     channels: "GB".parse().unwrap(),
//!     bits_per_channel: BitDepth::new(2).unwrap(),
//!     direction: Direction::ColumnMajor,
//!     start_delimiter: "[START]".into(),
//!     end_delimiter: "[END]".into(),
//! };
//!
//! encode(&mut grid, "Meet at noon.", &params).unwrap();
//! assert_eq!(decode(&grid, &params), "Meet at noon.");
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod generator;
pub mod grid;
pub mod image_io;
pub mod params;

pub use config::GeneratorConfig;
pub use encoding::{decode, detect, encode, try_decode, Capacity, EncodeSummary};
pub use error::{Error, Result};
pub use grid::{PixelGrid, Rgb};
pub use params::{BitDepth, Channel, ChannelSet, Direction, LabeledKey, StegoParams};
