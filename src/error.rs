//! Error types for the LSB codec.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while embedding or recovering a message.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel letters outside of R, G and B.
    #[error("Invalid channel input {0:?}: use only 'R', 'G', 'B'")]
    InvalidChannels(String),

    /// No channel selected.
    #[error("Channel set must not be empty")]
    EmptyChannelSet,

    /// Bits per channel outside 1..=8.
    #[error("Invalid bits per channel {0}: must be between 1 and 8")]
    InvalidBitDepth(u8),

    /// Traversal direction not recognized.
    #[error("Invalid direction {0:?}: expected row-major or column-major")]
    InvalidDirection(String),

    /// Start position lies outside the pixel grid.
    #[error("Start position ({row}, {col}) exceeds image dimensions ({rows}, {cols})")]
    StartOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Framed message does not fit into the traversable region.
    #[error("Message is too large: need {required} bits (including padding), have {available} bits")]
    MessageTooLarge { required: usize, available: usize },

    /// A character that cannot be carried in a single recoverable byte.
    #[error("Unsupported character {ch:?} at position {position} of the {field}")]
    UnsupportedCharacter {
        ch: char,
        position: usize,
        field: &'static str,
    },

    /// Grid dimensions and pixel buffer disagree.
    #[error("Invalid pixel grid: {0}")]
    InvalidGrid(String),

    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Image is not 8-bit RGB.
    #[error("Unsupported image layout {0}: expected 8-bit RGB")]
    UnsupportedImage(String),

    /// Output format would not preserve pixel values exactly.
    #[error("Refusing to write lossy or unknown format: {0}")]
    LossyFormat(PathBuf),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid caller configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generator could not fit any message with the drawn parameters.
    #[error("Insufficient capacity: {0}")]
    InsufficientCapacity(String),
}

impl Error {
    /// Whether this error belongs to the configuration class: detected
    /// before any pixel is touched.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidChannels(_)
                | Error::EmptyChannelSet
                | Error::InvalidBitDepth(_)
                | Error::InvalidDirection(_)
                | Error::StartOutOfBounds { .. }
                | Error::MessageTooLarge { .. }
                | Error::UnsupportedCharacter { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
