//! Configuration values and defaults for callers of the codec.
//!
//! Nothing here is read by the core implicitly: the defaults are only used
//! to build a [`StegoParams`](crate::params::StegoParams) when the caller
//! does not supply a value.

use serde::{Deserialize, Serialize};

/// Default start delimiter.
pub const DEFAULT_START_DELIMITER: &str = "#";

/// Default end delimiter.
pub const DEFAULT_END_DELIMITER: &str = "#";

/// Default channel selection.
pub const DEFAULT_CHANNELS: &str = "RGB";

/// Default number of low bits used per channel.
pub const DEFAULT_BITS_PER_CHANNEL: u8 = 1;

/// Default gap between embedding slots (consecutive pixels).
pub const DEFAULT_GAP: usize = 0;

/// Delimiter pairs the input generator draws from.
pub const DELIMITER_PRESETS: &[(&str, &str)] = &[
    ("#", "#"),
    ("##", "##"),
    ("***", "***"),
    ("[START]", "[END]"),
    ("<START>", "<END>"),
    ("<<START>>", "<<END>>"),
    ("<<", ">>"),
    ("{", "}"),
    ("|", "|"),
    ("+++", "+++"),
    ("BEGIN", "END"),
    ("---", "---"),
    ("!!!", "!!!"),
    ("$$$", "$$$"),
    ("&&&", "&&&"),
    ("@@", "@@"),
];

/// Channel selections the input generator draws from.
pub const CHANNEL_PRESETS: &[&str] = &["R", "G", "B", "RG", "RB", "GB", "RGB"];

/// Inclusive character range a decoded message must stay within to count
/// as plausible text.
pub mod plausibility {
    /// Lowest accepted character (space).
    pub const MIN_CHAR: char = ' ';

    /// Highest accepted character (tilde).
    pub const MAX_CHAR: char = '~';
}

/// Default largest gap the generator picks.
pub const DEFAULT_MAX_GAP: usize = 5;

/// Default fraction of each axis the generator may start in.
pub const DEFAULT_START_FRACTION: f64 = 0.5;

/// Default lower bound of generated message length, relative to capacity.
pub const DEFAULT_MIN_UTILIZATION: f64 = 0.6;

/// Default upper bound of generated message length, relative to capacity.
pub const DEFAULT_MAX_UTILIZATION: f64 = 0.9;

/// Default number of messages drawn before giving up on unambiguous framing.
pub const DEFAULT_MAX_ATTEMPTS: usize = 8;

/// Configuration for the random input generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Largest gap drawn (inclusive).
    pub max_gap: usize,

    /// Start row/column are drawn from `0..=axis * start_fraction`.
    pub start_fraction: f64,

    /// Message length lower bound as a fraction of the maximum.
    pub min_utilization: f64,

    /// Message length upper bound as a fraction of the maximum.
    pub max_utilization: f64,

    /// Messages drawn before giving up.
    pub max_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_gap: DEFAULT_MAX_GAP,
            start_fraction: DEFAULT_START_FRACTION,
            min_utilization: DEFAULT_MIN_UTILIZATION,
            max_utilization: DEFAULT_MAX_UTILIZATION,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.start_fraction) {
            return Err("Start fraction must be between 0 and 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.min_utilization)
            || !(0.0..=1.0).contains(&self.max_utilization)
        {
            return Err("Utilization bounds must be between 0 and 1".to_string());
        }
        if self.min_utilization > self.max_utilization {
            return Err(format!(
                "Minimum utilization {} exceeds maximum {}",
                self.min_utilization, self.max_utilization
            ));
        }
        if self.max_attempts == 0 {
            return Err("At least one attempt is required".to_string());
        }
        Ok(())
    }
}
