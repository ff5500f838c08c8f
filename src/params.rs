//! The parameter tuple ("key") shared between encode and decode.
//!
//! Every field must be byte-identical on both sides for a message to be
//! recovered. The types here make invalid tuples unrepresentable where they
//! can: a [`ChannelSet`] is never empty and a [`BitDepth`] is always 1..=8.

use crate::config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single color channel of an RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    /// All channels in their fixed iteration order.
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    /// Position of this channel inside an `[r, g, b]` triple.
    pub fn index(self) -> usize {
        match self {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
        }
    }

    /// Parse a channel letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Channel::R),
            'G' => Some(Channel::G),
            'B' => Some(Channel::B),
            _ => None,
        }
    }

    /// The upper-case letter of this channel.
    pub fn letter(self) -> char {
        match self {
            Channel::R => 'R',
            Channel::G => 'G',
            Channel::B => 'B',
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Non-empty subset of {R, G, B}, always iterated R before G before B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelSet {
    mask: u8,
}

impl ChannelSet {
    /// All three channels.
    pub const RGB: ChannelSet = ChannelSet { mask: 0b111 };

    /// Build a set from channels; order and duplicates in the input do not
    /// matter.
    pub fn new(channels: &[Channel]) -> Result<Self> {
        let mask = channels.iter().fold(0u8, |mask, c| mask | c.bit());
        if mask == 0 {
            return Err(Error::EmptyChannelSet);
        }
        Ok(Self { mask })
    }

    /// Number of selected channels.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Always false for a constructed set; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Whether `channel` is selected.
    pub fn contains(&self, channel: Channel) -> bool {
        self.mask & channel.bit() != 0
    }

    /// Selected channels in R, G, B order.
    pub fn iter(&self) -> impl Iterator<Item = Channel> {
        let set = *self;
        Channel::ALL.into_iter().filter(move |c| set.contains(*c))
    }
}

impl FromStr for ChannelSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let channels = s
            .chars()
            .map(Channel::from_char)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::InvalidChannels(s.to_string()))?;
        Self::new(&channels)
    }
}

impl TryFrom<String> for ChannelSet {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<ChannelSet> for String {
    fn from(set: ChannelSet) -> Self {
        set.to_string()
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.iter() {
            write!(f, "{}", channel.letter())?;
        }
        Ok(())
    }
}

/// Number of low bits modified per channel, in 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(bits: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(Error::InvalidBitDepth(bits))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Mask selecting the low bits of a channel value.
    pub fn low_mask(self) -> u8 {
        ((1u16 << self.0) - 1) as u8
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> Self {
        depth.0
    }
}

/// Order in which pixels are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Reading order: along a row, wrapping to the next row.
    #[default]
    RowMajor,
    /// Down a column, wrapping to the next column.
    ColumnMajor,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "row-major" | "row" | "horizontal" | "1" => Ok(Direction::RowMajor),
            "column-major" | "column" | "col" | "vertical" | "0" => Ok(Direction::ColumnMajor),
            _ => Err(Error::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::RowMajor => f.write_str("row-major"),
            Direction::ColumnMajor => f.write_str("column-major"),
        }
    }
}

/// The structural key used to embed and recover a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StegoParams {
    pub start_row: usize,
    pub start_col: usize,
    /// Pixels skipped between consecutive slots.
    pub gap: usize,
    pub channels: ChannelSet,
    pub bits_per_channel: BitDepth,
    pub direction: Direction,
    pub start_delimiter: String,
    pub end_delimiter: String,
}

impl Default for StegoParams {
    fn default() -> Self {
        Self {
            start_row: 0,
            start_col: 0,
            gap: config::DEFAULT_GAP,
            channels: ChannelSet::RGB,
            bits_per_channel: BitDepth(config::DEFAULT_BITS_PER_CHANNEL),
            direction: Direction::RowMajor,
            start_delimiter: config::DEFAULT_START_DELIMITER.to_string(),
            end_delimiter: config::DEFAULT_END_DELIMITER.to_string(),
        }
    }
}

impl StegoParams {
    /// Bits carried by one visited pixel.
    pub fn bits_per_pixel(&self) -> usize {
        self.channels.len() * self.bits_per_channel.get() as usize
    }

    /// Check the tuple against a grid of `rows x cols` pixels.
    pub fn validate_for(&self, rows: usize, cols: usize) -> Result<()> {
        if self.channels.is_empty() {
            return Err(Error::EmptyChannelSet);
        }
        if self.start_row >= rows || self.start_col >= cols {
            return Err(Error::StartOutOfBounds {
                row: self.start_row,
                col: self.start_col,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

/// A parameter tuple with an opaque session label attached.
///
/// The codec never looks at `label`; it only correlates a key with the
/// session that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledKey {
    pub label: String,
    #[serde(flatten)]
    pub params: StegoParams,
}

impl LabeledKey {
    pub fn new(label: impl Into<String>, params: StegoParams) -> Self {
        Self {
            label: label.into(),
            params,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the key as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a key written by [`LabeledKey::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_set_fixed_order() {
        let set: ChannelSet = "bgr".parse().unwrap();
        let order: Vec<Channel> = set.iter().collect();
        assert_eq!(order, vec![Channel::R, Channel::G, Channel::B]);
        assert_eq!(set.to_string(), "RGB");
    }

    #[test]
    fn test_channel_set_duplicates_collapse() {
        let set: ChannelSet = "RRB".parse().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "RB");
    }

    #[test]
    fn test_channel_set_rejects_invalid() {
        assert!(matches!(
            "RX".parse::<ChannelSet>(),
            Err(Error::InvalidChannels(_))
        ));
        assert!(matches!(
            "".parse::<ChannelSet>(),
            Err(Error::EmptyChannelSet)
        ));
    }

    #[test]
    fn test_bit_depth_range() {
        assert!(BitDepth::new(0).is_err());
        assert!(BitDepth::new(9).is_err());
        assert_eq!(BitDepth::new(1).unwrap().low_mask(), 0b1);
        assert_eq!(BitDepth::new(3).unwrap().low_mask(), 0b111);
        assert_eq!(BitDepth::new(8).unwrap().low_mask(), 0xFF);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("row-major".parse::<Direction>().unwrap(), Direction::RowMajor);
        assert_eq!("1".parse::<Direction>().unwrap(), Direction::RowMajor);
        assert_eq!("0".parse::<Direction>().unwrap(), Direction::ColumnMajor);
        assert_eq!(
            "Vertical".parse::<Direction>().unwrap(),
            Direction::ColumnMajor
        );
        assert!(matches!(
            "diagonal".parse::<Direction>(),
            Err(Error::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_validate_start_position() {
        let params = StegoParams {
            start_row: 4,
            ..Default::default()
        };
        assert!(matches!(
            params.validate_for(4, 4),
            Err(Error::StartOutOfBounds { .. })
        ));
        assert!(params.validate_for(5, 4).is_ok());
    }

    #[test]
    fn test_bits_per_pixel() {
        let params = StegoParams {
            channels: "GB".parse().unwrap(),
            bits_per_channel: BitDepth::new(3).unwrap(),
            ..Default::default()
        };
        assert_eq!(params.bits_per_pixel(), 6);
    }

    #[test]
    fn test_labeled_key_json() {
        let key = LabeledKey::new(
            "session-7",
            StegoParams {
                start_row: 3,
                start_col: 1,
                gap: 2,
                channels: "RB".parse().unwrap(),
                bits_per_channel: BitDepth::new(2).unwrap(),
                direction: Direction::ColumnMajor,
                start_delimiter: "[START]".into(),
                end_delimiter: "[END]".into(),
            },
        );

        let json = key.to_json().unwrap();
        assert!(json.contains("\"channels\": \"RB\""));
        assert!(json.contains("\"direction\": \"column-major\""));
        assert_eq!(LabeledKey::from_json(&json).unwrap(), key);
    }

    #[test]
    fn test_deserialize_rejects_bad_depth() {
        let json = r##"{"label":"x","start_row":0,"start_col":0,"gap":0,"channels":"RGB",
            "bits_per_channel":9,"direction":"row-major","start_delimiter":"#","end_delimiter":"#"}"##;
        assert!(LabeledKey::from_json(json).is_err());
    }
}
