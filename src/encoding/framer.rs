//! Delimiter-framed bitstream.
//!
//! One character is one byte, written most significant bit first. The
//! frame is `start ++ message ++ end`, zero-padded to a whole number of
//! pixels. Decoding is lenient: unrecoverable bytes are dropped and a
//! missing delimiter simply skips its stripping step.
//!
//! The end delimiter is located by a plain substring search, so a message
//! that itself contains the end delimiter is cut short on decode.

use crate::error::{Error, Result};

/// Bits used per character.
pub const BITS_PER_CHAR: usize = 8;

/// Whether a decoded byte is kept as text.
///
/// Tab, newline, carriage return, printable ASCII and printable Latin-1
/// are kept; other control bytes (including the zero padding) are dropped.
pub fn is_recoverable_byte(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r' | 0x20..=0x7E | 0xA0..=0xFF)
}

/// The byte carrying `c`, if it survives a round trip.
pub fn char_byte(c: char) -> Option<u8> {
    u8::try_from(u32::from(c))
        .ok()
        .filter(|b| is_recoverable_byte(*b))
}

/// An ordered, pixel-aligned sequence of bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    bits: Vec<bool>,
    padding: usize,
}

impl Bitstream {
    /// Total length including padding.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of trailing zero bits added for alignment.
    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Consecutive chunks of `bits_per_pixel` bits, one per pixel slot.
    pub fn pixel_chunks(&self, bits_per_pixel: usize) -> std::slice::Chunks<'_, bool> {
        self.bits.chunks(bits_per_pixel)
    }
}

/// Round `bits` up to the next multiple of `bits_per_pixel`.
pub fn padded_len(bits: usize, bits_per_pixel: usize) -> usize {
    bits.div_ceil(bits_per_pixel) * bits_per_pixel
}

/// Build `start ++ message ++ end`, right-padded with zeros to a multiple
/// of `bits_per_pixel`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedCharacter`] if any character cannot be
/// carried in one recoverable byte.
pub fn frame(message: &str, start: &str, end: &str, bits_per_pixel: usize) -> Result<Bitstream> {
    let mut bits = Vec::with_capacity(
        (start.len() + message.len() + end.len()) * BITS_PER_CHAR + bits_per_pixel,
    );
    for (text, field) in [
        (start, "start delimiter"),
        (message, "message"),
        (end, "end delimiter"),
    ] {
        push_text(&mut bits, text, field)?;
    }

    let unpadded = bits.len();
    bits.resize(padded_len(unpadded, bits_per_pixel), false);

    Ok(Bitstream {
        padding: bits.len() - unpadded,
        bits,
    })
}

fn push_text(bits: &mut Vec<bool>, text: &str, field: &'static str) -> Result<()> {
    for (position, ch) in text.chars().enumerate() {
        let byte = char_byte(ch).ok_or(Error::UnsupportedCharacter {
            ch,
            position,
            field,
        })?;
        bits.extend((0..BITS_PER_CHAR).rev().map(|i| (byte >> i) & 1 == 1));
    }
    Ok(())
}

/// Collects bits into characters, eight at a time.
#[derive(Debug, Default)]
pub struct TextAssembler {
    current: u8,
    filled: usize,
    text: String,
}

impl TextAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.current = (self.current << 1) | u8::from(bit);
        self.filled += 1;
        if self.filled == BITS_PER_CHAR {
            if is_recoverable_byte(self.current) {
                self.text.push(char::from(self.current));
            }
            self.current = 0;
            self.filled = 0;
        }
    }

    /// The recovered text; a trailing partial byte is dropped.
    pub fn finish(self) -> String {
        self.text
    }
}

impl Extend<bool> for TextAssembler {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push_bit(bit);
        }
    }
}

/// Convert a raw bitstream into text.
pub fn bits_to_text(bits: impl IntoIterator<Item = bool>) -> String {
    let mut assembler = TextAssembler::new();
    assembler.extend(bits);
    assembler.finish()
}

/// Strip a leading `start` and truncate at the first `end`.
///
/// Empty or absent delimiters leave the text unchanged at that step.
pub fn unframe<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let mut body = text;
    if !start.is_empty() {
        body = body.strip_prefix(start).unwrap_or(body);
    }
    if !end.is_empty() {
        if let Some(pos) = body.find(end) {
            body = &body[..pos];
        }
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit_string(stream: &Bitstream) -> String {
        stream
            .bits()
            .iter()
            .map(|b| if *b { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_frame_msb_first() {
        let stream = frame("A", "", "", 8).unwrap();
        assert_eq!(bit_string(&stream), "01000001");
        assert_eq!(stream.padding(), 0);
    }

    #[test]
    fn test_frame_pads_to_pixel() {
        let stream = frame("Hi", "#", "#", 3).unwrap();
        assert_eq!(stream.len(), 33);
        assert_eq!(stream.padding(), 1);
        assert!(!stream.bits()[32]);
        assert_eq!(stream.pixel_chunks(3).count(), 11);
    }

    #[test]
    fn test_frame_rejects_wide_characters() {
        let err = frame("h€llo", "#", "#", 3).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedCharacter {
                ch: '€',
                position: 1,
                field: "message"
            }
        ));
    }

    #[test]
    fn test_frame_rejects_control_in_delimiter() {
        assert!(frame("hi", "\u{1}", "#", 3).is_err());
    }

    #[test]
    fn test_latin1_round_trip() {
        let stream = frame("café\n", "", "", 1).unwrap();
        assert_eq!(bits_to_text(stream.bits().iter().copied()), "café\n");
    }

    #[test]
    fn test_unrecoverable_bytes_skipped() {
        let mut bits = Vec::new();
        for byte in [b'a', 0x00, 0x07, 0x85, b'b'] {
            bits.extend((0..8).rev().map(|i| (byte >> i) & 1 == 1));
        }
        bits.extend([true, true, true]);
        assert_eq!(bits_to_text(bits), "ab");
    }

    #[test]
    fn test_unframe_strips_both() {
        assert_eq!(unframe("#Hi#xyz#", "#", "#"), "Hi");
        assert_eq!(unframe("[START]data[END]junk", "[START]", "[END]"), "data");
    }

    #[test]
    fn test_unframe_lenient() {
        assert_eq!(unframe("Hi#rest", "<<", "#"), "Hi");
        assert_eq!(unframe("<<Hi", "<<", ">>"), "Hi");
        assert_eq!(unframe("plain", "", ""), "plain");
    }

    #[test]
    fn test_spurious_end_delimiter_truncates() {
        // Known gap: a message containing the end delimiter is cut short.
        let stream = frame("a#b", "#", "#", 8).unwrap();
        let text = bits_to_text(stream.bits().iter().copied());
        assert_eq!(unframe(&text, "#", "#"), "a");
    }

    #[test]
    fn test_padded_len() {
        assert_eq!(padded_len(32, 3), 33);
        assert_eq!(padded_len(48, 3), 48);
        assert_eq!(padded_len(0, 5), 0);
    }
}
