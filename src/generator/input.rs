//! Random parameter tuples with a message that fits them.

use crate::config::{GeneratorConfig, CHANNEL_PRESETS, DELIMITER_PRESETS};
use crate::encoding::Capacity;
use crate::error::{Error, Result};
use crate::generator::message;
use crate::params::{BitDepth, ChannelSet, Direction, StegoParams};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// A generated key and a message guaranteed to fit it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedInput {
    #[serde(flatten)]
    pub params: StegoParams,
    pub message: String,
    pub message_length: usize,
    /// Longest message the key could carry.
    pub max_possible_length: usize,
    pub utilization_percent: f64,
}

/// Draw a random valid key for a `rows x cols` grid plus a lorem-ipsum
/// message using 60-90% (by default) of its capacity.
///
/// # Errors
///
/// Returns [`Error::InsufficientCapacity`] when not a single character
/// fits, or when no message with unambiguous framing was drawn.
pub fn generate_input<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    config: &GeneratorConfig,
) -> Result<GeneratedInput> {
    config.validate().map_err(Error::InvalidConfig)?;
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidGrid(format!("empty {rows}x{cols} grid")));
    }

    let params = random_params(rng, rows, cols, config)?;
    let capacity = Capacity::compute(rows, cols, &params)?;
    let max_chars = capacity.max_message_chars(&params);
    if max_chars < 1 {
        return Err(Error::InsufficientCapacity(format!(
            "{} bits available, delimiters alone need {}",
            capacity.available_bits,
            (params.start_delimiter.len() + params.end_delimiter.len()) * 8
        )));
    }

    let min_len = ((max_chars as f64 * config.min_utilization) as usize).max(1);
    let max_len = ((max_chars as f64 * config.max_utilization) as usize).max(min_len);

    for _ in 0..config.max_attempts {
        let length = rng.gen_range(min_len..=max_len);
        let text = message::by_length(rng, length);
        if !frames_cleanly(&text, &params.end_delimiter) {
            continue;
        }

        let message_length = text.chars().count();
        let utilization = message_length as f64 / max_chars as f64 * 100.0;
        tracing::debug!(
            max_chars,
            message_length,
            gap = params.gap,
            channels = %params.channels,
            "Generated input"
        );
        return Ok(GeneratedInput {
            params,
            message: text,
            message_length,
            max_possible_length: max_chars,
            utilization_percent: (utilization * 100.0).round() / 100.0,
        });
    }

    Err(Error::InsufficientCapacity(format!(
        "no message without a spurious {:?} after {} attempts",
        params.end_delimiter, config.max_attempts
    )))
}

/// Whether the first occurrence of `end` in `message ++ end` is the
/// appended one.
fn frames_cleanly(message: &str, end: &str) -> bool {
    end.is_empty() || format!("{message}{end}").find(end) == Some(message.len())
}

fn random_params<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    config: &GeneratorConfig,
) -> Result<StegoParams> {
    let start_row = rng
        .gen_range(0..=(rows as f64 * config.start_fraction) as usize)
        .min(rows - 1);
    let start_col = rng
        .gen_range(0..=(cols as f64 * config.start_fraction) as usize)
        .min(cols - 1);

    let channels: ChannelSet = CHANNEL_PRESETS
        .choose(rng)
        .copied()
        .unwrap_or("RGB")
        .parse()?;
    let (start_delimiter, end_delimiter) = DELIMITER_PRESETS
        .choose(rng)
        .copied()
        .unwrap_or(("#", "#"));

    Ok(StegoParams {
        start_row,
        start_col,
        gap: rng.gen_range(0..=config.max_gap),
        channels,
        bits_per_channel: BitDepth::new(rng.gen_range(BitDepth::MIN..=BitDepth::MAX))?,
        direction: if rng.gen_bool(0.5) {
            Direction::RowMajor
        } else {
            Direction::ColumnMajor
        },
        start_delimiter: start_delimiter.to_string(),
        end_delimiter: end_delimiter.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_message_fits() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = GeneratorConfig::default();
        for _ in 0..50 {
            let input = generate_input(&mut rng, 64, 48, &config).unwrap();
            let cap = Capacity::compute(64, 48, &input.params).unwrap();
            assert!(input.message_length >= 1);
            assert!(input.message_length <= cap.max_message_chars(&input.params));
            assert!(input.params.start_row <= 32);
            assert!(input.params.start_col <= 24);
        }
    }

    #[test]
    fn test_rejects_bad_config_and_empty_grid() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = GeneratorConfig {
            start_fraction: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            generate_input(&mut rng, 8, 8, &config),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            generate_input(&mut rng, 0, 8, &GeneratorConfig::default()),
            Err(Error::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_frames_cleanly() {
        assert!(frames_cleanly("Lorem ipsum.", "[END]"));
        assert!(!frames_cleanly("a#b", "#"));
        assert!(!frames_cleanly("ends with #", "##"));
        assert!(frames_cleanly("anything", ""));
    }

    #[test]
    fn test_serializes_flat() {
        let mut rng = StdRng::seed_from_u64(2);
        let input = generate_input(&mut rng, 64, 64, &GeneratorConfig::default()).unwrap();
        let json = serde_json::to_value(&input).unwrap();
        assert!(json.get("start_row").is_some());
        assert!(json.get("message").is_some());
        assert!(json.get("utilization_percent").is_some());
    }
}
