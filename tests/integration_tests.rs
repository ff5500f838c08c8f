//! Integration tests for end-to-end encode/decode.

use lsb_stego::image_io::{load_grid, save_grid};
use lsb_stego::{
    decode, detect, encode, BitDepth, Direction, Error, LabeledKey, PixelGrid, StegoParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

/// Grid of random pixels, reproducible from `seed`.
fn noisy_grid(rows: usize, cols: usize, seed: u64) -> PixelGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    PixelGrid::from_fn(rows, cols, |_, _| rng.gen())
}

#[test]
fn test_hi_in_black_4x4() {
    let mut grid = PixelGrid::filled(4, 4, [0, 0, 0]);
    let params = StegoParams {
        start_row: 0,
        start_col: 0,
        gap: 0,
        channels: "RGB".parse().unwrap(),
        bits_per_channel: BitDepth::new(1).unwrap(),
        direction: Direction::RowMajor,
        start_delimiter: "#".into(),
        end_delimiter: "#".into(),
    };

    let summary = encode(&mut grid, "Hi", &params).expect("encode should fit");
    assert_eq!(summary.pixels_written, 11);
    assert_eq!(summary.capacity.available_bits, 48);

    assert_eq!(decode(&grid, &params), "Hi");
}

#[test]
fn test_oversized_message_leaves_grid_untouched() {
    let mut grid = PixelGrid::filled(4, 4, [0, 0, 0]);
    let before = grid.clone();

    let err = encode(&mut grid, "Hello there", &StegoParams::default()).unwrap_err();

    assert!(matches!(err, Error::MessageTooLarge { .. }));
    assert!(err.is_configuration());
    assert_eq!(grid, before);
}

#[test]
fn test_invalid_start_fails_encode_and_empties_decode() {
    let mut grid = noisy_grid(8, 8, 1);
    let before = grid.clone();
    let params = StegoParams {
        start_col: 8,
        ..Default::default()
    };

    assert!(matches!(
        encode(&mut grid, "x", &params),
        Err(Error::StartOutOfBounds { .. })
    ));
    assert_eq!(grid, before);
    assert_eq!(decode(&grid, &params), "");
}

#[test]
fn test_noisy_cover_round_trip_all_options() {
    let message = "The quick brown fox jumps over the lazy dog.";
    for (i, direction) in [Direction::RowMajor, Direction::ColumnMajor]
        .into_iter()
        .enumerate()
    {
        for channels in ["R", "GB", "RGB"] {
            for bits in [1u8, 4, 8] {
                let mut grid = noisy_grid(80, 60, 100 + i as u64);
                let params = StegoParams {
                    start_row: 3,
                    start_col: 7,
                    gap: 2,
                    channels: channels.parse().unwrap(),
                    bits_per_channel: BitDepth::new(bits).unwrap(),
                    direction,
                    start_delimiter: "<<START>>".into(),
                    end_delimiter: "<<END>>".into(),
                };

                encode(&mut grid, message, &params).unwrap();
                assert_eq!(
                    decode(&grid, &params),
                    message,
                    "{direction} {channels} {bits}"
                );
            }
        }
    }
}

#[test]
fn test_png_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cover_path = temp_dir.path().join("cover.png");
    let stego_path = temp_dir.path().join("stego.png");

    save_grid(&noisy_grid(24, 24, 9), &cover_path).expect("Failed to write cover");

    let params = StegoParams {
        start_row: 5,
        start_col: 5,
        gap: 1,
        channels: "RB".parse().unwrap(),
        bits_per_channel: BitDepth::new(2).unwrap(),
        direction: Direction::ColumnMajor,
        start_delimiter: "[START]".into(),
        end_delimiter: "[END]".into(),
    };

    let mut grid = load_grid(&cover_path).expect("Failed to load cover");
    encode(&mut grid, "Stored on disk.", &params).expect("Failed to encode");
    save_grid(&grid, &stego_path).expect("Failed to write stego image");

    let reloaded = load_grid(&stego_path).expect("Failed to load stego image");
    assert_eq!(reloaded, grid);
    assert_eq!(decode(&reloaded, &params), "Stored on disk.");
}

#[test]
fn test_key_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let key_path = temp_dir.path().join("key.json");

    let params = StegoParams {
        start_row: 1,
        start_col: 2,
        gap: 3,
        channels: "G".parse().unwrap(),
        bits_per_channel: BitDepth::new(5).unwrap(),
        direction: Direction::ColumnMajor,
        start_delimiter: "---".into(),
        end_delimiter: "---".into(),
    };
    LabeledKey::new("session-a", params.clone())
        .save(&key_path)
        .unwrap();

    let mut grid = noisy_grid(20, 20, 4);
    encode(&mut grid, "keyed", &params).unwrap();

    let loaded = LabeledKey::load(&key_path).unwrap();
    assert_eq!(loaded.label, "session-a");
    assert_eq!(decode(&grid, &loaded.params), "keyed");
}

#[test]
fn test_wrong_delimiters_fail_plausibility() {
    let mut grid = noisy_grid(32, 32, 21);
    let params = StegoParams {
        start_delimiter: "[START]".into(),
        end_delimiter: "[END]".into(),
        ..Default::default()
    };
    encode(&mut grid, "Secret", &params).unwrap();
    assert_eq!(detect(&grid, &params), Some("Secret".to_string()));

    let wrong = StegoParams {
        start_delimiter: "@@".into(),
        end_delimiter: "@@".into(),
        ..params
    };
    let decoded = decode(&grid, &wrong);
    assert_ne!(decoded, "Secret");
    assert_eq!(detect(&grid, &wrong), None);
}

#[test]
fn test_wrong_geometry_does_not_recover() {
    let mut grid = noisy_grid(32, 32, 33);
    let params = StegoParams {
        start_row: 4,
        gap: 1,
        ..Default::default()
    };
    encode(&mut grid, "Geometry matters.", &params).unwrap();

    for wrong in [
        StegoParams {
            gap: 0,
            ..params.clone()
        },
        StegoParams {
            direction: Direction::ColumnMajor,
            ..params.clone()
        },
        StegoParams {
            bits_per_channel: BitDepth::new(2).unwrap(),
            ..params.clone()
        },
    ] {
        assert_ne!(decode(&grid, &wrong), "Geometry matters.");
    }
}

#[test]
fn test_message_containing_end_delimiter_is_cut() {
    let mut grid = PixelGrid::filled(16, 16, [0, 0, 0]);
    let params = StegoParams::default();

    encode(&mut grid, "C# rocks", &params).unwrap();
    assert_eq!(decode(&grid, &params), "C");
}

#[test]
fn test_empty_delimiters() {
    let mut grid = PixelGrid::filled(8, 8, [0, 0, 0]);
    let params = StegoParams {
        start_delimiter: String::new(),
        end_delimiter: String::new(),
        ..Default::default()
    };

    encode(&mut grid, "raw", &params).unwrap();
    // Nothing marks the end, so the zero bytes after the message are
    // dropped and the text runs to the end of the region.
    assert_eq!(decode(&grid, &params), "raw");
}
