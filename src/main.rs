//! lsb-stego - hide text in the low bits of an image.
//!
//! Embeds and recovers messages with a structural key: start position,
//! channels, bit depth, traversal direction, gap and delimiters.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lsb_stego::config::{self, GeneratorConfig};
use lsb_stego::encoding::framer::{frame, unframe};
use lsb_stego::encoding::{decode_raw, Capacity};
use lsb_stego::generator::{generate_input, message};
use lsb_stego::image_io::{grid_dimensions, load_grid, save_grid};
use lsb_stego::{detect, encode, try_decode, BitDepth, LabeledKey, StegoParams};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lsb-stego")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide text in the least-significant bits of an image",
    long_about = "Embeds a delimited message into selected color channels of a lossless RGB image and recovers it with the same key."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a message into an image
    Encode {
        /// Cover image (8-bit RGB)
        input: PathBuf,

        /// Output image (lossless format: png, bmp, tiff, ppm, qoi)
        output: PathBuf,

        /// Message text
        #[arg(long, conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message from a file
        #[arg(long, conflicts_with = "message")]
        message_file: Option<PathBuf>,

        #[command(flatten)]
        key: KeyArgs,

        /// Write the key used as JSON
        #[arg(long)]
        key_out: Option<PathBuf>,

        /// Session label stored alongside the key (random if omitted)
        #[arg(long)]
        label: Option<String>,
    },

    /// Recover a message from an image
    Decode {
        /// Image to read
        input: PathBuf,

        #[command(flatten)]
        key: KeyArgs,

        /// Print the full recovered text without stripping delimiters
        #[arg(long)]
        raw: bool,
    },

    /// Decode and report whether a plausible message is present
    Detect {
        /// Image to read
        input: PathBuf,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Show the embedding capacity of an image under a key
    Capacity {
        /// Image to inspect
        input: PathBuf,

        #[command(flatten)]
        key: KeyArgs,

        /// Check whether this message fits
        #[arg(long)]
        message: Option<String>,
    },

    /// Draw a random key and a fitting message for an image, as JSON
    Generate {
        /// Image whose dimensions bound the key
        input: PathBuf,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print lorem-ipsum filler text
    Lorem {
        /// Maximum number of characters
        #[arg(long, conflicts_with = "words", required_unless_present = "words")]
        length: Option<usize>,

        /// Number of words
        #[arg(long, conflicts_with = "length")]
        words: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Key parameters, either from a JSON key file or individual flags.
#[derive(Args, Debug)]
struct KeyArgs {
    /// JSON key file (overrides the individual flags)
    #[arg(long)]
    key: Option<PathBuf>,

    /// Start position as "row,col"
    #[arg(long, default_value = "0,0")]
    start: StartPosition,

    /// Pixels skipped between slots
    #[arg(long, default_value_t = config::DEFAULT_GAP)]
    gap: usize,

    /// Channels to use (any of R, G, B)
    #[arg(long, default_value = config::DEFAULT_CHANNELS)]
    channels: String,

    /// Low bits per channel (1-8)
    #[arg(long, default_value_t = config::DEFAULT_BITS_PER_CHANNEL)]
    bits: u8,

    /// Traversal: row-major (1) or column-major (0)
    #[arg(long, default_value = "row-major")]
    direction: String,

    /// Start delimiter
    #[arg(long, default_value = config::DEFAULT_START_DELIMITER, allow_hyphen_values = true)]
    delim_start: String,

    /// End delimiter
    #[arg(long, default_value = config::DEFAULT_END_DELIMITER, allow_hyphen_values = true)]
    delim_end: String,
}

#[derive(Debug, Clone, Copy)]
struct StartPosition {
    row: usize,
    col: usize,
}

impl FromStr for StartPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"row,col\", got {s:?}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
        };
        Ok(Self {
            row: parse(row)?,
            col: parse(col)?,
        })
    }
}

impl KeyArgs {
    fn resolve(&self) -> anyhow::Result<StegoParams> {
        if let Some(path) = &self.key {
            let key = LabeledKey::load(path)
                .with_context(|| format!("reading key file {}", path.display()))?;
            tracing::info!(label = %key.label, "Using key file");
            return Ok(key.params);
        }

        Ok(StegoParams {
            start_row: self.start.row,
            start_col: self.start.col,
            gap: self.gap,
            channels: self.channels.parse()?,
            bits_per_channel: BitDepth::new(self.bits)?,
            direction: self.direction.parse()?,
            start_delimiter: self.delim_start.clone(),
            end_delimiter: self.delim_end.clone(),
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "lsb_stego=warn",
        1 => "lsb_stego=info",
        _ => "lsb_stego=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            message,
            message_file,
            key,
            key_out,
            label,
        } => cmd_encode(
            &input,
            &output,
            message,
            message_file,
            &key,
            key_out.as_deref(),
            label,
        ),

        Commands::Decode { input, key, raw } => cmd_decode(&input, &key, raw),

        Commands::Detect { input, key } => cmd_detect(&input, &key),

        Commands::Capacity {
            input,
            key,
            message,
        } => cmd_capacity(&input, &key, message.as_deref()),

        Commands::Generate { input, seed } => cmd_generate(&input, seed),

        Commands::Lorem {
            length,
            words,
            seed,
        } => cmd_lorem(length, words, seed),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn read_message(message: Option<String>, message_file: Option<PathBuf>) -> anyhow::Result<String> {
    match (message, message_file) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading message file {}", path.display())),
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        (Some(_), Some(_)) => unreachable!(),
    }
}

fn cmd_encode(
    input: &Path,
    output: &Path,
    message: Option<String>,
    message_file: Option<PathBuf>,
    key: &KeyArgs,
    key_out: Option<&Path>,
    label: Option<String>,
) -> anyhow::Result<()> {
    let params = key.resolve()?;
    let message = read_message(message, message_file)?;
    let mut grid =
        load_grid(input).with_context(|| format!("loading {}", input.display()))?;

    let summary = encode(&mut grid, &message, &params)?;
    save_grid(&grid, output).with_context(|| format!("writing {}", output.display()))?;

    println!("Message embedded into {}", output.display());
    println!("  Pixels written:  {}", summary.pixels_written);
    println!(
        "  Bits written:    {} ({} padding)",
        summary.bits_written, summary.padding_bits
    );
    println!("  Capacity:        {} bits", summary.capacity.available_bits);

    if let Some(path) = key_out {
        let label = label.unwrap_or_else(|| {
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(12)
                .map(char::from)
                .collect()
        });
        LabeledKey::new(label, params)
            .save(path)
            .with_context(|| format!("writing key file {}", path.display()))?;
        println!("  Key written to:  {}", path.display());
    }

    Ok(())
}

fn cmd_decode(input: &Path, key: &KeyArgs, raw: bool) -> anyhow::Result<()> {
    let params = key.resolve()?;
    let grid = load_grid(input).with_context(|| format!("loading {}", input.display()))?;

    let text = if raw {
        decode_raw(&grid, &params)?
    } else {
        try_decode(&grid, &params)?
    };
    println!("{}", text);

    Ok(())
}

fn cmd_detect(input: &Path, key: &KeyArgs) -> anyhow::Result<()> {
    let params = key.resolve()?;
    let grid = load_grid(input).with_context(|| format!("loading {}", input.display()))?;

    match detect(&grid, &params) {
        Some(message) => {
            println!("Hidden message detected with the provided key:");
            println!("{}", message);
        }
        None => println!("No hidden message detected with the provided key"),
    }

    Ok(())
}

fn cmd_capacity(input: &Path, key: &KeyArgs, message: Option<&str>) -> anyhow::Result<()> {
    let params = key.resolve()?;
    let (rows, cols) = grid_dimensions(input)?;
    let capacity = Capacity::compute(rows, cols, &params)?;

    println!("Capacity of {} ({}x{})", input.display(), rows, cols);
    println!("=====================");
    println!("Traversable pixels: {}", capacity.traversable_pixels);
    println!("Available pixels:   {}", capacity.available_pixels);
    println!("Bits per pixel:     {}", capacity.bits_per_pixel);
    println!("Available bits:     {}", capacity.available_bits);
    println!(
        "Max message length: {} characters",
        capacity.max_message_chars(&params)
    );

    if let Some(message) = message {
        let framed = frame(
            message,
            &params.start_delimiter,
            &params.end_delimiter,
            capacity.bits_per_pixel,
        )?;
        println!();
        match capacity.check(framed.len()) {
            Ok(()) => println!("✓ Message fits ({} bits)", framed.len()),
            Err(e) => println!("✗ {}", e),
        }
        let preview = unframe(message, "", &params.end_delimiter);
        if preview.len() != message.len() {
            println!("! Message contains the end delimiter and will be cut at it");
        }
    }

    Ok(())
}

fn cmd_generate(input: &Path, seed: Option<u64>) -> anyhow::Result<()> {
    let (rows, cols) = grid_dimensions(input)?;
    let mut rng = rng_from(seed);

    let generated = generate_input(&mut rng, rows, cols, &GeneratorConfig::default())?;
    println!("{}", serde_json::to_string_pretty(&generated)?);

    Ok(())
}

fn cmd_lorem(length: Option<usize>, words: Option<usize>, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = rng_from(seed);
    let text = match (length, words) {
        (Some(length), None) => message::by_length(&mut rng, length),
        (None, Some(words)) => message::by_words(&mut rng, words),
        _ => unreachable!(),
    };
    println!("{}", text);

    Ok(())
}
