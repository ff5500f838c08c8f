//! Synthetic inputs: filler text and random keys that fit a grid.

pub mod input;
pub mod message;

pub use input::{generate_input, GeneratedInput};
