//! In-memory pixel grid.

use crate::error::{Error, Result};

/// One pixel: `[r, g, b]`, 8 bits per channel.
pub type Rgb = [u8; 3];

/// A `rows x cols` array of RGB pixels stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// Create a grid with every pixel set to `fill`.
    pub fn filled(rows: usize, cols: usize, fill: Rgb) -> Self {
        Self {
            rows,
            cols,
            pixels: vec![fill; rows * cols],
        }
    }

    /// Create a grid from a per-coordinate function.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                pixels.push(f(row, col));
            }
        }
        Self { rows, cols, pixels }
    }

    /// Wrap a row-major pixel buffer.
    pub fn from_pixels(rows: usize, cols: usize, pixels: Vec<Rgb>) -> Result<Self> {
        if pixels.len() != rows * cols {
            return Err(Error::InvalidGrid(format!(
                "{} pixels do not form a {}x{} grid",
                pixels.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, pixels })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        self.pixels[self.offset(row, col)]
    }

    /// Mutable pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    pub fn pixel_mut(&mut self, row: usize, col: usize) -> &mut Rgb {
        let offset = self.offset(row, col);
        &mut self.pixels[offset]
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "pixel ({row}, {col}) outside {}x{} grid",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl From<&image::RgbImage> for PixelGrid {
    fn from(img: &image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self {
            rows: height as usize,
            cols: width as usize,
            pixels,
        }
    }
}

impl TryFrom<&PixelGrid> for image::RgbImage {
    type Error = Error;

    fn try_from(grid: &PixelGrid) -> Result<Self> {
        let width = u32::try_from(grid.cols)
            .map_err(|_| Error::InvalidGrid(format!("{} columns exceed u32", grid.cols)))?;
        let height = u32::try_from(grid.rows)
            .map_err(|_| Error::InvalidGrid(format!("{} rows exceed u32", grid.rows)))?;
        let raw: Vec<u8> = grid.pixels.iter().flatten().copied().collect();
        image::RgbImage::from_raw(width, height, raw)
            .ok_or_else(|| Error::InvalidGrid("pixel buffer size mismatch".to_string()))
    }
}
