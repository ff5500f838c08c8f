//! Loading and storing pixel grids as image files.
//!
//! Only 8-bit RGB images are read, and only lossless formats are written:
//! the embedded bits live in the exact channel values.

use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// Formats that store RGB8 pixels without altering them.
const LOSSLESS_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Pnm,
    ImageFormat::Qoi,
];

/// Load an image file into a pixel grid.
///
/// # Errors
///
/// Returns [`Error::UnsupportedImage`] if the file is not 8-bit RGB.
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    match image::open(path)? {
        DynamicImage::ImageRgb8(img) => {
            tracing::debug!(
                path = %path.display(),
                width = img.width(),
                height = img.height(),
                "Loaded image"
            );
            Ok(PixelGrid::from(&img))
        }
        other => Err(Error::UnsupportedImage(format!("{:?}", other.color()))),
    }
}

/// Write a pixel grid to `path`, choosing the format from the extension.
///
/// # Errors
///
/// Returns [`Error::LossyFormat`] for formats that could alter pixel values.
pub fn save_grid(grid: &PixelGrid, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|_| Error::LossyFormat(path.to_path_buf()))?;
    if !LOSSLESS_FORMATS.contains(&format) {
        return Err(Error::LossyFormat(path.to_path_buf()));
    }

    let img = image::RgbImage::try_from(grid)?;
    img.save_with_format(path, format)?;
    tracing::debug!(path = %path.display(), ?format, "Saved image");
    Ok(())
}

/// Read `(rows, cols)` of an image without decoding its pixels.
pub fn grid_dimensions(path: &Path) -> Result<(usize, usize)> {
    let (width, height) = image::image_dimensions(path)?;
    Ok((height as usize, width as usize))
}
