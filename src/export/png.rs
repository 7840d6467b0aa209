//! PNG export for grayscale heightmaps.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ImageEncoder;
use thiserror::Error;

use crate::terrain::Grid;

/// Errors that can occur during PNG export.
#[derive(Error, Debug)]
pub enum PngExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Cannot encode an empty {0}x{1} image")]
    EmptyImage(u32, u32),
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Converts normalized elevation to 8-bit luminance (`elevation * 255`, truncated).
pub fn elevation_to_luma(elevation: &Grid<f32>) -> Grid<u8> {
    elevation.map(|&e| (e * 255.0).clamp(0.0, 255.0) as u8)
}

/// Exports a luminance grid as an 8-bit grayscale PNG.
pub fn export_grayscale_png(
    grid: &Grid<u8>,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return Err(PngExportError::EmptyImage(width, height));
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(
        grid.cells(),
        width,
        height,
        image::ExtendedColorType::L8,
    )?;

    Ok(())
}
