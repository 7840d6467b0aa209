//! RGB color map export.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use super::png::{PngExportError, PngExportOptions};
use crate::color::Rgb;
use crate::terrain::Grid;

/// Export a color grid as an 8-bit RGB PNG.
pub fn export_color_png(
    grid: &Grid<Rgb>,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), PngExportError> {
    let (width, height) = grid.dimensions();
    if width == 0 || height == 0 {
        return Err(PngExportError::EmptyImage(width, height));
    }

    let raw: Vec<u8> = grid.cells().iter().flatten().copied().collect();

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);
    encoder.write_image(&raw, width, height, image::ExtendedColorType::Rgb8)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::Biome;
    use tempfile::tempdir;

    #[test]
    fn export_color_map_smoke() {
        let grid = Grid::from_fn(16, 8, |x, _| Biome::ALL[(x as usize) % Biome::ALL.len()].color());

        let dir = tempdir().unwrap();
        let path = dir.path().join("biomes.png");
        export_color_png(&grid, &path, &PngExportOptions::default()).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (16, 8));
        assert_eq!(decoded.get_pixel(3, 5).0, Biome::Beach.color());
    }
}
