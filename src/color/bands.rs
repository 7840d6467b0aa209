//! Elevation-banded coloring.

use serde::{Deserialize, Serialize};

use super::{ColorMapper, Rgb};
use crate::biomes::Biome;
use crate::terrain::Grid;

/// A contiguous elevation range colored by a linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBand {
    pub name: String,
    /// Inclusive lower edge used for interpolation.
    pub lower: f32,
    /// Inclusive upper edge; elevations at or below belong to this band.
    pub upper: f32,
    /// Color at `lower`.
    pub min_color: Rgb,
    /// Color at `upper`.
    pub max_color: Rgb,
}

impl ColorBand {
    pub fn new(name: &str, lower: f32, upper: f32, min_color: Rgb, max_color: Rgb) -> Self {
        Self {
            name: name.to_string(),
            lower,
            upper,
            min_color,
            max_color,
        }
    }

    /// Interpolates each channel independently by the elevation's position in the band.
    ///
    /// Channels are truncated toward zero and clamped to [0, 255].
    pub fn color_at(&self, elevation: f32) -> Rgb {
        let span = self.upper - self.lower;
        let t = if span > 0.0 { (elevation - self.lower) / span } else { 0.0 };

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            let lo = self.min_color[i] as f32;
            let hi = self.max_color[i] as f32;
            *channel = ((hi - lo) * t + lo).clamp(0.0, 255.0) as u8;
        }
        rgb
    }
}

/// Five-band elevation palette: water, sand, grass, rock, snow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandedColorMapper {
    /// Bands in ascending elevation order; the last band takes everything above.
    pub bands: Vec<ColorBand>,
}

impl Default for BandedColorMapper {
    fn default() -> Self {
        Self {
            bands: vec![
                ColorBand::new("water", 0.0, 0.2, [4, 13, 54], [82, 106, 210]),
                ColorBand::new("sand", 0.2, 0.3, [239, 228, 122], [199, 165, 39]),
                ColorBand::new("grass", 0.3, 0.75, [36, 163, 70], [3, 66, 20]),
                ColorBand::new("rock", 0.75, 0.9, [61, 48, 40], [135, 127, 122]),
                ColorBand::new("snow", 0.9, 1.0, [219, 219, 219], [255, 255, 255]),
            ],
        }
    }
}

impl BandedColorMapper {
    /// Returns the band an elevation falls in, or `None` if there are no bands.
    pub fn band_for(&self, elevation: f32) -> Option<&ColorBand> {
        self.bands
            .iter()
            .find(|band| elevation <= band.upper)
            .or_else(|| self.bands.last())
    }

    /// Color for a single elevation. Black if no bands are configured.
    pub fn color(&self, elevation: f32) -> Rgb {
        self.band_for(elevation)
            .map(|band| band.color_at(elevation))
            .unwrap_or([0, 0, 0])
    }
}

impl ColorMapper for BandedColorMapper {
    fn colorize(&self, elevation: &Grid<f32>, _biomes: Option<&Grid<Biome>>) -> Option<Grid<Rgb>> {
        Some(elevation.map(|&e| self.color(e)))
    }
}
