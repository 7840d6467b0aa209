//! Color mapping strategies for turning terrain layers into RGB grids.
//!
//! Two interchangeable mappers sit behind [`ColorMapper`]:
//! - [`BiomeColorMapper`]: registry color of each cell's biome
//! - [`BandedColorMapper`]: elevation bands with per-band color gradients,
//!   needing neither moisture nor biome classification

mod bands;

pub use bands::{BandedColorMapper, ColorBand};

use serde::{Deserialize, Serialize};

use crate::biomes::Biome;
use crate::terrain::Grid;

/// 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Selects which [`ColorMapper`] colorized output uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStrategy {
    /// Biome-indexed registry colors.
    #[default]
    Biome,
    /// Elevation bands interpolated between min/max colors.
    Banded,
}

impl ColorStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            ColorStrategy::Biome => "biome",
            ColorStrategy::Banded => "banded",
        }
    }

    /// Builds the mapper for this strategy with its default palette.
    pub fn mapper(&self) -> Box<dyn ColorMapper> {
        match self {
            ColorStrategy::Biome => Box::new(BiomeColorMapper),
            ColorStrategy::Banded => Box::new(BandedColorMapper::default()),
        }
    }
}

/// Produces a color grid from the terrain layers of a run.
pub trait ColorMapper: Send + Sync {
    /// Returns true if [`ColorMapper::colorize`] needs a biome grid.
    fn requires_biomes(&self) -> bool {
        false
    }

    /// Colors every cell. Returns `None` if a required layer is missing.
    fn colorize(&self, elevation: &Grid<f32>, biomes: Option<&Grid<Biome>>) -> Option<Grid<Rgb>>;
}

/// Direct registry lookup: each cell takes its biome's color.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiomeColorMapper;

impl BiomeColorMapper {
    pub fn color(&self, biome: Biome) -> Rgb {
        biome.color()
    }
}

impl ColorMapper for BiomeColorMapper {
    fn requires_biomes(&self) -> bool {
        true
    }

    fn colorize(&self, _elevation: &Grid<f32>, biomes: Option<&Grid<Biome>>) -> Option<Grid<Rgb>> {
        biomes.map(|grid| grid.map(|&b| self.color(b)))
    }
}
