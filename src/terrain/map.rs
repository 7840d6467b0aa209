//! Per-run collection of generated layers.

use crate::biomes::{Biome, BiomeCoverage};
use crate::color::Rgb;
use crate::export::elevation_to_luma;
use super::grid::Grid;

/// All layers produced by a generation run.
///
/// Layers start empty and are populated by pipeline stages. A stage always
/// replaces a layer with a new grid; it never edits one in place.
#[derive(Debug, Clone)]
pub struct TerrainMap {
    /// Width and height of every layer.
    pub size: u32,
    /// Seed the run was generated with.
    pub seed: i32,
    /// Normalized elevation (populated by the heightmap stage).
    pub elevation: Option<Grid<f32>>,
    /// Normalized moisture (populated by the moisture stage).
    pub moisture: Option<Grid<f32>>,
    /// Biome per cell (populated by the biome stage).
    pub biomes: Option<Grid<Biome>>,
    /// Final colors (populated by the color stage, replaced by blend/trees).
    pub colors: Option<Grid<Rgb>>,
    /// Raw single-octave noise used for tree placement (populated by the tree stage).
    pub tree_noise: Option<Grid<f32>>,
}

impl TerrainMap {
    /// Creates an empty map for a `size x size` grid.
    pub fn new(size: u32, seed: i32) -> Self {
        Self {
            size,
            seed,
            elevation: None,
            moisture: None,
            biomes: None,
            colors: None,
            tree_noise: None,
        }
    }

    /// Elevation rendered as 8-bit luminance, if generated.
    pub fn to_grayscale(&self) -> Option<Grid<u8>> {
        self.elevation.as_ref().map(elevation_to_luma)
    }

    /// Biome coverage percentages, if biomes were classified.
    pub fn biome_coverage(&self) -> Option<BiomeCoverage> {
        self.biomes.as_ref().map(BiomeCoverage::from_grid)
    }
}
