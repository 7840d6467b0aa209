//! Biome classification from elevation and moisture.
//!
//! The registry is a closed enum: each variant carries a fixed display color
//! and tree density, resolved through `match` so lookups never fail.

mod coverage;

pub use coverage::BiomeCoverage;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::terrain::Grid;

/// Highest tree density any biome can carry.
pub const MAX_TREE_DENSITY: u8 = 10;

/// Biome classification ID. `as_u8()` is stable and used for storage/export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    DeepOcean = 0,
    Ocean = 1,
    ShallowOcean = 2,
    Beach = 3,
    Scorched = 4,
    Bare = 5,
    Tundra = 6,
    Snow = 7,
    TemperateDesert = 8,
    Shrubland = 9,
    Taiga = 10,
    Grassland = 11,
    TemperateDeciduousForest = 12,
    TemperateRainForest = 13,
    SubtropicalDesert = 14,
    TropicalSeasonalForest = 15,
    TropicalRainForest = 16,
}

impl Biome {
    /// Every biome in registry order.
    pub const ALL: [Biome; 17] = [
        Biome::DeepOcean,
        Biome::Ocean,
        Biome::ShallowOcean,
        Biome::Beach,
        Biome::Scorched,
        Biome::Bare,
        Biome::Tundra,
        Biome::Snow,
        Biome::TemperateDesert,
        Biome::Shrubland,
        Biome::Taiga,
        Biome::Grassland,
        Biome::TemperateDeciduousForest,
        Biome::TemperateRainForest,
        Biome::SubtropicalDesert,
        Biome::TropicalSeasonalForest,
        Biome::TropicalRainForest,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// RGB display color for this biome.
    pub fn color(self) -> Rgb {
        match self {
            Biome::DeepOcean => [54, 54, 94],
            Biome::Ocean => [68, 68, 122],
            Biome::ShallowOcean => [105, 105, 168],
            Biome::Beach => [160, 144, 119],
            Biome::Scorched => [85, 85, 85],
            Biome::Bare => [136, 136, 136],
            Biome::Tundra => [187, 187, 170],
            Biome::Snow => [221, 221, 228],
            Biome::TemperateDesert => [201, 210, 155],
            Biome::Shrubland => [136, 153, 119],
            Biome::Taiga => [153, 170, 119],
            Biome::Grassland => [136, 170, 85],
            Biome::TemperateDeciduousForest => [103, 148, 89],
            Biome::TemperateRainForest => [68, 136, 85],
            Biome::SubtropicalDesert => [210, 185, 139],
            Biome::TropicalSeasonalForest => [85, 153, 68],
            Biome::TropicalRainForest => [51, 119, 85],
        }
    }

    /// Tree density in `0..=MAX_TREE_DENSITY`. Zero means no trees are placed.
    pub fn tree_density(self) -> u8 {
        match self {
            Biome::DeepOcean
            | Biome::Ocean
            | Biome::ShallowOcean
            | Biome::Beach
            | Biome::Scorched
            | Biome::Bare
            | Biome::Snow
            | Biome::TemperateDesert
            | Biome::SubtropicalDesert => 0,
            Biome::Tundra => 1,
            Biome::Shrubland => 5,
            Biome::Taiga => 7,
            Biome::Grassland => 8,
            Biome::TemperateDeciduousForest => 9,
            Biome::TropicalSeasonalForest => 9,
            Biome::TemperateRainForest => 10,
            Biome::TropicalRainForest => 10,
        }
    }

    /// Human-readable name, e.g. "Temperate Rain Forest".
    pub fn display_name(self) -> &'static str {
        match self {
            Biome::DeepOcean => "Deep Ocean",
            Biome::Ocean => "Ocean",
            Biome::ShallowOcean => "Shallow Ocean",
            Biome::Beach => "Beach",
            Biome::Scorched => "Scorched",
            Biome::Bare => "Bare",
            Biome::Tundra => "Tundra",
            Biome::Snow => "Snow",
            Biome::TemperateDesert => "Temperate Desert",
            Biome::Shrubland => "Shrubland",
            Biome::Taiga => "Taiga",
            Biome::Grassland => "Grassland",
            Biome::TemperateDeciduousForest => "Temperate Deciduous Forest",
            Biome::TemperateRainForest => "Temperate Rain Forest",
            Biome::SubtropicalDesert => "Subtropical Desert",
            Biome::TropicalSeasonalForest => "Tropical Seasonal Forest",
            Biome::TropicalRainForest => "Tropical Rain Forest",
        }
    }
}

/// Classify a single cell from normalized elevation and moisture.
///
/// Rules are evaluated top to bottom and the first match wins. Total over
/// `[0, 1] x [0, 1]`; values outside that range still land in a biome.
pub fn classify(elevation: f32, moisture: f32) -> Biome {
    // Water and shoreline depend on elevation alone.
    if elevation < 0.05 {
        return Biome::DeepOcean;
    }
    if elevation < 0.08 {
        return Biome::Ocean;
    }
    if elevation < 0.10 {
        return Biome::ShallowOcean;
    }
    if elevation < 0.11 {
        return Biome::Beach;
    }

    if elevation > 0.8 {
        if moisture < 0.1 {
            return Biome::Scorched;
        }
        if moisture < 0.2 {
            return Biome::Bare;
        }
        if moisture < 0.5 {
            return Biome::Tundra;
        }
        return Biome::Snow;
    }

    if elevation > 0.6 {
        if moisture < 0.33 {
            return Biome::TemperateDesert;
        }
        if moisture < 0.66 {
            return Biome::Shrubland;
        }
        return Biome::Taiga;
    }

    if elevation > 0.3 {
        if moisture < 0.16 {
            return Biome::TemperateDesert;
        }
        if moisture < 0.40 {
            return Biome::Grassland;
        }
        if moisture < 0.60 {
            return Biome::TemperateDeciduousForest;
        }
        return Biome::TemperateRainForest;
    }

    if moisture < 0.16 {
        return Biome::SubtropicalDesert;
    }
    if moisture < 0.23 {
        return Biome::Grassland;
    }
    if moisture < 0.66 {
        return Biome::TropicalSeasonalForest;
    }
    Biome::TropicalRainForest
}

/// Classify every cell of paired elevation and moisture grids.
///
/// # Panics
/// Panics if the grids differ in dimensions.
pub fn classify_grid(elevation: &Grid<f32>, moisture: &Grid<f32>) -> Grid<Biome> {
    assert_eq!(elevation.dimensions(), moisture.dimensions());

    let (width, height) = elevation.dimensions();
    Grid::from_fn(width, height, |x, y| {
        classify(*elevation.get(x, y), *moisture.get(x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOISTURE_SAMPLES: [f32; 9] = [0.0, 0.05, 0.1, 0.2, 0.33, 0.5, 0.66, 0.9, 1.0];

    #[test]
    fn deep_ocean_boundary_is_exclusive() {
        for m in MOISTURE_SAMPLES {
            assert_eq!(classify(0.049, m), Biome::DeepOcean);
            assert_ne!(classify(0.05, m), Biome::DeepOcean);
            assert_eq!(classify(0.05, m), Biome::Ocean);
        }
    }

    #[test]
    fn shoreline_bands() {
        assert_eq!(classify(0.079, 0.5), Biome::Ocean);
        assert_eq!(classify(0.08, 0.5), Biome::ShallowOcean);
        assert_eq!(classify(0.10, 0.5), Biome::Beach);
        assert_ne!(classify(0.11, 0.5), Biome::Beach);
    }

    #[test]
    fn high_altitude_biomes() {
        assert_eq!(classify(0.85, 0.05), Biome::Scorched);
        assert_eq!(classify(0.85, 0.15), Biome::Bare);
        assert_eq!(classify(0.85, 0.3), Biome::Tundra);
        assert_eq!(classify(0.85, 0.6), Biome::Snow);
        // 0.8 itself falls through to the next band.
        assert_eq!(classify(0.8, 0.05), Biome::TemperateDesert);
    }

    #[test]
    fn mid_altitude_biomes() {
        assert_eq!(classify(0.7, 0.2), Biome::TemperateDesert);
        assert_eq!(classify(0.7, 0.5), Biome::Shrubland);
        assert_eq!(classify(0.7, 0.66), Biome::Taiga);

        assert_eq!(classify(0.4, 0.1), Biome::TemperateDesert);
        assert_eq!(classify(0.4, 0.3), Biome::Grassland);
        assert_eq!(classify(0.4, 0.5), Biome::TemperateDeciduousForest);
        assert_eq!(classify(0.4, 0.6), Biome::TemperateRainForest);
    }

    #[test]
    fn lowland_biomes() {
        assert_eq!(classify(0.3, 0.1), Biome::SubtropicalDesert);
        assert_eq!(classify(0.2, 0.2), Biome::Grassland);
        assert_eq!(classify(0.11, 0.5), Biome::TropicalSeasonalForest);
        assert_eq!(classify(0.15, 0.9), Biome::TropicalRainForest);
    }

    #[test]
    fn classification_is_total() {
        for ei in 0..=100 {
            for mi in 0..=100 {
                let biome = classify(ei as f32 / 100.0, mi as f32 / 100.0);
                assert!(Biome::ALL.contains(&biome));
            }
        }
    }

    #[test]
    fn registry_ids_are_stable() {
        for (i, biome) in Biome::ALL.iter().enumerate() {
            assert_eq!(biome.as_u8() as usize, i);
        }
    }

    #[test]
    fn tree_densities_follow_canopy() {
        for biome in Biome::ALL {
            assert!(biome.tree_density() <= MAX_TREE_DENSITY);
        }
        assert_eq!(Biome::Tundra.tree_density(), 1);
        assert_eq!(Biome::SubtropicalDesert.tree_density(), 0);
        assert_eq!(Biome::TemperateDesert.tree_density(), 0);
        assert_eq!(Biome::TropicalRainForest.tree_density(), MAX_TREE_DENSITY);
        for water in [Biome::DeepOcean, Biome::Ocean, Biome::ShallowOcean, Biome::Beach] {
            assert_eq!(water.tree_density(), 0);
        }
    }

    #[test]
    fn classify_grid_matches_pointwise() {
        let elevation = Grid::from_fn(8, 8, |x, _| x as f32 / 7.0);
        let moisture = Grid::from_fn(8, 8, |_, y| y as f32 / 7.0);
        let biomes = classify_grid(&elevation, &moisture);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(*biomes.get(x, y), classify(x as f32 / 7.0, y as f32 / 7.0));
            }
        }
    }
}
