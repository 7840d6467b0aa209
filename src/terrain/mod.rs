//! Terrain generation module.
//!
//! Provides the `Grid` layer type, the `TerrainMap` holding a run's layers,
//! and the heightmap builder that fills grids with normalized fractal noise.

mod grid;
mod heightmap;
mod map;

pub use grid::Grid;
pub use heightmap::{build_heightmap, build_raw_heightmap, normalize_heightmap, tree_noise_config};
pub use map::TerrainMap;
