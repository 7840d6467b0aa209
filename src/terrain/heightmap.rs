//! Heightmap generation using fractal noise.

use crate::noise::{NoiseConfig, sample_fractal_noise};
use super::grid::Grid;

/// Samples raw (unnormalized) fractal noise for every cell of a `width x height` grid.
///
/// Grid coordinates are mapped to noise space by dividing by
/// `size / frequency_divisor` along each axis, so the grid spans
/// `frequency_divisor` noise units in both directions.
pub fn build_raw_heightmap(width: u32, height: u32, config: &NoiseConfig) -> Grid<f32> {
    let step_x = width as f32 / config.frequency_divisor;
    let step_y = height as f32 / config.frequency_divisor;

    Grid::from_fn(width, height, |x, y| {
        let nx = x as f32 / step_x;
        let ny = y as f32 / step_y;
        sample_fractal_noise(nx, ny, config)
    })
}

/// Rescales a raw grid so its minimum maps to exactly 0.0 and maximum to exactly 1.0.
///
/// A constant grid (`max == min`) maps every cell to 0.0.
pub fn normalize_heightmap(raw: &Grid<f32>) -> Grid<f32> {
    let (min, max) = raw.value_range();
    tracing::debug!(min, max, "raw extrema");
    let scale = max - min;

    if scale <= 0.0 {
        tracing::debug!(min, max, "constant noise field, normalizing to zero");
        return raw.map(|_| 0.0);
    }

    raw.map(|&v| ((v - min) / scale).clamp(0.0, 1.0))
}

/// Builds a normalized `size x size` elevation grid.
///
/// Sampling runs in parallel; extrema are reduced over the complete raw grid
/// before rescaling begins.
pub fn build_heightmap(size: u32, config: &NoiseConfig) -> Grid<f32> {
    let raw = build_raw_heightmap(size, size, config);
    tracing::debug!(size, seed = config.seed, octaves = config.octaves(), "raw heightmap sampled");
    normalize_heightmap(&raw)
}

/// Noise configuration for the per-cell tree field.
///
/// One octave at full pixel frequency: the divisor equals the grid width, so
/// each cell advances one unit in noise space.
pub fn tree_noise_config(seed: i32, width: u32) -> NoiseConfig {
    NoiseConfig {
        frequency_divisor: width as f32,
        ..NoiseConfig::with_seed(seed)
    }
}
