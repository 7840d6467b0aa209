//! Multi-octave coherent noise sampled on a 2D plane.

use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Random seed for reproducible generation.
    pub seed: i32,
    /// Number of noise periods across the grid (4.0 typical).
    pub frequency_divisor: f32,
    /// Coordinate multiplier per octave, first entry 1.0.
    pub octave_amplitudes: Vec<f32>,
    /// Redistribution exponent applied to the blended sample.
    pub exponent: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            frequency_divisor: 4.0,
            octave_amplitudes: vec![1.0],
            exponent: 1.0,
        }
    }
}

impl NoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Creates a configuration with `octaves` amplitudes grown geometrically.
    pub fn fractal(seed: i32, frequency_divisor: f32, octaves: u32, growth: f32, exponent: f32) -> Self {
        Self {
            seed,
            frequency_divisor,
            octave_amplitudes: octave_amplitudes(octaves, growth),
            exponent,
        }
    }

    /// Returns the number of octaves sampled per point.
    pub fn octaves(&self) -> usize {
        self.octave_amplitudes.len()
    }
}

/// Builds the per-octave amplitude multipliers `[1, g, g^2, ...]`.
///
/// A growth factor of 1.0 yields uniform amplitudes.
pub fn octave_amplitudes(octaves: u32, growth: f32) -> Vec<f32> {
    let mut amplitudes = Vec::with_capacity(octaves as usize);
    let mut amplitude = 1.0f32;
    for _ in 0..octaves {
        amplitudes.push(amplitude);
        amplitude *= growth;
    }
    amplitudes
}

/// Rescales a base noise value from [-1, 1] to [0, 1].
///
/// Values outside the nominal range are clamped.
pub fn rescale_unit(value: f32) -> f32 {
    (value / 2.0 + 0.5).clamp(0.0, 1.0)
}

/// Samples the seeded base 2D simplex noise at `(x, y)`.
///
/// Returns a value in approximately [-1, 1]. The same seed and coordinates
/// always produce the same value.
pub fn sample_base_noise(x: f32, y: f32, seed: i32) -> f32 {
    NoiseBuilder::fbm_2d_offset(x, 1, y, 1)
        .with_seed(seed)
        .with_freq(1.0)
        .with_octaves(1)
        .generate()
        .0[0]
}

/// Samples fractal noise at a 2D position in noise space.
///
/// Each octave samples the base noise at `(x * a, y * a)` so octaves read
/// different regions of the field, weighted by `1 / a`. The weighted mean is
/// raised to `config.exponent`.
///
/// # Returns
/// A noise value in [0, 1]
pub fn sample_fractal_noise(x: f32, y: f32, config: &NoiseConfig) -> f32 {
    let mut total = 0.0f32;
    let mut weight_total = 0.0f32;

    for &amplitude in &config.octave_amplitudes {
        let weight = 1.0 / amplitude;
        let value = rescale_unit(sample_base_noise(x * amplitude, y * amplitude, config.seed));

        total += value * weight;
        weight_total += weight;
    }

    if weight_total <= 0.0 {
        return 0.0;
    }

    (total / weight_total).powf(config.exponent)
}
