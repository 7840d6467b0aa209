//! Generator configuration with validation and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorStrategy;
use crate::filters::BlendNeighbors;
use crate::noise::NoiseConfig;

/// Errors raised while loading or validating a configuration.
///
/// Validation errors are reported before any grid work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("size must be greater than 0")]
    InvalidSize,
    #[error("frequency divisor must be a positive finite number, got {0}")]
    InvalidFrequencyDivisor(f32),
    #[error("octaves must be at least 1, got {0}")]
    InvalidOctaves(u32),
    #[error("amplitude growth must be a finite number >= 1, got {0}")]
    InvalidAmplitudeGrowth(f32),
    #[error("exponent must be a positive finite number, got {0}")]
    InvalidExponent(f32),
    #[error("blend neighbors must be 0, 4 or 8, got {0}")]
    InvalidBlendNeighbors(u8),
    #[error("tree placement requires the biome color strategy")]
    TreesRequireBiomes,
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to write config: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}

/// Output image mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Single channel, `elevation * 255` per pixel.
    #[default]
    Grayscale,
    /// RGB through a color strategy.
    Colorized,
}

/// Full configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Width and height of the square grid.
    pub size: u32,
    /// Noise seed; a random seed is drawn when absent.
    pub seed: Option<i32>,
    pub mode: RenderMode,
    pub color_strategy: ColorStrategy,
    /// Number of noise periods across the grid.
    pub frequency_divisor: f32,
    pub octaves: u32,
    /// Per-octave amplitude multiplier (1.0 = uniform).
    pub amplitude_growth: f32,
    pub exponent: f32,
    /// Independent moisture pass (`seed + 1`) instead of mirrored elevation.
    pub diverse_moisture: bool,
    /// 0, 4 or 8.
    pub blend_neighbors: u8,
    pub place_trees: bool,
    /// Print a biome coverage table after generation.
    pub verbose: bool,
    /// Output PNG path.
    pub output: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 512,
            seed: None,
            mode: RenderMode::Grayscale,
            color_strategy: ColorStrategy::Biome,
            frequency_divisor: 4.0,
            octaves: 1,
            amplitude_growth: 1.0,
            exponent: 1.0,
            diverse_moisture: false,
            blend_neighbors: 0,
            place_trees: false,
            verbose: false,
            output: PathBuf::from("heightmap.png"),
        }
    }
}

impl GeneratorConfig {
    /// Checks every option; the first violation is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        if !(self.frequency_divisor.is_finite() && self.frequency_divisor > 0.0) {
            return Err(ConfigError::InvalidFrequencyDivisor(self.frequency_divisor));
        }
        if self.octaves < 1 {
            return Err(ConfigError::InvalidOctaves(self.octaves));
        }
        if !(self.amplitude_growth.is_finite() && self.amplitude_growth >= 1.0) {
            return Err(ConfigError::InvalidAmplitudeGrowth(self.amplitude_growth));
        }
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(ConfigError::InvalidExponent(self.exponent));
        }
        self.blend()?;
        if self.mode == RenderMode::Colorized
            && self.place_trees
            && !self.color_strategy.mapper().requires_biomes()
        {
            return Err(ConfigError::TreesRequireBiomes);
        }
        Ok(())
    }

    /// Parsed blend setting.
    pub fn blend(&self) -> Result<BlendNeighbors, ConfigError> {
        BlendNeighbors::from_count(self.blend_neighbors)
            .ok_or(ConfigError::InvalidBlendNeighbors(self.blend_neighbors))
    }

    /// Noise parameters for the elevation pass with the given seed.
    pub fn noise_config(&self, seed: i32) -> NoiseConfig {
        NoiseConfig::fractal(
            seed,
            self.frequency_divisor,
            self.octaves,
            self.amplitude_growth,
            self.exponent,
        )
    }

    /// Returns the configured seed or draws one in `0..1000`.
    pub fn resolve_seed(&self) -> i32 {
        use rand::Rng;

        self.seed.unwrap_or_else(|| rand::rng().random_range(0..1000))
    }

    /// Loads a configuration from a RON file. Missing fields take defaults.
    pub fn load_ron(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        ron::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Writes the configuration as pretty-printed RON.
    pub fn save_ron(&self, path: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let contents = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;
        std::fs::write(path, contents).map_err(ConfigError::Write)
    }
}
