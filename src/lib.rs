//! Procedural 2D terrain heightmap generator.
//!
//! This crate builds square elevation grids from layered fractal noise,
//! classifies them into biomes, and renders them as grayscale or colored
//! PNG images with optional color blending and tree placement.

pub mod config;
pub mod logging;
pub mod noise;
pub mod terrain;
pub mod biomes;
pub mod color;
pub mod filters;
pub mod export;
pub mod pipeline;

pub use config::{ConfigError, GeneratorConfig, RenderMode};
pub use noise::NoiseConfig;
pub use terrain::{Grid, TerrainMap};
pub use biomes::{Biome, BiomeCoverage};
pub use color::{ColorMapper, ColorStrategy, Rgb};
pub use filters::BlendNeighbors;
pub use pipeline::{GenerationStage, Pipeline, PipelineError, StageConfig};
