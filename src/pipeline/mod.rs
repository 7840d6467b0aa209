//! Pipeline module for orchestrating terrain generation stages.
//!
//! Provides a trait-based architecture for modular generation stages
//! that are composed into a pipeline from a [`GeneratorConfig`](crate::config::GeneratorConfig).

mod stage;

pub use stage::{
    GenerationStage, StageId, StageConfig, Pipeline, PipelineError,
    HeightmapStage, MoistureStage, BiomeStage, ColorStage, BlendStage,
    TreeStage,
};
