//! Generation stage trait and pipeline orchestration.

use std::time::Instant;
use thiserror::Error;

use crate::biomes::classify_grid;
use crate::color::{ColorMapper, ColorStrategy};
use crate::config::{ConfigError, GeneratorConfig, RenderMode};
use crate::filters::{BlendNeighbors, apply_trees, blend, count_trees};
use crate::noise::NoiseConfig;
use crate::terrain::{TerrainMap, build_heightmap, build_raw_heightmap, tree_noise_config};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Normalized elevation from fractal noise.
    Heightmap,
    /// Moisture from a second noise pass or mirrored elevation.
    Moisture,
    /// Biome classification from elevation and moisture.
    Biomes,
    /// Color grid from the configured strategy.
    Colors,
    /// Neighbor-window color smoothing.
    Blend,
    /// Vegetation markers at local noise maxima.
    Trees,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Heightmap => "heightmap",
            StageId::Moisture => "moisture",
            StageId::Biomes => "biomes",
            StageId::Colors => "colors",
            StageId::Blend => "blend",
            StageId::Trees => "trees",
        }
    }
}

/// Configuration passed to each generation stage.
#[derive(Debug, Clone, Default)]
pub struct StageConfig {
    /// Noise configuration for the elevation pass; its seed is the run seed.
    pub noise: NoiseConfig,
}

impl StageConfig {
    /// Creates a new configuration with the given noise settings.
    pub fn with_noise(noise: NoiseConfig) -> Self {
        Self { noise }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Stage '{0}' needs the {1} layer, which has not been generated")]
    MissingLayer(String, &'static str),
}

/// Trait for implementing generation stages.
///
/// Each stage reads layers produced by earlier stages and stores a newly
/// built grid on the map. Inputs are never modified in place.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, replacing its output layer on the map.
    fn execute(&self, map: &mut TerrainMap, config: &StageConfig) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: StageConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: StageConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Validates `cfg` and assembles the stages it calls for.
    ///
    /// - grayscale: heightmap only
    /// - colorized, biome strategy: heightmap, moisture, biomes, colors, then optional blend and trees
    /// - colorized, banded strategy: heightmap, colors, then optional blend
    pub fn for_config(cfg: &GeneratorConfig, seed: i32) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let neighbors = cfg.blend()?;

        let mut pipeline = Pipeline::new(StageConfig::with_noise(cfg.noise_config(seed)));
        pipeline.add_stage(HeightmapStage);

        if cfg.mode == RenderMode::Grayscale {
            return Ok(pipeline);
        }

        let colors = ColorStage::new(cfg.color_strategy);
        if colors.requires_biomes() {
            pipeline.add_stage(MoistureStage::new(cfg.diverse_moisture));
            pipeline.add_stage(BiomeStage);
        }
        pipeline.add_stage(colors);

        if neighbors != BlendNeighbors::None {
            pipeline.add_stage(BlendStage::new(neighbors));
        }
        if cfg.place_trees {
            pipeline.add_stage(TreeStage);
        }

        tracing::debug!(stages = ?pipeline.stage_ids(), "pipeline assembled");
        Ok(pipeline)
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the stage IDs in execution order.
    pub fn stage_ids(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    /// Executes all stages in order on the given map.
    pub fn run(&self, map: &mut TerrainMap) -> Result<(), PipelineError> {
        self.run_with_callbacks(map, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `map` - The map to generate
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        map: &mut TerrainMap,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            // Check dependencies
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            // Each stage finishes its whole grid before the next one starts.
            let start = Instant::now();
            stage.execute(map, &self.config)?;
            tracing::info!(
                stage = stage.id().name(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "stage complete"
            );
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Heightmap generation stage using fractal noise.
pub struct HeightmapStage;

impl GenerationStage for HeightmapStage {
    fn id(&self) -> StageId {
        StageId::Heightmap
    }

    fn name(&self) -> &str {
        "Heightmap Generation"
    }

    fn execute(&self, map: &mut TerrainMap, config: &StageConfig) -> Result<(), PipelineError> {
        map.elevation = Some(build_heightmap(map.size, &config.noise));
        Ok(())
    }
}

/// Moisture stage: an independent noise pass or the point-reflected elevation grid.
pub struct MoistureStage {
    /// Sample a fresh field with `seed + 1` instead of mirroring elevation.
    pub diverse: bool,
}

impl MoistureStage {
    pub fn new(diverse: bool) -> Self {
        Self { diverse }
    }
}

impl GenerationStage for MoistureStage {
    fn id(&self) -> StageId {
        StageId::Moisture
    }

    fn name(&self) -> &str {
        "Moisture Generation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap]
    }

    fn execute(&self, map: &mut TerrainMap, config: &StageConfig) -> Result<(), PipelineError> {
        let moisture = if self.diverse {
            let noise = NoiseConfig {
                seed: config.noise.seed.wrapping_add(1),
                ..config.noise.clone()
            };
            build_heightmap(map.size, &noise)
        } else {
            let elevation = map
                .elevation
                .as_ref()
                .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "elevation"))?;
            elevation.mirrored()
        };

        map.moisture = Some(moisture);
        Ok(())
    }
}

/// Biome classification stage.
pub struct BiomeStage;

impl GenerationStage for BiomeStage {
    fn id(&self) -> StageId {
        StageId::Biomes
    }

    fn name(&self) -> &str {
        "Biome Classification"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Heightmap, StageId::Moisture]
    }

    fn execute(&self, map: &mut TerrainMap, _config: &StageConfig) -> Result<(), PipelineError> {
        let elevation = map
            .elevation
            .as_ref()
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "elevation"))?;
        let moisture = map
            .moisture
            .as_ref()
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "moisture"))?;

        if elevation.dimensions() != moisture.dimensions() {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                format!(
                    "elevation is {:?} but moisture is {:?}",
                    elevation.dimensions(),
                    moisture.dimensions()
                ),
            ));
        }

        map.biomes = Some(classify_grid(elevation, moisture));
        Ok(())
    }
}

/// Color mapping stage using the configured strategy.
pub struct ColorStage {
    pub strategy: ColorStrategy,
    mapper: Box<dyn ColorMapper>,
}

impl ColorStage {
    pub fn new(strategy: ColorStrategy) -> Self {
        Self {
            strategy,
            mapper: strategy.mapper(),
        }
    }

    /// Returns true if the stage's mapper reads the biome layer.
    pub fn requires_biomes(&self) -> bool {
        self.mapper.requires_biomes()
    }
}

impl GenerationStage for ColorStage {
    fn id(&self) -> StageId {
        StageId::Colors
    }

    fn name(&self) -> &str {
        "Color Mapping"
    }

    fn dependencies(&self) -> &[StageId] {
        if self.requires_biomes() {
            &[StageId::Biomes]
        } else {
            &[StageId::Heightmap]
        }
    }

    fn execute(&self, map: &mut TerrainMap, _config: &StageConfig) -> Result<(), PipelineError> {
        let elevation = map
            .elevation
            .as_ref()
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "elevation"))?;

        let colors = self
            .mapper
            .colorize(elevation, map.biomes.as_ref())
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "biome"))?;

        tracing::debug!(strategy = self.strategy.name(), "color grid built");
        map.colors = Some(colors);
        Ok(())
    }
}

/// Neighbor-window color smoothing stage.
pub struct BlendStage {
    pub neighbors: BlendNeighbors,
}

impl BlendStage {
    pub fn new(neighbors: BlendNeighbors) -> Self {
        Self { neighbors }
    }
}

impl GenerationStage for BlendStage {
    fn id(&self) -> StageId {
        StageId::Blend
    }

    fn name(&self) -> &str {
        "Color Blending"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Colors]
    }

    fn execute(&self, map: &mut TerrainMap, _config: &StageConfig) -> Result<(), PipelineError> {
        let colors = map
            .colors
            .as_ref()
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "color"))?;

        let blended = blend(self.neighbors, colors);
        tracing::debug!(neighbors = self.neighbors.count(), "colors blended");
        map.colors = Some(blended);
        Ok(())
    }
}

/// Tree placement stage.
///
/// Builds its own unnormalized single-octave noise layer at full pixel
/// frequency from the run seed, then marks local maxima inside vegetated biomes.
pub struct TreeStage;

impl GenerationStage for TreeStage {
    fn id(&self) -> StageId {
        StageId::Trees
    }

    fn name(&self) -> &str {
        "Tree Placement"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Colors, StageId::Biomes]
    }

    fn execute(&self, map: &mut TerrainMap, config: &StageConfig) -> Result<(), PipelineError> {
        // Local maxima are taken on the raw field; rescaling could merge near-equal samples.
        let tree_noise = build_raw_heightmap(map.size, map.size, &tree_noise_config(config.noise.seed, map.size));

        let colors = map
            .colors
            .as_ref()
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "color"))?;
        let biomes = map
            .biomes
            .as_ref()
            .ok_or_else(|| PipelineError::MissingLayer(self.name().to_string(), "biome"))?;

        if colors.dimensions() != biomes.dimensions() || colors.dimensions() != tree_noise.dimensions() {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                "layer dimensions differ".to_string(),
            ));
        }

        let with_trees = apply_trees(colors, biomes, &tree_noise);
        tracing::debug!(trees = count_trees(colors, &with_trees), "trees placed");

        map.colors = Some(with_trees);
        map.tree_noise = Some(tree_noise);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::Biome;
    use crate::color::{BandedColorMapper, Rgb};
    use crate::filters::TREE_COLOR;

    fn colorized(size: u32) -> GeneratorConfig {
        GeneratorConfig {
            size,
            seed: Some(42),
            mode: RenderMode::Colorized,
            octaves: 4,
            amplitude_growth: 2.0,
            ..Default::default()
        }
    }

    fn run(cfg: &GeneratorConfig) -> TerrainMap {
        let seed = cfg.resolve_seed();
        let pipeline = Pipeline::for_config(cfg, seed).unwrap();
        let mut map = TerrainMap::new(cfg.size, seed);
        pipeline.run(&mut map).unwrap();
        map
    }

    #[test]
    fn test_pipeline_execution() {
        let mut pipeline = Pipeline::new(StageConfig::default());
        pipeline.add_stage(HeightmapStage);

        let mut map = TerrainMap::new(32, 0);
        pipeline.run(&mut map).unwrap();

        // Verify heights were generated
        let (min, max) = map.elevation.as_ref().unwrap().value_range();
        assert_eq!(min, 0.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn test_pipeline_with_callbacks() {
        let mut pipeline = Pipeline::new(StageConfig::default());
        pipeline.add_stage(HeightmapStage);

        let mut map = TerrainMap::new(16, 0);
        let mut started = false;
        let mut completed = false;

        pipeline
            .run_with_callbacks(
                &mut map,
                |name, _, _| {
                    assert_eq!(name, "Heightmap Generation");
                    started = true;
                },
                |name, _, _| {
                    assert_eq!(name, "Heightmap Generation");
                    completed = true;
                },
            )
            .unwrap();

        assert!(started);
        assert!(completed);
    }

    #[test]
    fn test_stage_id_name() {
        assert_eq!(StageId::Heightmap.name(), "heightmap");
        assert_eq!(StageId::Trees.name(), "trees");
    }

    #[test]
    fn test_missing_dependency_is_reported() {
        let mut pipeline = Pipeline::new(StageConfig::default());
        pipeline.add_stage(BiomeStage);

        let mut map = TerrainMap::new(8, 0);
        let err = pipeline.run(&mut map).unwrap_err();
        assert!(matches!(err, PipelineError::MissingDependency(_, _)));
        assert!(map.biomes.is_none());
    }

    #[test]
    fn test_missing_layer_is_reported() {
        let mut map = TerrainMap::new(8, 0);
        let err = BlendStage::new(BlendNeighbors::Four)
            .execute(&mut map, &StageConfig::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingLayer(_, "color")));
    }

    #[test]
    fn test_stage_lists_follow_config() {
        let gray = GeneratorConfig::default();
        assert_eq!(Pipeline::for_config(&gray, 1).unwrap().stage_ids(), vec![StageId::Heightmap]);

        let full = GeneratorConfig { blend_neighbors: 8, place_trees: true, ..colorized(16) };
        assert_eq!(
            Pipeline::for_config(&full, 1).unwrap().stage_ids(),
            vec![
                StageId::Heightmap,
                StageId::Moisture,
                StageId::Biomes,
                StageId::Colors,
                StageId::Blend,
                StageId::Trees,
            ]
        );

        let banded = GeneratorConfig {
            color_strategy: ColorStrategy::Banded,
            blend_neighbors: 4,
            ..colorized(16)
        };
        assert_eq!(
            Pipeline::for_config(&banded, 1).unwrap().stage_ids(),
            vec![StageId::Heightmap, StageId::Colors, StageId::Blend]
        );
    }

    #[test]
    fn test_invalid_config_builds_no_pipeline() {
        let cfg = GeneratorConfig { blend_neighbors: 3, ..colorized(16) };
        assert!(matches!(
            Pipeline::for_config(&cfg, 1),
            Err(ConfigError::InvalidBlendNeighbors(3))
        ));
    }

    #[test]
    fn test_colorized_without_filters_matches_biome_colors() {
        let map = run(&colorized(10));

        let biomes = map.biomes.as_ref().unwrap();
        let colors = map.colors.as_ref().unwrap();
        assert_eq!(colors.dimensions(), (10, 10));

        let expected = biomes.map(|b| b.color());
        assert_eq!(colors, &expected);
        assert!(colors.cells().iter().all(|&c| c != TREE_COLOR));
        assert!(map.tree_noise.is_none());
    }

    #[test]
    fn test_mirrored_moisture_by_default() {
        let map = run(&colorized(12));
        let elevation = map.elevation.as_ref().unwrap();
        assert_eq!(map.moisture.as_ref().unwrap(), &elevation.mirrored());
    }

    #[test]
    fn test_diverse_moisture_uses_next_seed() {
        let cfg = GeneratorConfig { diverse_moisture: true, ..colorized(24) };
        let map = run(&cfg);

        let expected = build_heightmap(24, &cfg.noise_config(43));
        assert_eq!(map.moisture.as_ref().unwrap(), &expected);
    }

    #[test]
    fn test_blend_stage_smooths_colors() {
        let cfg = GeneratorConfig { blend_neighbors: 8, ..colorized(20) };
        let map = run(&cfg);

        let unblended = map.biomes.as_ref().unwrap().map(|b| b.color());
        let expected = blend(BlendNeighbors::Eight, &unblended);
        assert_eq!(map.colors.as_ref().unwrap(), &expected);
    }

    #[test]
    fn test_tree_stage_only_marks_vegetated_biomes() {
        let cfg = GeneratorConfig { place_trees: true, ..colorized(48) };
        let map = run(&cfg);

        let biomes = map.biomes.as_ref().unwrap();
        let colors = map.colors.as_ref().unwrap();
        assert!(map.tree_noise.is_some());

        for (&biome, &c) in biomes.cells().iter().zip(colors.cells()) {
            let c: Rgb = c;
            if biome.tree_density() == 0 {
                assert_eq!(c, biome.color());
            } else {
                assert!(c == biome.color() || c == TREE_COLOR);
            }
        }
    }

    #[test]
    fn test_tree_stage_keeps_raw_noise() {
        let cfg = GeneratorConfig { place_trees: true, ..colorized(32) };
        let map = run(&cfg);

        let expected = build_raw_heightmap(32, 32, &tree_noise_config(42, 32));
        assert_eq!(map.tree_noise.as_ref().unwrap(), &expected);

        let unmarked = map.biomes.as_ref().unwrap().map(|b| b.color());
        let marked = apply_trees(&unmarked, map.biomes.as_ref().unwrap(), &expected);
        assert_eq!(map.colors.as_ref().unwrap(), &marked);
    }

    #[test]
    fn test_color_stage_dependencies_follow_mapper() {
        let biome = ColorStage::new(ColorStrategy::Biome);
        assert!(biome.requires_biomes());
        assert_eq!(biome.dependencies(), &[StageId::Biomes]);

        let banded = ColorStage::new(ColorStrategy::Banded);
        assert!(!banded.requires_biomes());
        assert_eq!(banded.dependencies(), &[StageId::Heightmap]);
    }

    #[test]
    fn test_pipeline_stage_count() {
        let cfg = GeneratorConfig { blend_neighbors: 4, ..colorized(8) };
        assert_eq!(Pipeline::for_config(&cfg, 0).unwrap().stage_count(), 5);
    }

    #[test]
    fn test_banded_pipeline() {
        let cfg = GeneratorConfig { color_strategy: ColorStrategy::Banded, ..colorized(16) };
        let map = run(&cfg);

        assert!(map.biomes.is_none());
        assert!(map.moisture.is_none());
        let expected = map.elevation.as_ref().unwrap().map(|&e| BandedColorMapper::default().color(e));
        assert_eq!(map.colors.as_ref().unwrap(), &expected);
    }

    #[test]
    fn test_grayscale_pipeline_skips_color_layers() {
        let cfg = GeneratorConfig { size: 16, seed: Some(3), ..Default::default() };
        let map = run(&cfg);

        assert!(map.elevation.is_some());
        assert!(map.colors.is_none());
        assert_eq!(map.to_grayscale().unwrap().dimensions(), (16, 16));
    }

    #[test]
    fn test_runs_are_reproducible() {
        let cfg = GeneratorConfig { blend_neighbors: 4, place_trees: true, ..colorized(32) };
        let a = run(&cfg);
        let b = run(&cfg);
        assert_eq!(a.elevation, b.elevation);
        assert_eq!(a.colors, b.colors);
    }

    #[test]
    fn test_biome_grid_is_total() {
        let map = run(&colorized(16));
        assert!(map.biomes.unwrap().cells().iter().all(|b| Biome::ALL.contains(b)));
    }
}
