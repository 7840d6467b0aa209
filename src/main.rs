//! Mapgen CLI - Procedural terrain heightmap generator.
//!
//! Generate a square heightmap from layered fractal noise and write it as a
//! grayscale or colorized PNG.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use mapgen::color::ColorStrategy;
use mapgen::config::{GeneratorConfig, RenderMode};
use mapgen::export::{PngExportOptions, export_color_png, export_grayscale_png};
use mapgen::logging::init_logging;
use mapgen::pipeline::Pipeline;
use mapgen::terrain::TerrainMap;

/// Procedural terrain heightmap generator.
#[derive(Parser)]
#[command(name = "mapgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Width and height of the square map in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Noise seed for reproducible generation (random in 0..1000 if omitted).
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i32>,

    /// Output image mode.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Color strategy for colorized output.
    #[arg(long, value_enum)]
    color_strategy: Option<StrategyArg>,

    /// Number of noise periods across the map.
    #[arg(short, long)]
    frequency: Option<f32>,

    /// Number of noise octaves.
    #[arg(short, long)]
    octaves: Option<u32>,

    /// Amplitude growth per octave (1.0 = uniform weights).
    #[arg(short, long)]
    amplitude: Option<f32>,

    /// Redistribution exponent applied to each sample.
    #[arg(short, long)]
    exponent: Option<f32>,

    /// Sample moisture from an independent noise field.
    #[arg(short, long)]
    diverse: bool,

    /// Neighbors averaged when blending colors (0, 4 or 8).
    #[arg(short, long)]
    blend: Option<u8>,

    /// Place trees in vegetated biomes.
    #[arg(short, long)]
    trees: bool,

    /// Print a biome coverage table after generation.
    #[arg(short, long)]
    verbose: bool,

    /// Output PNG path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Load settings from a RON file; other flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resolved settings (including the seed) to a RON file.
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "mapgen=trace". RUST_LOG takes precedence.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// 8-bit luminance of the elevation.
    Grayscale,
    /// RGB through a color strategy.
    Colorized,
}

impl From<ModeArg> for RenderMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Grayscale => RenderMode::Grayscale,
            ModeArg::Colorized => RenderMode::Colorized,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Registry color of each cell's biome.
    Biome,
    /// Elevation bands with per-band gradients.
    Banded,
}

impl From<StrategyArg> for ColorStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Biome => ColorStrategy::Biome,
            StrategyArg::Banded => ColorStrategy::Banded,
        }
    }
}

impl Cli {
    /// Applies every flag that was given on top of `config`.
    fn apply(self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(strategy) = self.color_strategy {
            config.color_strategy = strategy.into();
        }
        if let Some(frequency) = self.frequency {
            config.frequency_divisor = frequency;
        }
        if let Some(octaves) = self.octaves {
            config.octaves = octaves;
        }
        if let Some(amplitude) = self.amplitude {
            config.amplitude_growth = amplitude;
        }
        if let Some(exponent) = self.exponent {
            config.exponent = exponent;
        }
        if let Some(blend) = self.blend {
            config.blend_neighbors = blend;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.diverse_moisture |= self.diverse;
        config.place_trees |= self.trees;
        config.verbose |= self.verbose;
        config
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let base = match &cli.config {
        Some(path) => GeneratorConfig::load_ron(path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }),
        None => GeneratorConfig::default(),
    };
    let save_config = cli.save_config.clone();
    let mut config = cli.apply(base);

    // Validate parameters before any grid work
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let seed = config.resolve_seed();
    config.seed = Some(seed);

    if let Some(path) = save_config {
        config.save_ron(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        tracing::info!(path = %path.display(), "saved config");
    }

    run_generate(&config, seed);
}

fn run_generate(config: &GeneratorConfig, seed: i32) {
    tracing::info!(
        size = config.size,
        seed,
        mode = ?config.mode,
        strategy = config.color_strategy.name(),
        "generating map"
    );

    let start = Instant::now();

    let pipeline = Pipeline::for_config(config, seed).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    tracing::debug!(stages = pipeline.stage_count(), "running pipeline");

    let mut map = TerrainMap::new(config.size, seed);
    pipeline
        .run_with_callbacks(
            &mut map,
            |name, i, total| {
                tracing::debug!("[{}/{}] Starting: {}", i + 1, total, name);
            },
            |name, i, total| {
                tracing::debug!("[{}/{}] Completed: {}", i + 1, total, name);
            },
        )
        .unwrap_or_else(|e| {
            eprintln!("Error during generation: {}", e);
            std::process::exit(1);
        });

    tracing::info!("generation completed in {:.2?}", start.elapsed());

    // Export
    let export_start = Instant::now();
    let options = PngExportOptions::default();
    let result = match config.mode {
        RenderMode::Grayscale => match map.to_grayscale() {
            Some(gray) => export_grayscale_png(&gray, &config.output, &options),
            None => {
                eprintln!("Error: no elevation layer was generated");
                std::process::exit(1);
            }
        },
        RenderMode::Colorized => match &map.colors {
            Some(colors) => export_color_png(colors, &config.output, &options),
            None => {
                eprintln!("Error: no color layer was generated");
                std::process::exit(1);
            }
        },
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error exporting PNG: {}", e);
        std::process::exit(1);
    });

    tracing::info!(
        path = %config.output.display(),
        "export completed in {:.2?}",
        export_start.elapsed()
    );

    println!("Heightmap generated, seed: {}", seed);

    if config.verbose {
        match map.biome_coverage() {
            Some(coverage) => {
                if let Some((biome, percent)) = coverage.dominant() {
                    tracing::info!(biome = biome.display_name(), percent, "dominant biome");
                }
                println!("{}", coverage);
            }
            None => tracing::info!("no biome grid for this mode; skipping coverage table"),
        }
    }
}
