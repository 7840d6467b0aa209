//! Export module for saving generated maps as PNG images.

mod png;
mod color_map;

pub use png::{elevation_to_luma, export_grayscale_png, PngExportError, PngExportOptions};
pub use color_map::export_color_png;
