//! Post-processing filters over color grids.
//!
//! Both filters read a complete input grid and return a new one, so every
//! cell sees unmodified neighbors.

mod blend;
mod trees;

pub use blend::{BlendNeighbors, blend};
pub use trees::{TREE_COLOR, apply_trees, count_trees, tree_radius};
