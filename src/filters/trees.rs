//! Sparse vegetation markers at local maxima of a secondary noise field.

use crate::biomes::{Biome, MAX_TREE_DENSITY};
use crate::color::Rgb;
use crate::terrain::Grid;

/// Color painted on cells that receive a tree.
pub const TREE_COLOR: Rgb = [0, 0, 0];

/// Search radius for a biome's tree density; `None` when the biome has no trees.
///
/// Higher density gives a smaller radius and therefore more trees.
pub fn tree_radius(biome: Biome) -> Option<u32> {
    let density = biome.tree_density();
    if density == 0 {
        return None;
    }
    Some((MAX_TREE_DENSITY as u32 + 1) - density as u32)
}

/// Marks trees at local maxima of `tree_noise`.
///
/// For each cell whose biome has a nonzero tree density, the square window of
/// the biome's radius (clipped to the grid) is scanned for its maximum noise
/// value. If the cell itself holds that maximum it is painted [`TREE_COLOR`];
/// every other cell keeps its input color. Cells sharing an exact maximum are
/// all marked.
///
/// # Panics
/// Panics if the three grids differ in dimensions.
pub fn apply_trees(colors: &Grid<Rgb>, biomes: &Grid<Biome>, tree_noise: &Grid<f32>) -> Grid<Rgb> {
    assert_eq!(colors.dimensions(), biomes.dimensions());
    assert_eq!(colors.dimensions(), tree_noise.dimensions());

    let (width, height) = colors.dimensions();
    Grid::from_fn(width, height, |x, y| {
        let input = *colors.get(x, y);
        let Some(radius) = tree_radius(*biomes.get(x, y)) else {
            return input;
        };

        let r = radius as i64;
        let mut max = f32::MIN;
        for dy in -r..=r {
            for dx in -r..=r {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if !tree_noise.in_bounds(nx, ny) {
                    continue;
                }
                let v = *tree_noise.get(nx as u32, ny as u32);
                if v > max {
                    max = v;
                }
            }
        }

        if *tree_noise.get(x, y) == max {
            TREE_COLOR
        } else {
            input
        }
    })
}

/// Counts cells painted with [`TREE_COLOR`] whose input color differed.
pub fn count_trees(before: &Grid<Rgb>, after: &Grid<Rgb>) -> usize {
    before
        .cells()
        .iter()
        .zip(after.cells())
        .filter(|(b, a)| **a == TREE_COLOR && **b != TREE_COLOR)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noise_field(width: u32, height: u32) -> Grid<f32> {
        // Deterministic, non-repeating values with a single global peak.
        Grid::from_fn(width, height, |x, y| {
            let v = ((x * 31 + y * 17) % 97) as f32 / 96.0;
            v * 0.999
        })
    }

    #[test]
    fn radius_inverts_density() {
        assert_eq!(tree_radius(Biome::TropicalRainForest), Some(1));
        assert_eq!(tree_radius(Biome::Grassland), Some(3));
        assert_eq!(tree_radius(Biome::Tundra), Some(10));
        assert_eq!(tree_radius(Biome::Snow), None);
    }

    #[test]
    fn zero_density_biomes_never_get_trees() {
        let colors = Grid::new(20, 20, [10u8, 20, 30]);
        let noise = noise_field(20, 20);
        for biome in Biome::ALL.into_iter().filter(|b| b.tree_density() == 0) {
            let biomes = Grid::new(20, 20, biome);
            let out = apply_trees(&colors, &biomes, &noise);
            assert_eq!(out, colors, "{:?} should not receive trees", biome);
        }
    }

    #[test]
    fn tree_marks_unique_local_maximum() {
        let colors = Grid::new(9, 9, [1u8, 2, 3]);
        let biomes = Grid::new(9, 9, Biome::TropicalRainForest);
        let mut noise = Grid::new(9, 9, 0.1f32);
        noise.set(4, 4, 0.9);

        let out = apply_trees(&colors, &biomes, &noise);
        assert_eq!(*out.get(4, 4), TREE_COLOR);
        // Neighbors within radius 1 see the peak and stay unchanged.
        assert_eq!(*out.get(3, 4), [1, 2, 3]);
        assert_eq!(*out.get(5, 5), [1, 2, 3]);
        // Far cells in a flat field tie with their own window maximum.
        assert_eq!(*out.get(0, 0), TREE_COLOR);
    }

    #[test]
    fn larger_radius_suppresses_more_trees() {
        let (w, h) = (40, 40);
        let colors = Grid::new(w, h, [100u8, 100, 100]);
        let noise = noise_field(w, h);

        let dense = apply_trees(&colors, &Grid::new(w, h, Biome::TropicalRainForest), &noise);
        let sparse = apply_trees(&colors, &Grid::new(w, h, Biome::Tundra), &noise);

        let dense_count = count_trees(&colors, &dense);
        let sparse_count = count_trees(&colors, &sparse);
        assert!(dense_count > sparse_count);
        assert!(sparse_count >= 1);
    }

    #[test]
    fn edge_windows_are_clipped() {
        let colors = Grid::new(3, 3, [5u8, 5, 5]);
        let biomes = Grid::new(3, 3, Biome::Tundra);
        let noise = Grid::from_fn(3, 3, |x, y| (x + y * 3) as f32);

        let out = apply_trees(&colors, &biomes, &noise);
        assert_eq!(*out.get(2, 2), TREE_COLOR);
        assert_eq!(count_trees(&colors, &out), 1);
    }
}
