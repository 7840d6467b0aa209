//! Neighbor-window color smoothing.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::terrain::Grid;

const CARDINAL: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const DIAGONAL: [(i64, i64); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

/// How many neighbors each cell is averaged with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendNeighbors {
    /// No smoothing.
    #[default]
    None,
    /// Self plus N, E, S, W.
    Four,
    /// Self plus all eight surrounding cells.
    Eight,
}

impl BlendNeighbors {
    /// Parses a neighbor count; only 0, 4 and 8 are valid.
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            0 => Some(BlendNeighbors::None),
            4 => Some(BlendNeighbors::Four),
            8 => Some(BlendNeighbors::Eight),
            _ => None,
        }
    }

    pub fn count(self) -> u8 {
        match self {
            BlendNeighbors::None => 0,
            BlendNeighbors::Four => 4,
            BlendNeighbors::Eight => 8,
        }
    }

    fn offsets(self) -> impl Iterator<Item = (i64, i64)> {
        let (cardinal, diagonal): (&'static [(i64, i64)], &'static [(i64, i64)]) = match self {
            BlendNeighbors::None => (&[], &[]),
            BlendNeighbors::Four => (&CARDINAL, &[]),
            BlendNeighbors::Eight => (&CARDINAL, &DIAGONAL),
        };
        cardinal.iter().chain(diagonal.iter()).copied()
    }
}

/// Averages every cell with its in-bounds neighbors.
///
/// Off-grid neighbors are skipped, so the divisor is the number of cells
/// actually included (a corner with `Eight` averages 4 cells). Channels are
/// averaged independently and truncated.
pub fn blend(neighbors: BlendNeighbors, colors: &Grid<Rgb>) -> Grid<Rgb> {
    if neighbors == BlendNeighbors::None {
        return colors.clone();
    }

    let (width, height) = colors.dimensions();
    Grid::from_fn(width, height, |x, y| {
        let mut sum = [0u32; 3];
        let mut n = 0u32;

        let window = std::iter::once((0, 0)).chain(neighbors.offsets());
        for (dx, dy) in window {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if !colors.in_bounds(nx, ny) {
                continue;
            }
            let c = colors.get(nx as u32, ny as u32);
            for (s, &v) in sum.iter_mut().zip(c.iter()) {
                *s += v as u32;
            }
            n += 1;
        }

        [(sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8]
    })
}
