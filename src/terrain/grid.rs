//! Row-major 2D grid used for every generation layer.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A fixed-size, row-major 2D array indexed by `(x, y)`.
///
/// Every generation stage produces a fresh `Grid` rather than mutating its
/// input, so neighbor reads always see a fully formed previous layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid filled with copies of `value`.
    pub fn new(width: u32, height: u32, value: T) -> Self
    where
        T: Clone,
    {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![value; size],
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell in parallel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        T: Send,
        F: Fn(u32, u32) -> T + Sync + Send,
    {
        let size = (width as usize) * (height as usize);
        let cells = (0..size)
            .into_par_iter()
            .map(|i| {
                let x = (i % width as usize) as u32;
                let y = (i / width as usize) as u32;
                f(x, y)
            })
            .collect();

        Self {
            width,
            height,
            cells,
        }
    }

    /// Wraps an existing row-major buffer.
    ///
    /// Returns `None` if `cells.len() != width * height`.
    #[cfg(test)]
    pub(crate) fn from_vec(width: u32, height: u32, cells: Vec<T>) -> Option<Self> {
        if cells.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the cells in row-major order.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Returns true if `(x, y)` lies inside the grid.
    ///
    /// Takes signed coordinates so window scans can test offsets directly.
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + x as usize
    }

    /// Returns a reference to the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    pub fn get(&self, x: u32, y: u32) -> &T {
        &self.cells[self.index(x, y)]
    }

    /// Sets the cell at `(x, y)`.
    ///
    /// # Panics
    /// Panics if x or y is out of bounds.
    #[cfg(test)]
    pub(crate) fn set(&mut self, x: u32, y: u32, value: T) {
        let i = self.index(x, y);
        self.cells[i] = value;
    }

    /// Applies `f` to every cell in parallel, producing a grid of equal size.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        T: Sync,
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.par_iter().map(f).collect(),
        }
    }

    /// Returns a copy reflected through the grid center (flipped on both axes).
    pub fn mirrored(&self) -> Self
    where
        T: Clone + Send + Sync,
    {
        let (w, h) = (self.width, self.height);
        Grid::from_fn(w, h, |x, y| self.get(w - 1 - x, h - 1 - y).clone())
    }
}

impl Grid<f32> {
    /// Computes the `(min, max)` value across the grid.
    ///
    /// Returns `(f32::MAX, f32::MIN)` for an empty grid.
    pub fn value_range(&self) -> (f32, f32) {
        self.cells
            .par_iter()
            .fold(
                || (f32::MAX, f32::MIN),
                |(lo, hi), &v| (lo.min(v), hi.max(v)),
            )
            .reduce(
                || (f32::MAX, f32::MIN),
                |(a_lo, a_hi), (b_lo, b_hi)| (a_lo.min(b_lo), a_hi.max(b_hi)),
            )
    }
}
