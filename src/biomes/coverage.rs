//! Per-biome coverage statistics for a classified grid.

use std::fmt;

use super::Biome;
use crate::terrain::Grid;

/// Share of the grid covered by each biome that occurs in it.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeCoverage {
    /// `(biome, percent)` sorted by descending coverage, ties in registry order.
    entries: Vec<(Biome, f64)>,
}

impl BiomeCoverage {
    /// Counts every biome present in `biomes` and converts counts to percentages.
    pub fn from_grid(biomes: &Grid<Biome>) -> Self {
        let mut counts = [0usize; Biome::ALL.len()];
        for biome in biomes.cells() {
            counts[biome.as_u8() as usize] += 1;
        }

        let total_cells = biomes.cell_count();
        let mut entries: Vec<(Biome, f64)> = Biome::ALL
            .iter()
            .zip(counts.iter())
            .filter(|&(_, &count)| count > 0)
            .map(|(&biome, &count)| (biome, count as f64 * 100.0 / total_cells as f64))
            .collect();

        // Stable sort keeps registry order among equal shares.
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        Self { entries }
    }

    /// The biome covering the largest share of the grid.
    pub fn dominant(&self) -> Option<(Biome, f64)> {
        self.entries.first().copied()
    }
}

impl fmt::Display for BiomeCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const HEADER_BIOME: &str = "Biome";
        const HEADER_COVERAGE: &str = "Coverage (%)";

        let name_width = self
            .entries
            .iter()
            .map(|(b, _)| b.display_name().len())
            .chain(std::iter::once(HEADER_BIOME.len()))
            .max()
            .unwrap_or(HEADER_BIOME.len());
        let value_width = HEADER_COVERAGE.len();

        let rule = format!("+{}+{}+", "-".repeat(name_width + 2), "-".repeat(value_width + 2));

        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "| {:<name_width$} | {:>value_width$} |",
            HEADER_BIOME, HEADER_COVERAGE
        )?;
        writeln!(f, "+{}+{}+", "=".repeat(name_width + 2), "=".repeat(value_width + 2))?;
        for (biome, percent) in &self.entries {
            writeln!(
                f,
                "| {:<name_width$} | {:>value_width$.2} |",
                biome.display_name(),
                percent
            )?;
        }
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::classify_grid;

    #[test]
    fn percentages_sum_to_hundred() {
        let elevation = Grid::from_fn(37, 23, |x, y| ((x * 7 + y * 13) % 100) as f32 / 99.0);
        let moisture = elevation.mirrored();
        let biomes = classify_grid(&elevation, &moisture);

        let coverage = BiomeCoverage::from_grid(&biomes);
        let total: f64 = coverage.entries.iter().map(|(_, p)| p).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn entries_sorted_descending() {
        let mut grid = Grid::new(10, 10, Biome::Grassland);
        for x in 0..10 {
            grid.set(x, 0, Biome::Snow);
        }
        grid.set(0, 1, Biome::Beach);

        let coverage = BiomeCoverage::from_grid(&grid);
        let entries = &coverage.entries;
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (Biome::Grassland, 89.0));
        assert_eq!(entries[1], (Biome::Snow, 10.0));
        assert_eq!(entries[2], (Biome::Beach, 1.0));
        assert!(entries.iter().all(|(b, _)| *b != Biome::Taiga));
        assert_eq!(coverage.dominant(), Some((Biome::Grassland, 89.0)));
    }

    #[test]
    fn table_lists_every_present_biome() {
        let mut grid = Grid::new(4, 4, Biome::TemperateRainForest);
        grid.set(1, 1, Biome::DeepOcean);

        let table = BiomeCoverage::from_grid(&grid).to_string();
        assert!(table.contains("| Biome"));
        assert!(table.contains("Coverage (%)"));
        assert!(table.contains("Temperate Rain Forest"));
        assert!(table.contains("93.75"));
        assert!(table.contains("Deep Ocean"));
        assert!(table.contains("6.25"));
        assert!(!table.contains("Taiga"));
    }
}
