//! Aggregate measurements over the grid and the avalanche history.
//!
//! Means with a zero denominator come back as `None`; presentation decides
//! how to show the undefined case.

use crate::model::grid::Grid;
use crate::model::sandpile::Avalanche;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrainStats {
    pub total_grains: u64,
    pub occupied_cells: usize,
    pub total_cells: usize,
}

impl GrainStats {
    pub fn measure(grid: &Grid) -> Self {
        Self {
            total_grains: grid.total_grains(),
            occupied_cells: grid.occupied_cells(),
            total_cells: grid.cells().len(),
        }
    }

    /// Mean height over all cells.
    pub fn mean_height(&self) -> Option<f64> {
        (self.total_cells > 0).then(|| self.total_grains as f64 / self.total_cells as f64)
    }

    /// Mean height over non-empty cells only.
    pub fn mean_occupied_height(&self) -> Option<f64> {
        (self.occupied_cells > 0).then(|| self.total_grains as f64 / self.occupied_cells as f64)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvalancheStats {
    pub count: usize,
    pub total_size: u64,
    pub total_time: u64,
}

impl AvalancheStats {
    pub fn measure(avalanches: &[Avalanche]) -> Self {
        let mut stats = Self {
            count: avalanches.len(),
            ..Self::default()
        };
        for avalanche in avalanches {
            stats.total_size += avalanche.size;
            stats.total_time += u64::from(avalanche.time);
        }
        stats
    }

    pub fn mean_size(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total_size as f64 / self.count as f64)
    }

    pub fn mean_time(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total_time as f64 / self.count as f64)
    }
}
