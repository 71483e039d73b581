//! Plain-text dumps of grid state and aggregate statistics.
//!
//! Pure string builders; nothing here mutates simulation state.

use crate::model::grid::Grid;
use crate::model::stats::{AvalancheStats, GrainStats};
use std::fmt::Write;

/// Cell heights as decimal digits, one line per row.
pub fn render_cells(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        out.push_str("  ");
        for cell in row {
            let _ = write!(out, "{cell} ");
        }
        out.push('\n');
    }
    out
}

fn fmt_mean(mean: Option<f64>) -> String {
    match mean {
        Some(value) => format!("{value:.3}"),
        None => "n/a".to_owned(),
    }
}

/// Grain and avalanche aggregates in the layout the console report uses.
pub fn render_statistics(grains: &GrainStats, avalanches: &AvalancheStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Grains:");
    let _ = writeln!(out, "  Total count of grains: {}", grains.total_grains);
    let _ = writeln!(
        out,
        "  Average height of non-empty cells: {}",
        fmt_mean(grains.mean_occupied_height())
    );
    let _ = writeln!(
        out,
        "  Average height of all cells: {}",
        fmt_mean(grains.mean_height())
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Avalanches:");
    let _ = writeln!(out, "  Total count: {}", avalanches.count);
    let _ = writeln!(out, "  Average size: {}", fmt_mean(avalanches.mean_size()));
    let _ = writeln!(out, "  Average time: {}", fmt_mean(avalanches.mean_time()));
    out
}
