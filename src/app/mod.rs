//! Batch driver: owns the engine, runs the configured sessions, and writes
//! one image of the grid after each.

use crate::model::config::AppConfig;
use crate::model::sandpile::Sandpile;
use crate::model::stats::AvalancheStats;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct App {
    pub config: AppConfig,
    pub pile: Sandpile,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut pile = Sandpile::new();
        pile.setup(&config.grid)
            .context("setting up the sandpile grid")?;
        tracing::info!(
            width = config.grid.width,
            height = config.grid.height,
            max_cell_height = config.grid.max_cell_height,
            "grid ready"
        );
        Ok(Self { config, pile })
    }

    /// Run every configured session. The grid carries over from session to
    /// session; each one appends to the avalanche history and leaves a
    /// numbered image behind.
    pub fn run(&mut self) -> Result<()> {
        let session = self.config.session.to_session();
        let out_dir = PathBuf::from(&self.config.output.directory);
        fs::create_dir_all(&out_dir)
            .with_context(|| format!("creating output directory {}", out_dir.display()))?;

        for session_index in 0..self.config.output.loops {
            self.pile.run(&session)?;
            let path = out_dir.join(format!("{session_index}.png"));
            self.export_image(&path)?;

            let stats = AvalancheStats::measure(self.pile.avalanches());
            tracing::info!(
                session = session_index,
                avalanches = stats.count,
                image = %path.display(),
                "session complete"
            );
        }
        Ok(())
    }

    fn export_image(&self, path: &Path) -> Result<()> {
        let grid = self.pile.grid().context("no grid to export")?;
        sandfall_image::write_png(path, grid.width(), grid.height(), grid.cells())
            .with_context(|| format!("writing image {}", path.display()))?;
        Ok(())
    }
}
