use crate::model::grid::CellLocation;
use crate::model::sandpile::{GrainDrop, RunSession};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Shape of the grid and the toppling threshold. Fixed for the life of a
/// grid instance; a new setup replaces it wholesale.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    /// Cells whose height exceeds this value topple. Zero means every
    /// non-empty cell topples on its next increment.
    pub max_cell_height: u32,
}

/// One configured seed drop, replayed every iteration.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DropConfig {
    pub x: u32,
    pub y: u32,
    pub count: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionConfig {
    pub iterations: u32,
    pub drops: Vec<DropConfig>,
}

impl SessionConfig {
    pub fn to_session(&self) -> RunSession {
        RunSession {
            iterations: self.iterations,
            drops: self
                .drops
                .iter()
                .map(|drop| GrainDrop {
                    location: CellLocation::new(drop.x, drop.y),
                    count: drop.count,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OutputConfig {
    /// Number of sessions to run; one image is written after each.
    pub loops: u32,
    pub directory: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub session: SessionConfig,
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 401,
                height: 401,
                max_cell_height: 3,
            },
            session: SessionConfig {
                iterations: 14000,
                drops: vec![DropConfig {
                    x: 200,
                    y: 200,
                    count: 1,
                }],
            },
            output: OutputConfig {
                loops: 100,
                directory: "output".to_owned(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file is created with the
    /// defaults; a malformed file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
        } else {
            let default = Self::default();
            fs::write(path, toml::to_string_pretty(&default)?)
                .with_context(|| format!("writing default config {}", path.display()))?;
            Ok(default)
        }
    }
}
