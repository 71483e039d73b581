pub mod config;
pub mod error;
pub mod grid;
pub mod sandpile;
pub mod stats;

pub use error::{ModelError, Result};
pub use grid::{CellLocation, Grid};
pub use sandpile::{Avalanche, GrainDrop, RunSession, Sandpile};
