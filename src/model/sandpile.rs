//! The toppling engine: grain drops, cascade resolution, avalanche history.

use crate::model::config::GridConfig;
use crate::model::error::{ModelError, Result};
use crate::model::grid::{CellLocation, Grid};

/// A quantity of grains aimed at one cell. Used both for configured seed
/// drops and for the overspill generated while a cascade runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrainDrop {
    pub location: CellLocation,
    pub count: u32,
}

/// One batch of work for [`Sandpile::run`]: the seed drops are replayed
/// unmodified on every iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSession {
    pub iterations: u32,
    pub drops: Vec<GrainDrop>,
}

/// Record of one iteration whose cascade moved grains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avalanche {
    /// Iteration index within the `run` call that produced the record.
    pub turn: u32,
    /// Grains carried by the overspill drops processed during the cascade;
    /// the seed drops themselves are not counted.
    pub size: u64,
    /// Cascade duration: a quarter unit per processed overspill drop,
    /// rounded up.
    pub time: u32,
}

/// The simulation engine. Starts uninitialised; [`Sandpile::setup`] makes
/// it ready, any number of [`Sandpile::run`] calls mutate the grid in place
/// and append to the avalanche history, [`Sandpile::clear`] returns it to
/// the uninitialised state.
#[derive(Debug, Default)]
pub struct Sandpile {
    grid: Option<Grid>,
    avalanches: Vec<Avalanche>,
}

impl Sandpile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh zeroed grid and empty the avalanche history.
    ///
    /// On invalid dimensions the previous grid and history survive
    /// untouched.
    pub fn setup(&mut self, config: &GridConfig) -> Result<()> {
        let grid = Grid::new(config)?;
        self.clear();
        self.grid = Some(grid);
        Ok(())
    }

    /// Release the grid and empty the history. Idempotent.
    pub fn clear(&mut self) {
        self.grid = None;
        self.avalanches.clear();
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The raw cell buffer, present while the engine is set up. This is
    /// the surface image export and printing read from.
    pub fn cells(&self) -> Option<&[u8]> {
        self.grid.as_ref().map(Grid::cells)
    }

    pub fn avalanches(&self) -> &[Avalanche] {
        &self.avalanches
    }

    /// Run a full session: `iterations` turns, each applying the seed
    /// drops and draining the cascade they trigger.
    pub fn run(&mut self, session: &RunSession) -> Result<()> {
        self.run_with(session, || false).map(|_| ())
    }

    /// Like [`Sandpile::run`], with a cancellation check between
    /// iterations. Returns the number of iterations completed; finished
    /// iterations keep their grid mutations and avalanche records.
    pub fn run_with<F>(&mut self, session: &RunSession, mut cancelled: F) -> Result<u32>
    where
        F: FnMut() -> bool,
    {
        let grid = self.grid.as_mut().ok_or(ModelError::NotInitialized)?;
        for seed in &session.drops {
            if !grid.contains(seed.location) {
                return Err(ModelError::DropOutOfBounds {
                    x: seed.location.x,
                    y: seed.location.y,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
        }

        let mut overspill = Vec::new();
        for turn in 0..session.iterations {
            if cancelled() {
                tracing::debug!(completed = turn, "run cancelled between iterations");
                return Ok(turn);
            }
            if let Some(avalanche) = resolve_cascade(grid, turn, &session.drops, &mut overspill) {
                self.avalanches.push(avalanche);
            }
        }
        tracing::debug!(
            iterations = session.iterations,
            avalanches = self.avalanches.len(),
            "run complete"
        );
        Ok(session.iterations)
    }
}

/// Apply the seed drops, then drain the overspill stack until the grid is
/// stable. Records an avalanche only when the cascade moved grains.
fn resolve_cascade(
    grid: &mut Grid,
    turn: u32,
    seeds: &[GrainDrop],
    overspill: &mut Vec<GrainDrop>,
) -> Option<Avalanche> {
    for &seed in seeds {
        drop_grain(grid, seed, overspill);
    }

    let mut size: u64 = 0;
    let mut quarter_steps: u32 = 0;
    while let Some(grain) = overspill.pop() {
        drop_grain(grid, grain, overspill);
        size += u64::from(grain.count);
        quarter_steps += 1;
    }

    (size > 0).then(|| Avalanche {
        turn,
        size,
        time: quarter_steps.div_ceil(4),
    })
}

/// Add a drop to its cell; when the new height exceeds the threshold the
/// cell topples, pushing a quarter of its height towards each existing
/// neighbour (west, east, north, south) and the division remainder onto
/// the first of them. Grains aimed past the grid edge are lost, and the
/// toppled cell resets to zero whether or not all four neighbours existed.
fn drop_grain(grid: &mut Grid, grain: GrainDrop, overspill: &mut Vec<GrainDrop>) {
    let Some(cell_height) = grid.raise(grain.location, grain.count) else {
        return;
    };
    let cell_height = u32::from(cell_height);
    if cell_height <= grid.max_cell_height() {
        return;
    }

    let per_neighbour = cell_height / 4;
    let mut rest = cell_height % 4;
    let CellLocation { x, y } = grain.location;

    if x > 0 {
        overspill.push(GrainDrop {
            location: CellLocation::new(x - 1, y),
            count: per_neighbour + rest,
        });
        rest = 0;
    }
    if x + 1 < grid.width() {
        overspill.push(GrainDrop {
            location: CellLocation::new(x + 1, y),
            count: per_neighbour + rest,
        });
        rest = 0;
    }
    if y > 0 {
        overspill.push(GrainDrop {
            location: CellLocation::new(x, y - 1),
            count: per_neighbour + rest,
        });
        rest = 0;
    }
    if y + 1 < grid.height() {
        overspill.push(GrainDrop {
            location: CellLocation::new(x, y + 1),
            count: per_neighbour,
        });
    }
    grid.set_height_at(grain.location, 0);
}
