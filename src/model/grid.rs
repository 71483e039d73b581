//! Grid state: an owned, row-major buffer of 8-bit cell heights.

use crate::model::config::GridConfig;
use crate::model::error::{ModelError, Result};

/// A cell address. Valid iff it lies within the current grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellLocation {
    pub x: u32,
    pub y: u32,
}

impl CellLocation {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Rectangular field of cell heights, indexed as `y * width + x`.
///
/// The buffer always holds exactly `width * height` cells. It is owned
/// exclusively by the grid; collaborators get a read-only view via
/// [`Grid::cells`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    width: u32,
    height: u32,
    max_cell_height: u32,
}

impl Grid {
    /// Allocate a zeroed grid. Zero width or height is rejected without
    /// allocating.
    pub fn new(config: &GridConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(ModelError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        Ok(Self {
            cells: vec![0; config.width as usize * config.height as usize],
            width: config.width,
            height: config.height,
            max_cell_height: config.max_cell_height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Heights above this threshold make a cell unstable.
    pub fn max_cell_height(&self) -> u32 {
        self.max_cell_height
    }

    pub fn contains(&self, location: CellLocation) -> bool {
        location.x < self.width && location.y < self.height
    }

    fn index(&self, location: CellLocation) -> usize {
        self.width as usize * location.y as usize + location.x as usize
    }

    /// Bounds-checked read; `None` for locations outside the grid.
    pub fn height_at(&self, location: CellLocation) -> Option<u8> {
        self.contains(location)
            .then(|| self.cells[self.index(location)])
    }

    /// Bounds-checked write; out-of-bounds locations are ignored.
    pub fn set_height_at(&mut self, location: CellLocation, height: u8) {
        if self.contains(location) {
            let index = self.index(location);
            self.cells[index] = height;
        }
    }

    /// Add `amount` grains to a cell and return its new height, or `None`
    /// when the location is out of bounds.
    ///
    /// The stored height saturates at 255, per call and across calls:
    /// grains pushed past the top of a full cell are lost, the same way
    /// grains pushed over the grid edge are.
    pub fn raise(&mut self, location: CellLocation, amount: u32) -> Option<u8> {
        if !self.contains(location) {
            return None;
        }
        let index = self.index(location);
        let increase = u8::try_from(amount).unwrap_or(u8::MAX);
        self.cells[index] = self.cells[index].saturating_add(increase);
        Some(self.cells[index])
    }

    /// The raw row-major buffer, one byte per cell.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Rows in top-down order, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width as usize)
    }

    pub fn total_grains(&self) -> u64 {
        self.cells.iter().map(|&height| u64::from(height)).sum()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&height| height > 0).count()
    }
}
