//! Raster export for sandpile grids.
//!
//! Turns the row-major cell-height buffer exposed by the simulation core
//! into a palettised PNG. The core guarantees a stable byte buffer; every
//! formatting decision (palette, row orientation, container) lives here.

pub mod error;

pub use error::{ImageError, Result};

use std::fs::File;
use std::path::Path;

/// One RGBA colour per height, heights past the table clamp to its last
/// entry. Index 0 is the empty cell.
pub const PALETTE: [[u8; 4]; 4] = [
    [0, 0, 0, 255],
    [64, 128, 0, 255],
    [118, 8, 170, 255],
    [255, 214, 0, 255],
];

/// Expand a cell-height buffer into top-down row-major RGBA pixels.
pub fn heightmap_pixels(width: u32, height: u32, cells: &[u8]) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(ImageError::EmptyImage { width, height });
    }
    let expected = width as usize * height as usize;
    if cells.len() != expected {
        return Err(ImageError::DimensionMismatch {
            width,
            height,
            len: cells.len(),
        });
    }

    let mut pixels = vec![0; expected * 4];
    let mut p = 0;
    for cell in cells {
        let colour = PALETTE[usize::from(*cell).min(PALETTE.len() - 1)];
        pixels[p..p + 4].copy_from_slice(&colour);
        p += 4;
    }
    Ok(pixels)
}

/// Encode the cell buffer as a PNG file at `path`.
pub fn write_png<P: AsRef<Path>>(path: P, width: u32, height: u32, cells: &[u8]) -> Result<()> {
    let pixels = heightmap_pixels(width, height, cells)?;
    repng::encode(File::create(path)?, width, height, &pixels)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_buffer_covers_every_cell() {
        let cells = [0u8, 1, 2, 3, 1, 0];
        let pixels = heightmap_pixels(3, 2, &cells).unwrap();
        assert_eq!(pixels.len(), cells.len() * 4);
        assert_eq!(&pixels[0..4], &PALETTE[0]);
        assert_eq!(&pixels[4..8], &PALETTE[1]);
        assert_eq!(&pixels[12..16], &PALETTE[3]);
    }

    #[test]
    fn test_heights_past_palette_clamp_to_last_colour() {
        let cells = [200u8];
        let pixels = heightmap_pixels(1, 1, &cells).unwrap();
        assert_eq!(&pixels[0..4], &PALETTE[3]);
    }

    #[test]
    fn test_mismatched_buffer_is_rejected() {
        let cells = [0u8; 5];
        let err = heightmap_pixels(2, 3, &cells).unwrap_err();
        assert!(matches!(
            err,
            ImageError::DimensionMismatch { width: 2, height: 3, len: 5 }
        ));
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let err = heightmap_pixels(0, 3, &[]).unwrap_err();
        assert!(matches!(err, ImageError::EmptyImage { .. }));
    }
}
