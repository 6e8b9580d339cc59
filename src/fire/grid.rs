//! Flat intensity buffer for the fire effect

use crate::config::Viewport;
use crate::error::{FireError, Result};
use tracing::debug;

/// Row-major grid of fire intensities. Row 0 is the top of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireGrid {
    width: usize,
    height: usize,
    max_intensity: u8,
    cells: Vec<u8>,
}

impl FireGrid {
    /// Allocate a cold (all zero) grid
    pub fn new(width: usize, height: usize, max_intensity: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FireError::InvalidDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .ok_or_else(|| FireError::config(format!("grid {width}x{height} is too large")))?;
        debug!(width, height, max_intensity, "allocated fire grid");
        Ok(Self {
            width,
            height,
            max_intensity,
            cells: vec![0; len],
        })
    }

    /// Allocate a grid covering `viewport` with one cell per `pixel_scale` pixels
    pub fn for_viewport(viewport: Viewport, pixel_scale: usize, max_intensity: u8) -> Result<Self> {
        let (width, height) = viewport.grid_size(pixel_scale)?;
        Self::new(width, height, max_intensity)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_intensity(&self) -> u8 {
        self.max_intensity
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Height >= width
    pub fn is_portrait(&self) -> bool {
        self.height >= self.width
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// One row of cells, top to bottom
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Offset of `(column, row)` in the flat buffer
    #[inline]
    pub fn index(&self, column: usize, row: usize) -> Option<usize> {
        if column < self.width && row < self.height {
            Some(column + self.width * row)
        } else {
            None
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        self.index(column, row).map(|i| self.cells[i])
    }

    /// Write a cell, clamped to the max intensity. Returns false when out of range.
    pub fn set(&mut self, column: usize, row: usize, value: u8) -> bool {
        match self.index(column, row) {
            Some(i) => {
                self.cells[i] = value.min(self.max_intensity);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn get_at(&self, offset: usize) -> Option<u8> {
        self.cells.get(offset).copied()
    }

    /// Write by raw offset, clamped to the max intensity. Returns false when out of range.
    #[inline]
    pub fn set_at(&mut self, offset: usize, value: u8) -> bool {
        let max = self.max_intensity;
        match self.cells.get_mut(offset) {
            Some(cell) => {
                *cell = value.min(max);
                true
            }
            None => false,
        }
    }

    /// Mutable view of one row
    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [u8]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&mut self.cells[start..start + self.width])
    }
}
