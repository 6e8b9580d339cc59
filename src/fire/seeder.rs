//! Fuel line at the bottom of the grid

use super::grid::FireGrid;
use tracing::debug;

/// Set every bottom-row cell to the max intensity
pub fn seed(grid: &mut FireGrid) {
    let max = grid.max_intensity();
    fill_bottom_row(grid, max);
    debug!(width = grid.width(), height = grid.height(), "seeded fire source");
}

/// Cut the fuel so the flame burns out over the following ticks
pub fn extinguish(grid: &mut FireGrid) {
    fill_bottom_row(grid, 0);
    debug!("extinguished fire source");
}

fn fill_bottom_row(grid: &mut FireGrid, value: u8) {
    let bottom = grid.height() - 1;
    if let Some(row) = grid.row_mut(bottom) {
        row.fill(value);
    }
}
