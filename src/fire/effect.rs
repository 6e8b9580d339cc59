use super::engine::{DecaySource, PropagationEngine, RandomDecay};
use super::grid::FireGrid;
use super::seeder;
use crate::config::{FireConfig, Viewport, WindDirection};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::debug;

/// Decay source used when none is supplied
pub type DefaultDecay = RandomDecay<StdRng>;

/// Immutable snapshot of the grid after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireFrame {
    pub width: usize,
    pub height: usize,
    pub max_intensity: u8,
    /// Number of ticks applied before this snapshot was taken
    pub tick: u64,
    pub cells: Arc<[u8]>,
}

impl FireFrame {
    pub fn get(&self, column: usize, row: usize) -> Option<u8> {
        if column < self.width && row < self.height {
            Some(self.cells[column + self.width * row])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }
}

/// One running fire: the grid plus everything needed to advance it
#[derive(Debug)]
pub struct FireEffect<D = DefaultDecay> {
    grid: FireGrid,
    wind: WindDirection,
    engine: PropagationEngine,
    decay: D,
    ticks: u64,
}

impl FireEffect<DefaultDecay> {
    /// Seeded grid covering `viewport`, driven by a seeded or entropy-backed RNG
    pub fn from_config(config: &FireConfig, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let mut grid = FireGrid::for_viewport(viewport, config.pixel_scale, config.max_intensity())?;
        seeder::seed(&mut grid);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(?viewport, wind = %config.wind, seed = ?config.seed, "created fire effect");
        Ok(Self::new(grid, config.wind, PropagationEngine::new(config.decay), RandomDecay(rng)))
    }
}

impl<D> FireEffect<D> {
    /// Wrap an already prepared grid. The grid is not seeded here.
    pub fn new(grid: FireGrid, wind: WindDirection, engine: PropagationEngine, decay: D) -> Self {
        Self {
            grid,
            wind,
            engine,
            decay,
            ticks: 0,
        }
    }

    /// Copy of the current grid state
    pub fn snapshot(&self) -> FireFrame {
        FireFrame {
            width: self.grid.width(),
            height: self.grid.height(),
            max_intensity: self.grid.max_intensity(),
            tick: self.ticks,
            cells: Arc::from(self.grid.cells()),
        }
    }

    pub fn grid(&self) -> &FireGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut FireGrid {
        &mut self.grid
    }

    pub fn into_grid(self) -> FireGrid {
        self.grid
    }

    pub fn wind(&self) -> WindDirection {
        self.wind
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Same grid and random source, different wind. Wind is fixed per run,
    /// so callers restart the animation with the returned effect.
    pub fn with_wind(mut self, wind: WindDirection) -> Self {
        self.wind = wind;
        self
    }

    /// Restore the fuel line
    pub fn reseed(&mut self) {
        seeder::seed(&mut self.grid);
    }

    /// Remove the fuel line
    pub fn extinguish(&mut self) {
        seeder::extinguish(&mut self.grid);
    }

    /// True while the bottom row carries any fuel
    pub fn is_burning(&self) -> bool {
        self.grid
            .row(self.grid.height() - 1)
            .is_some_and(|row| row.iter().any(|&c| c > 0))
    }
}

impl<D: DecaySource> FireEffect<D> {
    /// Run one tick and return the resulting frame
    pub fn step(&mut self) -> FireFrame {
        self.engine.tick(&mut self.grid, self.wind, &mut self.decay);
        self.ticks += 1;
        self.snapshot()
    }
}
