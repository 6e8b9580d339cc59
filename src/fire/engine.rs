//! Per-tick fire propagation (doom-style)
//!
//! Every cell above the fuel line takes the intensity of the cell directly
//! below it, minus a random decay. The same decay also shifts where the value
//! lands, so under wind the flame leans sideways as it climbs.

use super::grid::FireGrid;
use crate::config::{DecayProfile, WindDirection};
use rand::Rng;
use tracing::trace;

/// Source of per-cell decay draws
pub trait DecaySource {
    /// Uniform draw in `0..range`. `range` is always at least 1.
    fn draw(&mut self, range: u8) -> u8;
}

/// Adapts any `rand` generator into a [`DecaySource`]
#[derive(Debug, Clone)]
pub struct RandomDecay<R>(pub R);

impl<R: Rng> DecaySource for RandomDecay<R> {
    #[inline]
    fn draw(&mut self, range: u8) -> u8 {
        self.0.gen_range(0..range)
    }
}

impl<D: DecaySource + ?Sized> DecaySource for &mut D {
    #[inline]
    fn draw(&mut self, range: u8) -> u8 {
        (**self).draw(range)
    }
}

/// Advances a [`FireGrid`] one tick at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationEngine {
    profile: DecayProfile,
}

impl PropagationEngine {
    pub fn new(profile: DecayProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> DecayProfile {
        self.profile
    }

    /// Exclusive bound of the decay draw for this grid's aspect
    pub fn decay_range(&self, grid: &FireGrid) -> u8 {
        let range = if grid.is_portrait() {
            self.profile.portrait
        } else {
            self.profile.landscape
        };
        range.max(1)
    }

    /// Advance the grid one step. The bottom row is never written.
    pub fn tick<D: DecaySource + ?Sized>(&self, grid: &mut FireGrid, wind: WindDirection, decay: &mut D) {
        let width = grid.width();
        let height = grid.height();
        let len = grid.len();
        if height < 2 {
            return;
        }

        let range = self.decay_range(grid);
        // Last offset above the fuel line
        let last_burnable = width * (height - 1) - 1;

        // Column-major, rows top to bottom: row r reads row r+1 before it is
        // rewritten, so intensity climbs exactly one row per tick.
        for column in 0..width {
            for row in 0..height {
                let idx = column + width * row;
                let below_idx = idx + width;
                if below_idx >= len {
                    continue;
                }

                let below = grid.cells()[below_idx];
                let amount = decay.draw(range);
                let intensity = below.saturating_sub(amount);

                let dest = match wind {
                    WindDirection::Right => idx.saturating_sub(amount as usize),
                    WindDirection::Left => idx + amount as usize,
                    WindDirection::None => idx,
                };
                grid.set_at(dest.min(last_burnable), intensity);
            }
        }

        trace!(width, height, ?wind, range, "fire tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fire::seeder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Always draws the same value
    struct FixedDecay(u8);

    impl DecaySource for FixedDecay {
        fn draw(&mut self, range: u8) -> u8 {
            self.0.min(range - 1)
        }
    }

    /// Records requested ranges and returns the largest legal draw
    #[derive(Default)]
    struct MaxDecay {
        ranges: Vec<u8>,
    }

    impl DecaySource for MaxDecay {
        fn draw(&mut self, range: u8) -> u8 {
            self.ranges.push(range);
            range - 1
        }
    }

    fn seeded(width: usize, height: usize) -> FireGrid {
        let mut grid = FireGrid::new(width, height, 36).unwrap();
        seeder::seed(&mut grid);
        grid
    }

    #[test]
    fn test_one_tick_copies_fuel_up_one_row() {
        let mut grid = seeded(4, 3);
        PropagationEngine::default().tick(&mut grid, WindDirection::None, &mut FixedDecay(0));
        assert_eq!(grid.cells(), &[0, 0, 0, 0, 36, 36, 36, 36, 36, 36, 36, 36]);
    }

    #[test]
    fn test_two_ticks_saturate_grid() {
        let mut grid = seeded(4, 3);
        let engine = PropagationEngine::default();
        engine.tick(&mut grid, WindDirection::None, &mut FixedDecay(0));
        engine.tick(&mut grid, WindDirection::None, &mut FixedDecay(0));
        assert!(grid.cells().iter().all(|&c| c == 36));
    }

    #[test]
    fn test_right_wind_shifts_left_by_decay() {
        let mut grid = FireGrid::new(4, 3, 36).unwrap();
        grid.set(2, 2, 10);
        PropagationEngine::default().tick(&mut grid, WindDirection::Right, &mut FixedDecay(1));
        assert_eq!(grid.get(1, 1), Some(9));
        assert_eq!(grid.get(2, 2), Some(10));
    }

    #[test]
    fn test_right_wind_from_upper_row() {
        let mut grid = FireGrid::new(4, 3, 36).unwrap();
        grid.set(2, 1, 10);
        PropagationEngine::default().tick(&mut grid, WindDirection::Right, &mut FixedDecay(1));
        assert_eq!(grid.get(1, 0), Some(9));
    }

    #[test]
    fn test_right_wind_clamps_at_origin() {
        let mut grid = FireGrid::new(3, 2, 36).unwrap();
        grid.set(0, 1, 5);
        PropagationEngine::default().tick(&mut grid, WindDirection::Right, &mut FixedDecay(1));
        // (0,0) reads 5 and lands on offset 0; (1,0) then writes 0 there too
        assert_eq!(grid.get(0, 0), Some(0));
        assert_eq!(grid.get(0, 1), Some(5));
    }

    #[test]
    fn test_left_wind_shifts_right_by_decay() {
        let mut grid = FireGrid::new(4, 3, 36).unwrap();
        grid.set(1, 2, 10);
        PropagationEngine::default().tick(&mut grid, WindDirection::Left, &mut FixedDecay(1));
        assert_eq!(grid.get(2, 1), Some(9));
    }

    #[test]
    fn test_left_wind_never_touches_fuel_line() {
        // Narrow grids make idx + decay run past the last burnable cell
        for width in 1..=4 {
            let mut grid = seeded(width, 5);
            let engine = PropagationEngine::default();
            for _ in 0..10 {
                engine.tick(&mut grid, WindDirection::Left, &mut MaxDecay::default());
                assert!(grid.row(4).unwrap().iter().all(|&c| c == 36));
            }
        }
    }

    #[test]
    fn test_decay_range_by_aspect() {
        let engine = PropagationEngine::default();

        let mut tall = seeded(3, 5);
        let mut recorder = MaxDecay::default();
        engine.tick(&mut tall, WindDirection::None, &mut recorder);
        assert_eq!(recorder.ranges.len(), 3 * 4);
        assert!(recorder.ranges.iter().all(|&r| r == 3));

        let square = seeded(4, 4);
        assert_eq!(engine.decay_range(&square), 3);

        let mut wide = seeded(5, 3);
        let mut recorder = MaxDecay::default();
        engine.tick(&mut wide, WindDirection::None, &mut recorder);
        assert!(recorder.ranges.iter().all(|&r| r == 2));
    }

    #[test]
    fn test_custom_profile() {
        let engine = PropagationEngine::new(DecayProfile { portrait: 5, landscape: 1 });
        assert_eq!(engine.decay_range(&seeded(2, 4)), 5);

        // landscape range 1 means no decay at all
        let mut wide = seeded(6, 3);
        let mut rng = RandomDecay(StdRng::seed_from_u64(3));
        engine.tick(&mut wide, WindDirection::Left, &mut rng);
        engine.tick(&mut wide, WindDirection::Left, &mut rng);
        assert!(wide.cells().iter().all(|&c| c == 36));
    }

    #[test]
    fn test_random_decay_stays_in_range() {
        let mut source = RandomDecay(StdRng::seed_from_u64(42));
        for _ in 0..1000 {
            assert!(source.draw(3) < 3);
            assert_eq!(source.draw(1), 0);
        }
    }

    #[test]
    fn test_bounds_hold_under_random_ticks() {
        let engine = PropagationEngine::default();
        let mut rng = RandomDecay(StdRng::seed_from_u64(7));
        for (width, height) in [(1, 1), (1, 6), (6, 1), (7, 4), (4, 9), (16, 16)] {
            for wind in [WindDirection::Left, WindDirection::Right, WindDirection::None] {
                let mut grid = seeded(width, height);
                for _ in 0..25 {
                    let before = grid.clone();
                    engine.tick(&mut grid, wind, &mut rng);
                    assert!(grid.cells().iter().all(|&c| c <= 36));
                    assert_eq!(grid.row(height - 1), before.row(height - 1));
                }
            }
        }
    }

    #[test]
    fn test_never_exceeds_source_below() {
        // Without wind every written cell is at most the value that was below it
        let engine = PropagationEngine::default();
        let mut rng = RandomDecay(StdRng::seed_from_u64(11));
        let mut grid = seeded(8, 8);
        for _ in 0..20 {
            let before = grid.clone();
            engine.tick(&mut grid, WindDirection::None, &mut rng);
            for row in 0..7 {
                for col in 0..8 {
                    assert!(grid.get(col, row).unwrap() <= before.get(col, row + 1).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_single_row_grid_is_untouched() {
        let mut grid = seeded(5, 1);
        PropagationEngine::default().tick(&mut grid, WindDirection::Left, &mut MaxDecay::default());
        assert_eq!(grid.cells(), &[36; 5]);
    }
}
