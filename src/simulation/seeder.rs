//! Random initial grids
//!
//! Draws exactly one `u32` per cell, in row-major order, from a `StdRng`
//! seeded with the caller's seed. A cell is alive when the draw is a
//! multiple of `live_one_in`, so the default of 10 gives a 1 in 10 chance.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::grid::Grid;
use crate::error::{LifeError, Result};

/// Default odds of a live cell: 1 in this many
pub const DEFAULT_LIVE_ONE_IN: u32 = 10;

/// Produces seeded random grids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seeder {
    live_one_in: u32,
}

impl Default for Seeder {
    fn default() -> Self {
        Self {
            live_one_in: DEFAULT_LIVE_ONE_IN,
        }
    }
}

impl Seeder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use odds of 1 in `live_one_in` for a live cell; 1 makes every cell alive
    pub fn with_live_one_in(live_one_in: u32) -> Result<Self> {
        if live_one_in == 0 {
            return Err(LifeError::InvalidLiveOdds(live_one_in));
        }
        Ok(Self { live_one_in })
    }

    pub fn live_one_in(&self) -> u32 {
        self.live_one_in
    }

    /// Live-cell probability as a fraction
    pub fn live_probability(&self) -> f64 {
        1.0 / self.live_one_in as f64
    }

    /// Build a new `width` x `height` grid from `seed`
    pub fn seed_new_grid(&self, width: usize, height: usize, seed: u64) -> Result<Grid> {
        let mut grid = Grid::new(width, height)?;
        self.reseed_into(&mut grid, seed);
        Ok(grid)
    }

    /// Overwrite every cell of `grid` from `seed`
    pub fn reseed_into(&self, grid: &mut Grid, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for cell in grid.cells_mut().iter_mut() {
            *cell = (rng.next_u32() % self.live_one_in == 0) as u8;
        }
        log::debug!(
            "Seeded {}x{} grid from seed {}: {} live cells",
            grid.width(),
            grid.height(),
            seed,
            grid.live_count()
        );
    }
}

/// Build a grid from `seed` with the default 1 in 10 live odds
pub fn seed_new_grid(width: usize, height: usize, seed: u64) -> Result<Grid> {
    Seeder::default().seed_new_grid(width, height, seed)
}
