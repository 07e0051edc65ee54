//! Front/back grid pair
//!
//! The front grid is the current generation; the back grid is scratch
//! space that the next transition writes into. Advancing flips an index,
//! never copies cells.

use super::{grid::Grid, traits::TransitionEngine};
use crate::error::Result;

/// Two equally sized grids and a selector for the current one
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    buffers: [Grid; 2],
    front: usize,
    generation: u64,
}

impl DoubleBuffer {
    /// Wrap `initial` as the front buffer and allocate a matching back buffer
    pub fn new(initial: Grid) -> Result<Self> {
        let back = Grid::new(initial.width(), initial.height())?;
        Ok(Self {
            buffers: [initial, back],
            front: 0,
            generation: 0,
        })
    }

    /// Current generation
    pub fn current(&self) -> &Grid {
        &self.buffers[self.front]
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.current().dimensions()
    }

    /// Generations advanced since construction or the last reset
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the front buffer (0 or 1)
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Compute the next generation into the back buffer, then swap roles
    ///
    /// On error nothing is swapped and the current generation is unchanged.
    pub fn advance(&mut self, engine: &mut dyn TransitionEngine) -> Result<()> {
        let (first, second) = self.buffers.split_at_mut(1);
        let (front, back) = if self.front == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        };

        engine.step_into(front, back)?;
        self.front = 1 - self.front;
        self.generation += 1;
        Ok(())
    }

    /// Replace the current generation, e.g. after a reseed
    ///
    /// The back buffer keeps stale cells; they are only ever overwritten by
    /// the next `advance`, never read as a result.
    pub fn reset(&mut self, grid: Grid) -> Result<()> {
        grid.ensure_dimensions(self.dimensions())?;
        self.buffers[self.front] = grid;
        self.generation = 0;
        Ok(())
    }

    /// Mutable access to the front buffer for in-place edits between steps
    pub(crate) fn current_mut(&mut self) -> &mut Grid {
        &mut self.buffers[self.front]
    }
}
