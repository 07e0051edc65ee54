//! Sequential CPU transition engine
//!
//! Walks the grid row by row on the calling thread. This is the reference
//! implementation the other engines are checked against.

use super::{grid::Grid, rules, traits::TransitionEngine};
use crate::error::{LifeError, Result};

/// Single-threaded Game of Life stepper
#[derive(Debug, Clone)]
pub struct CpuEngine {
    width: usize,
    height: usize,
}

impl CpuEngine {
    /// Create an engine for `width` x `height` grids
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }
}

impl TransitionEngine for CpuEngine {
    fn name(&self) -> &str {
        "cpu"
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn step_into(&mut self, input: &Grid, output: &mut Grid) -> Result<()> {
        self.check_buffers(input, output)?;

        for (y, row) in output.cells_mut().chunks_mut(self.width).enumerate() {
            rules::evolve_row(input, y, row);
        }
        Ok(())
    }
}
