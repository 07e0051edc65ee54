//! Core transition trait
//!
//! Defines the interface every generation-step strategy implements so the
//! double buffer and simulation context can drive any of them.

use super::grid::Grid;
use crate::error::Result;

/// One generation step of the Game of Life
///
/// Implementations are configured for fixed grid dimensions and reject
/// grids of any other size with `DimensionMismatch`. The input is never
/// mutated. Every implementation produces byte-identical output for the
/// same input grid.
pub trait TransitionEngine {
    /// Engine name for logs and diagnostics
    fn name(&self) -> &str;

    /// `(width, height)` this engine was configured for
    fn dimensions(&self) -> (usize, usize);

    /// Compute the generation following `input` and write it into `output`
    ///
    /// # Arguments
    /// * `input` - Previous generation, read only
    /// * `output` - Write target of identical dimensions; its prior contents are ignored
    fn step_into(&mut self, input: &Grid, output: &mut Grid) -> Result<()>;

    /// Compute the generation following `input` as a new grid
    fn step(&mut self, input: &Grid) -> Result<Grid> {
        let mut output = Grid::new(input.width(), input.height())?;
        self.step_into(input, &mut output)?;
        Ok(output)
    }

    /// Check both buffers against the configured dimensions
    fn check_buffers(&self, input: &Grid, output: &Grid) -> Result<()> {
        input.ensure_dimensions(self.dimensions())?;
        output.ensure_dimensions(self.dimensions())
    }
}
