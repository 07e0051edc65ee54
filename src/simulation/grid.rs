//! Grid store
//!
//! A fixed-size, row-major array of cells. Cells are stored as `u8` values
//! (0 dead, 1 alive) so the backing slice can be handed to a renderer or
//! uploaded as-is without conversion.

use crate::error::{LifeError, Result};

/// State of a single cell
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl From<u8> for CellState {
    fn from(value: u8) -> Self {
        CellState::from(value != 0)
    }
}

/// Number of cells in a `width` x `height` grid
pub fn cell_count(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(LifeError::InvalidDimensions { width, height }),
    }
}

/// Fixed-dimension Game of Life grid
///
/// `cells.len() == width * height` holds for the lifetime of the value;
/// there is no way to resize a grid in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell dead
    ///
    /// Fails with `InvalidDimensions` if either side is zero or the cell
    /// count does not fit in `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let cell_count = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![0; cell_count],
        })
    }

    /// Build a grid from an existing row-major cell buffer
    ///
    /// Any non-zero value is stored as alive.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        if cells.len() != grid.cells.len() {
            return Err(LifeError::CellCountMismatch {
                expected: grid.cells.len(),
                found: cells.len(),
            });
        }

        for (dst, src) in grid.cells.iter_mut().zip(cells) {
            *dst = (src != 0) as u8;
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat row-major index of `(x, y)`
    pub fn index_of(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        let index = self.index_of(x, y)?;
        Ok(CellState::from(self.cells[index]))
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        let index = self.index_of(x, y)?;
        self.cells[index] = state.as_u8();
        Ok(())
    }

    /// Read a cell whose coordinates are already known to be in range.
    #[inline]
    pub(crate) fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[y * self.width + x]
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Row-major cells, one byte per cell with values 0/1
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Number of alive cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Cells scaled to a single 8-bit texture channel (0 or 255)
    pub fn to_texture_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|&cell| cell * 255).collect()
    }

    /// Cells widened to `u32` words, the layout used by GPU storage buffers
    pub fn to_gpu_words(&self) -> Vec<u32> {
        self.cells.iter().map(|&cell| cell as u32).collect()
    }

    /// Overwrite all cells from GPU words; any non-zero word is alive
    pub(crate) fn copy_from_gpu_words(&mut self, words: &[u32]) {
        for (dst, &src) in self.cells.iter_mut().zip(words) {
            *dst = (src != 0) as u8;
        }
    }

    /// Fail with `DimensionMismatch` unless this grid is `expected` in size
    pub fn ensure_dimensions(&self, expected: (usize, usize)) -> Result<()> {
        if self.dimensions() != expected {
            return Err(LifeError::DimensionMismatch {
                expected,
                found: self.dimensions(),
            });
        }
        Ok(())
    }

    /// Render as text, one row per line, `#` for alive and `.` for dead
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter().map(|&cell| if cell != 0 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.live_count(), 0);
        assert_eq!(grid.get(3, 2).unwrap(), CellState::Dead);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(LifeError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_set_get_row_major() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.set(2, 1, CellState::Alive).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), CellState::Alive);
        assert_eq!(grid.cells()[3 + 2], 1);
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(3, 2).unwrap();
        assert!(matches!(grid.get(3, 0), Err(LifeError::OutOfBounds { .. })));
        assert!(matches!(
            grid.set(0, 2, CellState::Alive),
            Err(LifeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_from_cells_normalises_values() {
        let grid = Grid::from_cells(2, 2, vec![0, 7, 255, 0]).unwrap();
        assert_eq!(grid.cells(), &[0, 1, 1, 0]);
        assert_eq!(grid.to_texture_bytes(), vec![0, 255, 255, 0]);
        assert_eq!(grid.to_gpu_words(), vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_from_cells_length_mismatch() {
        let err = Grid::from_cells(2, 2, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            LifeError::CellCountMismatch {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let width = usize::MAX / 2 + 1;
        assert_eq!(
            Grid::new(width, 2),
            Err(LifeError::InvalidDimensions { width, height: 2 })
        );
        assert!(Grid::new(usize::MAX, usize::MAX).is_err());
        assert_eq!(cell_count(3, 4), Ok(12));
    }

    #[test]
    fn test_to_text() {
        let grid = Grid::from_cells(3, 2, vec![1, 0, 0, 0, 1, 1]).unwrap();
        assert_eq!(grid.to_text(), "#..\n.##\n");
    }
}
