//! Classic Game of Life patterns
//!
//! Patterns are stamped with toroidal wrap, so any origin is valid on any
//! grid size.

use std::str::FromStr;

use super::grid::Grid;
use crate::error::LifeError;

/// Well-known starting configurations
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LifePattern {
    Clear,
    Glider,
    Blinker,
    Block,
    GosperGun,
}

const GLIDER: &[(usize, usize)] = &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];

const BLINKER: &[(usize, usize)] = &[(1, 0), (1, 1), (1, 2)];

const BLOCK: &[(usize, usize)] = &[(0, 0), (1, 0), (0, 1), (1, 1)];

const GOSPER_GUN: &[(usize, usize)] = &[
    (24, 0),
    (22, 1),
    (24, 1),
    (12, 2),
    (13, 2),
    (20, 2),
    (21, 2),
    (34, 2),
    (35, 2),
    (11, 3),
    (15, 3),
    (20, 3),
    (21, 3),
    (34, 3),
    (35, 3),
    (0, 4),
    (1, 4),
    (10, 4),
    (16, 4),
    (20, 4),
    (21, 4),
    (0, 5),
    (1, 5),
    (10, 5),
    (14, 5),
    (16, 5),
    (17, 5),
    (22, 5),
    (24, 5),
    (10, 6),
    (16, 6),
    (24, 6),
    (11, 7),
    (15, 7),
    (12, 8),
    (13, 8),
];

impl LifePattern {
    pub const ALL: [LifePattern; 5] = [
        LifePattern::Clear,
        LifePattern::Glider,
        LifePattern::Blinker,
        LifePattern::Block,
        LifePattern::GosperGun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifePattern::Clear => "clear",
            LifePattern::Glider => "glider",
            LifePattern::Blinker => "blinker",
            LifePattern::Block => "block",
            LifePattern::GosperGun => "gosper-gun",
        }
    }

    /// Live cell offsets relative to the pattern's top-left corner
    pub fn cells(&self) -> &'static [(usize, usize)] {
        match self {
            LifePattern::Clear => &[],
            LifePattern::Glider => GLIDER,
            LifePattern::Blinker => BLINKER,
            LifePattern::Block => BLOCK,
            LifePattern::GosperGun => GOSPER_GUN,
        }
    }

    /// Bounding box `(width, height)` of the pattern
    pub fn extent(&self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }

    /// Set the pattern's cells alive with the top-left corner at `(origin_x, origin_y)`
    ///
    /// Coordinates wrap around the grid edges. Cells outside the pattern are
    /// left untouched.
    pub fn stamp(&self, grid: &mut Grid, origin_x: usize, origin_y: usize) {
        let (width, height) = grid.dimensions();
        let cells = grid.cells_mut();
        for &(dx, dy) in self.cells() {
            let x = (origin_x + dx) % width;
            let y = (origin_y + dy) % height;
            cells[y * width + x] = 1;
        }
    }

    /// Clear `grid` and stamp the pattern centred on it
    pub fn stamp_centered(&self, grid: &mut Grid) {
        grid.clear();
        let (pattern_w, pattern_h) = self.extent();
        let origin_x = grid.width().saturating_sub(pattern_w) / 2;
        let origin_y = grid.height().saturating_sub(pattern_h) / 2;
        self.stamp(grid, origin_x, origin_y);
    }
}

impl FromStr for LifePattern {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifePattern::ALL
            .iter()
            .copied()
            .find(|pattern| pattern.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LifeError::UnknownPattern(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::grid::CellState;

    #[test]
    fn test_extent() {
        assert_eq!(LifePattern::Glider.extent(), (3, 3));
        assert_eq!(LifePattern::Blinker.extent(), (2, 3));
        assert_eq!(LifePattern::GosperGun.extent(), (36, 9));
        assert_eq!(LifePattern::Clear.extent(), (0, 0));
    }

    #[test]
    fn test_stamp_wraps() {
        let mut grid = Grid::new(4, 4).unwrap();
        LifePattern::Block.stamp(&mut grid, 3, 3);
        for &(x, y) in [(3, 3), (0, 3), (3, 0), (0, 0)].iter() {
            assert_eq!(grid.get(x, y).unwrap(), CellState::Alive);
        }
        assert_eq!(grid.live_count(), 4);
    }

    #[test]
    fn test_stamp_centered_clears_first() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(0, 0, CellState::Alive).unwrap();
        LifePattern::Glider.stamp_centered(&mut grid);
        assert_eq!(grid.live_count(), 5);
        assert_eq!(grid.get(0, 0).unwrap(), CellState::Dead);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Glider".parse::<LifePattern>().unwrap(), LifePattern::Glider);
        assert_eq!(
            "gosper-gun".parse::<LifePattern>().unwrap(),
            LifePattern::GosperGun
        );
        assert!(matches!(
            "spaceship".parse::<LifePattern>(),
            Err(LifeError::UnknownPattern(_))
        ));
    }
}
