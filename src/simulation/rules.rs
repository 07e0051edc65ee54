//! B3/S23 rule evaluation on a torus
//!
//! Shared by every transition engine so that all of them agree bit for bit.
//! Neighbour coordinates wrap as `(x + dx + width) % width`, which means a
//! grid narrower than 3 cells in some axis sees the same cell more than once.
//! On a 1x1 grid the single cell is its own neighbour eight times.

use super::grid::Grid;

/// Offsets of the eight Moore neighbours
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[inline]
fn wrap(coord: usize, delta: isize, extent: usize) -> usize {
    // delta is in -1..=1, so adding `extent` keeps the sum non-negative
    ((coord + extent) as isize + delta) as usize % extent
}

/// Count live cells among the 8 wrapped neighbours of `(x, y)`
#[inline]
pub fn live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let (width, height) = grid.dimensions();
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dx, dy)| grid.cell(wrap(x, dx, width), wrap(y, dy, height)))
        .sum()
}

/// Next state (0/1) for a cell given its current state and neighbour count
#[inline]
pub fn next_state(alive: u8, neighbors: u8) -> u8 {
    match (alive != 0, neighbors) {
        (true, 2) | (true, 3) => 1,
        (false, 3) => 1,
        _ => 0,
    }
}

/// Next state of `(x, y)` read from the previous generation
#[inline]
pub fn evolve_cell(previous: &Grid, x: usize, y: usize) -> u8 {
    next_state(previous.cell(x, y), live_neighbors(previous, x, y))
}

/// Write the next generation of row `y` into `row`
#[inline]
pub fn evolve_row(previous: &Grid, y: usize, row: &mut [u8]) {
    for (x, cell) in row.iter_mut().enumerate() {
        *cell = evolve_cell(previous, x, y);
    }
}
