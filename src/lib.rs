// src/lib.rs
//! Torus Life
//!
//! Conway's Game of Life on a fixed-size wraparound grid, with sequential,
//! rayon-parallel and wgpu compute transition engines behind one trait.
//! Rendering is left to the caller: read [`Simulation::current_grid`] after
//! each tick or reseed and upload it however you like.

pub mod config;
pub mod error;
pub mod performance;
pub mod prelude;
pub mod simulation;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use config::{EngineKind, LifeConfig};
pub use error::{LifeError, Result};
pub use simulation::Simulation;

/// Creates a simulation with the default configuration
pub fn default() -> Result<Simulation> {
    Simulation::new(LifeConfig::default())
}
