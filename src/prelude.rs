//! # Torus Life Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use torus_life::prelude::*;
//!
//! fn main() -> Result<(), LifeError> {
//!     let mut sim = Simulation::new(LifeConfig::new(32, 32).with_seed(7))?;
//!     sim.on_tick_request()?;
//!     assert_eq!(sim.generation(), 1);
//!     Ok(())
//! }
//! ```

// Configuration and errors
pub use crate::config::{EngineKind, LifeConfig};
pub use crate::error::LifeError;

// Simulation framework
pub use crate::simulation::{
    seed_new_grid, CellState, CpuEngine, DoubleBuffer, GpuEngine, Grid, LifePattern,
    ParallelEngine, Seeder, Simulation, TransitionEngine,
};

// Performance monitoring
pub use crate::performance::{StepMetrics, StepMonitor};
