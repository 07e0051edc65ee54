// src/simulation/mod.rs
//! Simulation system
//!
//! Toroidal Game of Life: the grid store, the shared B3/S23 rule, three
//! interchangeable transition engines (sequential CPU, rayon-parallel and
//! wgpu compute), the double buffer that alternates between generations,
//! the seeder and the simulation context that owns them.

pub mod cpu;
pub mod double_buffer;
pub mod gpu;
pub mod grid;
pub mod manager;
pub mod parallel;
pub mod patterns;
pub mod rules;
pub mod seeder;
pub mod traits;

pub use cpu::CpuEngine;
pub use double_buffer::DoubleBuffer;
pub use gpu::GpuEngine;
pub use grid::{CellState, Grid};
pub use manager::Simulation;
pub use parallel::ParallelEngine;
pub use patterns::LifePattern;
pub use seeder::{seed_new_grid, Seeder};
pub use traits::TransitionEngine;
