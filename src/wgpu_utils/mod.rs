// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small wrappers for the buffers and bind group layout entries used by the
//! compute transition engine.

pub mod binding_types;
pub mod buffers;

// Re-export main types
pub use binding_types::*;
pub use buffers::{CellBuffer, UniformBuffer};
