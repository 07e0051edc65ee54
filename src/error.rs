//! Error types for the Game of Life engine
//!
//! Every failure here is a contract violation detected at construction or
//! call time. Nothing is retried internally.

use thiserror::Error;

/// Errors raised by grids, engines and the simulation context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("cell buffer holds {found} cells, grid needs {expected}")]
    CellCountMismatch { expected: usize, found: usize },

    #[error("live-cell odds must be at least 1 in 1, got 1 in {0}")]
    InvalidLiveOdds(u32),

    #[error("worker thread count must be positive, got {0}")]
    InvalidThreadCount(usize),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("no usable GPU device: {0}")]
    GpuUnavailable(String),

    #[error("failed to read grid back from the GPU: {0}")]
    GpuReadback(String),

    #[error("unknown engine '{0}' (expected cpu, parallel or gpu)")]
    UnknownEngine(String),

    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, LifeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_values() {
        let err = LifeError::OutOfBounds {
            x: 7,
            y: 2,
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "cell (7, 2) is outside the 5x5 grid");

        let err = LifeError::DimensionMismatch {
            expected: (4, 4),
            found: (3, 4),
        };
        assert!(err.to_string().contains("(4, 4)"));
        assert!(err.to_string().contains("(3, 4)"));

        let err = LifeError::CellCountMismatch {
            expected: 16,
            found: 12,
        };
        assert_eq!(err.to_string(), "cell buffer holds 12 cells, grid needs 16");
    }
}
