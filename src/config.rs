//! Startup configuration
//!
//! Dimensions and engine choice are fixed once a simulation is built; the
//! rendering layer reads the same values to size its view.

use std::fmt;
use std::str::FromStr;

use crate::error::{LifeError, Result};
use crate::simulation::seeder::DEFAULT_LIVE_ONE_IN;

/// Default grid width
pub const DEFAULT_WIDTH: usize = 128;
/// Default grid height
pub const DEFAULT_HEIGHT: usize = 128;

/// Which transition engine drives the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineKind {
    /// Sequential loop on the calling thread
    #[default]
    Cpu,
    /// Rayon batch over rows
    Parallel,
    /// wgpu compute shader ping-pong
    Gpu,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Cpu => "cpu",
            EngineKind::Parallel => "parallel",
            EngineKind::Gpu => "gpu",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(EngineKind::Cpu),
            "parallel" | "rayon" => Ok(EngineKind::Parallel),
            "gpu" => Ok(EngineKind::Gpu),
            _ => Err(LifeError::UnknownEngine(s.to_string())),
        }
    }
}

/// Simulation configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    /// Seeder odds: a cell starts alive with probability `1 / live_one_in`
    pub live_one_in: u32,
    /// Initial seed; `None` derives one from the clock
    pub seed: Option<u64>,
    pub engine: EngineKind,
    /// Worker threads for the parallel engine; `None` uses rayon's global pool
    pub threads: Option<usize>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            live_one_in: DEFAULT_LIVE_ONE_IN,
            seed: None,
            engine: EngineKind::default(),
            threads: None,
        }
    }
}

impl LifeConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_engine(mut self, engine: EngineKind) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_live_one_in(mut self, live_one_in: u32) -> Self {
        self.live_one_in = live_one_in;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reject values no simulation can be built from
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.live_one_in == 0 {
            return Err(LifeError::InvalidLiveOdds(self.live_one_in));
        }
        if self.threads == Some(0) {
            return Err(LifeError::InvalidThreadCount(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LifeConfig::default();
        assert_eq!(config.dimensions(), (128, 128));
        assert_eq!(config.live_one_in, 10);
        assert_eq!(config.engine, EngineKind::Cpu);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = LifeConfig::new(20, 10)
            .with_seed(3)
            .with_engine(EngineKind::Parallel)
            .with_threads(2)
            .with_live_one_in(4);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.engine, EngineKind::Parallel);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.live_one_in, 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            LifeConfig::new(0, 10).validate(),
            Err(LifeError::InvalidDimensions { .. })
        ));
        assert_eq!(
            LifeConfig::new(4, 4).with_live_one_in(0).validate(),
            Err(LifeError::InvalidLiveOdds(0))
        );
        assert_eq!(
            LifeConfig::new(4, 4).with_threads(0).validate(),
            Err(LifeError::InvalidThreadCount(0))
        );
    }

    #[test]
    fn test_engine_kind_parse() {
        assert_eq!("GPU".parse::<EngineKind>().unwrap(), EngineKind::Gpu);
        assert_eq!("rayon".parse::<EngineKind>().unwrap(), EngineKind::Parallel);
        assert_eq!(EngineKind::Parallel.to_string(), "parallel");
        assert!(matches!(
            "tpu".parse::<EngineKind>(),
            Err(LifeError::UnknownEngine(_))
        ));
    }
}
