//! Simulation context
//!
//! Owns everything one running Game of Life needs: the configured engine,
//! the double-buffered grids, the seeder and step timing. Callers hold the
//! context and drive it from their input layer; there is no global state.

use std::time::{SystemTime, UNIX_EPOCH};

use super::{
    cpu::CpuEngine, double_buffer::DoubleBuffer, gpu::GpuEngine, grid::Grid,
    parallel::ParallelEngine, patterns::LifePattern, seeder::Seeder, traits::TransitionEngine,
};
use crate::config::{EngineKind, LifeConfig};
use crate::error::{LifeError, Result};
use crate::performance::{StepMetrics, StepMonitor};

/// Seed derived from the wall clock, for reseeds without an explicit seed
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

/// Build the engine `config` asks for
///
/// A GPU request on a machine without a usable adapter falls back to the
/// sequential CPU engine with a warning.
pub fn build_engine(config: &LifeConfig) -> Result<Box<dyn TransitionEngine>> {
    let (width, height) = config.dimensions();
    let engine: Box<dyn TransitionEngine> = match config.engine {
        EngineKind::Cpu => Box::new(CpuEngine::new(width, height)?),
        EngineKind::Parallel => {
            let engine = ParallelEngine::new(width, height)?;
            match config.threads {
                Some(threads) => Box::new(engine.with_threads(threads)?),
                None => Box::new(engine),
            }
        }
        EngineKind::Gpu => match GpuEngine::new(width, height) {
            Ok(engine) => Box::new(engine),
            Err(LifeError::GpuUnavailable(reason)) => {
                log::warn!("GPU engine unavailable ({}), falling back to cpu", reason);
                Box::new(CpuEngine::new(width, height)?)
            }
            Err(e) => return Err(e),
        },
    };
    Ok(engine)
}

/// A running Game of Life
pub struct Simulation {
    config: LifeConfig,
    engine: Box<dyn TransitionEngine>,
    buffers: DoubleBuffer,
    seeder: Seeder,
    monitor: StepMonitor,
    seed: u64,
}

impl Simulation {
    /// Validate `config`, build its engine and seed the first generation
    pub fn new(config: LifeConfig) -> Result<Self> {
        config.validate()?;
        let engine = build_engine(&config)?;
        Self::with_engine(config, engine)
    }

    /// Use a caller-supplied engine instead of the one `config.engine` names
    pub fn with_engine(config: LifeConfig, engine: Box<dyn TransitionEngine>) -> Result<Self> {
        config.validate()?;
        if engine.dimensions() != config.dimensions() {
            return Err(LifeError::DimensionMismatch {
                expected: config.dimensions(),
                found: engine.dimensions(),
            });
        }

        let seeder = Seeder::with_live_one_in(config.live_one_in)?;
        let seed = config.seed.unwrap_or_else(time_seed);
        let initial = seeder.seed_new_grid(config.width, config.height, seed)?;
        let buffers = DoubleBuffer::new(initial)?;

        log::info!(
            "Simulation ready: {}x{} grid, {} engine, seed {}, {} live cells",
            config.width,
            config.height,
            engine.name(),
            seed,
            buffers.current().live_count()
        );

        Ok(Self {
            config,
            engine,
            buffers,
            seeder,
            monitor: StepMonitor::new(),
            seed,
        })
    }

    /// Advance one generation
    pub fn on_tick_request(&mut self) -> Result<()> {
        self.monitor.begin_step();
        self.buffers.advance(self.engine.as_mut())?;
        let live_cells = self.buffers.current().live_count();
        self.monitor.end_step(live_cells);

        log::debug!(
            "Generation {}: {} live cells",
            self.buffers.generation(),
            live_cells
        );
        Ok(())
    }

    /// Advance `generations` generations
    pub fn run(&mut self, generations: u64) -> Result<()> {
        for _ in 0..generations {
            self.on_tick_request()?;
        }
        Ok(())
    }

    /// Regenerate the grid from `seed`, or from the clock when `None`
    ///
    /// Returns the seed that was used so the run can be reproduced.
    pub fn on_reseed_request(&mut self, seed: Option<u64>) -> Result<u64> {
        let seed = seed.unwrap_or_else(time_seed);
        let grid = self
            .seeder
            .seed_new_grid(self.config.width, self.config.height, seed)?;
        self.buffers.reset(grid)?;
        self.seed = seed;
        self.monitor.reset();

        log::info!(
            "Reseeded with {}: {} live cells",
            seed,
            self.buffers.current().live_count()
        );
        Ok(seed)
    }

    /// Replace the grid with `pattern` centred on an otherwise dead grid
    pub fn load_pattern(&mut self, pattern: LifePattern) -> Result<()> {
        let mut grid = Grid::new(self.config.width, self.config.height)?;
        pattern.stamp_centered(&mut grid);
        self.buffers.reset(grid)?;
        self.monitor.reset();
        log::info!("Loaded {} pattern", pattern.as_str());
        Ok(())
    }

    /// Edit the current generation in place between ticks
    pub fn edit_current<F: FnOnce(&mut Grid)>(&mut self, edit: F) {
        edit(self.buffers.current_mut());
    }

    /// Current generation, read only
    pub fn current_grid(&self) -> &Grid {
        self.buffers.current()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.config.dimensions()
    }

    /// Generations since the last seed or pattern load
    pub fn generation(&self) -> u64 {
        self.buffers.generation()
    }

    /// Seed of the current run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn metrics(&self) -> &StepMetrics {
        self.monitor.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::grid::CellState;
    use crate::simulation::seeder::seed_new_grid;

    #[test]
    fn test_initial_grid_comes_from_seed() {
        let sim = Simulation::new(LifeConfig::new(30, 20).with_seed(77)).unwrap();
        assert_eq!(sim.seed(), 77);
        assert_eq!(sim.dimensions(), (30, 20));
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.current_grid(), &seed_new_grid(30, 20, 77).unwrap());
        assert_eq!(sim.engine_name(), "cpu");
    }

    #[test]
    fn test_tick_advances_one_generation() {
        let mut sim = Simulation::new(LifeConfig::new(16, 16).with_seed(5)).unwrap();
        let mut reference = CpuEngine::new(16, 16).unwrap();
        let expected = reference.step(sim.current_grid()).unwrap();

        sim.on_tick_request().unwrap();
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.current_grid(), &expected);
        assert_eq!(sim.metrics().total_steps, 1);
        assert_eq!(sim.metrics().live_cells, expected.live_count());
    }

    #[test]
    fn test_reseed_is_reproducible() {
        let mut sim = Simulation::new(LifeConfig::new(12, 12).with_seed(1)).unwrap();
        sim.run(3).unwrap();

        let used = sim.on_reseed_request(Some(99)).unwrap();
        assert_eq!(used, 99);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.metrics().total_steps, 0);
        let first = sim.current_grid().clone();

        sim.run(2).unwrap();
        sim.on_reseed_request(Some(99)).unwrap();
        assert_eq!(sim.current_grid(), &first);
    }

    #[test]
    fn test_time_seeded_reseed_reports_seed() {
        let mut sim = Simulation::new(LifeConfig::new(8, 8).with_seed(1)).unwrap();
        let seed = sim.on_reseed_request(None).unwrap();
        assert_eq!(sim.seed(), seed);
        assert_eq!(sim.current_grid(), &seed_new_grid(8, 8, seed).unwrap());
    }

    #[test]
    fn test_engines_agree_through_context() {
        let base = LifeConfig::new(40, 25).with_seed(2024);
        let mut cpu = Simulation::new(base.clone()).unwrap();
        let mut parallel =
            Simulation::new(base.with_engine(EngineKind::Parallel).with_threads(2)).unwrap();
        assert_eq!(parallel.engine_name(), "parallel");

        for _ in 0..20 {
            cpu.on_tick_request().unwrap();
            parallel.on_tick_request().unwrap();
            assert_eq!(cpu.current_grid(), parallel.current_grid());
        }
    }

    #[test]
    fn test_gpu_request_always_yields_working_engine() {
        // Falls back to cpu where no adapter exists
        let config = LifeConfig::new(10, 10)
            .with_seed(8)
            .with_engine(EngineKind::Gpu);
        let mut sim = Simulation::new(config).unwrap();
        let mut reference = CpuEngine::new(10, 10).unwrap();
        let expected = reference.step(sim.current_grid()).unwrap();
        sim.on_tick_request().unwrap();
        assert_eq!(sim.current_grid(), &expected);
    }

    #[test]
    fn test_load_pattern_and_blink() {
        let mut sim = Simulation::new(LifeConfig::new(9, 9).with_seed(0)).unwrap();
        sim.load_pattern(LifePattern::Blinker).unwrap();
        let start = sim.current_grid().clone();
        assert_eq!(start.live_count(), 3);

        sim.on_tick_request().unwrap();
        assert_ne!(sim.current_grid(), &start);
        sim.on_tick_request().unwrap();
        assert_eq!(sim.current_grid(), &start);
    }

    #[test]
    fn test_edit_current() {
        let mut sim = Simulation::new(LifeConfig::new(6, 6).with_seed(0)).unwrap();
        sim.load_pattern(LifePattern::Clear).unwrap();
        sim.edit_current(|grid| {
            LifePattern::Block.stamp(grid, 1, 1);
        });
        sim.on_tick_request().unwrap();
        assert_eq!(sim.current_grid().live_count(), 4);
        assert_eq!(sim.current_grid().get(1, 1).unwrap(), CellState::Alive);
    }

    #[test]
    fn test_mismatched_engine_rejected() {
        let config = LifeConfig::new(10, 10);
        let engine = Box::new(CpuEngine::new(10, 11).unwrap());
        assert!(matches!(
            Simulation::with_engine(config, engine),
            Err(LifeError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(Simulation::new(LifeConfig::new(0, 4)).is_err());
        assert!(Simulation::new(LifeConfig::new(4, 4).with_live_one_in(0)).is_err());
    }
}
