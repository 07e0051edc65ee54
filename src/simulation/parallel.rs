//! Data-parallel CPU transition engine
//!
//! Each output row is an independent work item evaluated by rayon. Items
//! only read the previous generation, so no ordering between them is
//! needed. `for_each` returns after every row has been written, which is the
//! barrier before anyone can observe the output buffer.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{grid::Grid, rules, traits::TransitionEngine};
use crate::error::{LifeError, Result};

/// Rayon-backed Game of Life stepper
pub struct ParallelEngine {
    width: usize,
    height: usize,
    // None runs on rayon's global pool
    pool: Option<ThreadPool>,
}

impl ParallelEngine {
    /// Create an engine that dispatches onto the global rayon pool
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pool: None,
        })
    }

    /// Run on a dedicated pool of `threads` workers instead of the global pool
    ///
    /// Zero threads is rejected; rayon would silently read it as "default".
    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(LifeError::InvalidThreadCount(threads));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("life-worker-{}", i))
            .build()
            .map_err(|e| LifeError::ThreadPool(e.to_string()))?;
        log::debug!("Parallel engine using dedicated pool of {} threads", threads);
        self.pool = Some(pool);
        Ok(self)
    }

    /// Number of worker threads a step will be spread over
    pub fn worker_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn dispatch(width: usize, input: &Grid, output: &mut Grid) {
        output
            .cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| rules::evolve_row(input, y, row));
    }
}

impl TransitionEngine for ParallelEngine {
    fn name(&self) -> &str {
        "parallel"
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn step_into(&mut self, input: &Grid, output: &mut Grid) -> Result<()> {
        self.check_buffers(input, output)?;

        let width = self.width;
        match &self.pool {
            Some(pool) => pool.install(|| Self::dispatch(width, input, output)),
            None => Self::dispatch(width, input, output),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::cpu::CpuEngine;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_grid(rng: &mut StdRng, width: usize, height: usize) -> Grid {
        let cells = (0..width * height)
            .map(|_| rng.random_bool(0.35) as u8)
            .collect();
        Grid::from_cells(width, height, cells).unwrap()
    }

    #[test]
    fn test_matches_cpu_engine_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let sizes = [(1, 1), (2, 2), (1, 7), (3, 5), (16, 16), (33, 17), (64, 40)];

        for &(width, height) in sizes.iter() {
            let mut cpu = CpuEngine::new(width, height).unwrap();
            let mut parallel = ParallelEngine::new(width, height).unwrap();

            for _ in 0..8 {
                let grid = random_grid(&mut rng, width, height);
                let expected = cpu.step(&grid).unwrap();
                let actual = parallel.step(&grid).unwrap();
                assert_eq!(
                    expected.cells(),
                    actual.cells(),
                    "mismatch on {}x{} grid",
                    width,
                    height
                );
            }
        }
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = random_grid(&mut rng, 48, 48);

        let mut global = ParallelEngine::new(48, 48).unwrap();
        let mut pooled = ParallelEngine::new(48, 48).unwrap().with_threads(3).unwrap();
        assert_eq!(pooled.worker_count(), 3);

        let mut a = grid.clone();
        let mut b = grid;
        for _ in 0..10 {
            a = global.step(&a).unwrap();
            b = pooled.step(&b).unwrap();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = ParallelEngine::new(8, 8).unwrap().with_threads(0);
        assert!(matches!(result, Err(LifeError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_rejects_mismatched_grid() {
        let mut engine = ParallelEngine::new(8, 8).unwrap();
        let grid = Grid::new(8, 9).unwrap();
        assert!(matches!(
            engine.step(&grid),
            Err(LifeError::DimensionMismatch { .. })
        ));
    }
}
