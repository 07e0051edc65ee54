//! # Step Timing
//!
//! Tracks how long generation steps take so a driver can report throughput
//! per engine. Samples live in a fixed-size ring buffer; metrics are
//! recomputed on every recorded step.
//!
//! ## Usage
//!
//! ```rust
//! use torus_life::performance::StepMonitor;
//!
//! let mut monitor = StepMonitor::new();
//! monitor.begin_step();
//! // ... advance one generation ...
//! monitor.end_step(42);
//! assert_eq!(monitor.metrics().total_steps, 1);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Aggregated step statistics over the sample window
#[derive(Debug, Clone, PartialEq)]
pub struct StepMetrics {
    /// Generations per second derived from the average step time
    pub steps_per_second: f32,
    /// Average step time in milliseconds
    pub step_time_ms: f32,
    pub min_step_time_ms: f32,
    pub max_step_time_ms: f32,
    /// Live cells after the most recent step
    pub live_cells: usize,
    /// Steps recorded since creation or the last reset
    pub total_steps: u64,
}

impl Default for StepMetrics {
    fn default() -> Self {
        Self {
            steps_per_second: 0.0,
            step_time_ms: 0.0,
            min_step_time_ms: f32::MAX,
            max_step_time_ms: 0.0,
            live_cells: 0,
            total_steps: 0,
        }
    }
}

/// Ring buffer of recent step durations
pub struct StepMonitor {
    step_times: VecDeque<Duration>,
    max_samples: usize,
    step_start: Option<Instant>,
    metrics: StepMetrics,
}

impl StepMonitor {
    /// Monitor keeping the last 120 samples
    pub fn new() -> Self {
        Self::with_capacity(120)
    }

    pub fn with_capacity(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            step_times: VecDeque::with_capacity(max_samples),
            max_samples,
            step_start: None,
            metrics: StepMetrics::default(),
        }
    }

    /// Mark the beginning of a step
    pub fn begin_step(&mut self) {
        self.step_start = Some(Instant::now());
    }

    /// Mark the end of a step; ignored without a matching `begin_step`
    pub fn end_step(&mut self, live_cells: usize) {
        if let Some(start) = self.step_start.take() {
            self.record(start.elapsed(), live_cells);
        }
    }

    /// Record a step of known duration
    pub fn record(&mut self, duration: Duration, live_cells: usize) {
        if self.step_times.len() >= self.max_samples {
            self.step_times.pop_front();
        }
        self.step_times.push_back(duration);
        self.metrics.live_cells = live_cells;
        self.metrics.total_steps += 1;
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        if self.step_times.is_empty() {
            return;
        }

        let total: Duration = self.step_times.iter().sum();
        let average_ms = (total / self.step_times.len() as u32).as_secs_f32() * 1000.0;
        self.metrics.step_time_ms = average_ms;
        self.metrics.steps_per_second = if average_ms > 0.0 {
            1000.0 / average_ms
        } else {
            0.0
        };

        if let (Some(min), Some(max)) = (self.step_times.iter().min(), self.step_times.iter().max()) {
            self.metrics.min_step_time_ms = min.as_secs_f32() * 1000.0;
            self.metrics.max_step_time_ms = max.as_secs_f32() * 1000.0;
        }
    }

    pub fn metrics(&self) -> &StepMetrics {
        &self.metrics
    }

    /// Step times in milliseconds, oldest first
    pub fn history_ms(&self) -> Vec<f32> {
        self.step_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Drop all samples and counters
    pub fn reset(&mut self) {
        self.step_times.clear();
        self.step_start = None;
        self.metrics = StepMetrics::default();
    }
}

impl Default for StepMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_from_known_durations() {
        let mut monitor = StepMonitor::new();
        monitor.record(Duration::from_millis(10), 5);
        monitor.record(Duration::from_millis(30), 7);

        let metrics = monitor.metrics();
        assert_eq!(metrics.total_steps, 2);
        assert_eq!(metrics.live_cells, 7);
        assert!((metrics.step_time_ms - 20.0).abs() < 0.01);
        assert!((metrics.steps_per_second - 50.0).abs() < 0.1);
        assert!((metrics.min_step_time_ms - 10.0).abs() < 0.01);
        assert!((metrics.max_step_time_ms - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut monitor = StepMonitor::with_capacity(2);
        for ms in [100, 2, 4] {
            monitor.record(Duration::from_millis(ms), 0);
        }
        assert_eq!(monitor.history_ms().len(), 2);
        assert!((monitor.metrics().max_step_time_ms - 4.0).abs() < 0.01);
        assert_eq!(monitor.metrics().total_steps, 3);
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut monitor = StepMonitor::new();
        monitor.end_step(3);
        assert_eq!(monitor.metrics().total_steps, 0);

        monitor.begin_step();
        monitor.end_step(3);
        assert_eq!(monitor.metrics().total_steps, 1);

        monitor.reset();
        assert_eq!(monitor.metrics(), &StepMetrics::default());
    }
}
