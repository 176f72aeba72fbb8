// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Monte Carlo Driver

use crate::levers::LeverConfig;
use crate::path::simulate_path;
use crate::types::{ChunkProgress, SimulationConfig, SinglePathResult};

/// Default paths per chunk when a host drives a batch incrementally.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

// ─── BatchRun ───────────────────────────────────────────────────────────────

/// A resumable Monte Carlo batch. Seeds run `0..run_count` so that two
/// batches over different lever sets are paired path-for-path rather than
/// independently noisy.
///
/// The host pulls chunks (`run_chunk`) and may report progress or abandon the
/// run between them; an abandoned run is simply dropped and publishes
/// nothing. Chunking affects responsiveness only — the ensemble is identical
/// however the batch is sliced.
pub struct BatchRun {
    levers: LeverConfig,
    config: SimulationConfig,
    total: usize,
    results: Vec<SinglePathResult>,
}

impl BatchRun {
    pub fn new(levers: &LeverConfig, config: &SimulationConfig, run_count: usize) -> Self {
        Self {
            levers: levers.sanitized(),
            config: config.sanitized(),
            total: run_count,
            results: Vec::with_capacity(run_count),
        }
    }

    /// Simulate up to `chunk_size` further paths and checkpoint.
    pub fn run_chunk(&mut self, chunk_size: usize) -> ChunkProgress {
        let start = self.results.len();
        let end = (start + chunk_size.max(1)).min(self.total);
        for seed in start..end {
            self.results
                .push(simulate_path(seed as u64, &self.levers, &self.config));
        }
        self.progress()
    }

    pub fn progress(&self) -> ChunkProgress {
        ChunkProgress {
            completed: self.results.len(),
            total: self.total,
            done: self.results.len() >= self.total,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.results.len() >= self.total
    }

    pub fn results(&self) -> &[SinglePathResult] {
        &self.results
    }

    /// Consume the run and hand the ensemble to the aggregator. The ensemble
    /// is large (iterations × horizon) and should not be retained afterward.
    pub fn into_results(self) -> Vec<SinglePathResult> {
        self.results
    }
}

// ─── One-shot batch ─────────────────────────────────────────────────────────

/// Run a full batch to completion. Equivalent to driving a `BatchRun` in
/// chunks of any size.
pub fn run_batch(
    levers: &LeverConfig,
    config: &SimulationConfig,
    run_count: usize,
) -> Vec<SinglePathResult> {
    let mut run = BatchRun::new(levers, config, run_count);
    while !run.is_complete() {
        run.run_chunk(DEFAULT_CHUNK_SIZE);
    }
    run.into_results()
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig {
            iterations: 64,
            time_horizon_months: 12,
            starting_cash: 500_000.0,
            starting_arr: 1_200_000.0,
            monthly_burn: 40_000.0,
        }
    }

    #[test]
    fn chunking_does_not_change_the_ensemble() {
        let levers = LeverConfig::neutral();
        let config = config();

        let one_shot = run_batch(&levers, &config, 64);

        let mut chunked = BatchRun::new(&levers, &config, 64);
        chunked.run_chunk(7);
        chunked.run_chunk(50);
        chunked.run_chunk(100);
        assert!(chunked.is_complete());

        assert_eq!(one_shot, chunked.into_results());
    }

    #[test]
    fn seeds_are_sequential_from_zero() {
        let results = run_batch(&LeverConfig::neutral(), &config(), 10);
        for (i, path) in results.iter().enumerate() {
            assert_eq!(path.seed, i as u64);
        }
    }

    #[test]
    fn progress_checkpoints() {
        let mut run = BatchRun::new(&LeverConfig::neutral(), &config(), 20);
        let p = run.run_chunk(8);
        assert_eq!(p, ChunkProgress { completed: 8, total: 20, done: false });
        let p = run.run_chunk(8);
        assert_eq!(p.completed, 16);
        assert!(!p.done);
        let p = run.run_chunk(8);
        assert_eq!(p, ChunkProgress { completed: 20, total: 20, done: true });
    }

    #[test]
    fn zero_run_count_is_immediately_done() {
        let mut run = BatchRun::new(&LeverConfig::neutral(), &config(), 0);
        assert!(run.is_complete());
        let p = run.run_chunk(100);
        assert_eq!(p.completed, 0);
        assert!(p.done);
    }
}
