// Scenario Report Types — structured output for planning-model validation
// One JSON artifact per bench run, consumable by the dashboard's analysis tools

use serde::Serialize;
use summit_engine::{
    MonteCarloResult, RiskIndexResult, ShockedBatchResult, TransmissionNode,
};

// ─── Statistics (per-metric ensemble aggregation) ───────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Per-Scenario Report ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub name: String,
    pub category: String,
    pub iterations: usize,
    pub pass: bool,
    pub verdict: MonteCarloResult,
    pub final_arr: Stats,
    pub final_runway: Stats,
    pub survival_months: Stats,
    /// Shocked batches at σ = 0..=3, in order.
    pub sigma_sweep: Vec<ShockedBatchResult>,
    pub risk_index: RiskIndexResult,
    pub transmission: Vec<TransmissionNode>,
    pub elapsed_ms: u128,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub iterations_per_scenario: usize,
    pub summary: Summary,
    pub scenarios: Vec<ScenarioReport>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}
