// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Shock Engine

use crate::aggregate::percentile;
use crate::driver::run_batch;
use crate::levers::{Lever, LeverConfig};
use crate::path::mean_churn;
use crate::types::{
    BaselineMetrics, ShockClassification, ShockedBatchResult, SimulationConfig, SinglePathResult,
};

// ─── Shock profile ──────────────────────────────────────────────────────────

/// Paths per shocked batch unless the caller asks otherwise.
pub const DEFAULT_SHOCK_RUNS: usize = 200;

/// Maximum shock severity.
pub const SIGMA_MAX: u8 = 3;

/// Per-σ lever deltas. Exactly these four levers move; the perturbation is
/// linear in σ and the result is clamped back to the 0–100 scale.
const SHOCK_DELTAS: [(Lever, f64); 4] = [
    (Lever::MarketVolatility, 12.0),
    (Lever::DemandStrength, -10.0),
    (Lever::FundingPressure, 8.0),
    (Lever::ExecutionRisk, 10.0),
];

// Classification breakpoints on shocked survival rate.
const CLASSIFY_ROBUST_MIN: f64 = 0.75;
const CLASSIFY_STABLE_MIN: f64 = 0.55;
const CLASSIFY_FRAGILE_MIN: f64 = 0.35;

/// Copy of `levers` with the σ-scaled perturbation applied. σ = 0 returns
/// the input unchanged, which is what makes the shock-zero regression
/// invariant hold exactly.
pub fn apply_shock(levers: &LeverConfig, sigma: u8) -> LeverConfig {
    let sigma = sigma.min(SIGMA_MAX) as f64;
    let mut shocked = levers.sanitized();
    for (lever, delta) in SHOCK_DELTAS {
        shocked.set(lever, shocked.get(lever) + delta * sigma);
    }
    shocked
}

pub fn classify(survival_rate: f64) -> ShockClassification {
    if survival_rate >= CLASSIFY_ROBUST_MIN {
        ShockClassification::Robust
    } else if survival_rate >= CLASSIFY_STABLE_MIN {
        ShockClassification::Stable
    } else if survival_rate >= CLASSIFY_FRAGILE_MIN {
        ShockClassification::Fragile
    } else {
        ShockClassification::Critical
    }
}

// ─── Shocked batch ──────────────────────────────────────────────────────────

/// Run a (smaller) Monte Carlo batch under the σ-shocked levers and summarize
/// it. Uses the same simulator and driver as the baseline path — the same
/// seeds too, so shocked-vs-baseline deltas are paired, not independently
/// noisy.
pub fn compute_shocked_batch(
    levers: &LeverConfig,
    config: &SimulationConfig,
    sigma: u8,
    run_count: usize,
) -> ShockedBatchResult {
    let shocked_levers = apply_shock(levers, sigma);
    let results = run_batch(&shocked_levers, config, run_count);
    summarize(&results, sigma.min(SIGMA_MAX))
}

/// Baseline side of a transmission comparison: the same summary over the
/// unshocked levers.
pub fn compute_baseline_metrics(
    levers: &LeverConfig,
    config: &SimulationConfig,
    run_count: usize,
) -> BaselineMetrics {
    let batch = compute_shocked_batch(levers, config, 0, run_count);
    BaselineMetrics::from(&batch)
}

fn summarize(results: &[SinglePathResult], sigma: u8) -> ShockedBatchResult {
    let n = results.len();
    if n == 0 {
        return ShockedBatchResult {
            sigma,
            run_count: 0,
            survival_rate: 0.0,
            median_arr: 0.0,
            median_runway: 0.0,
            median_net_burn: 0.0,
            implied_churn: 0.0,
            classification: ShockClassification::Critical,
        };
    }

    let survived = results.iter().filter(|r| r.did_survive).count();
    let survival_rate = survived as f64 / n as f64;

    ShockedBatchResult {
        sigma,
        run_count: n,
        survival_rate,
        median_arr: median(results.iter().map(|r| r.final_arr).collect()),
        median_runway: median(results.iter().map(|r| r.final_runway).collect()),
        median_net_burn: median(
            results
                .iter()
                .map(|r| r.monthly_snapshots.last().map_or(0.0, |s| s.net_burn))
                .collect(),
        ),
        implied_churn: median(results.iter().map(mean_churn).collect()),
        classification: classify(survival_rate),
    }
}

fn median(mut samples: Vec<f64>) -> f64 {
    samples.sort_by(f64::total_cmp);
    percentile(&samples, 50.0)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigma_zero_leaves_levers_untouched() {
        let levers = LeverConfig::neutral();
        assert_eq!(apply_shock(&levers, 0), levers);
    }

    #[test]
    fn shock_moves_exactly_four_levers() {
        let base = LeverConfig::neutral();
        let shocked = apply_shock(&base, 1);
        assert_eq!(shocked.market_volatility, 62.0);
        assert_eq!(shocked.demand_strength, 40.0);
        assert_eq!(shocked.funding_pressure, 58.0);
        assert_eq!(shocked.execution_risk, 60.0);
        // untouched dials
        assert_eq!(shocked.pricing_power, 50.0);
        assert_eq!(shocked.market_expansion, 50.0);
        assert_eq!(shocked.hiring_intensity, 50.0);
        assert_eq!(shocked.operating_discipline, 50.0);
        assert_eq!(shocked.automation_leverage, 50.0);
    }

    #[test]
    fn shock_is_linear_and_clamped() {
        let mut base = LeverConfig::neutral();
        base.funding_pressure = 90.0;
        base.demand_strength = 15.0;
        let shocked = apply_shock(&base, 3);
        assert_eq!(shocked.market_volatility, 86.0);
        assert_eq!(shocked.funding_pressure, 100.0, "clamped at the top of the scale");
        assert_eq!(shocked.demand_strength, 0.0, "clamped at the bottom of the scale");
    }

    #[test]
    fn classification_breakpoints() {
        assert_eq!(classify(0.80), ShockClassification::Robust);
        assert_eq!(classify(0.75), ShockClassification::Robust);
        assert_eq!(classify(0.60), ShockClassification::Stable);
        assert_eq!(classify(0.40), ShockClassification::Fragile);
        assert_eq!(classify(0.20), ShockClassification::Critical);
    }

    #[test]
    fn median_uses_lower_middle_for_even_n() {
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), 2.0);
        assert_eq!(median(vec![5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn empty_batch_summarizes_to_critical_zeroes() {
        let out = summarize(&[], 2);
        assert_eq!(out.run_count, 0);
        assert_eq!(out.classification, ShockClassification::Critical);
        assert!(out.median_arr == 0.0 && out.implied_churn == 0.0);
    }
}
