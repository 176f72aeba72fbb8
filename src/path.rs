// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Single-Path Simulator

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::levers::{Lever, LeverConfig};
use crate::types::{MonthlySnapshot, SimulationConfig, SinglePathResult};

// ─── Calibration constants ──────────────────────────────────────────────────
// Monthly-rate model. These are calibration data, not contract: the binding
// contracts are determinism, the lever monotonicities, and the survival and
// runway edge cases below.

/// Gross margin applied to ARR when converting to monthly cash contribution.
pub const GROSS_MARGIN: f64 = 0.75;

// Monthly churn: base plus volatility/execution drag, minus demand retention.
const CHURN_BASE: f64 = 0.008;
const CHURN_VOLATILITY: f64 = 0.014;
const CHURN_EXECUTION: f64 = 0.008;
const CHURN_DEMAND_OFFSET: f64 = 0.010;
const CHURN_MIN: f64 = 0.001;
const CHURN_MAX: f64 = 0.08;

// Monthly gross expansion from the growth levers.
const EXPANSION_BASE: f64 = 0.010;
const EXPANSION_DEMAND: f64 = 0.020;
const EXPANSION_PRICING: f64 = 0.010;
const EXPANSION_MARKET: f64 = 0.012;

// Noise scale on the monthly growth rate.
const NOISE_BASE: f64 = 0.015;
const NOISE_VOLATILITY: f64 = 0.035;
const NOISE_EXECUTION: f64 = 0.015;

const GROWTH_MIN: f64 = -0.40;
const GROWTH_MAX: f64 = 0.60;

// Opex multiplier contributions, centered on neutral levers.
const BURN_HIRING: f64 = 0.50;
const BURN_DISCIPLINE: f64 = 0.25;
const BURN_AUTOMATION: f64 = 0.15;
const BURN_FUNDING: f64 = 0.45;
const BURN_MULT_FLOOR: f64 = 0.05;
const OPEX_NOISE: f64 = 0.05;

// ─── Path RNG ───────────────────────────────────────────────────────────────

/// Per-path pseudo-random stream. Each path owns its own generator keyed off
/// the path seed — never a process-global RNG — so paths are independent and
/// reproducible under any execution order.
struct PathRng {
    rng: ChaCha8Rng,
}

impl PathRng {
    fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Standard normal deviate via Box-Muller.
    fn normal(&mut self) -> f64 {
        let u1: f64 = self.rng.gen::<f64>().max(f64::MIN_POSITIVE);
        let u2: f64 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }
}

// ─── Monthly rates ──────────────────────────────────────────────────────────

struct MonthlyRates {
    churn: f64,
    expansion: f64,
    noise_sigma: f64,
    burn_multiplier: f64,
}

fn derive_rates(levers: &LeverConfig) -> MonthlyRates {
    let vol = levers.fraction(Lever::MarketVolatility);
    let exec = levers.fraction(Lever::ExecutionRisk);
    let demand = levers.fraction(Lever::DemandStrength);
    let pricing = levers.fraction(Lever::PricingPower);
    let market = levers.fraction(Lever::MarketExpansion);

    let churn = (CHURN_BASE + CHURN_VOLATILITY * vol + CHURN_EXECUTION * exec
        - CHURN_DEMAND_OFFSET * demand)
        .clamp(CHURN_MIN, CHURN_MAX);

    let expansion = EXPANSION_BASE
        + EXPANSION_DEMAND * demand
        + EXPANSION_PRICING * pricing
        + EXPANSION_MARKET * market;

    let noise_sigma = NOISE_BASE + NOISE_VOLATILITY * vol + NOISE_EXECUTION * exec;

    let burn_multiplier = ((1.0 + BURN_HIRING * levers.centered(Lever::HiringIntensity))
        * (1.0 - BURN_DISCIPLINE * levers.centered(Lever::OperatingDiscipline))
        * (1.0 - BURN_AUTOMATION * levers.centered(Lever::AutomationLeverage))
        * (1.0 + BURN_FUNDING * levers.centered(Lever::FundingPressure)))
        .max(BURN_MULT_FLOOR);

    MonthlyRates { churn, expansion, noise_sigma, burn_multiplier }
}

// ─── Simulator ──────────────────────────────────────────────────────────────

/// Simulate one trajectory. Pure: the same (seed, levers, config) triple
/// yields a bit-identical result; no shared state, no wall clock.
///
/// The configured `monthly_burn` is the net burn at the starting revenue
/// level, so gross opex is reconstructed as burn + margin·ARR₀/12 and revenue
/// growth (or churn) moves the net from there.
pub fn simulate_path(
    seed: u64,
    levers: &LeverConfig,
    config: &SimulationConfig,
) -> SinglePathResult {
    let levers = levers.sanitized();
    let config = config.sanitized();
    let horizon = config.time_horizon_months;

    // Cash already exhausted: dead at month zero, no months simulated.
    if config.starting_cash <= 0.0 {
        return SinglePathResult {
            seed,
            final_arr: config.starting_arr,
            final_runway: 0.0,
            did_survive: false,
            survival_months: 0,
            monthly_snapshots: Vec::new(),
        };
    }

    let rates = derive_rates(&levers);
    let opex_base = config.monthly_burn + GROSS_MARGIN * config.starting_arr / 12.0;

    let mut rng = PathRng::new(seed);
    let mut cash = config.starting_cash;
    let mut arr = config.starting_arr;
    let mut snapshots = Vec::with_capacity(horizon as usize);
    let mut died_at: Option<u32> = None;

    for month in 1..=horizon {
        let growth = (rates.expansion - rates.churn + rates.noise_sigma * rng.normal())
            .clamp(GROWTH_MIN, GROWTH_MAX);
        arr = (arr * (1.0 + growth)).max(0.0);

        let opex =
            (opex_base * rates.burn_multiplier * (1.0 + OPEX_NOISE * rng.normal())).max(0.0);
        let net_burn = opex - GROSS_MARGIN * arr / 12.0;
        cash -= net_burn;

        snapshots.push(MonthlySnapshot {
            month,
            cash,
            arr,
            net_burn,
            growth_rate: growth,
            churn_rate: rates.churn,
        });

        if cash <= 0.0 {
            died_at = Some(month);
            break;
        }
    }

    let did_survive = died_at.is_none();
    let survival_months = died_at.unwrap_or(horizon);
    let final_runway = if !did_survive {
        0.0
    } else {
        match snapshots.last() {
            Some(last) if last.net_burn > 0.0 => cash / last.net_burn,
            // Non-positive net burn: unbounded runway, reported as the
            // horizon length so percentile math stays finite.
            _ => horizon as f64,
        }
    };

    SinglePathResult {
        seed,
        final_arr: arr,
        final_runway,
        did_survive,
        survival_months,
        monthly_snapshots: snapshots,
    }
}

/// Mean monthly churn across a path's simulated months (0 for a path that
/// never got a month in).
pub fn mean_churn(path: &SinglePathResult) -> f64 {
    if path.monthly_snapshots.is_empty() {
        return 0.0;
    }
    let sum: f64 = path.monthly_snapshots.iter().map(|s| s.churn_rate).sum();
    sum / path.monthly_snapshots.len() as f64
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_config() -> SimulationConfig {
        SimulationConfig {
            iterations: 1,
            time_horizon_months: 36,
            starting_cash: 4_000_000.0,
            starting_arr: 4_800_000.0,
            monthly_burn: 47_000.0,
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let levers = LeverConfig::neutral();
        let config = healthy_config();
        let a = simulate_path(7, &levers, &config);
        let b = simulate_path(7, &levers, &config);
        assert_eq!(a, b, "same seed must reproduce the exact trajectory");
    }

    #[test]
    fn different_seeds_diverge() {
        let levers = LeverConfig::neutral();
        let config = healthy_config();
        let a = simulate_path(1, &levers, &config);
        let b = simulate_path(2, &levers, &config);
        assert_ne!(
            a.monthly_snapshots, b.monthly_snapshots,
            "independent seeds should not share a stream"
        );
    }

    #[test]
    fn zero_cash_dies_at_month_zero() {
        let levers = LeverConfig::neutral();
        let config = SimulationConfig {
            starting_cash: 0.0,
            monthly_burn: 50_000.0,
            starting_arr: 1_000_000.0,
            ..healthy_config()
        };
        let path = simulate_path(0, &levers, &config);
        assert!(!path.did_survive);
        assert_eq!(path.survival_months, 0);
        assert!(path.monthly_snapshots.is_empty(), "no months after month-0 death");
        assert_eq!(path.final_runway, 0.0);
    }

    #[test]
    fn snapshots_stop_at_death_month() {
        let levers = LeverConfig::neutral();
        // No revenue, burn far above cash: dies in month 1.
        let config = SimulationConfig {
            starting_cash: 40_000.0,
            starting_arr: 0.0,
            monthly_burn: 120_000.0,
            ..healthy_config()
        };
        let path = simulate_path(3, &levers, &config);
        assert!(!path.did_survive);
        assert_eq!(path.survival_months, 1);
        assert_eq!(path.monthly_snapshots.len(), 1, "sequence is not padded to horizon");
    }

    #[test]
    fn zero_burn_runway_is_horizon() {
        let levers = LeverConfig::neutral();
        let config = SimulationConfig {
            starting_cash: 100_000.0,
            starting_arr: 0.0,
            monthly_burn: 0.0,
            ..healthy_config()
        };
        let path = simulate_path(11, &levers, &config);
        assert!(path.did_survive);
        assert_eq!(path.final_runway, 36.0, "unbounded runway reports horizon length");
    }

    #[test]
    fn survival_months_never_exceeds_horizon() {
        let levers = LeverConfig::neutral();
        let config = healthy_config();
        for seed in 0..50 {
            let path = simulate_path(seed, &levers, &config);
            assert!(path.survival_months <= config.time_horizon_months);
            assert!(path.monthly_snapshots.len() <= config.time_horizon_months as usize);
        }
    }

    #[test]
    fn out_of_range_levers_clamp_not_reject() {
        let mut levers = LeverConfig::neutral();
        levers.market_volatility = 500.0;
        let clamped = {
            let mut l = LeverConfig::neutral();
            l.market_volatility = 100.0;
            l
        };
        let config = healthy_config();
        assert_eq!(
            simulate_path(5, &levers, &config),
            simulate_path(5, &clamped, &config),
        );
    }

    #[test]
    fn normal_deviates_are_roughly_standard() {
        let mut rng = PathRng::new(42);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| rng.normal()).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.03, "normal mean {} too far from 0", mean);
        assert!((var - 1.0).abs() < 0.05, "normal variance {} too far from 1", var);
    }
}
