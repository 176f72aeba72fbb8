// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Result Aggregator

use crate::levers::{Lever, LeverConfig};
use crate::types::{
    Confidence, MonteCarloResult, PercentileBand, Rating, SimulationConfig, SinglePathResult,
};

// ─── Public contract thresholds ─────────────────────────────────────────────
// These constants are the documented external contract of the verdict layer;
// they are configuration, not per-call parameters.

/// Survival rate at or above which the rating is Robust.
pub const RATING_ROBUST_MIN: f64 = 0.75;
/// Survival rate at or above which the rating is Stable.
pub const RATING_STABLE_MIN: f64 = 0.55;
/// Survival rate at or above which the rating is Fragile; below is Critical.
pub const RATING_FRAGILE_MIN: f64 = 0.35;

/// ARR spread (p90 − p10)/p50 below which confidence is High.
pub const CONFIDENCE_HIGH_MAX_SPREAD: f64 = 0.5;
/// ARR spread below which confidence is Medium; above is Low.
pub const CONFIDENCE_MEDIUM_MAX_SPREAD: f64 = 1.1;

// Composite score blend (score = 100 × weighted sum).
const SCORE_W_SURVIVAL: f64 = 0.55;
const SCORE_W_GROWTH: f64 = 0.30;
const SCORE_W_RUNWAY: f64 = 0.15;
/// Median ARR multiple over the starting ARR that saturates the growth term.
const GROWTH_SATURATION_MULTIPLE: f64 = 2.0;

// ─── Percentiles ────────────────────────────────────────────────────────────

/// Nearest-rank percentile: sort ascending, take `ceil(p/100 · n) − 1`.
/// No interpolation; P50 of an even-length sample is the lower-middle
/// element. Returns 0 for an empty sample.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p / 100.0 * sorted.len() as f64).ceil() as usize;
    let idx = rank.max(1).min(sorted.len()) - 1;
    sorted[idx]
}

fn band_of(mut samples: Vec<f64>) -> PercentileBand {
    samples.sort_by(f64::total_cmp);
    PercentileBand {
        p10: percentile(&samples, 10.0),
        p25: percentile(&samples, 25.0),
        p50: percentile(&samples, 50.0),
        p75: percentile(&samples, 75.0),
        p90: percentile(&samples, 90.0),
    }
}

// ─── Aggregation ────────────────────────────────────────────────────────────

/// Reduce a raw ensemble to the summary the verdict renderer consumes. The
/// ensemble is consumed here; callers should not retain it afterward.
///
/// An empty ensemble (iterations clamped to 0) reports the distinct no-data
/// state rather than NaN statistics.
pub fn aggregate(
    results: &[SinglePathResult],
    config: &SimulationConfig,
    levers: &LeverConfig,
    elapsed_ms: f64,
) -> MonteCarloResult {
    let n = results.len();
    if n == 0 {
        return MonteCarloResult {
            sample_count: 0,
            survival_rate: 0.0,
            arr: PercentileBand::zero(),
            runway: PercentileBand::zero(),
            score: 0.0,
            rating: Rating::NoData,
            confidence: Confidence::None,
            primary_risk: "No simulation data: the batch ran zero paths.".to_string(),
            recommendation: "Increase the iteration count above zero and re-run.".to_string(),
            elapsed_ms,
        };
    }

    let config = config.sanitized();
    let levers = levers.sanitized();

    let survived = results.iter().filter(|r| r.did_survive).count();
    let survival_rate = survived as f64 / n as f64;

    let arr = band_of(results.iter().map(|r| r.final_arr).collect());
    let runway = band_of(results.iter().map(|r| r.final_runway).collect());

    let score = composite_score(survival_rate, &arr, &runway, &config);
    let rating = rating_of(survival_rate);
    let confidence = confidence_of(&arr);

    let dimension = dominant_risk_dimension(&levers);
    let primary_risk = primary_risk_text(dimension, survival_rate);
    let recommendation = recommendation_text(dimension, survival_rate);

    MonteCarloResult {
        sample_count: n,
        survival_rate,
        arr,
        runway,
        score,
        rating,
        confidence,
        primary_risk,
        recommendation,
        elapsed_ms,
    }
}

fn composite_score(
    survival_rate: f64,
    arr: &PercentileBand,
    runway: &PercentileBand,
    config: &SimulationConfig,
) -> f64 {
    // Median ARR multiple, saturating; no growth signal without a starting ARR.
    let growth_norm = if config.starting_arr > 0.0 {
        (arr.p50 / config.starting_arr / GROWTH_SATURATION_MULTIPLE).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let runway_norm = if config.time_horizon_months > 0 {
        (runway.p50 / config.time_horizon_months as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let blended = SCORE_W_SURVIVAL * survival_rate
        + SCORE_W_GROWTH * growth_norm
        + SCORE_W_RUNWAY * runway_norm;
    (100.0 * blended).clamp(0.0, 100.0)
}

fn rating_of(survival_rate: f64) -> Rating {
    if survival_rate >= RATING_ROBUST_MIN {
        Rating::Robust
    } else if survival_rate >= RATING_STABLE_MIN {
        Rating::Stable
    } else if survival_rate >= RATING_FRAGILE_MIN {
        Rating::Fragile
    } else {
        Rating::Critical
    }
}

fn confidence_of(arr: &PercentileBand) -> Confidence {
    if arr.p50 <= 0.0 {
        // Degenerate distribution: no meaningful dispersion measure.
        return Confidence::Low;
    }
    let spread = (arr.p90 - arr.p10) / arr.p50;
    if spread < CONFIDENCE_HIGH_MAX_SPREAD {
        Confidence::High
    } else if spread < CONFIDENCE_MEDIUM_MAX_SPREAD {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

// ─── Narrative selection ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RiskDimension {
    FundingPressure,
    MarketVolatility,
    ExecutionRisk,
    BurnDiscipline,
    DemandWeakness,
}

/// Deterministic, total mapping from the lever configuration to the dimension
/// contributing most to downside. Ties resolve in the listed order.
fn dominant_risk_dimension(levers: &LeverConfig) -> RiskDimension {
    let burn_pressure = (levers.fraction(Lever::HiringIntensity)
        + (1.0 - levers.fraction(Lever::OperatingDiscipline)))
        / 2.0;
    let candidates = [
        (RiskDimension::FundingPressure, levers.fraction(Lever::FundingPressure)),
        (RiskDimension::MarketVolatility, levers.fraction(Lever::MarketVolatility)),
        (RiskDimension::ExecutionRisk, levers.fraction(Lever::ExecutionRisk)),
        (RiskDimension::BurnDiscipline, burn_pressure),
        (RiskDimension::DemandWeakness, 1.0 - levers.fraction(Lever::DemandStrength)),
    ];

    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

fn primary_risk_text(dimension: RiskDimension, survival_rate: f64) -> String {
    let driver = match dimension {
        RiskDimension::FundingPressure => {
            "Funding pressure is the largest drag on the cash position"
        }
        RiskDimension::MarketVolatility => {
            "Market volatility drives the widest swings in revenue"
        }
        RiskDimension::ExecutionRisk => {
            "Execution risk is the main source of trajectory dispersion"
        }
        RiskDimension::BurnDiscipline => {
            "Hiring pace and operating discipline dominate the burn rate"
        }
        RiskDimension::DemandWeakness => {
            "Weak demand is the principal constraint on growth"
        }
    };
    if survival_rate < RATING_STABLE_MIN {
        format!("{driver}, and a majority of simulated paths exhaust cash before the horizon.")
    } else {
        format!("{driver} across the simulated paths.")
    }
}

fn recommendation_text(dimension: RiskDimension, survival_rate: f64) -> String {
    let action = match dimension {
        RiskDimension::FundingPressure => "reduce funding pressure or secure additional runway",
        RiskDimension::MarketVolatility => "hedge revenue concentration against market swings",
        RiskDimension::ExecutionRisk => "de-risk delivery before committing further spend",
        RiskDimension::BurnDiscipline => "slow hiring and tighten operating discipline",
        RiskDimension::DemandWeakness => "prioritize demand generation over cost programs",
    };
    if survival_rate >= RATING_ROBUST_MIN {
        format!("Position is resilient; to extend the margin of safety, {action}.")
    } else {
        format!("Survival odds are below the robust band: {action}.")
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::run_batch;

    #[test]
    fn percentile_nearest_rank_odd() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 50.0), 3.0, "odd N takes the middle element");
        assert_eq!(percentile(&sorted, 10.0), 1.0);
        assert_eq!(percentile(&sorted, 90.0), 5.0);
    }

    #[test]
    fn percentile_nearest_rank_even_takes_lower_middle() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 50.0), 2.0, "even N takes the lower-middle element");
        assert_eq!(percentile(&sorted, 25.0), 1.0);
        assert_eq!(percentile(&sorted, 75.0), 3.0);
    }

    #[test]
    fn percentile_single_and_empty() {
        assert_eq!(percentile(&[42.0], 10.0), 42.0);
        assert_eq!(percentile(&[42.0], 90.0), 42.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn empty_ensemble_reports_no_data_not_nan() {
        let config = SimulationConfig::default();
        let levers = LeverConfig::neutral();
        let result = aggregate(&[], &config, &levers, 1.0);
        assert_eq!(result.rating, Rating::NoData);
        assert_eq!(result.confidence, Confidence::None);
        assert_eq!(result.survival_rate, 0.0);
        assert!(result.score.is_finite());
        assert!(!result.primary_risk.is_empty());
        assert!(!result.recommendation.is_empty());
    }

    #[test]
    fn percentile_bands_are_ordered() {
        let config = SimulationConfig {
            iterations: 300,
            time_horizon_months: 24,
            starting_cash: 900_000.0,
            starting_arr: 2_000_000.0,
            monthly_burn: 60_000.0,
        };
        let mut levers = LeverConfig::neutral();
        levers.market_volatility = 85.0;
        let results = run_batch(&levers, &config, 300);
        let agg = aggregate(&results, &config, &levers, 0.0);

        assert!(agg.arr.p10 <= agg.arr.p50 && agg.arr.p50 <= agg.arr.p90);
        assert!(agg.arr.p25 <= agg.arr.p50 && agg.arr.p50 <= agg.arr.p75);
        assert!(agg.runway.p10 <= agg.runway.p50 && agg.runway.p50 <= agg.runway.p90);
    }

    #[test]
    fn narratives_track_dominant_lever() {
        let mut levers = LeverConfig::neutral();
        levers.funding_pressure = 95.0;
        let dimension = dominant_risk_dimension(&levers.sanitized());
        assert_eq!(dimension, RiskDimension::FundingPressure);
        assert!(primary_risk_text(dimension, 0.9).contains("Funding pressure"));
        assert!(recommendation_text(dimension, 0.3).contains("funding pressure"));
    }

    #[test]
    fn rating_thresholds() {
        assert_eq!(rating_of(0.80), Rating::Robust);
        assert_eq!(rating_of(0.75), Rating::Robust);
        assert_eq!(rating_of(0.60), Rating::Stable);
        assert_eq!(rating_of(0.40), Rating::Fragile);
        assert_eq!(rating_of(0.10), Rating::Critical);
    }
}
