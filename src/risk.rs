// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Risk Index Calculator

use crate::types::{RiskBand, RiskComponents, RiskIndexInputs, RiskIndexResult};

// ─── Blend weights and bands ────────────────────────────────────────────────

const WEIGHT_SURVIVAL_ELASTICITY: f64 = 0.35;
const WEIGHT_RUNWAY_ELASTICITY: f64 = 0.25;
const WEIGHT_VARIANCE_DISPERSION: f64 = 0.25;
const WEIGHT_DEBT_SENSITIVITY: f64 = 0.15;

/// Raw interquartile dispersion is clamped here before being halved into a
/// [0,1] component.
const DISPERSION_RAW_MAX: f64 = 2.0;

const BAND_LOW_MAX: f64 = 0.25;
const BAND_MODERATE_MAX: f64 = 0.50;
const BAND_ELEVATED_MAX: f64 = 0.75;

// Per-component reason thresholds: a sentence is emitted only when the
// component exceeds its own line.
const REASON_SURVIVAL_MIN: f64 = 0.20;
const REASON_RUNWAY_MIN: f64 = 0.35;
const REASON_DISPERSION_MIN: f64 = 0.50;
const REASON_DEBT_MIN: f64 = 0.40;

// ─── Calculator ─────────────────────────────────────────────────────────────

/// Blend baseline/shocked elasticities and ensemble dispersion into a single
/// 0–1 composite risk score with a band and explanations. Total: every
/// division site is guarded and the reasons list is never empty.
pub fn compute_risk_index(inputs: &RiskIndexInputs) -> RiskIndexResult {
    let survival_elasticity =
        (inputs.baseline_survival - inputs.shocked_survival).abs().clamp(0.0, 1.0);

    let runway_elasticity = if inputs.baseline_runway <= 0.0 {
        0.0
    } else {
        ((inputs.baseline_runway - inputs.shocked_runway).abs() / inputs.baseline_runway)
            .clamp(0.0, 1.0)
    };

    let raw_dispersion = if inputs.arr_p50 <= 0.0 {
        0.0
    } else {
        ((inputs.arr_p75 - inputs.arr_p25) / inputs.arr_p50).clamp(0.0, DISPERSION_RAW_MAX)
    };
    let variance_dispersion = raw_dispersion / 2.0;

    let funding_fraction = (inputs.funding_pressure_lever / 100.0).clamp(0.0, 1.0);
    let debt_sensitivity = (survival_elasticity * funding_fraction * 2.0).clamp(0.0, 1.0);

    let components = RiskComponents {
        survival_elasticity,
        runway_elasticity,
        variance_dispersion,
        debt_sensitivity,
    };

    let score = (WEIGHT_SURVIVAL_ELASTICITY * survival_elasticity
        + WEIGHT_RUNWAY_ELASTICITY * runway_elasticity
        + WEIGHT_VARIANCE_DISPERSION * variance_dispersion
        + WEIGHT_DEBT_SENSITIVITY * debt_sensitivity)
        .clamp(0.0, 1.0);

    RiskIndexResult {
        score,
        band: band_of(score),
        reasons: reasons_for(&components),
        components,
    }
}

fn band_of(score: f64) -> RiskBand {
    if score <= BAND_LOW_MAX {
        RiskBand::Low
    } else if score <= BAND_MODERATE_MAX {
        RiskBand::Moderate
    } else if score <= BAND_ELEVATED_MAX {
        RiskBand::Elevated
    } else {
        RiskBand::Critical
    }
}

fn reasons_for(c: &RiskComponents) -> Vec<String> {
    let mut reasons = Vec::new();
    if c.survival_elasticity > REASON_SURVIVAL_MIN {
        reasons.push(format!(
            "Survival odds drop {:.0} points under shock.",
            c.survival_elasticity * 100.0
        ));
    }
    if c.runway_elasticity > REASON_RUNWAY_MIN {
        reasons.push(format!(
            "Runway contracts {:.0}% of its baseline under shock.",
            c.runway_elasticity * 100.0
        ));
    }
    if c.variance_dispersion > REASON_DISPERSION_MIN {
        reasons.push(
            "Revenue outcomes are widely dispersed across the ensemble.".to_string(),
        );
    }
    if c.debt_sensitivity > REASON_DEBT_MIN {
        reasons.push(
            "Funding pressure amplifies the survival downside.".to_string(),
        );
    }
    if reasons.is_empty() {
        reasons.push("All risk components are within acceptable ranges.".to_string());
    }
    reasons
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn calm_inputs() -> RiskIndexInputs {
        RiskIndexInputs {
            baseline_survival: 0.96,
            shocked_survival: 0.92,
            baseline_runway: 34.0,
            shocked_runway: 31.0,
            arr_p25: 4_500_000.0,
            arr_p50: 5_000_000.0,
            arr_p75: 5_600_000.0,
            funding_pressure_lever: 40.0,
        }
    }

    #[test]
    fn calm_scenario_is_low_band_with_neutral_reason() {
        let result = compute_risk_index(&calm_inputs());
        assert_eq!(result.band, RiskBand::Low);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.reasons[0].contains("acceptable ranges"));
    }

    #[test]
    fn reasons_never_empty_even_on_zero_inputs() {
        let zeros = RiskIndexInputs {
            baseline_survival: 0.0,
            shocked_survival: 0.0,
            baseline_runway: 0.0,
            shocked_runway: 0.0,
            arr_p25: 0.0,
            arr_p50: 0.0,
            arr_p75: 0.0,
            funding_pressure_lever: 0.0,
        };
        let result = compute_risk_index(&zeros);
        assert!(!result.reasons.is_empty());
        assert!(result.score.is_finite());
        assert_eq!(result.components.runway_elasticity, 0.0, "zero baseline runway guard");
        assert_eq!(result.components.variance_dispersion, 0.0, "zero median ARR guard");
    }

    #[test]
    fn stressed_scenario_scores_high_with_specific_reasons() {
        let inputs = RiskIndexInputs {
            baseline_survival: 0.90,
            shocked_survival: 0.30,
            baseline_runway: 30.0,
            shocked_runway: 8.0,
            arr_p25: 1_000_000.0,
            arr_p50: 2_000_000.0,
            arr_p75: 4_200_000.0,
            funding_pressure_lever: 95.0,
        };
        let result = compute_risk_index(&inputs);

        assert!(result.score > 0.5, "score {} should be elevated", result.score);
        assert!(matches!(result.band, RiskBand::Elevated | RiskBand::Critical));
        assert!(result.reasons.len() >= 3);
        assert!((result.components.survival_elasticity - 0.6).abs() < 1e-12);
        assert!(result.components.debt_sensitivity > 0.9);
    }

    #[test]
    fn components_and_score_stay_in_unit_interval() {
        let extreme = RiskIndexInputs {
            baseline_survival: 1.0,
            shocked_survival: 0.0,
            baseline_runway: 1.0,
            shocked_runway: 500.0,
            arr_p25: 0.0,
            arr_p50: 1.0,
            arr_p75: 1_000_000.0,
            funding_pressure_lever: 900.0,
        };
        let r = compute_risk_index(&extreme);
        for v in [
            r.score,
            r.components.survival_elasticity,
            r.components.runway_elasticity,
            r.components.variance_dispersion,
            r.components.debt_sensitivity,
        ] {
            assert!((0.0..=1.0).contains(&v), "component {} out of [0,1]", v);
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(band_of(0.25), RiskBand::Low);
        assert_eq!(band_of(0.26), RiskBand::Moderate);
        assert_eq!(band_of(0.50), RiskBand::Moderate);
        assert_eq!(band_of(0.51), RiskBand::Elevated);
        assert_eq!(band_of(0.75), RiskBand::Elevated);
        assert_eq!(band_of(0.76), RiskBand::Critical);
    }
}
