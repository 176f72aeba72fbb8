// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Transmission Node Builder

use crate::types::{BaselineMetrics, Direction, Severity, ShockedBatchResult, TransmissionNode};

// ─── Deadbands and severity thresholds ──────────────────────────────────────

/// Relative change below which a move is noise, not a direction.
const PCT_DEADBAND: f64 = 0.02;

/// Absolute deadband per metric, in the metric's own unit. Keeps tiny
/// floating-point drift on near-zero baselines from being flagged as a move.
const ABS_DEADBAND_CHURN: f64 = 0.0005;
const ABS_DEADBAND_ARR: f64 = 1_000.0;
const ABS_DEADBAND_BURN: f64 = 1_000.0;
const ABS_DEADBAND_RUNWAY: f64 = 0.25;
const ABS_DEADBAND_SURVIVAL: f64 = 0.01;

/// Relative change at or above which severity is Medium / High.
const SEVERITY_MEDIUM_MIN: f64 = 0.10;
const SEVERITY_HIGH_MIN: f64 = 0.30;

// ─── Builder ────────────────────────────────────────────────────────────────

/// Pair a baseline and a shocked batch into the fixed 5-node causal chain
/// churn → revenue → burn → runway → survival. Pure and total: always exactly
/// five nodes, zero baselines yield a 0% delta rather than a division error.
pub fn build_transmission_nodes(
    baseline: &BaselineMetrics,
    shocked: &ShockedBatchResult,
) -> Vec<TransmissionNode> {
    vec![
        node(
            "churn",
            "Churn",
            baseline.implied_churn,
            shocked.implied_churn,
            ABS_DEADBAND_CHURN,
        ),
        node(
            "revenue",
            "Revenue",
            baseline.median_arr,
            shocked.median_arr,
            ABS_DEADBAND_ARR,
        ),
        node(
            "burn",
            "Burn",
            baseline.median_net_burn,
            shocked.median_net_burn,
            ABS_DEADBAND_BURN,
        ),
        node(
            "runway",
            "Runway",
            baseline.median_runway,
            shocked.median_runway,
            ABS_DEADBAND_RUNWAY,
        ),
        node(
            "survival",
            "Survival",
            baseline.survival_rate,
            shocked.survival_rate,
            ABS_DEADBAND_SURVIVAL,
        ),
    ]
}

fn node(
    id: &'static str,
    label: &'static str,
    baseline: f64,
    shocked: f64,
    abs_deadband: f64,
) -> TransmissionNode {
    let delta = shocked - baseline;
    let pct_delta = if baseline == 0.0 {
        0.0
    } else {
        delta / baseline.abs()
    };

    let direction = if delta.abs() <= abs_deadband || pct_delta.abs() <= PCT_DEADBAND {
        Direction::Neutral
    } else if delta > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };

    let severity = if direction == Direction::Neutral {
        Severity::Low
    } else if pct_delta.abs() >= SEVERITY_HIGH_MIN {
        Severity::High
    } else if pct_delta.abs() >= SEVERITY_MEDIUM_MIN {
        Severity::Medium
    } else {
        Severity::Low
    };

    TransmissionNode { id, label, baseline, shocked, delta, pct_delta, direction, severity }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
