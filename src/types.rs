// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Type Definitions

use serde::{Deserialize, Serialize};

// ─── SimulationConfig ───────────────────────────────────────────────────────

pub const DEFAULT_ITERATIONS: u32 = 10_000;
pub const DEFAULT_HORIZON_MONTHS: u32 = 36;

/// One Monte Carlo run's fixed parameters. Created once per run and never
/// mutated mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub iterations: u32,
    pub time_horizon_months: u32,
    pub starting_cash: f64,
    pub starting_arr: f64,
    pub monthly_burn: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            time_horizon_months: DEFAULT_HORIZON_MONTHS,
            starting_cash: 0.0,
            starting_arr: 0.0,
            monthly_burn: 0.0,
        }
    }
}

impl SimulationConfig {
    /// Copy with negative or non-finite financial inputs clamped to zero.
    /// A zero horizon is left as-is; it simply produces zero-month paths.
    pub fn sanitized(&self) -> Self {
        Self {
            iterations: self.iterations,
            time_horizon_months: self.time_horizon_months,
            starting_cash: non_negative(self.starting_cash),
            starting_arr: non_negative(self.starting_arr),
            monthly_burn: non_negative(self.monthly_burn),
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

// ─── Per-path results ───────────────────────────────────────────────────────

/// One simulated month. Month `t` depends only on month `t-1` and the path's
/// seed-derived stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    pub month: u32,
    pub cash: f64,
    pub arr: f64,
    /// Net cash outflow this month (negative when cash-flow positive).
    pub net_burn: f64,
    pub growth_rate: f64,
    pub churn_rate: f64,
}

/// One full trajectory from one seed. Value object; never mutated after the
/// simulator returns it. The snapshot sequence ends the month cash runs out —
/// it is not padded to the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinglePathResult {
    pub seed: u64,
    pub final_arr: f64,
    pub final_runway: f64,
    pub did_survive: bool,
    pub survival_months: u32,
    pub monthly_snapshots: Vec<MonthlySnapshot>,
}

// ─── Aggregate results ──────────────────────────────────────────────────────

/// Nearest-rank percentile band for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl PercentileBand {
    pub fn zero() -> Self {
        Self { p10: 0.0, p25: 0.0, p50: 0.0, p75: 0.0, p90: 0.0 }
    }
}

/// Qualitative verdict rating. Thresholds on survival rate are part of the
/// public contract (see `aggregate.rs` constants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Robust,
    Stable,
    Fragile,
    Critical,
    /// Distinct state for an empty ensemble (iterations = 0). Never NaN.
    NoData,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Robust => "Robust",
            Self::Stable => "Stable",
            Self::Fragile => "Fragile",
            Self::Critical => "Critical",
            Self::NoData => "No Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
    /// Paired with `Rating::NoData`.
    None,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::None => "None",
        }
    }
}

/// The reduced ensemble: everything the verdict renderer and risk engine
/// consume. Immutable; one per (levers, config) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub sample_count: usize,
    pub survival_rate: f64,
    pub arr: PercentileBand,
    pub runway: PercentileBand,
    /// Composite score in [0,100].
    pub score: f64,
    pub rating: Rating,
    pub confidence: Confidence,
    pub primary_risk: String,
    pub recommendation: String,
    pub elapsed_ms: f64,
}

// ─── Shock results ──────────────────────────────────────────────────────────

/// Step-function classification of shocked survival rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShockClassification {
    Robust,
    Stable,
    Fragile,
    Critical,
}

impl ShockClassification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Robust => "Robust",
            Self::Stable => "Stable",
            Self::Fragile => "Fragile",
            Self::Critical => "Critical",
        }
    }
}

/// Summary of one shocked batch at a given severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShockedBatchResult {
    pub sigma: u8,
    pub run_count: usize,
    pub survival_rate: f64,
    pub median_arr: f64,
    pub median_runway: f64,
    pub median_net_burn: f64,
    /// Median across paths of the mean monthly churn rate.
    pub implied_churn: f64,
    pub classification: ShockClassification,
}

/// The unshocked side of a transmission comparison. Same metric set as a
/// shocked batch; built from a sigma = 0 run through the same engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineMetrics {
    pub survival_rate: f64,
    pub median_arr: f64,
    pub median_runway: f64,
    pub median_net_burn: f64,
    pub implied_churn: f64,
}

impl From<&ShockedBatchResult> for BaselineMetrics {
    fn from(batch: &ShockedBatchResult) -> Self {
        Self {
            survival_rate: batch.survival_rate,
            median_arr: batch.median_arr,
            median_runway: batch.median_runway,
            median_net_burn: batch.median_net_burn,
            implied_churn: batch.implied_churn,
        }
    }
}

// ─── Transmission nodes ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One stage of the fixed causal chain churn → revenue → burn → runway →
/// survival. Order carries the narrative; each node is otherwise independent.
/// Output-only: the ids are static, so this serializes but never parses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransmissionNode {
    pub id: &'static str,
    pub label: &'static str,
    pub baseline: f64,
    pub shocked: f64,
    pub delta: f64,
    /// (shocked - baseline) / |baseline|; defined as 0 when baseline is 0.
    pub pct_delta: f64,
    pub direction: Direction,
    pub severity: Severity,
}

// ─── Risk index ─────────────────────────────────────────────────────────────

/// Everything the risk index needs from a baseline + shocked pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskIndexInputs {
    pub baseline_survival: f64,
    pub shocked_survival: f64,
    pub baseline_runway: f64,
    pub shocked_runway: f64,
    pub arr_p25: f64,
    pub arr_p50: f64,
    pub arr_p75: f64,
    /// Raw 0–100 funding pressure lever value.
    pub funding_pressure_lever: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Moderate,
    Elevated,
    Critical,
}

impl RiskBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Elevated => "Elevated",
            Self::Critical => "Critical",
        }
    }
}

/// Per-component breakdown, each clamped to [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskComponents {
    pub survival_elasticity: f64,
    pub runway_elasticity: f64,
    pub variance_dispersion: f64,
    pub debt_sensitivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskIndexResult {
    /// Composite risk score in [0,1].
    pub score: f64,
    pub band: RiskBand,
    /// Human-readable explanations; never empty.
    pub reasons: Vec<String>,
    pub components: RiskComponents,
}

// ─── Driver progress ────────────────────────────────────────────────────────

/// Checkpoint emitted after each chunk of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkProgress {
    pub completed: usize,
    pub total: usize,
    pub done: bool,
}
