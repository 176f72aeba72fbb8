// Scenario Definitions — named lever presets with pass criteria
// Each scenario is one (levers, config) pair; all behavior lives in the engine

use summit_engine::{LeverConfig, SimulationConfig};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub levers: LeverConfig,
    pub config: SimulationConfig,
    pub criteria: PassCriteria,
}

pub struct PassCriteria {
    pub min_survival_rate: Option<f64>,
    pub max_survival_rate: Option<f64>,
    pub min_score: Option<f64>,
    /// σ = 3 must not classify as Robust (stress scenarios).
    pub require_sigma3_downgrade: bool,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            min_survival_rate: None,
            max_survival_rate: None,
            min_score: None,
            require_sigma3_downgrade: false,
        }
    }
}

fn levers(adjust: impl Fn(&mut LeverConfig)) -> LeverConfig {
    let mut l = LeverConfig::neutral();
    adjust(&mut l);
    l
}

fn config(cash: f64, arr: f64, burn: f64) -> SimulationConfig {
    SimulationConfig {
        iterations: 10_000,
        time_horizon_months: 36,
        starting_cash: cash,
        starting_arr: arr,
        monthly_burn: burn,
    }
}

// ─── Catalog ────────────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // The reference fixture: well-capitalized company at neutral levers.
        Scenario {
            name: "BASELINE_NEUTRAL",
            label: "Baseline: All Levers Neutral",
            category: "baseline",
            levers: LeverConfig::neutral(),
            config: config(4_000_000.0, 4_800_000.0, 47_000.0),
            criteria: PassCriteria {
                min_survival_rate: Some(0.5),
                min_score: Some(50.0),
                ..Default::default()
            },
        },
        Scenario {
            name: "DISCIPLINED_OPERATOR",
            label: "Efficiency: Disciplined Operator",
            category: "efficiency",
            levers: levers(|l| {
                l.operating_discipline = 90.0;
                l.automation_leverage = 80.0;
                l.hiring_intensity = 20.0;
            }),
            config: config(4_000_000.0, 4_800_000.0, 47_000.0),
            criteria: PassCriteria {
                min_survival_rate: Some(0.9),
                ..Default::default()
            },
        },
        Scenario {
            name: "AGGRESSIVE_GROWTH",
            label: "Growth: Aggressive Expansion",
            category: "growth",
            levers: levers(|l| {
                l.hiring_intensity = 85.0;
                l.demand_strength = 75.0;
                l.pricing_power = 65.0;
                l.market_expansion = 80.0;
            }),
            config: config(2_500_000.0, 3_000_000.0, 250_000.0),
            criteria: PassCriteria {
                require_sigma3_downgrade: true,
                ..Default::default()
            },
        },
        Scenario {
            name: "BOOTSTRAPPED",
            label: "Growth: Bootstrapped Operator",
            category: "growth",
            levers: levers(|l| {
                l.operating_discipline = 70.0;
                l.automation_leverage = 70.0;
            }),
            config: config(250_000.0, 600_000.0, 15_000.0),
            criteria: PassCriteria {
                min_survival_rate: Some(0.6),
                ..Default::default()
            },
        },
        Scenario {
            name: "CASH_CRUNCH",
            label: "Stress: Cash Crunch",
            category: "stress",
            levers: LeverConfig::neutral(),
            config: config(600_000.0, 1_500_000.0, 120_000.0),
            criteria: PassCriteria {
                max_survival_rate: Some(0.75),
                require_sigma3_downgrade: true,
                ..Default::default()
            },
        },
        Scenario {
            name: "FUNDING_SQUEEZE",
            label: "Stress: Maximum Funding Pressure",
            category: "stress",
            levers: levers(|l| l.funding_pressure = 100.0),
            config: config(4_000_000.0, 4_800_000.0, 47_000.0),
            criteria: PassCriteria {
                max_survival_rate: Some(0.35),
                require_sigma3_downgrade: true,
                ..Default::default()
            },
        },
        Scenario {
            name: "VOLATILE_MARKET",
            label: "Stress: High Volatility",
            category: "stress",
            levers: levers(|l| {
                l.market_volatility = 90.0;
                l.execution_risk = 70.0;
            }),
            config: config(2_000_000.0, 4_800_000.0, 47_000.0),
            criteria: PassCriteria {
                require_sigma3_downgrade: true,
                ..Default::default()
            },
        },
        Scenario {
            name: "DEMAND_DROUGHT",
            label: "Stress: Demand Drought",
            category: "stress",
            levers: levers(|l| {
                l.demand_strength = 10.0;
                l.market_expansion = 30.0;
            }),
            config: config(1_500_000.0, 2_400_000.0, 80_000.0),
            criteria: PassCriteria {
                max_survival_rate: Some(0.35),
                ..Default::default()
            },
        },
    ]
}
