// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit") - Lever Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Lever identifiers ──────────────────────────────────────────────────────

/// The nine strategic dials. Every lever is a 0–100 scalar; 50 is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lever {
    // growth
    PricingPower,
    DemandStrength,
    MarketExpansion,
    // efficiency
    HiringIntensity,
    OperatingDiscipline,
    AutomationLeverage,
    // risk
    FundingPressure,
    MarketVolatility,
    ExecutionRisk,
}

impl Lever {
    pub const ALL: [Lever; 9] = [
        Lever::PricingPower,
        Lever::DemandStrength,
        Lever::MarketExpansion,
        Lever::HiringIntensity,
        Lever::OperatingDiscipline,
        Lever::AutomationLeverage,
        Lever::FundingPressure,
        Lever::MarketVolatility,
        Lever::ExecutionRisk,
    ];

    /// JSON/store key for this lever (matches the dashboard lever store).
    pub fn key(&self) -> &'static str {
        match self {
            Self::PricingPower => "pricingPower",
            Self::DemandStrength => "demandStrength",
            Self::MarketExpansion => "marketExpansion",
            Self::HiringIntensity => "hiringIntensity",
            Self::OperatingDiscipline => "operatingDiscipline",
            Self::AutomationLeverage => "automationLeverage",
            Self::FundingPressure => "fundingPressure",
            Self::MarketVolatility => "marketVolatility",
            Self::ExecutionRisk => "executionRisk",
        }
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Boundary errors for malformed lever input. Out-of-range values are never
/// an error (they clamp); a missing lever is.
#[derive(Debug, thiserror::Error)]
pub enum LeverError {
    #[error("missing lever: {0}")]
    MissingLever(&'static str),

    #[error("lever value is not finite: {key} = {value}")]
    NonFiniteValue { key: &'static str, value: f64 },
}

// ─── LeverConfig ────────────────────────────────────────────────────────────

pub const LEVER_MIN: f64 = 0.0;
pub const LEVER_MAX: f64 = 100.0;
pub const LEVER_NEUTRAL: f64 = 50.0;

/// One complete lever configuration. Immutable once handed to a simulation
/// call; shocks copy first (see `shock::apply_shock`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LeverConfig {
    pub pricing_power: f64,
    pub demand_strength: f64,
    pub market_expansion: f64,
    pub hiring_intensity: f64,
    pub operating_discipline: f64,
    pub automation_leverage: f64,
    pub funding_pressure: f64,
    pub market_volatility: f64,
    pub execution_risk: f64,
}

impl Default for LeverConfig {
    fn default() -> Self {
        Self::neutral()
    }
}

impl LeverConfig {
    /// All nine dials at 50.
    pub fn neutral() -> Self {
        Self {
            pricing_power: LEVER_NEUTRAL,
            demand_strength: LEVER_NEUTRAL,
            market_expansion: LEVER_NEUTRAL,
            hiring_intensity: LEVER_NEUTRAL,
            operating_discipline: LEVER_NEUTRAL,
            automation_leverage: LEVER_NEUTRAL,
            funding_pressure: LEVER_NEUTRAL,
            market_volatility: LEVER_NEUTRAL,
            execution_risk: LEVER_NEUTRAL,
        }
    }

    pub fn get(&self, lever: Lever) -> f64 {
        match lever {
            Lever::PricingPower => self.pricing_power,
            Lever::DemandStrength => self.demand_strength,
            Lever::MarketExpansion => self.market_expansion,
            Lever::HiringIntensity => self.hiring_intensity,
            Lever::OperatingDiscipline => self.operating_discipline,
            Lever::AutomationLeverage => self.automation_leverage,
            Lever::FundingPressure => self.funding_pressure,
            Lever::MarketVolatility => self.market_volatility,
            Lever::ExecutionRisk => self.execution_risk,
        }
    }

    pub fn set(&mut self, lever: Lever, value: f64) {
        let v = clamp_lever(value);
        match lever {
            Lever::PricingPower => self.pricing_power = v,
            Lever::DemandStrength => self.demand_strength = v,
            Lever::MarketExpansion => self.market_expansion = v,
            Lever::HiringIntensity => self.hiring_intensity = v,
            Lever::OperatingDiscipline => self.operating_discipline = v,
            Lever::AutomationLeverage => self.automation_leverage = v,
            Lever::FundingPressure => self.funding_pressure = v,
            Lever::MarketVolatility => self.market_volatility = v,
            Lever::ExecutionRisk => self.execution_risk = v,
        }
    }

    /// Copy with every lever clamped to [0,100]. Out-of-range input degrades,
    /// it never rejects.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for lever in Lever::ALL {
            out.set(lever, self.get(lever));
        }
        out
    }

    /// Build from an untyped key→value map (the shape the dashboard's lever
    /// store ships across the boundary). Fails fast on a missing lever or a
    /// non-finite value — before any simulation work begins.
    pub fn from_map(values: &HashMap<String, f64>) -> Result<Self, LeverError> {
        let mut config = Self::neutral();
        for lever in Lever::ALL {
            let key = lever.key();
            let raw = *values
                .get(key)
                .ok_or(LeverError::MissingLever(key))?;
            if !raw.is_finite() {
                return Err(LeverError::NonFiniteValue { key, value: raw });
            }
            config.set(lever, raw);
        }
        Ok(config)
    }

    /// Lever as a fraction of full scale, in [0,1].
    pub fn fraction(&self, lever: Lever) -> f64 {
        clamp_lever(self.get(lever)) / LEVER_MAX
    }

    /// Lever centered on neutral, in [-1,1].
    pub fn centered(&self, lever: Lever) -> f64 {
        (clamp_lever(self.get(lever)) - LEVER_NEUTRAL) / LEVER_NEUTRAL
    }
}

fn clamp_lever(value: f64) -> f64 {
    if value.is_nan() {
        return LEVER_NEUTRAL;
    }
    value.clamp(LEVER_MIN, LEVER_MAX)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
