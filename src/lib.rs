// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Vantage Strategic Planning Suite ("The Summit")

pub mod levers;
pub mod types;

pub mod aggregate;
pub mod driver;
pub mod path;
pub mod risk;
pub mod shock;
pub mod transmission;

pub use levers::{Lever, LeverConfig, LeverError};
pub use types::*;

pub use aggregate::aggregate;
pub use driver::{run_batch, BatchRun, DEFAULT_CHUNK_SIZE};
pub use path::simulate_path;
pub use shock::{apply_shock, DEFAULT_SHOCK_RUNS};

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

fn parse<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(Into::into)
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

// ─── WASM Interface: one-shot calls ─────────────────────────────────────────

/// Simulate one trajectory. Deterministic per (seed, levers, config).
#[wasm_bindgen(js_name = runSingleSimulation)]
pub fn run_single_simulation(
    seed: u32,
    levers: JsValue,
    config: JsValue,
) -> Result<JsValue, JsValue> {
    let levers: LeverConfig = parse(levers)?;
    let config: SimulationConfig = parse(config)?;
    Ok(to_js(&path::simulate_path(seed as u64, &levers, &config)))
}

/// Aggregate a raw ensemble into a `MonteCarloResult`.
#[wasm_bindgen(js_name = processSimulationResults)]
pub fn process_simulation_results(
    results: JsValue,
    config: JsValue,
    levers: JsValue,
    elapsed_ms: f64,
) -> Result<JsValue, JsValue> {
    let results: Vec<SinglePathResult> = parse(results)?;
    let config: SimulationConfig = parse(config)?;
    let levers: LeverConfig = parse(levers)?;
    Ok(to_js(&aggregate::aggregate(&results, &config, &levers, elapsed_ms)))
}

/// Run a σ-shocked batch (default 200 paths when `runs` is omitted).
#[wasm_bindgen(js_name = computeShockedBatch)]
pub fn compute_shocked_batch(
    levers: JsValue,
    config: JsValue,
    sigma: u8,
    runs: Option<usize>,
) -> Result<JsValue, JsValue> {
    let levers: LeverConfig = parse(levers)?;
    let config: SimulationConfig = parse(config)?;
    let batch = shock::compute_shocked_batch(
        &levers,
        &config,
        sigma,
        runs.unwrap_or(DEFAULT_SHOCK_RUNS),
    );
    Ok(to_js(&batch))
}

/// Baseline-side metrics for a transmission comparison (σ = 0 batch).
#[wasm_bindgen(js_name = computeBaselineMetrics)]
pub fn compute_baseline_metrics(
    levers: JsValue,
    config: JsValue,
    runs: Option<usize>,
) -> Result<JsValue, JsValue> {
    let levers: LeverConfig = parse(levers)?;
    let config: SimulationConfig = parse(config)?;
    let metrics = shock::compute_baseline_metrics(
        &levers,
        &config,
        runs.unwrap_or(DEFAULT_SHOCK_RUNS),
    );
    Ok(to_js(&metrics))
}

/// Pair baseline and shocked statistics into the 5-node causal chain.
#[wasm_bindgen(js_name = buildTransmissionNodes)]
pub fn build_transmission_nodes(
    baseline: JsValue,
    shocked: JsValue,
) -> Result<JsValue, JsValue> {
    let baseline: BaselineMetrics = parse(baseline)?;
    let shocked: ShockedBatchResult = parse(shocked)?;
    Ok(to_js(&transmission::build_transmission_nodes(&baseline, &shocked)))
}

/// Composite 0–1 risk score with band, reasons, and component breakdown.
#[wasm_bindgen(js_name = computeRiskIndex)]
pub fn compute_risk_index(inputs: JsValue) -> Result<JsValue, JsValue> {
    let inputs: RiskIndexInputs = parse(inputs)?;
    Ok(to_js(&risk::compute_risk_index(&inputs)))
}

// ─── WASM Interface: chunked batch runs ─────────────────────────────────────

/// A UI-driven Monte Carlo run. The host calls `run_chunk` from its event
/// loop (reporting progress between calls) and `finish` exactly once when the
/// run is complete; a run abandoned before `finish` publishes nothing.
#[wasm_bindgen]
pub struct ScenarioRun {
    run: Option<BatchRun>,
    levers: LeverConfig,
    config: SimulationConfig,
}

#[wasm_bindgen]
impl ScenarioRun {
    /// Malformed input (missing levers, wrong shape) fails here, before any
    /// simulation work begins.
    #[wasm_bindgen(constructor)]
    pub fn new(levers: JsValue, config: JsValue) -> Result<ScenarioRun, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let levers: LeverConfig = parse(levers)?;
        let config: SimulationConfig = parse(config)?;
        let run = BatchRun::new(&levers, &config, config.sanitized().iterations as usize);
        Ok(Self { run: Some(run), levers, config })
    }

    /// Simulate up to `chunk_size` further paths (0 picks the default) and
    /// return a progress checkpoint.
    #[wasm_bindgen(js_name = runChunk)]
    pub fn run_chunk(&mut self, chunk_size: usize) -> Result<JsValue, JsValue> {
        let run = self
            .run
            .as_mut()
            .ok_or_else(|| JsValue::from_str("run already finished"))?;
        let size = if chunk_size == 0 { DEFAULT_CHUNK_SIZE } else { chunk_size };
        Ok(to_js(&run.run_chunk(size)))
    }

    pub fn progress(&self) -> JsValue {
        match &self.run {
            Some(run) => to_js(&run.progress()),
            None => JsValue::NULL,
        }
    }

    /// Aggregate and publish the one immutable result. Errors if the batch
    /// has not completed — partial state is never published.
    pub fn finish(&mut self, elapsed_ms: f64) -> Result<JsValue, JsValue> {
        let done = self.run.as_ref().map(|r| r.is_complete()).unwrap_or(false);
        if !done {
            return Err(JsValue::from_str("batch not complete"));
        }
        let run = self
            .run
            .take()
            .ok_or_else(|| JsValue::from_str("run already finished"))?;
        let results = run.into_results();
        Ok(to_js(&aggregate::aggregate(&results, &self.config, &self.levers, elapsed_ms)))
    }

    /// Discard the run without publishing anything.
    pub fn abandon(&mut self) {
        self.run = None;
    }
}
