// Summit Scenario Runner v0.1.0 — planning-model validation suite
// Full Monte Carlo per scenario, σ sweep, risk index, JSON audit artifact
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios
//   cargo run --release --bin bench -- --iterations 2000  # Smaller batches
//   cargo run --release --bin bench -- FUNDING_SQUEEZE  # Filter by name

mod report;
mod scenarios;

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use summit_engine::shock::{compute_shocked_batch, SIGMA_MAX};
use summit_engine::{
    aggregate, risk, run_batch, transmission, BaselineMetrics, RiskIndexInputs,
    ShockClassification, DEFAULT_SHOCK_RUNS,
};

use report::*;
use scenarios::*;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    iterations: Option<usize>,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs { iterations: None, filter: None };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--iterations" => {
                i += 1;
                if i < args.len() {
                    cli.iterations = args[i].parse().ok();
                }
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Scenario execution ─────────────────────────────────────────────────────

fn run_scenario(scenario: &Scenario, iterations: usize) -> ScenarioReport {
    let start = Instant::now();
    let levers = scenario.levers;
    let config = scenario.config;

    let ensemble = run_batch(&levers, &config, iterations);
    let elapsed_batch = start.elapsed().as_millis() as f64;
    let verdict = aggregate(&ensemble, &config, &levers, elapsed_batch);

    let final_arr = Stats::from_samples(
        &ensemble.iter().map(|p| p.final_arr).collect::<Vec<_>>(),
    );
    let final_runway = Stats::from_samples(
        &ensemble.iter().map(|p| p.final_runway).collect::<Vec<_>>(),
    );
    let survival_months = Stats::from_samples(
        &ensemble.iter().map(|p| p.survival_months as f64).collect::<Vec<_>>(),
    );
    drop(ensemble);

    let sigma_sweep: Vec<_> = (0..=SIGMA_MAX)
        .map(|sigma| compute_shocked_batch(&levers, &config, sigma, DEFAULT_SHOCK_RUNS))
        .collect();

    // σ = 2 is the dashboard's default stress view; risk and transmission
    // compare against it.
    let baseline = BaselineMetrics::from(&sigma_sweep[0]);
    let stressed = sigma_sweep[2];
    let transmission = transmission::build_transmission_nodes(&baseline, &stressed);

    let risk_index = risk::compute_risk_index(&RiskIndexInputs {
        baseline_survival: verdict.survival_rate,
        shocked_survival: stressed.survival_rate,
        baseline_runway: verdict.runway.p50,
        shocked_runway: stressed.median_runway,
        arr_p25: verdict.arr.p25,
        arr_p50: verdict.arr.p50,
        arr_p75: verdict.arr.p75,
        funding_pressure_lever: levers.funding_pressure,
    });

    let sigma3 = &sigma_sweep[SIGMA_MAX as usize];
    let mut pass = true;
    if let Some(min) = scenario.criteria.min_survival_rate {
        if verdict.survival_rate < min {
            pass = false;
        }
    }
    if let Some(max) = scenario.criteria.max_survival_rate {
        if verdict.survival_rate > max {
            pass = false;
        }
    }
    if let Some(min) = scenario.criteria.min_score {
        if verdict.score < min {
            pass = false;
        }
    }
    if scenario.criteria.require_sigma3_downgrade
        && sigma3.classification == ShockClassification::Robust
    {
        pass = false;
    }

    ScenarioReport {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        iterations,
        pass,
        verdict,
        final_arr,
        final_runway,
        survival_months,
        sigma_sweep,
        risk_index,
        transmission,
        elapsed_ms: start.elapsed().as_millis(),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios
                .iter()
                .filter(|s| {
                    s.name.to_lowercase().contains(&f_lower)
                        || s.label.to_lowercase().contains(&f_lower)
                        || s.category.to_lowercase().contains(&f_lower)
                })
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    println!("\n  Summit Scenario Runner v0.1.0");
    println!("  PRNG: ChaCha8Rng | Scenarios: {}", to_run.len());
    println!(
        "  {:<36} {:>6} {:>6} {:>9} {:>6} {:>9} {:>9} {:>7}",
        "Scenario", "Surv%", "Score", "Rating", "Risk", "Band", "σ3 Class", "Time"
    );
    println!("  {}", "-".repeat(96));

    let suite_start = Instant::now();
    let mut reports = Vec::new();

    for scenario in &to_run {
        let iterations = cli
            .iterations
            .unwrap_or(scenario.config.iterations as usize);
        let report = run_scenario(scenario, iterations);

        let sigma3 = report
            .sigma_sweep
            .last()
            .expect("sweep always holds sigma 0..=3");
        let status = if report.pass { "PASS" } else { "FAIL" };
        println!(
            "  {:<36} {:>5.1}% {:>6.1} {:>9} {:>6.2} {:>9} {:>9} {:>5}ms  {}",
            report.scenario,
            report.verdict.survival_rate * 100.0,
            report.verdict.score,
            report.verdict.rating.label(),
            report.risk_index.score,
            report.risk_index.band.label(),
            sigma3.classification.label(),
            report.elapsed_ms,
            status,
        );

        reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = reports.len();
    let passed = reports.iter().filter(|r| r.pass).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(96));
    println!(
        "  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total,
        passed,
        failed,
        suite_elapsed.as_secs_f64()
    );

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before epoch")
        .as_millis();
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: "0.1.0",
        prng: "ChaCha8Rng",
        iterations_per_scenario: cli.iterations.unwrap_or(0),
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        scenarios: reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    if !dir.exists() {
        std::fs::create_dir_all(dir).expect("Failed to create benchmark-results/");
    }
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(&report).expect("Failed to serialize");
    std::fs::write(&path, &json).expect("Failed to write benchmark file");
    println!("  Results saved to: {}\n", path.display());

    if failed > 0 {
        std::process::exit(1);
    }
}
