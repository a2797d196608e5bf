//! RadMeter Headless Harness
//!
//! Analyzes a single reading from the command line, or validates the
//! radiation logic against a bundled scenario table and property sweeps.
//! Runs entirely in-process with no UI and no sensors.
//!
//! Usage:
//!   cargo run -p radmeter-simtest
//!   cargo run -p radmeter-simtest -- --verbose
//!   cargo run -p radmeter-simtest -- --value 5 --unit mSv/h --hours 2
//!   cargo run -p radmeter-simtest -- --value 0.3 --json

use std::process::ExitCode;

use clap::Parser;
use radmeter_logic::classify::{self, DangerTier, HOURS_PER_YEAR};
use radmeter_logic::health::{self, HealthEffectBundle, DEFAULT_EXPOSURE_HOURS};
use radmeter_logic::report::{self, ReadingSummary};
use radmeter_logic::units::{self, RadiationUnit, Reading};
use radmeter_logic::RadiationError;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

// ── Scenario table ──────────────────────────────────────────────────────
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Deserialize)]
struct ScenarioSpec {
    name: String,
    value: f64,
    unit: String,
    #[serde(default = "default_hours")]
    hours: f64,
    #[serde(default)]
    tier: Option<DangerTier>,
    #[serde(default)]
    percentage: Option<u8>,
    #[serde(default)]
    display: Option<String>,
    #[serde(default)]
    survival: Option<(f64, f64)>,
    #[serde(default)]
    immediate_effects: Option<usize>,
    /// Expected error kind: "InvalidUnit" or "InvalidInput".
    #[serde(default)]
    error: Option<String>,
}

fn default_hours() -> f64 {
    DEFAULT_EXPOSURE_HOURS
}

// ── Command line ────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "radmeter-simtest",
    about = "Analyze a radiation reading or run the RadMeter validation suite"
)]
struct Args {
    /// Reading to analyze. Without it the validation suite runs.
    #[arg(long, allow_negative_numbers = true)]
    value: Option<f64>,

    /// Unit of --value (uSv/h, mSv/h, Sv/h).
    #[arg(long, default_value = "uSv/h")]
    unit: String,

    /// Exposure duration in hours.
    #[arg(long, default_value_t = DEFAULT_EXPOSURE_HOURS, allow_negative_numbers = true)]
    hours: f64,

    /// Print the analysis as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Show passing checks and debug logs.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    summary: &'a ReadingSummary,
    bundle: &'a HealthEffectBundle,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.value {
        Some(value) => match analyze_reading(value, &args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::from(2)
            }
        },
        None => run_suite(args.verbose),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RADMETER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Single reading ──────────────────────────────────────────────────────

fn analyze_reading(value: f64, args: &Args) -> Result<(), RadiationError> {
    let reading = Reading::parse(value, &args.unit)?;
    let intensity = reading.validate()?;
    let summary = report::summarize(intensity)?;
    let bundle = health::analyze(intensity, args.hours)?;
    log::info!(
        "Reading {} {} → {} over {}h",
        reading.value,
        reading.unit,
        summary.tier,
        args.hours
    );

    if args.json {
        let output = AnalysisOutput {
            summary: &summary,
            bundle: &bundle,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize analysis: {}", e),
        }
    } else {
        println!("{}", summary);
        println!();
        print!("{}", report::format_report(&bundle));
    }
    Ok(())
}

// ── Validation suite ────────────────────────────────────────────────────

fn run_suite(verbose: bool) -> ExitCode {
    println!("=== RadMeter Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Scenario table
    results.extend(validate_scenarios());

    // 2. Classification sweep
    results.extend(validate_classification());

    // 3. Gauge & safe exposure
    results.extend(validate_gauge());

    // 4. Units
    results.extend(validate_units());

    // 5. Health engine & report
    results.extend(validate_health());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Log-spaced intensities from 0.01 μSv/h to 1e9 μSv/h, plus zero.
fn intensity_sweep() -> Vec<f64> {
    std::iter::once(0.0)
        .chain((-20..=90).map(|step| 10f64.powf(step as f64 / 10.0)))
        .collect()
}

// ── 1. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios() -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    let scenarios: Vec<ScenarioSpec> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "scenarios_not_empty".into(),
        passed: !scenarios.is_empty(),
        detail: format!("{} scenarios loaded", scenarios.len()),
    });

    for spec in &scenarios {
        let (passed, detail) = check_scenario(spec);
        results.push(TestResult {
            name: format!("scenario_{}", spec.name),
            passed,
            detail,
        });
    }

    results
}

fn check_scenario(spec: &ScenarioSpec) -> (bool, String) {
    let outcome = Reading::parse(spec.value, &spec.unit)
        .and_then(|reading| reading.validate())
        .and_then(|intensity| {
            let bundle = health::analyze(intensity, spec.hours)?;
            let summary = report::summarize(intensity)?;
            Ok((bundle, summary))
        });

    let (bundle, summary) = match (outcome, &spec.error) {
        (Err(e), Some(expected)) => {
            let kind = match e {
                RadiationError::InvalidUnit(_) => "InvalidUnit",
                RadiationError::InvalidInput { .. } => "InvalidInput",
            };
            return (kind == expected.as_str(), format!("rejected as {}", kind));
        }
        (Err(e), None) => return (false, format!("unexpected error: {}", e)),
        (Ok(_), Some(expected)) => return (false, format!("expected {}, got a bundle", expected)),
        (Ok(pair), None) => pair,
    };

    let mut mismatches = Vec::new();
    if let Some(tier) = spec.tier {
        if bundle.tier != tier {
            mismatches.push(format!("tier {} != {}", bundle.tier, tier));
        }
    }
    if let Some(pct) = spec.percentage {
        if summary.percentage != pct {
            mismatches.push(format!("percentage {} != {}", summary.percentage, pct));
        }
    }
    if let Some(display) = &spec.display {
        if &summary.display != display {
            mismatches.push(format!("display {:?} != {:?}", summary.display, display));
        }
    }
    if let Some((untreated, treated)) = spec.survival {
        if bundle.survival_untreated != untreated || bundle.survival_treated != treated {
            mismatches.push(format!(
                "survival {}/{} != {}/{}",
                bundle.survival_untreated, bundle.survival_treated, untreated, treated
            ));
        }
    }
    if let Some(count) = spec.immediate_effects {
        if bundle.immediate_effects.len() != count {
            mismatches.push(format!(
                "immediate effects {} != {}",
                bundle.immediate_effects.len(),
                count
            ));
        }
    }

    if mismatches.is_empty() {
        (true, format!("{} ({})", summary, bundle.medical_classification))
    } else {
        (false, mismatches.join("; "))
    }
}

// ── 2. Classification ───────────────────────────────────────────────────

fn validate_classification() -> Vec<TestResult> {
    println!("--- Classification ---");
    let mut results = Vec::new();

    let sweep = intensity_sweep();
    let monotonic = sweep
        .windows(2)
        .all(|w| classify::classify(w[0]) <= classify::classify(w[1]));
    results.push(TestResult {
        name: "classify_monotonic".into(),
        passed: monotonic,
        detail: format!("{} log-spaced intensities", sweep.len()),
    });

    let boundaries_exact = DangerTier::ALL.iter().all(|&tier| {
        let lower = tier.lower_threshold();
        classify::classify(lower) == tier
            && (lower == 0.0 || classify::classify(lower * 0.999) < tier)
    });
    results.push(TestResult {
        name: "classify_boundaries".into(),
        passed: boundaries_exact,
        detail: "0.5 / 2 / 100 / 1000 fall into the higher tier".into(),
    });

    results
}

// ── 3. Gauge & Safe Exposure ────────────────────────────────────────────

fn validate_gauge() -> Vec<TestResult> {
    println!("--- Gauge & Safe Exposure ---");
    let mut results = Vec::new();
    let sweep = intensity_sweep();

    let percentages: Vec<u8> = sweep.iter().map(|&i| classify::percentage_of_scale(i)).collect();
    results.push(TestResult {
        name: "gauge_monotonic_bounded".into(),
        passed: percentages.windows(2).all(|w| w[0] <= w[1])
            && percentages.iter().all(|&p| p <= 100)
            && percentages.first() == Some(&0),
        detail: format!(
            "0 → {}%, max {}%",
            percentages.first().copied().unwrap_or_default(),
            percentages.last().copied().unwrap_or_default()
        ),
    });

    results.push(TestResult {
        name: "gauge_cap_boundary".into(),
        passed: classify::percentage_of_scale(99_999.0) == 99
            && classify::percentage_of_scale(100_000.0) == 100,
        detail: "gauge reaches 100 at exactly 100,000 μSv/h".into(),
    });

    let hours: Vec<f64> = sweep.iter().map(|&i| classify::safe_exposure_hours(i)).collect();
    results.push(TestResult {
        name: "safe_hours_non_increasing".into(),
        passed: hours.windows(2).all(|w| w[0] >= w[1])
            && hours.iter().all(|&h| h <= HOURS_PER_YEAR)
            && classify::safe_exposure_hours(0.0) == HOURS_PER_YEAR,
        detail: format!("{:.0}h at zero", classify::safe_exposure_hours(0.0)),
    });

    results
}

// ── 4. Units ────────────────────────────────────────────────────────────

fn validate_units() -> Vec<TestResult> {
    println!("--- Units ---");
    let mut results = Vec::new();

    let round_trip = RadiationUnit::ALL.iter().all(|&unit| {
        [0.0, 0.3, 1.0, 42.5, 999.0].iter().all(|&x| {
            let canonical = units::convert_to_canonical(x, unit);
            let back = units::convert_to_canonical(units::from_canonical(canonical, unit), unit);
            (back - canonical).abs() <= canonical * 1e-12
        })
    });
    results.push(TestResult {
        name: "units_round_trip".into(),
        passed: round_trip,
        detail: "canonical → unit → canonical".into(),
    });

    results.push(TestResult {
        name: "units_validity".into(),
        passed: RadiationUnit::ALL.iter().all(|&u| !units::is_valid(-1.0, u))
            && !units::is_valid(1e10, RadiationUnit::CANONICAL),
        detail: "negative and >1e9 μSv/h rejected".into(),
    });

    results.push(TestResult {
        name: "units_auto_format".into(),
        passed: units::auto_format(1000.0) == "1.000 mSv/h",
        detail: units::auto_format(1000.0),
    });

    results
}

// ── 5. Health Engine ────────────────────────────────────────────────────

fn validate_health() -> Vec<TestResult> {
    println!("--- Health Engine ---");
    let mut results = Vec::new();

    let ordered = [0.01, 1.0, 10.0, 100.0, 1000.0, 24.0 * 1000.0, 1e9]
        .iter()
        .all(|&hours| {
            intensity_sweep().iter().all(|&i| {
                let odds = health::survival_odds(health::accumulated_dose(i, hours));
                odds.treated >= odds.untreated
            })
        });
    results.push(TestResult {
        name: "survival_treated_ge_untreated".into(),
        passed: ordered,
        detail: "every dose bracket".into(),
    });

    let rejected = health::analyze(-1.0, 1.0).is_err()
        && health::analyze(1e10, 1.0).is_err()
        && health::analyze(1.0, -1.0).is_err();
    results.push(TestResult {
        name: "analyze_rejects_invalid".into(),
        passed: rejected,
        detail: "negative / ceiling / negative duration".into(),
    });

    match health::analyze(5000.0, 2.0) {
        Ok(bundle) => {
            let text = report::format_report(&bundle);
            let lines = text.lines().count();
            results.push(TestResult {
                name: "report_renders".into(),
                passed: text.starts_with("MEDICAL ANALYSIS") && text.contains("SURVIVAL:"),
                detail: format!("{} lines for a lethal reading", lines),
            });
        }
        Err(e) => results.push(TestResult {
            name: "report_renders".into(),
            passed: false,
            detail: e.to_string(),
        }),
    }

    results
}
