use std::path::PathBuf;
use std::process;

use megacube_bench::report;
use megacube_bench::runner::BenchmarkRunner;
use megacube_config::{defaults, loader, validator};
use megacube_core::CubeSettings;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut settings_path: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut frame_count = 600u32;
    let mut seed = 1u64;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                baseline_path = Some(PathBuf::from(flag_value(&args, &mut i)));
            }
            "--output" => {
                output_path = Some(PathBuf::from(flag_value(&args, &mut i)));
            }
            "--settings" => {
                settings_path = Some(PathBuf::from(flag_value(&args, &mut i)));
            }
            "--regression-threshold" => {
                regression_threshold = parse_flag(&args, &mut i);
            }
            "--frames" => {
                frame_count = parse_flag(&args, &mut i);
            }
            "--seed" => {
                seed = parse_flag(&args, &mut i);
            }
            "--help" | "-h" => {
                eprintln!("Usage: cube-bench [OPTIONS]");
                eprintln!("  --frames <n>                   Frames per program (default: 600)");
                eprintln!("  --seed <n>                     RNG seed (default: 1)");
                eprintln!("  --settings <path>              Load settings RON instead of the built-in one");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut settings = load_settings(settings_path.as_deref());
    // Runs are reproducible: the command line seed always wins.
    settings.seed = Some(seed);

    let palettes = defaults::default_palettes().unwrap_or_else(|e| fail(&e.to_string()));
    let presets = defaults::default_presets().unwrap_or_else(|e| fail(&e.to_string()));
    if let Err(errors) = validator::validate_presets(&presets) {
        for e in &errors {
            log::error!("Preset validation error: {e}");
        }
        process::exit(1);
    }

    let runner = BenchmarkRunner::new(settings, palettes, presets, frame_count);
    let results = runner.run_all();

    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: run_timestamp(),
            seed,
            results: results.clone(),
        };
        if let Err(e) = report::save_baseline(path, &baseline) {
            fail(&format!("failed to save baseline to {}: {e}", path.display()));
        }
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        if let Some(baseline) = report::load_baseline(path) {
            let regressions = report::compare(&results, &baseline, regression_threshold);
            println!(
                "{}",
                report::format_comparison(&regressions, regression_threshold)
            );
            if !regressions.is_empty() {
                eprintln!(
                    "ERROR: {} regressions detected, exiting with code 1",
                    regressions.len()
                );
                process::exit(1);
            }
        } else {
            log::warn!("Baseline file not found: {}", path.display());
        }
    }

    log::info!("Benchmark complete.");
}

/// Settings from `path`, or the built-in defaults. Exits on parse or validation errors.
fn load_settings(path: Option<&std::path::Path>) -> CubeSettings {
    let settings = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
                fail(&format!("failed to read {}: {e}", path.display()))
            });
            let settings =
                loader::load_settings_from_str(&text).unwrap_or_else(|e| fail(&e.to_string()));
            log::info!("Loaded settings from {}", path.display());
            settings
        }
        None => defaults::default_settings().unwrap_or_else(|e| fail(&e.to_string())),
    };

    if let Err(errors) = validator::validate_settings(&settings) {
        for e in &errors {
            log::error!("Settings validation error: {e}");
        }
        process::exit(1);
    }
    settings
}

/// Value following the flag at `args[*i]`; advances `i`.
fn flag_value<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.as_str(),
        None => fail(&format!("missing value for {}", args[*i - 1])),
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], i: &mut usize) -> T {
    let value = flag_value(args, i);
    value
        .parse()
        .unwrap_or_else(|_| fail(&format!("invalid {} value: {value}", args[*i - 1])))
}

fn fail(message: &str) -> ! {
    log::error!("{message}");
    process::exit(1);
}

/// Simple timestamp without a date-time dependency.
fn run_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
