//! Zodiac Core - Operator Entry Point
//!
//! Loads the scoring engine once and serves one command:
//!
//! ```text
//! zodiac-core status
//! zodiac-core conditional <rpm> <temp_c> <fuel_pct> <sea_state> <actual_vibration>
//! zodiac-core sequence <csv-path | ->
//! ```

use std::io::Read;

use anyhow::{bail, Context, Result};

use zodiac_core::api::commands::{self, ScoreReport};
use zodiac_core::logic::config::EngineConfig;
use zodiac_core::logic::engine::ScoringEngine;
use zodiac_core::logic::scoring::ScoreError;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} v{}...",
        zodiac_core::constants::APP_NAME,
        zodiac_core::constants::APP_VERSION
    );

    let config = EngineConfig::from_env();
    let engine = ScoringEngine::from_config(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("status") | None => {
            println!("{}", serde_json::to_string_pretty(&engine.status())?);
        }
        Some("conditional") => {
            let report = run_conditional(&engine, &args[1..]);
            print_report(&report);
        }
        Some("sequence") => {
            let source = match args.get(1).map(String::as_str) {
                Some(path) => path,
                None => bail!("usage: zodiac-core sequence <csv-path | ->"),
            };
            let csv_text = read_input(source)?;
            print_report(&commands::score_sequence(&engine, &csv_text));
        }
        Some(other) => bail!("unknown command: {other}"),
    }

    Ok(())
}

fn run_conditional(engine: &ScoringEngine, args: &[String]) -> ScoreReport {
    if args.len() != 5 {
        return ScoreReport::from_error(ScoreError::MalformedInput(format!(
            "expected 5 arguments (rpm, temp_c, fuel_pct, sea_state, actual_vibration), found {}",
            args.len()
        )));
    }

    let mut numbers = [0.0f64; 4];
    for (slot, arg) in numbers.iter_mut().zip([&args[0], &args[1], &args[2], &args[4]]) {
        *slot = match arg.parse() {
            Ok(v) => v,
            Err(_) => {
                return ScoreReport::from_error(ScoreError::MalformedInput(format!(
                    "invalid number {arg:?}"
                )))
            }
        };
    }

    commands::score_conditional(engine, numbers[0], numbers[1], numbers[2], &args[3], numbers[3])
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
    }
}

fn print_report(report: &ScoreReport) {
    println!("{}", report.status);
    if !report.details.is_empty() {
        println!("{}", report.details);
    }
}
