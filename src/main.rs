//! Patch Risk Gate - Main Entry Point
//!
//! Scores a firmware patch feature table with the trained classifier and
//! blocks the CI pipeline when any patch is high risk.
//!
//! Exit codes:
//! - 0: PASS, no high-risk patches
//! - 1: FAIL, high-risk patches detected, CI should block
//! - 2: ERROR, missing argument or file, invalid schema, model failure

mod cli;
mod constants;
mod logic;

use std::io;
use std::path::Path;

use clap::Parser;

use cli::Cli;
use logic::config::GateConfig;
use logic::error::GateResult;
use logic::features::LayoutInfo;
use logic::gate::{self, GateOutcome, GateReport};

fn run(cli: &Cli) -> GateResult<GateReport> {
    let input = cli.input_path()?;
    let config = GateConfig::from_env()?;

    let layout = LayoutInfo::for_columns(&config.feature_columns);
    if !layout.is_builtin() {
        log::warn!(
            "Feature columns overridden ({} features, layout {}); model must be trained on this order",
            layout.feature_count,
            layout.hash
        );
    }

    gate::run_gate(&input, &config, Path::new("."), logic::model::load_classifier)
}

/// Load `.env` (the working directory's when `dotenv` is None), then build
/// the logger so a filter set in that file applies
fn logger_builder(dotenv: Option<&Path>, filter_var: &str) -> env_logger::Builder {
    let loaded = match dotenv {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    if let Err(e) = &loaded {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env: {}", e);
        }
    }

    env_logger::Builder::from_env(env_logger::Env::default().filter_or(filter_var, "info"))
}

fn main() {
    logger_builder(None, env_logger::DEFAULT_FILTER_ENV).init();

    let cli = Cli::parse();
    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

    let result = run(&cli);

    let exit_code = match &result {
        Ok(report) => {
            for row in report.rows.iter().filter(|r| r.high_risk_flag == 1) {
                log::warn!("High-risk patch {} (risk_score={:.4})", row.identifier, row.risk_score);
            }
            match gate::emit(report, &mut io::stdout().lock()) {
                Ok(()) => GateOutcome::from_result(&result).exit_code(),
                Err(e) => {
                    log::error!("Failed to write summary: {}", e);
                    constants::EXIT_ERROR
                }
            }
        }
        Err(e) => {
            log::error!("{}", e);
            println!("ERROR: {}", e);
            GateOutcome::from_result(&result).exit_code()
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;
    use tempfile::tempdir;

    #[test]
    fn test_log_filter_from_dotenv_applies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "RISK_GATE_TEST_LOG_FILTER=warn\n").unwrap();

        let logger = logger_builder(Some(&path), "RISK_GATE_TEST_LOG_FILTER").build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join(".env");

        let logger = logger_builder(Some(&missing), "RISK_GATE_TEST_LOG_FILTER_UNSET").build();
        assert_eq!(logger.filter(), LevelFilter::Info);
    }
}
