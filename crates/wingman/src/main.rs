//! `wingman` - CLI for the wingman flight logbook
//!
//! This binary reads a logbook export and prints totals, aircraft usage,
//! monthly breakdowns, validation results and recorded-total drift.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use wingman::cli::{
    AircraftCommand, CheckCommand, Cli, Command, ConfigCommand, DriftCommand, MonthlyCommand,
    TotalsCommand,
};
use wingman::{init_logging, report, Config, Logbook};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;
    let logbook_path = cli.logbook.clone().unwrap_or_else(|| config.logbook_path());
    debug!("Using logbook {}", logbook_path.display());

    match cli.command {
        Command::Totals(cmd) => {
            let logbook = open_logbook(&logbook_path)?.with_filter(cmd.filter.clone().into());
            handle_totals(&logbook, &cmd)
        }
        Command::Aircraft(cmd) => {
            let logbook = open_logbook(&logbook_path)?.with_filter(cmd.filter.clone().into());
            handle_aircraft(&config, &logbook, &cmd)
        }
        Command::Monthly(cmd) => {
            let logbook = open_logbook(&logbook_path)?.with_filter(cmd.filter());
            handle_monthly(&config, &logbook, &cmd)
        }
        Command::Check(cmd) => {
            let logbook = open_logbook(&logbook_path)?.with_filter(cmd.filter.clone().into());
            handle_check(&config, &logbook, &cmd)
        }
        Command::Drift(cmd) => {
            let logbook = open_logbook(&logbook_path)?.with_filter(cmd.filter.clone().into());
            handle_drift(&logbook, &cmd)
        }
        Command::Convert(cmd) => {
            let minutes = report::parse_duration_arg(&cmd.value)?;
            println!("{}", report::convert_text(minutes));
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_logbook(path: &std::path::Path) -> anyhow::Result<Logbook> {
    let logbook = Logbook::open(path)?;
    if logbook.is_empty() {
        debug!("Logbook {} has no flights", logbook.path().display());
    } else {
        debug!("{} flights in {}", logbook.len(), logbook.path().display());
    }
    Ok(logbook)
}

fn handle_totals(logbook: &Logbook, cmd: &TotalsCommand) -> anyhow::Result<ExitCode> {
    let summary = logbook.summary(None)?;
    if cmd.json {
        println!("{}", report::to_json(&report::totals_json(&summary.totals))?);
    } else {
        println!("{}", report::totals_text(&summary.totals));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_aircraft(
    config: &Config,
    logbook: &Logbook,
    cmd: &AircraftCommand,
) -> anyhow::Result<ExitCode> {
    let limit = match cmd.limit {
        Some(0) => None,
        Some(n) => Some(n),
        None => config.aircraft_limit(),
    };
    let summary = logbook.summary(limit)?;
    if cmd.json {
        println!("{}", report::to_json(&report::aircraft_json(&summary.aircraft))?);
    } else {
        println!("{}", report::aircraft_text(&summary.aircraft));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_monthly(
    config: &Config,
    logbook: &Logbook,
    cmd: &MonthlyCommand,
) -> anyhow::Result<ExitCode> {
    let months = cmd.months.unwrap_or(config.report.months);
    let until = cmd
        .until
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let breakdown = logbook.monthly(until, months)?;
    if cmd.json {
        println!("{}", report::to_json(&report::monthly_json(&breakdown))?);
    } else {
        println!("{}", report::monthly_text(&breakdown));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_check(
    config: &Config,
    logbook: &Logbook,
    cmd: &CheckCommand,
) -> anyhow::Result<ExitCode> {
    let check = logbook.check(&config.validation);
    if cmd.json {
        println!("{}", report::to_json(&check)?);
    } else {
        println!("{}", report::check_text(&check));
    }

    if check.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn handle_drift(logbook: &Logbook, cmd: &DriftCommand) -> anyhow::Result<ExitCode> {
    let entries = logbook.drift();
    if cmd.json {
        println!("{}", report::to_json(&entries)?);
    } else {
        println!("{}", report::drift_text(&entries));
    }

    if entries.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", report::to_json(config)?);
            } else {
                let limit = config
                    .aircraft_limit()
                    .map_or_else(|| "unlimited".to_string(), |n| n.to_string());
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Logbook]");
                println!("  Path:               {}", config.logbook_path().display());
                println!();
                println!("[Report]");
                println!("  Aircraft limit:     {limit}");
                println!("  Months:             {}", config.report.months);
                println!();
                println!("[Validation]");
                println!(
                    "  Min flight minutes: {}",
                    config.validation.min_flight_minutes
                );
                println!(
                    "  Max flight minutes: {}",
                    config.validation.max_flight_minutes
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
