//! Command-line interface for wingman.
//!
//! This module provides the CLI structure for the `wingman` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AircraftCommand, CheckCommand, ConfigCommand, ConvertCommand, DriftCommand, FilterArgs,
    MonthlyCommand, RoleArg, TotalsCommand,
};

use crate::logging::Verbosity;

/// wingman - Flight time totals from your pilot logbook
///
/// Reads a logbook export and computes block times, category totals,
/// per-aircraft hours and monthly activity.
#[derive(Debug, Parser)]
#[command(name = "wingman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logbook file to read (overrides `logbook.path`)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub logbook: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show pilot totals across the whole logbook
    Totals(TotalsCommand),

    /// Show hours flown per aircraft
    Aircraft(AircraftCommand),

    /// Show a month-by-month breakdown
    Monthly(MonthlyCommand),

    /// Validate every logbook entry
    Check(CheckCommand),

    /// List flights whose recorded total disagrees with their clock times
    Drift(DriftCommand),

    /// Convert a duration between HH:MM, minutes and decimal hours
    Convert(ConvertCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
