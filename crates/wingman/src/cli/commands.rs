//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use wingman_core::{PilotRole, RecordFilter, MAX_MONTHS};

/// Flight selection shared by the report commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only flights on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Only flights on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Only flights on this aircraft (registration, type label or SIM)
    #[arg(short, long)]
    pub aircraft: Option<String>,

    /// Only flights with this pilot role
    #[arg(short, long, value_enum)]
    pub role: Option<RoleArg>,
}

impl From<FilterArgs> for RecordFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            from: args.from,
            to: args.to,
            aircraft: args.aircraft,
            role: args.role.map(PilotRole::from),
        }
    }
}

/// Pilot role argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Pilot in command
    Pic,
    /// Co-pilot
    Sic,
    /// Dual instruction received
    Dual,
    /// Multi-pilot crew
    Multi,
    /// Simulator session
    Sim,
}

impl From<RoleArg> for PilotRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Pic => Self::Pic,
            RoleArg::Sic => Self::Sic,
            RoleArg::Dual => Self::Dual,
            RoleArg::Multi => Self::Multi,
            RoleArg::Sim => Self::Sim,
        }
    }
}

/// Totals command arguments.
#[derive(Debug, Args)]
pub struct TotalsCommand {
    /// Flight selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Aircraft usage command arguments.
#[derive(Debug, Args)]
pub struct AircraftCommand {
    /// Number of aircraft to show (0 for all, defaults to `report.aircraft_limit`)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Flight selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Monthly breakdown command arguments.
#[derive(Debug, Args)]
pub struct MonthlyCommand {
    /// Number of months to show (defaults to `report.months`)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_MONTHS))
    )]
    pub months: Option<u32>,

    /// Last day to include, as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub until: Option<NaiveDate>,

    /// Only flights on this aircraft (registration, type label or SIM)
    #[arg(short, long)]
    pub aircraft: Option<String>,

    /// Only flights with this pilot role
    #[arg(short, long, value_enum)]
    pub role: Option<RoleArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl MonthlyCommand {
    /// Aircraft and role selection; the date window comes from `--until`.
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            aircraft: self.aircraft.clone(),
            role: self.role.map(PilotRole::from),
            ..RecordFilter::default()
        }
    }
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Flight selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Drift command arguments.
#[derive(Debug, Args)]
pub struct DriftCommand {
    /// Flight selection
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Convert command arguments.
#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Duration as HH:MM or whole minutes
    pub value: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
