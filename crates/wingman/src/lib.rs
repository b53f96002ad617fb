//! `wingman` - Flight time totals from a pilot logbook
//!
//! This library wires the `wingman-core` computations to logbook files,
//! layered configuration and report rendering for the `wingman` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logbook;
pub mod logging;
pub mod report;

pub use config::Config;
pub use error::{Error, Result};
pub use logbook::{CheckReport, DriftEntry, Finding, Logbook};
pub use logging::init_logging;
