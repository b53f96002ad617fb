//! `wingman-core` - Flight time computation for the Wingman logbook
//!
//! This library turns logbook entries into exact flight durations, checks
//! category times against them, and rolls them up into pilot totals and
//! aircraft usage. It is pure: no I/O, no logging, no shared state. Callers
//! own persistence and presentation.
//!
//! Minutes are the only unit stored or summed. Decimal hours and `HH:MM`
//! text are derived on demand by [`clock`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod category;
pub mod clock;
pub mod duration;
pub mod error;
pub mod filter;
pub mod record;

pub use aggregate::{
    aggregate, aircraft_usage, monthly_totals, pilot_totals, AircraftUsage, MonthlyTotals,
    PilotTotals, Summary, MAX_MONTHS,
};
pub use category::{
    derive_engine_time, is_cross_country, validate_category_within_total, Category, EngineTime,
    EngineType,
};
pub use clock::{format_clock, format_decimal_hours, parse_clock_duration};
pub use duration::{compute_exact_minutes, Minutes};
pub use error::{Error, Result};
pub use filter::RecordFilter;
pub use record::{
    evaluate, Aircraft, AircraftSnapshot, CategoryTimes, Evaluation, FlightRecord, PilotRole,
    TotalDrift, SIMULATOR_KEY,
};
