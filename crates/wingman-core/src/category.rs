//! Time categories and the rules that tie them to a flight's total.
//!
//! A flight's total duration is split across overlapping categories (night,
//! IFR, pilot role, simulator, engine class). None may exceed the total, and
//! engine time is never entered by hand: it follows from the aircraft.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::duration::Minutes;
use crate::error::{Error, Result};

/// A named category of flight time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Time flown at night.
    Night,
    /// Time flown under instrument flight rules.
    Ifr,
    /// Pilot-in-command time.
    Pic,
    /// Co-pilot (second in command) time.
    Copilot,
    /// Time under instruction (dual).
    Instructor,
    /// Multi-pilot operation time.
    MultiPilot,
    /// Double command time.
    DoubleCommand,
    /// Flight simulator time.
    Simulator,
    /// Time in single-engine aircraft.
    SingleEngine,
    /// Time in multi-engine aircraft.
    MultiEngine,
}

impl Category {
    /// Every category, in validation order.
    pub const ALL: [Self; 10] = [
        Self::Night,
        Self::Ifr,
        Self::Pic,
        Self::Copilot,
        Self::Instructor,
        Self::MultiPilot,
        Self::DoubleCommand,
        Self::Simulator,
        Self::SingleEngine,
        Self::MultiEngine,
    ];

    /// Stable machine name, matching the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Ifr => "ifr",
            Self::Pic => "pic",
            Self::Copilot => "copilot",
            Self::Instructor => "instructor",
            Self::MultiPilot => "multi_pilot",
            Self::DoubleCommand => "double_command",
            Self::Simulator => "simulator",
            Self::SingleEngine => "single_engine",
            Self::MultiEngine => "multi_engine",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Night => "night",
            Self::Ifr => "IFR",
            Self::Pic => "PIC",
            Self::Copilot => "co-pilot",
            Self::Instructor => "instructor",
            Self::MultiPilot => "multi-pilot",
            Self::DoubleCommand => "double command",
            Self::Simulator => "simulator",
            Self::SingleEngine => "single-engine",
            Self::MultiEngine => "multi-engine",
        };
        f.write_str(label)
    }
}

/// Check that a category duration fits inside the flight's total.
///
/// Equal values pass. Nothing is clamped: an oversized value is reported
/// back so the pilot can correct it.
///
/// # Errors
///
/// Returns [`Error::CategoryExceedsTotal`] when `minutes > total`.
pub fn validate_category_within_total(
    category: Category,
    minutes: Minutes,
    total: Minutes,
) -> Result<()> {
    if minutes > total {
        return Err(Error::CategoryExceedsTotal {
            category,
            minutes,
            total,
        });
    }
    Ok(())
}

/// Number of engines on an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineType {
    /// Single engine.
    Single,
    /// Multi engine.
    Multi,
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single Engine"),
            Self::Multi => write!(f, "Multi Engine"),
        }
    }
}

/// Engine-class split of a flight's total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineTime {
    /// Minutes attributed to single-engine time.
    pub single: Minutes,
    /// Minutes attributed to multi-engine time.
    pub multi: Minutes,
}

/// Derive engine time from the aircraft's engine type.
///
/// The whole flight goes to the aircraft's class; a flight with no aircraft
/// (a simulator session) has no engine time. The result replaces whatever
/// engine times were entered.
#[must_use]
pub fn derive_engine_time(engine_type: Option<EngineType>, total: Minutes) -> EngineTime {
    match engine_type {
        Some(EngineType::Single) => EngineTime {
            single: total,
            multi: Minutes::ZERO,
        },
        Some(EngineType::Multi) => EngineTime {
            single: Minutes::ZERO,
            multi: total,
        },
        None => EngineTime::default(),
    }
}

/// Whether a route counts as cross-country.
///
/// True when departure and arrival differ. Identifiers are compared without
/// surrounding whitespace and ignoring ASCII case.
#[must_use]
pub fn is_cross_country(departure: &str, arrival: &str) -> bool {
    !departure.trim().eq_ignore_ascii_case(arrival.trim())
}
