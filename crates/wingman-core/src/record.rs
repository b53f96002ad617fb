//! Flight records and per-flight derivations.
//!
//! A [`FlightRecord`] is owned by whatever stores the logbook. This module
//! only reads it: the total comes from the clock times, engine time from the
//! aircraft, cross-country status from the route and the pilot role from the
//! category times.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::category::{
    derive_engine_time, is_cross_country, validate_category_within_total, Category, EngineTime,
    EngineType,
};
use crate::duration::{compute_exact_minutes, Minutes};
use crate::error::{Error, Result};

/// Aircraft usage key for flights that never had an aircraft.
pub const SIMULATOR_KEY: &str = "SIM";

/// A live aircraft reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aircraft {
    /// Registration, e.g. `F-GABC`.
    pub registration: String,
    /// Aircraft type, e.g. `Cessna 152`.
    #[serde(default, rename = "type")]
    pub aircraft_type: String,
    /// Manufacturer.
    #[serde(default)]
    pub manufacturer: String,
    /// Engine class.
    pub engine_type: EngineType,
}

/// Aircraft details copied onto the flight, kept after the aircraft itself
/// is deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftSnapshot {
    /// Registration at the time of the flight.
    pub registration: String,
    /// Manufacturer at the time of the flight.
    pub manufacturer: String,
    /// Aircraft type at the time of the flight.
    #[serde(rename = "type")]
    pub aircraft_type: String,
    /// Engine class at the time of the flight.
    pub engine_type: Option<EngineType>,
}

/// Category durations entered for a flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTimes {
    /// Night time.
    pub night: Minutes,
    /// IFR time.
    pub ifr: Minutes,
    /// Pilot-in-command time.
    pub pic: Minutes,
    /// Co-pilot time.
    pub copilot: Minutes,
    /// Dual instruction received.
    pub instructor: Minutes,
    /// Multi-pilot time.
    pub multi_pilot: Minutes,
    /// Double command time.
    pub double_command: Minutes,
    /// Simulator time.
    pub simulator: Minutes,
    /// Entered single-engine time; superseded by [`derive_engine_time`].
    pub single_engine: Minutes,
    /// Entered multi-engine time; superseded by [`derive_engine_time`].
    pub multi_engine: Minutes,
}

impl CategoryTimes {
    /// Minutes entered for one category.
    #[must_use]
    pub fn get(&self, category: Category) -> Minutes {
        match category {
            Category::Night => self.night,
            Category::Ifr => self.ifr,
            Category::Pic => self.pic,
            Category::Copilot => self.copilot,
            Category::Instructor => self.instructor,
            Category::MultiPilot => self.multi_pilot,
            Category::DoubleCommand => self.double_command,
            Category::Simulator => self.simulator,
            Category::SingleEngine => self.single_engine,
            Category::MultiEngine => self.multi_engine,
        }
    }

    /// Every category with its minutes, in validation order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Minutes)> + '_ {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Check every category against the flight's total.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::CategoryExceedsTotal`] found, in
    /// [`Category::ALL`] order.
    pub fn validate(&self, total: Minutes) -> Result<()> {
        self.iter()
            .try_for_each(|(category, minutes)| {
                validate_category_within_total(category, minutes, total)
            })
    }
}

/// The pilot's role on a flight, inferred from the category times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PilotRole {
    /// Pilot in command.
    Pic,
    /// Second in command.
    Sic,
    /// Dual instruction.
    Dual,
    /// Multi-pilot operation.
    Multi,
    /// Simulator session.
    Sim,
}

impl PilotRole {
    /// Infer the role, checking PIC, co-pilot, instructor, multi-pilot and
    /// simulator time in that order. Defaults to PIC.
    #[must_use]
    pub fn infer(times: &CategoryTimes) -> Self {
        if !times.pic.is_zero() {
            Self::Pic
        } else if !times.copilot.is_zero() {
            Self::Sic
        } else if !times.instructor.is_zero() {
            Self::Dual
        } else if !times.multi_pilot.is_zero() {
            Self::Multi
        } else if !times.simulator.is_zero() {
            Self::Sim
        } else {
            Self::Pic
        }
    }
}

impl fmt::Display for PilotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pic => write!(f, "PIC"),
            Self::Sic => write!(f, "SIC"),
            Self::Dual => write!(f, "DUAL"),
            Self::Multi => write!(f, "MULTI"),
            Self::Sim => write!(f, "SIM"),
        }
    }
}

/// A single logbook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Date of departure.
    pub date: NaiveDate,
    /// Off-block time, local wall clock.
    #[serde(default)]
    pub departure_time: Option<NaiveTime>,
    /// On-block time, local wall clock.
    #[serde(default)]
    pub arrival_time: Option<NaiveTime>,
    /// Total stored by an earlier entry, used only when clock times are
    /// missing.
    #[serde(default)]
    pub recorded_total: Option<Minutes>,
    /// Departure aerodrome identifier.
    #[serde(default)]
    pub departure_aerodrome: String,
    /// Arrival aerodrome identifier.
    #[serde(default)]
    pub arrival_aerodrome: String,
    /// The aircraft, if it still exists.
    #[serde(default)]
    pub aircraft: Option<Aircraft>,
    /// Aircraft details preserved on the flight.
    #[serde(default)]
    pub aircraft_snapshot: AircraftSnapshot,
    /// Category durations.
    #[serde(default)]
    pub times: CategoryTimes,
    /// Day landings.
    #[serde(default)]
    pub day_landings: u32,
    /// Night landings.
    #[serde(default)]
    pub night_landings: u32,
    /// Instrument approaches flown.
    #[serde(default)]
    pub ifr_approaches: u32,
    /// Simulator model, for simulator sessions.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub simulator_type: String,
    /// Free-text remarks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remarks: String,
}

impl FlightRecord {
    /// Create a record with clock times and nothing else filled in.
    #[must_use]
    pub fn new(date: NaiveDate, departure_time: NaiveTime, arrival_time: NaiveTime) -> Self {
        Self {
            date,
            departure_time: Some(departure_time),
            arrival_time: Some(arrival_time),
            recorded_total: None,
            departure_aerodrome: String::new(),
            arrival_aerodrome: String::new(),
            aircraft: None,
            aircraft_snapshot: AircraftSnapshot::default(),
            times: CategoryTimes::default(),
            day_landings: 0,
            night_landings: 0,
            ifr_approaches: 0,
            simulator_type: String::new(),
            remarks: String::new(),
        }
    }

    /// Set the route.
    #[must_use]
    pub fn with_route(mut self, departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        self.departure_aerodrome = departure.into();
        self.arrival_aerodrome = arrival.into();
        self
    }

    /// Attach an aircraft, copying its details into the snapshot.
    #[must_use]
    pub fn with_aircraft(mut self, aircraft: Aircraft) -> Self {
        self.aircraft_snapshot = AircraftSnapshot {
            registration: aircraft.registration.clone(),
            manufacturer: aircraft.manufacturer.clone(),
            aircraft_type: aircraft.aircraft_type.clone(),
            engine_type: Some(aircraft.engine_type),
        };
        self.aircraft = Some(aircraft);
        self
    }

    /// Set the category durations.
    #[must_use]
    pub fn with_times(mut self, times: CategoryTimes) -> Self {
        self.times = times;
        self
    }

    /// Total flight time.
    ///
    /// Computed from the clock times when both are present; otherwise the
    /// previously recorded total is used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTime`] when neither is available, and
    /// [`Error::ZeroDuration`] when the clock times are the same minute or
    /// the recorded total is zero.
    pub fn total_minutes(&self) -> Result<Minutes> {
        match (self.departure_time, self.arrival_time) {
            (Some(departure), Some(arrival)) => compute_exact_minutes(self.date, departure, arrival),
            _ => match self.recorded_total {
                Some(total) if total.is_zero() => Err(Error::ZeroDuration { date: self.date }),
                Some(total) => Ok(total),
                None => Err(Error::MissingTime),
            },
        }
    }

    /// The recorded total and the clock-time total, when both exist and
    /// disagree.
    ///
    /// Entries written before totals were computed to the minute can carry a
    /// stale recorded total; the clock times always win.
    #[must_use]
    pub fn total_drift(&self) -> Option<TotalDrift> {
        let recorded = self.recorded_total?;
        let (Some(departure), Some(arrival)) = (self.departure_time, self.arrival_time) else {
            return None;
        };
        let exact = compute_exact_minutes(self.date, departure, arrival).ok()?;
        (exact != recorded).then_some(TotalDrift { recorded, exact })
    }

    /// Engine class of the aircraft flown, falling back to the preserved
    /// engine type when the aircraft has been deleted.
    #[must_use]
    pub fn engine_type(&self) -> Option<EngineType> {
        self.aircraft
            .as_ref()
            .map(|a| a.engine_type)
            .or(self.aircraft_snapshot.engine_type)
    }

    /// Whether departure and arrival aerodromes differ.
    #[must_use]
    pub fn is_cross_country(&self) -> bool {
        is_cross_country(&self.departure_aerodrome, &self.arrival_aerodrome)
    }

    /// Inferred pilot role.
    #[must_use]
    pub fn role(&self) -> PilotRole {
        PilotRole::infer(&self.times)
    }

    /// Key used to group flights by aircraft.
    ///
    /// The live registration wins; after deletion the preserved registration
    /// is used, then the preserved manufacturer and type. Flights that never
    /// had an aircraft are grouped under [`SIMULATOR_KEY`].
    #[must_use]
    pub fn aircraft_key(&self) -> String {
        if let Some(aircraft) = &self.aircraft {
            if !aircraft.registration.trim().is_empty() {
                return aircraft.registration.trim().to_string();
            }
        }

        let snapshot = &self.aircraft_snapshot;
        if !snapshot.registration.trim().is_empty() {
            return snapshot.registration.trim().to_string();
        }

        let label = format!(
            "{} {}",
            snapshot.manufacturer.trim(),
            snapshot.aircraft_type.trim()
        );
        let label = label.trim();
        if label.is_empty() {
            SIMULATOR_KEY.to_string()
        } else {
            label.to_string()
        }
    }
}

/// A recorded total that no longer matches the clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalDrift {
    /// Total stored on the entry.
    pub recorded: Minutes,
    /// Total computed from departure and arrival.
    pub exact: Minutes,
}

/// Everything derived from one record before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Total flight time.
    pub total: Minutes,
    /// Engine time derived from the aircraft; replaces entered values.
    pub engine: EngineTime,
    /// Whether the route is cross-country.
    pub cross_country: bool,
    /// Inferred pilot role.
    pub role: PilotRole,
}

/// Validate a record and derive its computed fields.
///
/// Every category, including the entered engine times, is checked against
/// the total before anything is derived.
///
/// # Errors
///
/// Propagates [`FlightRecord::total_minutes`] errors and the first
/// [`Error::CategoryExceedsTotal`].
pub fn evaluate(record: &FlightRecord) -> Result<Evaluation> {
    let total = record.total_minutes()?;
    record.times.validate(total)?;

    Ok(Evaluation {
        total,
        engine: derive_engine_time(record.engine_type(), total),
        cross_country: record.is_cross_country(),
        role: record.role(),
    })
}
