//! Logbook files.
//!
//! A logbook file is a JSON array of flight records, as exported by the web
//! application. It is read once and never written back.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};
use wingman_core::{
    aggregate, evaluate, monthly_totals, FlightRecord, Minutes, MonthlyTotals, RecordFilter,
    Summary,
};

use crate::config::ValidationConfig;
use crate::error::{Error, Result};

/// Flights loaded from a logbook file.
#[derive(Debug, Clone)]
pub struct Logbook {
    /// Where the flights were read from.
    path: PathBuf,
    /// Flights in file order.
    records: Vec<FlightRecord>,
    /// Which flights reports and checks look at.
    filter: RecordFilter,
}

impl Logbook {
    /// Read and parse a logbook file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// flight records.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        debug!("Reading logbook at {}", path.display());
        let contents = std::fs::read_to_string(&path).map_err(|source| Error::LogbookRead {
            path: path.clone(),
            source,
        })?;

        let records: Vec<FlightRecord> =
            serde_json::from_str(&contents).map_err(|source| Error::LogbookParse {
                path: path.clone(),
                source,
            })?;

        info!("Loaded {} flights from {}", records.len(), path.display());
        Ok(Self {
            path,
            records,
            filter: RecordFilter::default(),
        })
    }

    /// Wrap flights that are already in memory.
    #[must_use]
    pub fn from_records(records: Vec<FlightRecord>) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            records,
            filter: RecordFilter::default(),
        }
    }

    /// Restrict reports and checks to flights matching `filter`.
    ///
    /// Entry indices in errors and findings still refer to positions in the
    /// whole file.
    #[must_use]
    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        if !filter.is_empty() {
            debug!("Filtering flights with {filter:?}");
        }
        self.filter = filter;
        self
    }

    /// Path the logbook was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of flights in the file.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the logbook has no flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flights passing the filter, with their positions in the file.
    fn selected(&self) -> impl Iterator<Item = (usize, &FlightRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.filter.matches(record))
    }

    fn selected_records(&self) -> Vec<FlightRecord> {
        self.selected().map(|(_, record)| record.clone()).collect()
    }

    /// Pilot totals and aircraft usage over the selected flights.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntry`] naming the first flight whose total
    /// cannot be determined.
    pub fn summary(&self, aircraft_limit: Option<usize>) -> Result<Summary> {
        self.ensure_totals(|_| true)?;
        Ok(aggregate(&self.selected_records(), aircraft_limit)?)
    }

    /// Monthly breakdown ending with the month containing `until`.
    ///
    /// Flights outside the window are ignored, even when their totals
    /// cannot be determined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEntry`] naming the first flight in the window
    /// whose total cannot be determined.
    pub fn monthly(&self, until: NaiveDate, months: u32) -> Result<Vec<MonthlyTotals>> {
        if let Some((first, last)) = month_window(until, months) {
            self.ensure_totals(|record| {
                record
                    .date
                    .with_day(1)
                    .is_some_and(|month| first <= month && month <= last)
            })?;
        }
        Ok(monthly_totals(&self.selected_records(), until, months)?)
    }

    /// Selected flights whose recorded total disagrees with their clock
    /// times.
    #[must_use]
    pub fn drift(&self) -> Vec<DriftEntry> {
        self.selected()
            .filter_map(|(index, record)| {
                record.total_drift().map(|drift| DriftEntry {
                    index,
                    date: record.date,
                    recorded: drift.recorded,
                    exact: drift.exact,
                })
            })
            .collect()
    }

    /// Validate every selected flight, collecting all problems instead of
    /// stopping at the first.
    #[must_use]
    pub fn check(&self, bounds: &ValidationConfig) -> CheckReport {
        let min = Minutes::new(bounds.min_flight_minutes);
        let max = Minutes::new(bounds.max_flight_minutes);

        let mut checked = 0;
        let mut findings = Vec::new();
        for (index, record) in self.selected() {
            checked += 1;
            let problem = match evaluate(record) {
                Err(err) => err.to_string(),
                Ok(evaluation) if evaluation.total < min => format!(
                    "flight time {} is shorter than the {} minute minimum",
                    evaluation.total,
                    min.get()
                ),
                Ok(evaluation) if evaluation.total > max => format!(
                    "flight time {} is longer than the {} minute maximum",
                    evaluation.total,
                    max.get()
                ),
                Ok(_) => match record.total_drift() {
                    Some(drift) => format!(
                        "recorded total {} differs from clock times {}",
                        drift.recorded, drift.exact
                    ),
                    None => continue,
                },
            };
            warn!(index, date = %record.date, "{problem}");
            findings.push(Finding {
                index,
                date: record.date,
                problem,
            });
        }

        debug!("Checked {checked} flights, {} problems", findings.len());
        CheckReport { checked, findings }
    }

    fn ensure_totals(&self, include: impl Fn(&FlightRecord) -> bool) -> Result<()> {
        for (index, record) in self.selected().filter(|(_, record)| include(record)) {
            record
                .total_minutes()
                .map_err(|source| Error::InvalidEntry {
                    index,
                    date: record.date,
                    source,
                })?;
        }
        Ok(())
    }
}

/// First days of the oldest and newest month covered by a monthly breakdown.
fn month_window(until: NaiveDate, months: u32) -> Option<(NaiveDate, NaiveDate)> {
    let last = until.with_day(1)?;
    let first = last.checked_sub_months(Months::new(months.checked_sub(1)?))?;
    Some((first, last))
}

/// One problem found by [`Logbook::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Zero-based position of the flight in the logbook.
    pub index: usize,
    /// Date of the flight.
    pub date: NaiveDate,
    /// What is wrong with it.
    pub problem: String,
}

/// Result of validating a whole logbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of flights checked.
    pub checked: usize,
    /// Problems found, in logbook order.
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// Whether every flight passed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// A flight whose recorded total disagrees with its clock times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftEntry {
    /// Zero-based position of the flight in the logbook.
    pub index: usize,
    /// Date of the flight.
    pub date: NaiveDate,
    /// Total stored on the entry.
    pub recorded: Minutes,
    /// Total computed from the clock times.
    pub exact: Minutes,
}
