//! Logbook totals.
//!
//! Everything here sums [`FlightRecord::total_minutes`] and the entered
//! category minutes; no stored decimal-hour value is ever read, so totals over
//! thousands of flights carry no rounding drift.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::duration::Minutes;
use crate::error::{Error, Result};
use crate::record::FlightRecord;

/// Longest monthly breakdown, in months.
pub const MAX_MONTHS: u32 = 1200;

fn add_minutes(acc: &mut Minutes, value: Minutes, field: &'static str) -> Result<()> {
    *acc = acc.checked_add(value).ok_or(Error::Overflow { field })?;
    Ok(())
}

fn add_count(acc: &mut u32, value: u32, field: &'static str) -> Result<()> {
    *acc = acc.checked_add(value).ok_or(Error::Overflow { field })?;
    Ok(())
}

/// Lifetime totals for a pilot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotTotals {
    /// Number of flights.
    pub flights: usize,
    /// Total flight time.
    pub total: Minutes,
    /// Night time.
    pub night: Minutes,
    /// IFR time.
    pub ifr: Minutes,
    /// Pilot-in-command time.
    pub pic: Minutes,
    /// Dual instruction received.
    pub dual: Minutes,
    /// PIC time on flights without co-pilot time.
    pub solo: Minutes,
    /// Total time of cross-country flights.
    pub cross_country: Minutes,
    /// Day landings.
    pub day_landings: u32,
    /// Night landings.
    pub night_landings: u32,
    /// Instrument approaches.
    pub ifr_approaches: u32,
}

impl PilotTotals {
    /// Add one flight to the totals.
    ///
    /// The totals are left untouched when this fails.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`FlightRecord::total_minutes`] and returns
    /// [`Error::Overflow`] when a total no longer fits.
    pub fn add(&mut self, record: &FlightRecord) -> Result<()> {
        let total = record.total_minutes()?;
        let times = &record.times;
        let mut next = *self;

        next.flights += 1;
        add_minutes(&mut next.total, total, "total")?;
        add_minutes(&mut next.night, times.night, "night")?;
        add_minutes(&mut next.ifr, times.ifr, "IFR")?;
        add_minutes(&mut next.pic, times.pic, "PIC")?;
        add_minutes(&mut next.dual, times.instructor, "dual")?;
        if times.copilot.is_zero() {
            add_minutes(&mut next.solo, times.pic, "solo")?;
        }
        if record.is_cross_country() {
            add_minutes(&mut next.cross_country, total, "cross-country")?;
        }
        add_count(&mut next.day_landings, record.day_landings, "day landings")?;
        add_count(&mut next.night_landings, record.night_landings, "night landings")?;
        add_count(&mut next.ifr_approaches, record.ifr_approaches, "IFR approaches")?;

        *self = next;
        Ok(())
    }
}

/// Hours and flights accumulated on one aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftUsage {
    /// Registration, preserved label, or `"SIM"`.
    pub aircraft: String,
    /// Time flown.
    pub minutes: Minutes,
    /// Number of flights.
    pub flights: usize,
}

impl AircraftUsage {
    /// Time flown, in hours.
    #[must_use]
    pub fn hours(&self) -> f64 {
        self.minutes.hours()
    }
}

/// Pilot totals together with aircraft usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Lifetime totals.
    pub totals: PilotTotals,
    /// Aircraft usage, most hours first.
    pub aircraft: Vec<AircraftUsage>,
}

/// Sum category times across a pilot's flights.
///
/// # Errors
///
/// Fails on the first record whose total cannot be determined.
pub fn pilot_totals(records: &[FlightRecord]) -> Result<PilotTotals> {
    let mut totals = PilotTotals::default();
    for record in records {
        totals.add(record)?;
    }
    Ok(totals)
}

/// Group flights by aircraft, most hours first.
///
/// Ties are ordered by aircraft key. With a `limit`, only that many groups
/// are returned.
///
/// # Errors
///
/// Fails on the first record whose total cannot be determined, or when an
/// aircraft's total overflows.
pub fn aircraft_usage(records: &[FlightRecord], limit: Option<usize>) -> Result<Vec<AircraftUsage>> {
    let mut groups: BTreeMap<String, (Minutes, usize)> = BTreeMap::new();
    for record in records {
        let total = record.total_minutes()?;
        let entry = groups.entry(record.aircraft_key()).or_default();
        add_minutes(&mut entry.0, total, "aircraft")?;
        entry.1 += 1;
    }

    let mut usage: Vec<AircraftUsage> = groups
        .into_iter()
        .map(|(aircraft, (minutes, flights))| AircraftUsage {
            aircraft,
            minutes,
            flights,
        })
        .collect();

    // BTreeMap iteration is already key-ordered, and the sort is stable.
    usage.sort_by(|a, b| b.minutes.cmp(&a.minutes));

    if let Some(limit) = limit {
        usage.truncate(limit);
    }
    Ok(usage)
}

/// Compute pilot totals and aircraft usage in one call.
///
/// # Errors
///
/// Fails on the first record whose total cannot be determined.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use wingman_core::{aggregate, FlightRecord};
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let records = vec![
///     FlightRecord::new(date, t(9, 0), t(10, 0)),
///     FlightRecord::new(date, t(14, 0), t(15, 30)),
/// ];
///
/// let summary = aggregate(&records, None).unwrap();
/// assert_eq!(summary.totals.total.get(), 150);
/// assert_eq!(summary.aircraft[0].aircraft, "SIM");
/// ```
pub fn aggregate(records: &[FlightRecord], limit: Option<usize>) -> Result<Summary> {
    Ok(Summary {
        totals: pilot_totals(records)?,
        aircraft: aircraft_usage(records, limit)?,
    })
}

/// Totals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// First day of the month.
    pub month: NaiveDate,
    /// Number of flights.
    pub flights: usize,
    /// Total flight time.
    pub total: Minutes,
    /// Night time.
    pub night: Minutes,
    /// Total time of cross-country flights.
    pub cross_country: Minutes,
}

impl MonthlyTotals {
    fn empty(month: NaiveDate) -> Self {
        Self {
            month,
            flights: 0,
            total: Minutes::ZERO,
            night: Minutes::ZERO,
            cross_country: Minutes::ZERO,
        }
    }

    /// Chart label such as `"Jan 2024"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

/// Bucket flights into the `months` calendar months ending with the month
/// that contains `until`, oldest first.
///
/// Empty months are included. Records outside the window are skipped and
/// their totals are never computed. Fewer than `months` buckets are returned
/// only when the window would start before the earliest representable date.
///
/// # Errors
///
/// Returns [`Error::MonthRange`] when `months` exceeds [`MAX_MONTHS`], and
/// fails on the first in-window record whose total cannot be determined.
pub fn monthly_totals(
    records: &[FlightRecord],
    until: NaiveDate,
    months: u32,
) -> Result<Vec<MonthlyTotals>> {
    if months > MAX_MONTHS {
        return Err(Error::MonthRange {
            months,
            max: MAX_MONTHS,
        });
    }
    let Some(last) = until.with_day(1) else {
        return Ok(Vec::new());
    };

    let mut buckets: Vec<MonthlyTotals> = (0..months)
        .rev()
        .filter_map(|back| last.checked_sub_months(Months::new(back)))
        .map(MonthlyTotals::empty)
        .collect();

    let index: HashMap<(i32, u32), usize> = buckets
        .iter()
        .enumerate()
        .map(|(i, b)| ((b.month.year(), b.month.month()), i))
        .collect();

    for record in records {
        let Some(&i) = index.get(&(record.date.year(), record.date.month())) else {
            continue;
        };
        let total = record.total_minutes()?;
        let bucket = &mut buckets[i];
        bucket.flights += 1;
        add_minutes(&mut bucket.total, total, "monthly")?;
        add_minutes(&mut bucket.night, record.times.night, "monthly night")?;
        if record.is_cross_country() {
            add_minutes(&mut bucket.cross_country, total, "monthly cross-country")?;
        }
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EngineType;
    use crate::error::Error;
    use crate::record::{Aircraft, CategoryTimes, SIMULATOR_KEY};
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn aircraft(registration: &str) -> Aircraft {
        Aircraft {
            registration: registration.to_string(),
            aircraft_type: "DR400".to_string(),
            manufacturer: "Robin".to_string(),
            engine_type: EngineType::Single,
        }
    }

    fn flight(date: NaiveDate, minutes: u32) -> FlightRecord {
        let departure = hm(8, 0);
        let arrival = departure + chrono::TimeDelta::minutes(i64::from(minutes));
        FlightRecord::new(date, departure, arrival)
    }

    #[test]
    fn test_empty_logbook() {
        let summary = aggregate(&[], Some(5)).unwrap();
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_totals_sum_categories() {
        let records = vec![
            flight(ymd(2024, 1, 1), 60)
                .with_route("LFPB", "LFPO")
                .with_times(CategoryTimes {
                    pic: Minutes::new(60),
                    night: Minutes::new(20),
                    ..CategoryTimes::default()
                }),
            flight(ymd(2024, 1, 2), 90)
                .with_route("LFPO", "LFPO")
                .with_times(CategoryTimes {
                    instructor: Minutes::new(90),
                    ifr: Minutes::new(30),
                    ..CategoryTimes::default()
                }),
        ];

        let totals = pilot_totals(&records).unwrap();
        assert_eq!(totals.flights, 2);
        assert_eq!(totals.total, Minutes::new(150));
        assert_eq!(totals.night, Minutes::new(20));
        assert_eq!(totals.ifr, Minutes::new(30));
        assert_eq!(totals.pic, Minutes::new(60));
        assert_eq!(totals.dual, Minutes::new(90));
        assert_eq!(totals.solo, Minutes::new(60));
        assert_eq!(totals.cross_country, Minutes::new(60));
    }

    #[test]
    fn test_solo_excludes_flights_with_copilot_time() {
        let records = vec![
            flight(ymd(2024, 1, 1), 60).with_times(CategoryTimes {
                pic: Minutes::new(60),
                ..CategoryTimes::default()
            }),
            flight(ymd(2024, 1, 2), 60).with_times(CategoryTimes {
                pic: Minutes::new(30),
                copilot: Minutes::new(30),
                ..CategoryTimes::default()
            }),
        ];

        let totals = pilot_totals(&records).unwrap();
        assert_eq!(totals.pic, Minutes::new(90));
        assert_eq!(totals.solo, Minutes::new(60));
    }

    #[test]
    fn test_totals_count_landings() {
        let mut first = flight(ymd(2024, 1, 1), 60);
        first.day_landings = 3;
        first.ifr_approaches = 1;
        let mut second = flight(ymd(2024, 1, 2), 60);
        second.day_landings = 1;
        second.night_landings = 2;

        let totals = pilot_totals(&[first, second]).unwrap();
        assert_eq!(totals.day_landings, 4);
        assert_eq!(totals.night_landings, 2);
        assert_eq!(totals.ifr_approaches, 1);
    }

    #[test]
    fn test_totals_use_recorded_total_without_times() {
        let mut record = flight(ymd(2024, 1, 1), 60);
        record.departure_time = None;
        record.recorded_total = Some(Minutes::new(75));

        let totals = pilot_totals(&[record]).unwrap();
        assert_eq!(totals.total, Minutes::new(75));
    }

    #[test]
    fn test_totals_propagate_missing_time() {
        let mut record = flight(ymd(2024, 1, 1), 60);
        record.arrival_time = None;

        assert_eq!(pilot_totals(&[record]).unwrap_err(), Error::MissingTime);
    }

    #[test]
    fn test_aircraft_usage_ranked_and_limited() {
        let records = vec![
            flight(ymd(2024, 1, 1), 60).with_aircraft(aircraft("F-GAAA")),
            flight(ymd(2024, 1, 2), 120).with_aircraft(aircraft("F-GBBB")),
            flight(ymd(2024, 1, 3), 45).with_aircraft(aircraft("F-GAAA")),
            flight(ymd(2024, 1, 4), 30),
        ];

        let usage = aircraft_usage(&records, None).unwrap();
        assert_eq!(usage.len(), 3);
        assert_eq!(usage[0].aircraft, "F-GBBB");
        assert_eq!(usage[0].minutes, Minutes::new(120));
        assert_eq!(usage[1].aircraft, "F-GAAA");
        assert_eq!(usage[1].minutes, Minutes::new(105));
        assert_eq!(usage[1].flights, 2);
        assert_eq!(usage[2].aircraft, SIMULATOR_KEY);

        let limited = aircraft_usage(&records, Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].aircraft, "F-GBBB");
    }

    #[test]
    fn test_aircraft_usage_ties_ordered_by_key() {
        let records = vec![
            flight(ymd(2024, 1, 1), 60).with_aircraft(aircraft("F-GZZZ")),
            flight(ymd(2024, 1, 2), 60).with_aircraft(aircraft("F-GAAA")),
        ];

        let usage = aircraft_usage(&records, None).unwrap();
        assert_eq!(usage[0].aircraft, "F-GAAA");
        assert_eq!(usage[1].aircraft, "F-GZZZ");
    }

    #[test]
    fn test_aircraft_usage_keeps_deleted_aircraft_together() {
        let live = flight(ymd(2024, 1, 1), 60).with_aircraft(aircraft("F-GAAA"));
        let mut deleted = flight(ymd(2024, 1, 2), 30).with_aircraft(aircraft("F-GAAA"));
        deleted.aircraft = None;

        let usage = aircraft_usage(&[live, deleted], None).unwrap();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].flights, 2);
        assert!((usage[0].hours() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_monthly_totals_window() {
        let records = vec![
            flight(ymd(2023, 11, 20), 60),
            flight(ymd(2023, 12, 5), 30).with_route("LFPB", "LFPO"),
            flight(ymd(2024, 2, 10), 90).with_times(CategoryTimes {
                night: Minutes::new(40),
                ..CategoryTimes::default()
            }),
            flight(ymd(2024, 2, 28), 15),
            flight(ymd(2024, 3, 1), 45),
        ];

        let months = monthly_totals(&records, ymd(2024, 2, 29), 3).unwrap();
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].month, ymd(2023, 12, 1));
        assert_eq!(months[1].month, ymd(2024, 1, 1));
        assert_eq!(months[2].month, ymd(2024, 2, 1));

        assert_eq!(months[0].flights, 1);
        assert_eq!(months[0].cross_country, Minutes::new(30));
        assert_eq!(months[1].flights, 0);
        assert_eq!(months[1].total, Minutes::ZERO);
        assert_eq!(months[2].flights, 2);
        assert_eq!(months[2].total, Minutes::new(105));
        assert_eq!(months[2].night, Minutes::new(40));
        assert_eq!(months[2].label(), "Feb 2024");
    }

    #[test]
    fn test_monthly_totals_skip_out_of_window_errors() {
        let mut broken = flight(ymd(2020, 1, 1), 60);
        broken.departure_time = None;

        let months = monthly_totals(&[broken], ymd(2024, 2, 1), 12).unwrap();
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.flights == 0));
    }

    #[test]
    fn test_monthly_totals_zero_months() {
        let months = monthly_totals(&[flight(ymd(2024, 1, 1), 60)], ymd(2024, 1, 1), 0).unwrap();
        assert!(months.is_empty());
    }

    fn stored(date: NaiveDate, minutes: u32) -> FlightRecord {
        let mut record = flight(date, 60);
        record.departure_time = None;
        record.arrival_time = None;
        record.recorded_total = Some(Minutes::new(minutes));
        record
    }

    #[test]
    fn test_aggregate_reports_total_overflow() {
        let records = vec![
            stored(ymd(2024, 1, 1), 4_000_000_000),
            stored(ymd(2024, 1, 2), 4_000_000_000),
        ];

        assert_eq!(
            aggregate(&records, None).unwrap_err(),
            Error::Overflow { field: "total" }
        );
        assert_eq!(
            aircraft_usage(&records, None).unwrap_err(),
            Error::Overflow { field: "aircraft" }
        );
    }

    #[test]
    fn test_landing_overflow_leaves_totals_untouched() {
        let mut first = flight(ymd(2024, 1, 1), 60);
        first.day_landings = u32::MAX;
        let mut second = flight(ymd(2024, 1, 2), 60);
        second.day_landings = 1;

        let mut totals = PilotTotals::default();
        totals.add(&first).unwrap();
        let before = totals;

        assert_eq!(
            totals.add(&second).unwrap_err(),
            Error::Overflow {
                field: "day landings"
            }
        );
        assert_eq!(totals, before);
    }

    #[test]
    fn test_monthly_totals_reject_oversized_window() {
        let err = monthly_totals(&[], ymd(2024, 1, 1), u32::MAX).unwrap_err();
        assert_eq!(
            err,
            Error::MonthRange {
                months: u32::MAX,
                max: MAX_MONTHS
            }
        );

        let months = monthly_totals(&[], ymd(2024, 1, 1), MAX_MONTHS).unwrap();
        assert_eq!(months.len(), MAX_MONTHS as usize);
        assert_eq!(months[0].month, ymd(1924, 2, 1));
    }
}
