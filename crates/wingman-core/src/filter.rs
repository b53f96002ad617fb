//! Selecting flights before they are totalled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{FlightRecord, PilotRole};

/// Criteria a flight must meet to be included. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// Earliest flight date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest flight date, inclusive.
    pub to: Option<NaiveDate>,
    /// Aircraft key as returned by [`FlightRecord::aircraft_key`], compared
    /// case-insensitively.
    pub aircraft: Option<String>,
    /// Inferred pilot role.
    pub role: Option<PilotRole>,
}

impl RecordFilter {
    /// Whether no criteria are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `record` meets every criterion.
    #[must_use]
    pub fn matches(&self, record: &FlightRecord) -> bool {
        if self.from.is_some_and(|from| record.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| record.date > to) {
            return false;
        }
        if let Some(aircraft) = &self.aircraft {
            if !record.aircraft_key().eq_ignore_ascii_case(aircraft.trim()) {
                return false;
            }
        }
        self.role.map_or(true, |role| record.role() == role)
    }

    /// The records that meet every criterion, in order.
    pub fn apply<'a>(
        &'a self,
        records: &'a [FlightRecord],
    ) -> impl Iterator<Item = &'a FlightRecord> + 'a {
        records.iter().filter(move |record| self.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EngineType;
    use crate::duration::Minutes;
    use crate::record::{Aircraft, CategoryTimes, SIMULATOR_KEY};
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn flight(date: NaiveDate) -> FlightRecord {
        FlightRecord::new(
            date,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        )
    }

    fn robin() -> Aircraft {
        Aircraft {
            registration: "F-GABC".to_string(),
            aircraft_type: "DR400".to_string(),
            manufacturer: "Robin".to_string(),
            engine_type: EngineType::Single,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&flight(ymd(2024, 1, 1))));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = RecordFilter {
            from: Some(ymd(2024, 1, 10)),
            to: Some(ymd(2024, 1, 20)),
            ..RecordFilter::default()
        };
        assert!(!filter.is_empty());
        assert!(!filter.matches(&flight(ymd(2024, 1, 9))));
        assert!(filter.matches(&flight(ymd(2024, 1, 10))));
        assert!(filter.matches(&flight(ymd(2024, 1, 20))));
        assert!(!filter.matches(&flight(ymd(2024, 1, 21))));
    }

    #[test]
    fn test_aircraft_key_ignores_case() {
        let filter = RecordFilter {
            aircraft: Some("f-gabc".to_string()),
            ..RecordFilter::default()
        };
        assert!(filter.matches(&flight(ymd(2024, 1, 1)).with_aircraft(robin())));
        assert!(!filter.matches(&flight(ymd(2024, 1, 1))));

        let simulator = RecordFilter {
            aircraft: Some(SIMULATOR_KEY.to_string()),
            ..RecordFilter::default()
        };
        assert!(simulator.matches(&flight(ymd(2024, 1, 1))));
    }

    #[test]
    fn test_role() {
        let filter = RecordFilter {
            role: Some(PilotRole::Dual),
            ..RecordFilter::default()
        };
        let dual = flight(ymd(2024, 1, 1)).with_times(CategoryTimes {
            instructor: Minutes::new(60),
            ..CategoryTimes::default()
        });
        assert!(filter.matches(&dual));
        assert!(!filter.matches(&flight(ymd(2024, 1, 1))));
    }

    #[test]
    fn test_apply_keeps_order() {
        let records = vec![
            flight(ymd(2024, 1, 1)),
            flight(ymd(2024, 2, 1)),
            flight(ymd(2024, 3, 1)),
        ];
        let filter = RecordFilter {
            from: Some(ymd(2024, 2, 1)),
            ..RecordFilter::default()
        };
        let dates: Vec<_> = filter.apply(&records).map(|r| r.date).collect();
        assert_eq!(dates, vec![ymd(2024, 2, 1), ymd(2024, 3, 1)]);
    }
}
