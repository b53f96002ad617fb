//! Flight durations.
//!
//! [`Minutes`] is the only representation of time this crate stores or sums.
//! Decimal hours and `HH:MM` text are produced on demand by the
//! [`clock`](crate::clock) module.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::{Error, Result};

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_DAY: i64 = 24 * 60 * MILLIS_PER_MINUTE;

/// A non-negative count of whole minutes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Minutes(u32);

impl Minutes {
    /// No time at all.
    pub const ZERO: Self = Self(0);

    /// Wrap a raw minute count.
    #[must_use]
    pub const fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    /// The raw minute count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is zero minutes.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add two durations, or `None` if the sum does not fit.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }

    /// Hours as a float, for charts and JSON output.
    #[must_use]
    pub fn hours(self) -> f64 {
        f64::from(self.0) / 60.0
    }
}

impl From<u32> for Minutes {
    fn from(minutes: u32) -> Self {
        Self(minutes)
    }
}

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&clock::format_clock(*self))
    }
}

impl FromStr for Minutes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        clock::parse_clock_duration(s)
    }
}

// Like `u32`, these panic on overflow in debug builds. Totals built from
// logbook input go through `checked_add`.
impl Add for Minutes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Minutes {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Minutes> for Minutes {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Compute the exact duration of a flight from its clock times.
///
/// An arrival earlier than the departure is taken to be on the following day;
/// a flight never spans more than one midnight. The elapsed time is rounded
/// half-up to the nearest minute.
///
/// # Errors
///
/// Returns [`Error::ZeroDuration`] when departure and arrival round to the
/// same minute.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use wingman_core::compute_exact_minutes;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let dep = NaiveTime::from_hms_opt(23, 0, 0).unwrap();
/// let arr = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
/// assert_eq!(compute_exact_minutes(date, dep, arr).unwrap().get(), 120);
/// ```
pub fn compute_exact_minutes(
    date: NaiveDate,
    departure: NaiveTime,
    arrival: NaiveTime,
) -> Result<Minutes> {
    // Times carry no zone, so the date only anchors the two instants; the
    // difference depends on time of day alone.
    let departed = date.and_time(departure);
    let arrived = date.and_time(arrival);

    let mut millis = (arrived - departed).num_milliseconds();
    if arrived < departed {
        millis += MILLIS_PER_DAY;
    }

    let minutes = (millis + MILLIS_PER_MINUTE / 2) / MILLIS_PER_MINUTE;
    if minutes == 0 {
        return Err(Error::ZeroDuration { date });
    }

    // Bounded by one day.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = minutes as u32;
    Ok(Minutes::new(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_same_day_flight() {
        let minutes = compute_exact_minutes(date(), hms(9, 0, 0), hms(10, 30, 0)).unwrap();
        assert_eq!(minutes, Minutes::new(90));
    }

    #[test]
    fn test_overnight_flight() {
        let minutes = compute_exact_minutes(date(), hms(23, 0, 0), hms(1, 0, 0)).unwrap();
        assert_eq!(minutes.get(), 120);
    }

    #[test]
    fn test_overnight_one_minute_past_midnight() {
        let minutes = compute_exact_minutes(date(), hms(23, 59, 0), hms(0, 0, 0)).unwrap();
        assert_eq!(minutes.get(), 1);
    }

    #[test]
    fn test_longest_possible_flight() {
        let minutes = compute_exact_minutes(date(), hms(10, 0, 0), hms(9, 59, 0)).unwrap();
        assert_eq!(minutes.get(), 1439);
    }

    #[test]
    fn test_rounds_half_up() {
        let minutes = compute_exact_minutes(date(), hms(10, 0, 0), hms(10, 0, 30)).unwrap();
        assert_eq!(minutes.get(), 1);

        let minutes = compute_exact_minutes(date(), hms(10, 0, 0), hms(10, 45, 29)).unwrap();
        assert_eq!(minutes.get(), 45);

        let minutes = compute_exact_minutes(date(), hms(10, 0, 0), hms(10, 45, 30)).unwrap();
        assert_eq!(minutes.get(), 46);
    }

    #[test]
    fn test_rounding_across_midnight() {
        let minutes = compute_exact_minutes(date(), hms(23, 59, 45), hms(0, 0, 15)).unwrap();
        assert_eq!(minutes.get(), 1);
    }

    #[test]
    fn test_identical_times_are_rejected() {
        let err = compute_exact_minutes(date(), hms(10, 0, 0), hms(10, 0, 0)).unwrap_err();
        assert_eq!(err, Error::ZeroDuration { date: date() });
    }

    #[test]
    fn test_under_half_a_minute_is_rejected() {
        let err = compute_exact_minutes(date(), hms(10, 0, 0), hms(10, 0, 29)).unwrap_err();
        assert!(matches!(err, Error::ZeroDuration { .. }));
    }

    #[test]
    fn test_minutes_arithmetic() {
        let mut total = Minutes::new(30) + Minutes::new(45);
        total += Minutes::new(15);
        assert_eq!(total, Minutes::new(90));

        let sum: Minutes = [Minutes::new(60), Minutes::new(90), Minutes::new(30)]
            .iter()
            .sum();
        assert_eq!(sum.get(), 180);
        assert!((sum.hours() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_minutes_checked_add() {
        assert_eq!(
            Minutes::new(30).checked_add(Minutes::new(45)),
            Some(Minutes::new(75))
        );
        assert_eq!(Minutes::new(u32::MAX).checked_add(Minutes::new(1)), None);
    }

    #[test]
    fn test_minutes_display_and_parse() {
        assert_eq!(Minutes::new(90).to_string(), "01:30");
        assert_eq!("01:30".parse::<Minutes>().unwrap(), Minutes::new(90));
    }

    #[test]
    fn test_minutes_serialize_as_integer() {
        let json = serde_json::to_string(&Minutes::new(45)).unwrap();
        assert_eq!(json, "45");
        let parsed: Minutes = serde_json::from_str("120").unwrap();
        assert_eq!(parsed, Minutes::new(120));
    }

    #[test]
    fn test_minutes_zero() {
        assert!(Minutes::ZERO.is_zero());
        assert!(!Minutes::new(1).is_zero());
        assert_eq!(Minutes::default(), Minutes::ZERO);
    }
}
