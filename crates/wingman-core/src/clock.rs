//! Conversions between minutes and their textual forms.
//!
//! Pilots enter category times as `HH:MM`; dashboards and exports show either
//! `HH:MM` or decimal hours with one fractional digit. Both are derived from
//! [`Minutes`] and never stored.

use std::sync::LazyLock;

use regex::Regex;

use crate::duration::Minutes;
use crate::error::{Error, Result};

/// `HH:MM` with ASCII digits only. The minutes part is not limited to 59.
static CLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+):([0-9]+)$").expect("Invalid clock pattern"));

/// Parse `HH:MM` text into minutes.
///
/// Empty or whitespace-only input is zero minutes, as is `"00:00"`. A minutes
/// part of 60 or more is accepted and carried into the total.
///
/// # Errors
///
/// Returns [`Error::Format`] for anything that is not two colon-separated
/// non-negative integers, or for values too large to represent.
///
/// # Examples
///
/// ```
/// use wingman_core::clock::parse_clock_duration;
///
/// assert_eq!(parse_clock_duration("01:30").unwrap().get(), 90);
/// assert_eq!(parse_clock_duration("").unwrap().get(), 0);
/// assert!(parse_clock_duration("1.5").is_err());
/// ```
pub fn parse_clock_duration(text: &str) -> Result<Minutes> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Minutes::ZERO);
    }

    let captures = CLOCK_PATTERN
        .captures(trimmed)
        .ok_or_else(|| Error::format(text, "expected HH:MM"))?;

    let hours: u32 = captures[1]
        .parse()
        .map_err(|_| Error::format(text, "hours out of range"))?;
    let minutes: u32 = captures[2]
        .parse()
        .map_err(|_| Error::format(text, "minutes out of range"))?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .map(Minutes::new)
        .ok_or_else(|| Error::format(text, "duration out of range"))
}

/// Format minutes as zero-padded `HH:MM`.
///
/// Hours beyond two digits are printed in full, so lifetime totals such as
/// `"1234:05"` are never truncated.
#[must_use]
pub fn format_clock(minutes: Minutes) -> String {
    let total = minutes.get();
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format minutes as decimal hours with one fractional digit.
///
/// The hour value is rounded to the nearest tenth as a binary float, ties to
/// even, so the output matches the figures pilots see on the web dashboard:
/// 15 minutes is `"0.2"` and 75 minutes is `"1.2"`.
#[must_use]
pub fn format_decimal_hours(minutes: Minutes) -> String {
    format!("{:.1}", minutes.hours())
}
