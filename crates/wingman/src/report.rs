//! Text and JSON renderings of logbook totals.
//!
//! Hours are shown both as `HH:MM` and as decimal hours, matching what
//! pilots expect to copy into paper logbooks and licence applications.

use serde::Serialize;
use serde_json::{json, Value};
use wingman_core::{
    format_clock, format_decimal_hours, parse_clock_duration, AircraftUsage, Minutes,
    MonthlyTotals, PilotTotals,
};

use crate::error::Result;
use crate::logbook::{CheckReport, DriftEntry};

fn time_row(label: &str, minutes: Minutes) -> String {
    format!(
        "  {label:<16}{:>9}  ({} h)",
        format_clock(minutes),
        format_decimal_hours(minutes)
    )
}

fn time_value(minutes: Minutes) -> Value {
    json!({
        "minutes": minutes.get(),
        "hours": format_decimal_hours(minutes),
    })
}

/// Render pilot totals as plain text.
#[must_use]
pub fn totals_text(totals: &PilotTotals) -> String {
    let mut lines = vec![
        "Pilot Totals".to_string(),
        "============".to_string(),
        format!("  {:<16}{:>9}", "Flights", totals.flights),
        time_row("Total", totals.total),
        time_row("Night", totals.night),
        time_row("IFR", totals.ifr),
        time_row("PIC", totals.pic),
        time_row("Dual", totals.dual),
        time_row("Solo", totals.solo),
        time_row("Cross-country", totals.cross_country),
    ];
    let landings = format!("{}/{}", totals.day_landings, totals.night_landings);
    lines.push(format!("  {:<16}{landings:>9}", "Landings"));
    lines.push(format!(
        "  {:<16}{:>9}",
        "IFR approaches", totals.ifr_approaches
    ));
    lines.join("\n")
}

/// Render pilot totals as JSON.
#[must_use]
pub fn totals_json(totals: &PilotTotals) -> Value {
    json!({
        "flights": totals.flights,
        "total": time_value(totals.total),
        "night": time_value(totals.night),
        "ifr": time_value(totals.ifr),
        "pic": time_value(totals.pic),
        "dual": time_value(totals.dual),
        "solo": time_value(totals.solo),
        "cross_country": time_value(totals.cross_country),
        "day_landings": totals.day_landings,
        "night_landings": totals.night_landings,
        "ifr_approaches": totals.ifr_approaches,
    })
}

/// Render aircraft usage as plain text.
#[must_use]
pub fn aircraft_text(usage: &[AircraftUsage]) -> String {
    if usage.is_empty() {
        return "No flights logged.".to_string();
    }

    let mut lines = vec![format!("{:<20}{:>9}{:>8}", "Aircraft", "Hours", "Flights")];
    for entry in usage {
        lines.push(format!(
            "{:<20}{:>9}{:>8}",
            entry.aircraft,
            format_decimal_hours(entry.minutes),
            entry.flights
        ));
    }
    lines.join("\n")
}

/// Render aircraft usage as JSON.
#[must_use]
pub fn aircraft_json(usage: &[AircraftUsage]) -> Value {
    Value::Array(
        usage
            .iter()
            .map(|entry| {
                json!({
                    "aircraft": entry.aircraft,
                    "flights": entry.flights,
                    "time": time_value(entry.minutes),
                })
            })
            .collect(),
    )
}

/// Render a monthly breakdown as plain text.
#[must_use]
pub fn monthly_text(months: &[MonthlyTotals]) -> String {
    let mut lines = vec![format!(
        "{:<10}{:>8}{:>8}{:>8}{:>8}",
        "Month", "Flights", "Total", "Night", "XC"
    )];
    for month in months {
        lines.push(format!(
            "{:<10}{:>8}{:>8}{:>8}{:>8}",
            month.label(),
            month.flights,
            format_decimal_hours(month.total),
            format_decimal_hours(month.night),
            format_decimal_hours(month.cross_country),
        ));
    }
    lines.join("\n")
}

/// Render a monthly breakdown as JSON, in chart order.
#[must_use]
pub fn monthly_json(months: &[MonthlyTotals]) -> Value {
    Value::Array(
        months
            .iter()
            .map(|month| {
                json!({
                    "month": month.label(),
                    "flights": month.flights,
                    "total_hours": month.total.hours(),
                    "night_hours": month.night.hours(),
                    "cross_country_hours": month.cross_country.hours(),
                })
            })
            .collect(),
    )
}

/// Render a check report as plain text.
#[must_use]
pub fn check_text(report: &CheckReport) -> String {
    if report.is_clean() {
        return format!("All {} flights are valid.", report.checked);
    }

    let mut lines = vec![format!(
        "{} of {} flights have problems:",
        report.findings.len(),
        report.checked
    )];
    for finding in &report.findings {
        lines.push(format!(
            "  #{:<5} {}  {}",
            finding.index, finding.date, finding.problem
        ));
    }
    lines.join("\n")
}

/// Render recorded-total drift as plain text.
#[must_use]
pub fn drift_text(entries: &[DriftEntry]) -> String {
    if entries.is_empty() {
        return "All recorded totals match their clock times.".to_string();
    }

    let mut lines = vec![format!(
        "{} flights have a recorded total that differs from their clock times:",
        entries.len()
    )];
    for entry in entries {
        lines.push(format!(
            "  #{:<5} {}  {} -> {}",
            entry.index, entry.date, entry.recorded, entry.exact
        ));
    }
    lines.join("\n")
}

/// Pretty-print any report as JSON.
///
/// # Errors
///
/// Returns [`Error::Json`](crate::Error::Json) if the value cannot be
/// serialized.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parse a duration given on the command line: `HH:MM` or whole minutes.
///
/// # Errors
///
/// Returns a format error for anything else.
pub fn parse_duration_arg(value: &str) -> wingman_core::Result<Minutes> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<u32>()
            .map(Minutes::new)
            .map_err(|_| wingman_core::Error::format(value, "minutes out of range"));
    }
    parse_clock_duration(value)
}

/// Render a duration in every supported form.
#[must_use]
pub fn convert_text(minutes: Minutes) -> String {
    format!(
        "{} min = {} = {} h",
        minutes.get(),
        format_clock(minutes),
        format_decimal_hours(minutes)
    )
}
