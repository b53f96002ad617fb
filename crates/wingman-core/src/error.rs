//! Error types for the flight time engine.
//!
//! Every error here is deterministic given the same input and is meant to be
//! shown to whoever is entering the flight, so messages name the offending
//! value rather than describing internals.

use chrono::NaiveDate;
use thiserror::Error;

use crate::category::Category;
use crate::duration::Minutes;

/// The error type for flight time computations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Clock duration text was not in `HH:MM` form.
    #[error("invalid clock duration '{input}': {reason}")]
    Format {
        /// The text that failed to parse.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A category duration is longer than the flight itself.
    #[error(
        "{category} time of {} minutes exceeds total flight time of {} minutes",
        .minutes.get(),
        .total.get()
    )]
    CategoryExceedsTotal {
        /// The offending category.
        category: Category,
        /// Minutes entered for the category.
        minutes: Minutes,
        /// Total flight minutes the category was checked against.
        total: Minutes,
    },

    /// Duration was requested but departure or arrival time is absent and no
    /// stored total is available.
    #[error("departure and arrival times are required to compute flight duration")]
    MissingTime,

    /// The flight lasted less than a minute: departure and arrival round to
    /// the same minute, or the recorded total is zero.
    #[error("flight on {date} has zero duration")]
    ZeroDuration {
        /// Date of the flight.
        date: NaiveDate,
    },

    /// A running total no longer fits its counter.
    #[error("{field} total is too large to represent")]
    Overflow {
        /// The total that overflowed.
        field: &'static str,
    },

    /// A monthly breakdown was requested over too many months.
    #[error("monthly breakdown of {months} months exceeds the limit of {max}")]
    MonthRange {
        /// Months requested.
        months: u32,
        /// Largest supported window.
        max: u32,
    },
}

/// A specialized Result type for flight time computations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a format error for the given input.
    #[must_use]
    pub fn format(input: impl Into<String>, reason: &'static str) -> Self {
        Self::Format {
            input: input.into(),
            reason,
        }
    }

    /// Check if this error is a category-versus-total violation.
    #[must_use]
    pub fn is_category_violation(&self) -> bool {
        matches!(self, Self::CategoryExceedsTotal { .. })
    }

    /// The category named by this error, if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::CategoryExceedsTotal { category, .. } => Some(*category),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = Error::format("1h30", "expected HH:MM");
        assert_eq!(
            err.to_string(),
            "invalid clock duration '1h30': expected HH:MM"
        );
    }

    #[test]
    fn test_category_error_names_category_and_values() {
        let err = Error::CategoryExceedsTotal {
            category: Category::Night,
            minutes: Minutes::new(70),
            total: Minutes::new(60),
        };
        let msg = err.to_string();
        assert!(msg.contains("night"));
        assert!(msg.contains("70"));
        assert!(msg.contains("60"));
    }

    #[test]
    fn test_is_category_violation() {
        let err = Error::CategoryExceedsTotal {
            category: Category::Ifr,
            minutes: Minutes::new(5),
            total: Minutes::new(4),
        };
        assert!(err.is_category_violation());
        assert_eq!(err.category(), Some(Category::Ifr));
        assert!(!Error::MissingTime.is_category_violation());
        assert_eq!(Error::MissingTime.category(), None);
    }

    #[test]
    fn test_zero_duration_display() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let err = Error::ZeroDuration { date };
        assert!(err.to_string().contains("2024-01-15"));
    }

    #[test]
    fn test_overflow_display() {
        let err = Error::Overflow { field: "night" };
        assert_eq!(err.to_string(), "night total is too large to represent");
    }

    #[test]
    fn test_missing_time_display() {
        assert!(Error::MissingTime.to_string().contains("departure and arrival"));
    }
}
