//! The journal date range sent with every chat request.
//!
//! Dates are held as `YYYY-MM-DD` strings, the same form the backend
//! receives. Because that form sorts lexically in calendar order, ordering
//! checks compare the strings directly.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationError};

/// Date format used on the wire and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive range of journal dates used as backend context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(
            start.format(DATE_FORMAT).to_string(),
            end.format(DATE_FORMAT).to_string(),
        )
    }

    /// The `days`-long window ending on `today`, both ends inclusive.
    pub fn trailing_window(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self::from_dates(today - Duration::days(span), today)
    }

    /// Check that both ends are set and `start <= end`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(ValidationError::MissingDateRange);
        }
        if self.start > self.end {
            return Err(ValidationError::StartAfterEnd);
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date from user input.
pub fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ConfigError::InvalidDate(value.to_string()))
}
