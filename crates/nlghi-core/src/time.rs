//! Timestamp and date conventions.
//!
//! Everything persisted is an ISO-style string so that lexicographic order
//! matches chronological order.

use jiff::civil::{Date, DateTime};

use crate::error::CoreError;

/// Format of creation/edit timestamps, e.g. `2025-03-14 09:30:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of clinical dates, e.g. `2025-03-14`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(at: DateTime) -> String {
    at.strftime(TIMESTAMP_FORMAT).to_string()
}

pub fn format_date(date: Date) -> String {
    date.strftime(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<Date, CoreError> {
    value.trim().parse::<Date>().map_err(|e| CoreError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Age in whole years on `today` for someone born on `dob`.
pub fn age_on(dob: Date, today: Date) -> i64 {
    let mut age = i64::from(today.year()) - i64::from(dob.year());
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
