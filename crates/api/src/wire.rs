// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire-format normalization for collaborator snapshots.
//!
//! The course-management collaborator encodes "not yet scheduled" as
//! the literal date `0000-00-00` instead of omitting the field. That
//! sentinel is a wire-format detail only: it is normalized to "absent"
//! here, and nothing past this boundary ever sees it.

use chrono::{DateTime, Utc};
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

/// The collaborator's sentinel for an unset date.
pub const UNSET_DATE_SENTINEL: &str = "0000-00-00";

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT_FULL: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
const TIME_FORMAT_SHORT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// Wire decoding errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WireError {
    /// A date string was present but not parseable.
    #[error("Unparseable date value '{value}'")]
    UnparseableDate { value: String },

    /// A time string was present but not parseable.
    #[error("Unparseable time value '{value}'")]
    UnparseableTime { value: String },

    /// A timestamp string was present but not parseable.
    #[error("Unparseable timestamp value '{value}'")]
    UnparseableTimestamp { value: String },
}

/// Returns whether a wire value denotes "unset".
#[must_use]
pub fn is_unset(raw: &str) -> bool {
    raw.is_empty() || raw == UNSET_DATE_SENTINEL
}

/// Normalizes a wire date to an optional calendar date.
///
/// Missing values, empty strings, and the `0000-00-00` sentinel all
/// normalize to `None`.
///
/// # Errors
///
/// Returns `WireError::UnparseableDate` for a present, non-sentinel
/// string that is not a `YYYY-MM-DD` date.
pub fn normalize_date(raw: Option<&str>) -> Result<Option<Date>, WireError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if is_unset(raw) {
        return Ok(None);
    }
    Date::parse(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| WireError::UnparseableDate {
            value: raw.to_string(),
        })
}

/// Normalizes a wire time to an optional time of day.
///
/// Missing values and empty strings normalize to `None`. Both
/// `HH:MM:SS` and `HH:MM` forms are accepted.
///
/// # Errors
///
/// Returns `WireError::UnparseableTime` for a present string that is
/// not a time of day.
pub fn normalize_time(raw: Option<&str>) -> Result<Option<Time>, WireError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }
    Time::parse(raw, TIME_FORMAT_FULL)
        .or_else(|_| Time::parse(raw, TIME_FORMAT_SHORT))
        .map(Some)
        .map_err(|_| WireError::UnparseableTime {
            value: raw.to_string(),
        })
}

/// Parses an RFC 3339 timestamp into a UTC instant.
///
/// # Errors
///
/// Returns `WireError::UnparseableTimestamp` if the string is not an
/// RFC 3339 timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, WireError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|stamped| stamped.with_timezone(&Utc))
        .map_err(|_| WireError::UnparseableTimestamp {
            value: raw.to_string(),
        })
}
