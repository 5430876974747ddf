// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure validation and normalization helpers for schedule rules.
//!
//! Missing or inconsistent upstream data is normalized rather than
//! rejected wherever the rule can still be rendered safely; only
//! values that indicate a caller bug (zero interval, unknown zone)
//! produce errors.

use crate::error::DomainError;
use crate::rule::Periodicity;
use chrono_tz::Tz;
use time::Date;

/// Validates a recurrence interval for the given periodicity.
///
/// One-time schedules always normalize to an interval of 1; they have
/// no repetition the interval could stretch.
///
/// # Arguments
///
/// * `periodicity` - The recurrence family the interval applies to
/// * `interval` - The raw interval ("every N occurrence-units")
///
/// # Returns
///
/// The normalized interval.
///
/// # Errors
///
/// Returns `DomainError::InvalidInterval` if the interval is zero.
pub const fn validate_interval(
    periodicity: Periodicity,
    interval: u32,
) -> Result<u32, DomainError> {
    if interval == 0 {
        return Err(DomainError::InvalidInterval { interval });
    }
    if matches!(periodicity, Periodicity::Once) {
        return Ok(1);
    }
    Ok(interval)
}

/// Validates a timezone identifier against the IANA database.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the identifier does not
/// name a known zone.
pub fn validate_timezone(timezone: &str) -> Result<Tz, DomainError> {
    timezone
        .parse()
        .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))
}

/// Resolves the effective date range of a schedule.
///
/// Returns `None` when either bound is unset or when the bounds are
/// inverted (`end < start`). An inverted range denotes an empty range,
/// not an error; the data comes from an external collaborator and must
/// never crash a display path.
#[must_use]
pub fn effective_date_range(start: Option<Date>, end: Option<Date>) -> Option<(Date, Date)> {
    let start_date: Date = start?;
    let end_date: Date = end?;
    if end_date < start_date {
        return None;
    }
    Some((start_date, end_date))
}
