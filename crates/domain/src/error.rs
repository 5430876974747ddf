// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Recurrence interval is zero.
    ///
    /// A zero interval can only come from a programming error in the
    /// caller, never from missing upstream data, so it is reported
    /// loudly instead of being degraded.
    InvalidInterval {
        /// The rejected interval value.
        interval: u32,
    },
    /// Timezone identifier is not a recognized IANA zone.
    InvalidTimezone(String),
    /// Week-of-month ordinal is outside {1, 2, 3, 4, -1}.
    InvalidWeekOfMonth {
        /// The rejected ordinal.
        ordinal: i8,
    },
    /// Periodicity string is not recognized.
    InvalidPeriodicity(String),
    /// Weekday name is not recognized.
    InvalidWeekday(String),
    /// Sort key string is not recognized.
    InvalidSortKey(String),
    /// Sort direction string is not recognized.
    InvalidSortDirection(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInterval { interval } => {
                write!(f, "Recurrence interval must be at least 1, got {interval}")
            }
            Self::InvalidTimezone(zone) => {
                write!(f, "Unknown timezone identifier '{zone}'")
            }
            Self::InvalidWeekOfMonth { ordinal } => {
                write!(
                    f,
                    "Week of month must be 1 through 4 or -1 for last, got {ordinal}"
                )
            }
            Self::InvalidPeriodicity(value) => {
                write!(f, "Unknown periodicity '{value}'")
            }
            Self::InvalidWeekday(value) => {
                write!(f, "Unknown weekday '{value}'")
            }
            Self::InvalidSortKey(value) => {
                write!(f, "Unknown sort key '{value}'")
            }
            Self::InvalidSortDirection(value) => {
                write!(f, "Unknown sort direction '{value}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
