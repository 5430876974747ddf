// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use seminar_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The calendar export selector named an unknown target.
    UnsupportedExportTarget(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::UnsupportedExportTarget(target) => {
                write!(f, "Unsupported calendar export target '{target}'")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidInterval { interval } => ApiError::InvalidInput {
            field: String::from("interval"),
            message: format!("Recurrence interval must be at least 1, got {interval}"),
        },
        DomainError::InvalidTimezone(zone) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Unknown timezone identifier '{zone}'"),
        },
        DomainError::InvalidWeekOfMonth { ordinal } => ApiError::InvalidInput {
            field: String::from("week_of_month"),
            message: format!("Week of month must be 1 through 4 or -1 for last, got {ordinal}"),
        },
        DomainError::InvalidPeriodicity(value) => ApiError::InvalidInput {
            field: String::from("periodicity"),
            message: format!("Unknown periodicity '{value}'"),
        },
        DomainError::InvalidWeekday(value) => ApiError::InvalidInput {
            field: String::from("weekdays"),
            message: format!("Unknown weekday '{value}'"),
        },
        DomainError::InvalidSortKey(value) => ApiError::InvalidInput {
            field: String::from("sort_key"),
            message: format!("Unknown sort key '{value}'"),
        },
        DomainError::InvalidSortDirection(value) => ApiError::InvalidInput {
            field: String::from("sort_direction"),
            message: format!("Unknown sort direction '{value}'"),
        },
    }
}
