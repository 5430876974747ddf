// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod capacity;
mod enrollment;
mod error;
mod formatter;
mod lifecycle;
mod occurrence;
mod ordering;
mod rule;
mod validation;

#[cfg(test)]
mod tests;

pub use capacity::CourseCapacity;
pub use enrollment::{
    BlockedReason, CANCELLATION_LOCKOUT_HOURS, EnrollmentDecision, decide_enrollment,
};
pub use error::DomainError;
pub use formatter::{
    DateStyle, Locale, ScheduleShape, classify_shape, format_schedule, format_time,
};
pub use lifecycle::{LifecycleState, classify, end_instant, start_instant};
pub use occurrence::{
    OccurrenceInstants, OccurrenceSpans, Occurrences, list_occurrences, occurrence_dates,
    occurrence_instants, occurrence_spans, occurrences_within,
};
pub use ordering::{Course, SortDirection, SortKey, classify_courses, order_courses};
pub use rule::{
    ALL_WEEKDAYS, Periodicity, ScheduleRule, WeekOfMonth, WeekdaySet, parse_weekday, weekday_name,
};
pub use validation::{effective_date_range, validate_interval, validate_timezone};
