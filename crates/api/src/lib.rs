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
    clippy::all
)]

mod calendar;
mod error;
mod handlers;
mod request_response;
mod wire;

#[cfg(test)]
mod tests;

pub use calendar::{
    CalendarExport, CalendarFeed, CalendarOccurrence, DEFAULT_EXPORT_LIMIT, ExportTarget,
    build_calendar_export,
};
pub use error::{ApiError, translate_domain_error};
pub use handlers::{
    course_from_snapshot, format_schedule, get_enrollment_decision, get_lifecycle_state,
    list_occurrences, order_courses,
};
pub use request_response::{
    CourseSnapshot, EnrollmentDecisionResponse, FormattedScheduleResponse,
    LifecycleStateResponse, OccurrencesResponse, OrderedCourseInfo,
};
pub use wire::{UNSET_DATE_SENTINEL, WireError, normalize_date, normalize_time, parse_timestamp};
