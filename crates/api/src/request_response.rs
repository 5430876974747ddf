// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Snapshots arrive exactly as the course-management collaborator
//! serves them, sentinels included; responses carry plain strings and
//! booleans so transport layers need no domain types.

use serde::{Deserialize, Serialize};

/// A read-only course snapshot as served by the course-management
/// collaborator.
///
/// Date and time fields are wire strings; `0000-00-00` and empty
/// strings mean "not yet scheduled". `next_occurrences` and
/// `formatted_schedule` are optional denormalized values the
/// collaborator may have precomputed; when present they are passed
/// through unchanged rather than recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSnapshot {
    /// The canonical numeric identifier, if persisted.
    #[serde(default)]
    pub course_id: Option<i64>,
    /// The course title.
    pub title: String,
    /// First scheduled day (`YYYY-MM-DD`), sentinel, or absent.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last scheduled day (`YYYY-MM-DD`), sentinel, or absent.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Session start time (`HH:MM` or `HH:MM:SS`), or absent.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Session end time (`HH:MM` or `HH:MM:SS`), or absent.
    #[serde(default)]
    pub end_time: Option<String>,
    /// The recurrence family (`once`, `daily`, `weekly`, `biweekly`,
    /// `monthly`, `custom`).
    pub periodicity: String,
    /// Lowercase weekday names for weekly-family rules.
    #[serde(default)]
    pub weekdays: Vec<String>,
    /// Monthly ordinal: 1 through 4, or -1 for last.
    #[serde(default)]
    pub week_of_month: Option<i8>,
    /// Every N weeks/months.
    pub interval: u32,
    /// IANA timezone identifier.
    pub timezone: String,
    /// Dates to skip (`YYYY-MM-DD`).
    #[serde(default)]
    pub exclude_dates: Vec<String>,
    /// Maximum number of enrollments.
    pub max_attendants: u32,
    /// Enrollments currently held.
    pub enrolled_count: u32,
    /// Record creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_at: Option<String>,
    /// Precomputed occurrence instants (RFC 3339), if the collaborator
    /// supplied them.
    #[serde(default)]
    pub next_occurrences: Option<Vec<String>>,
    /// Precomputed display text, if the collaborator supplied it.
    #[serde(default)]
    pub formatted_schedule: Option<String>,
}

/// Response for a lifecycle classification query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStateResponse {
    /// The lifecycle state (`no_schedule`, `upcoming`, `in_progress`,
    /// `finished`).
    pub state: String,
    /// The resolved start instant (RFC 3339 UTC), when derivable.
    pub start_datetime: Option<String>,
    /// The resolved end instant (RFC 3339 UTC), when derivable.
    pub end_datetime: Option<String>,
}

/// Response for an enrollment eligibility query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentDecisionResponse {
    /// Whether enrolling is offered.
    pub can_enroll: bool,
    /// Whether cancelling is offered.
    pub can_cancel: bool,
    /// Why the relevant action is blocked, when neither is offered.
    pub blocked_reason: Option<String>,
}

/// Response for a schedule formatting query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedScheduleResponse {
    /// The display sentence.
    pub text: String,
    /// Whether the text was supplied by the collaborator rather than
    /// computed here.
    pub supplied: bool,
}

/// Response for an occurrence listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrencesResponse {
    /// Session start instants (RFC 3339 UTC).
    pub occurrences: Vec<String>,
    /// Whether the instants were supplied by the collaborator rather
    /// than computed here.
    pub supplied: bool,
}

/// One course in an ordered catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedCourseInfo {
    /// The canonical numeric identifier, if persisted.
    pub course_id: Option<i64>,
    /// The course title.
    pub title: String,
    /// The lifecycle state at the query instant.
    pub state: String,
    /// Enrollments currently held.
    pub enrolled_count: u32,
    /// Maximum number of enrollments.
    pub max_attendants: u32,
}
