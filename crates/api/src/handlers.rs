// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for read-only schedule queries.
//!
//! Every handler translates a collaborator snapshot into domain types,
//! runs the pure engine, and assembles a plain response. Handlers never
//! mutate anything: capacity counters and enrollment records are owned
//! by the collaborator, and eligibility answers are advisory.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use seminar_domain::{
    Course, CourseCapacity, Locale, Periodicity, ScheduleRule, SortDirection, SortKey,
    WeekOfMonth, WeekdaySet, classify, decide_enrollment, end_instant, parse_weekday,
    start_instant,
};
use time::Date;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    CourseSnapshot, EnrollmentDecisionResponse, FormattedScheduleResponse,
    LifecycleStateResponse, OccurrencesResponse, OrderedCourseInfo,
};
use crate::wire;

fn wire_field_error(field: &str, err: &wire::WireError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a collaborator snapshot into a domain course.
///
/// Sentinel dates normalize to "absent". Unparseable exclusion dates
/// are skipped with a warning: an exclusion that cannot be understood
/// can only widen the schedule, never corrupt it. Core fields that are
/// present but unparseable are caller bugs and fail loudly.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a core field is present but
/// malformed, the periodicity or a weekday is unknown, the interval is
/// zero, or the timezone is not a known IANA zone.
pub fn course_from_snapshot(snapshot: &CourseSnapshot) -> Result<Course, ApiError> {
    let periodicity: Periodicity =
        Periodicity::from_str(&snapshot.periodicity).map_err(translate_domain_error)?;

    let start_date = wire::normalize_date(snapshot.start_date.as_deref())
        .map_err(|err| wire_field_error("start_date", &err))?;
    let end_date = wire::normalize_date(snapshot.end_date.as_deref())
        .map_err(|err| wire_field_error("end_date", &err))?;
    let start_time = wire::normalize_time(snapshot.start_time.as_deref())
        .map_err(|err| wire_field_error("start_time", &err))?;
    let end_time = wire::normalize_time(snapshot.end_time.as_deref())
        .map_err(|err| wire_field_error("end_time", &err))?;

    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            tracing::warn!(
                course_id = snapshot.course_id,
                "Course end date {end} precedes start date {start}; treating the range as empty"
            );
        }
    }

    let mut weekdays: WeekdaySet = WeekdaySet::empty();
    for name in &snapshot.weekdays {
        weekdays.insert(parse_weekday(name).map_err(translate_domain_error)?);
    }

    let week_of_month: Option<WeekOfMonth> = match snapshot.week_of_month {
        Some(ordinal) => Some(WeekOfMonth::new(ordinal).map_err(translate_domain_error)?),
        None => None,
    };

    let mut exclude_dates: BTreeSet<Date> = BTreeSet::new();
    for raw in &snapshot.exclude_dates {
        match wire::normalize_date(Some(raw)) {
            Ok(Some(date)) => {
                exclude_dates.insert(date);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    course_id = snapshot.course_id,
                    "Skipping unparseable exclusion date: {err}"
                );
            }
        }
    }

    let schedule: ScheduleRule = ScheduleRule::new(
        periodicity,
        start_date,
        end_date,
        start_time,
        end_time,
        weekdays,
        week_of_month,
        snapshot.interval,
        exclude_dates,
        &snapshot.timezone,
    )
    .map_err(translate_domain_error)?;

    if schedule.periodicity().requires_weekdays() && schedule.weekdays().is_empty() {
        tracing::warn!(
            course_id = snapshot.course_id,
            "No recurring weekday selected; the schedule expands to zero sessions"
        );
    }

    let created_at: Option<DateTime<Utc>> = match snapshot.created_at.as_deref() {
        Some(raw) => Some(
            wire::parse_timestamp(raw).map_err(|err| wire_field_error("created_at", &err))?,
        ),
        None => None,
    };

    Ok(Course {
        course_id: snapshot.course_id,
        title: snapshot.title.clone(),
        schedule,
        capacity: CourseCapacity::new(snapshot.max_attendants, snapshot.enrolled_count),
        created_at,
    })
}

/// Classifies a course's lifecycle state at the given instant.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be normalized.
pub fn get_lifecycle_state(
    snapshot: &CourseSnapshot,
    now: DateTime<Utc>,
) -> Result<LifecycleStateResponse, ApiError> {
    let course: Course = course_from_snapshot(snapshot)?;
    let state = classify(&course.schedule, now);

    Ok(LifecycleStateResponse {
        state: state.as_str().to_string(),
        start_datetime: start_instant(&course.schedule).map(|instant| instant.to_rfc3339()),
        end_datetime: end_instant(&course.schedule).map(|instant| instant.to_rfc3339()),
    })
}

/// Decides enrollment eligibility for the current user.
///
/// The answer is advisory: the collaborator's enroll call is the
/// authority on capacity, and callers must surface its rejection to
/// the user if a race is lost.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be normalized.
pub fn get_enrollment_decision(
    snapshot: &CourseSnapshot,
    is_enrolled: bool,
    now: DateTime<Utc>,
) -> Result<EnrollmentDecisionResponse, ApiError> {
    let course: Course = course_from_snapshot(snapshot)?;
    let state = classify(&course.schedule, now);
    let decision = decide_enrollment(
        state,
        course.capacity,
        is_enrolled,
        now,
        start_instant(&course.schedule),
    );

    Ok(EnrollmentDecisionResponse {
        can_enroll: decision.can_enroll,
        can_cancel: decision.can_cancel,
        blocked_reason: decision
            .blocked_reason
            .map(|reason| reason.as_str().to_string()),
    })
}

/// Renders a course's schedule as display text.
///
/// Display text the collaborator already precomputed is passed through
/// unchanged; it may carry localization this engine cannot reproduce.
///
/// # Errors
///
/// Returns an error if the text has to be computed and the snapshot
/// cannot be normalized.
pub fn format_schedule(
    snapshot: &CourseSnapshot,
    locale: &Locale,
) -> Result<FormattedScheduleResponse, ApiError> {
    if let Some(text) = snapshot.formatted_schedule.as_deref() {
        if !text.is_empty() {
            return Ok(FormattedScheduleResponse {
                text: text.to_string(),
                supplied: true,
            });
        }
    }

    let course: Course = course_from_snapshot(snapshot)?;
    Ok(FormattedScheduleResponse {
        text: seminar_domain::format_schedule(&course.schedule, locale),
        supplied: false,
    })
}

/// Lists a course's session start instants as RFC 3339 UTC strings.
///
/// Instants the collaborator already precomputed are passed through
/// unchanged, truncated to `limit`.
///
/// # Errors
///
/// Returns an error if the instants have to be computed and the
/// snapshot cannot be normalized.
pub fn list_occurrences(
    snapshot: &CourseSnapshot,
    limit: Option<usize>,
) -> Result<OccurrencesResponse, ApiError> {
    if let Some(supplied) = &snapshot.next_occurrences {
        let occurrences: Vec<String> = match limit {
            Some(limit) => supplied.iter().take(limit).cloned().collect(),
            None => supplied.clone(),
        };
        return Ok(OccurrencesResponse {
            occurrences,
            supplied: true,
        });
    }

    let course: Course = course_from_snapshot(snapshot)?;
    let occurrences: Vec<String> = seminar_domain::list_occurrences(&course.schedule, limit)
        .iter()
        .map(DateTime::to_rfc3339)
        .collect();

    Ok(OccurrencesResponse {
        occurrences,
        supplied: false,
    })
}

/// Orders courses for catalog display.
///
/// Finished courses always list after active ones, whatever key and
/// direction the viewer picked.
///
/// # Errors
///
/// Returns an error if the sort key or direction is unknown, or if a
/// snapshot cannot be normalized.
pub fn order_courses(
    snapshots: &[CourseSnapshot],
    sort_key: &str,
    sort_direction: &str,
    now: DateTime<Utc>,
) -> Result<Vec<OrderedCourseInfo>, ApiError> {
    let key: SortKey = SortKey::from_str(sort_key).map_err(translate_domain_error)?;
    let direction: SortDirection =
        SortDirection::from_str(sort_direction).map_err(translate_domain_error)?;

    let courses: Vec<Course> = snapshots
        .iter()
        .map(course_from_snapshot)
        .collect::<Result<_, _>>()?;

    let ordered: Vec<Course> = seminar_domain::order_courses(&courses, key, direction, now);

    Ok(ordered
        .into_iter()
        .map(|course| OrderedCourseInfo {
            state: classify(&course.schedule, now).as_str().to_string(),
            course_id: course.course_id,
            title: course.title,
            enrolled_count: course.capacity.enrolled_count,
            max_attendants: course.capacity.max_attendants,
        })
        .collect())
}
