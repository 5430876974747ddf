// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot wire-format tests.

use super::helpers::{utc, weekly_snapshot};
use crate::handlers::{course_from_snapshot, get_lifecycle_state};
use crate::request_response::CourseSnapshot;

#[test]
fn test_snapshot_deserializes_from_collaborator_json() {
    let payload = r#"{
        "course_id": 7,
        "title": "Watercolor Basics",
        "start_date": "2025-09-01",
        "end_date": "2025-09-30",
        "start_time": "11:00:00",
        "end_time": "13:00:00",
        "periodicity": "weekly",
        "weekdays": ["thursday"],
        "interval": 4,
        "timezone": "Europe/Berlin",
        "exclude_dates": ["2025-09-18"],
        "max_attendants": 15,
        "enrolled_count": 3,
        "created_at": "2025-06-01T08:00:00Z"
    }"#;

    let snapshot: CourseSnapshot = serde_json::from_str(payload).unwrap();
    assert_eq!(snapshot.course_id, Some(7));
    assert_eq!(snapshot.interval, 4);
    assert_eq!(snapshot.week_of_month, None);
    assert_eq!(snapshot.next_occurrences, None);

    let course = course_from_snapshot(&snapshot).unwrap();
    assert_eq!(course.title, "Watercolor Basics");
    assert_eq!(course.capacity.seats_remaining(), 12);
}

#[test]
fn test_snapshot_with_sentinel_dates_from_json() {
    let payload = r#"{
        "title": "Unscheduled Course",
        "start_date": "0000-00-00",
        "end_date": "0000-00-00",
        "periodicity": "once",
        "interval": 1,
        "timezone": "Europe/Berlin",
        "max_attendants": 10,
        "enrolled_count": 0
    }"#;

    let snapshot: CourseSnapshot = serde_json::from_str(payload).unwrap();
    let course = course_from_snapshot(&snapshot).unwrap();
    assert_eq!(course.schedule.start_date(), None);
    assert_eq!(course.schedule.end_date(), None);

    let response = get_lifecycle_state(&snapshot, utc(2025, 7, 1, 12, 0)).unwrap();
    assert_eq!(response.state, "no_schedule");
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let snapshot: CourseSnapshot = weekly_snapshot();
    let encoded: String = serde_json::to_string(&snapshot).unwrap();
    let decoded: CourseSnapshot = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn test_precomputed_fields_survive_deserialization() {
    let payload = r#"{
        "title": "Denormalized Course",
        "periodicity": "weekly",
        "weekdays": ["monday"],
        "interval": 1,
        "timezone": "Europe/Berlin",
        "max_attendants": 10,
        "enrolled_count": 2,
        "next_occurrences": ["2025-09-01T09:00:00Z"],
        "formatted_schedule": "Every Monday from 11:00 to 13:00"
    }"#;

    let snapshot: CourseSnapshot = serde_json::from_str(payload).unwrap();
    assert_eq!(
        snapshot.next_occurrences,
        Some(vec![String::from("2025-09-01T09:00:00Z")])
    );
    assert_eq!(
        snapshot.formatted_schedule.as_deref(),
        Some("Every Monday from 11:00 to 13:00")
    );
}

#[test]
fn test_exclusion_outside_range_is_harmless() {
    let mut snapshot: CourseSnapshot = weekly_snapshot();
    snapshot.exclude_dates = vec![String::from("2026-01-01")];
    let course = course_from_snapshot(&snapshot).unwrap();
    assert_eq!(
        seminar_domain::occurrence_dates(&course.schedule).count(),
        4
    );
}
