// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone, Utc};

use crate::CourseSnapshot;

/// A weekly Thursday course through September 2025, open seats.
pub fn weekly_snapshot() -> CourseSnapshot {
    CourseSnapshot {
        course_id: Some(101),
        title: String::from("Aquarelle Painting"),
        start_date: Some(String::from("2025-09-01")),
        end_date: Some(String::from("2025-09-30")),
        start_time: Some(String::from("11:00:00")),
        end_time: Some(String::from("13:00:00")),
        periodicity: String::from("weekly"),
        weekdays: vec![String::from("thursday")],
        week_of_month: None,
        interval: 1,
        timezone: String::from("Europe/Berlin"),
        exclude_dates: vec![],
        max_attendants: 20,
        enrolled_count: 5,
        created_at: Some(String::from("2025-06-01T08:00:00Z")),
        next_occurrences: None,
        formatted_schedule: None,
    }
}

/// A one-time course on July 8th, 2025.
pub fn one_time_snapshot() -> CourseSnapshot {
    CourseSnapshot {
        course_id: Some(102),
        title: String::from("First Aid Refresher"),
        start_date: Some(String::from("2025-07-08")),
        end_date: Some(String::from("2025-07-08")),
        start_time: Some(String::from("09:30:00")),
        end_time: Some(String::from("11:30:00")),
        periodicity: String::from("once"),
        weekdays: vec![],
        week_of_month: None,
        interval: 1,
        timezone: String::from("Europe/Berlin"),
        exclude_dates: vec![],
        max_attendants: 12,
        enrolled_count: 12,
        created_at: Some(String::from("2025-05-15T10:00:00Z")),
        next_occurrences: None,
        formatted_schedule: None,
    }
}

/// A course still using the unset-date sentinel on the wire.
pub fn sentinel_snapshot() -> CourseSnapshot {
    CourseSnapshot {
        course_id: Some(103),
        title: String::from("Advanced Pottery"),
        start_date: Some(String::from("0000-00-00")),
        end_date: Some(String::from("0000-00-00")),
        start_time: None,
        end_time: None,
        periodicity: String::from("weekly"),
        weekdays: vec![String::from("monday")],
        week_of_month: None,
        interval: 1,
        timezone: String::from("Europe/Berlin"),
        exclude_dates: vec![],
        max_attendants: 8,
        enrolled_count: 0,
        created_at: None,
        next_occurrences: None,
        formatted_schedule: None,
    }
}

/// A fixed UTC instant for deterministic tests.
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}
