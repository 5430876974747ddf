// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cross-module scenario and property tests.

#![allow(clippy::unwrap_used)]


use crate::{CourseCapacity, Periodicity, ScheduleRule, WeekdaySet};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeSet;
use time::{Date, Time, Weekday};

/// Builds a complete rule with the given shape in Europe/Berlin.
#[allow(clippy::too_many_arguments)]
pub fn make_rule(
    periodicity: Periodicity,
    start_date: Option<Date>,
    end_date: Option<Date>,
    start_time: Option<Time>,
    end_time: Option<Time>,
    weekdays: &[Weekday],
    interval: u32,
    exclude: &[Date],
) -> ScheduleRule {
    ScheduleRule::new(
        periodicity,
        start_date,
        end_date,
        start_time,
        end_time,
        WeekdaySet::from_days(weekdays),
        None,
        interval,
        exclude.iter().copied().collect::<BTreeSet<Date>>(),
        "Europe/Berlin",
    )
    .unwrap()
}

/// Builds a course with the given title, rule, and capacity.
pub fn make_course(title: &str, schedule: ScheduleRule, capacity: CourseCapacity) -> crate::Course {
    crate::Course {
        course_id: None,
        title: title.to_string(),
        schedule,
        capacity,
        created_at: None,
    }
}

/// A fixed UTC instant for deterministic classification.
pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}
