// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course list ordering for catalog display.
//!
//! Finished courses always sink to the bottom of a listing, whatever
//! sort key and direction the viewer picked. This is a deliberate
//! product invariant: the sort key orders each partition internally,
//! it never lets a finished course climb above an active one.

use crate::capacity::CourseCapacity;
use crate::error::DomainError;
use crate::lifecycle::{LifecycleState, classify};
use crate::rule::ScheduleRule;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// The viewer-selected sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    StartDate,
    EndDate,
    EnrolledCount,
    MaxAttendants,
    CreatedAt,
}

impl SortKey {
    /// All sort keys, for enumerating key/direction combinations.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::StartDate,
        Self::EndDate,
        Self::EnrolledCount,
        Self::MaxAttendants,
        Self::CreatedAt,
    ];

    /// Returns the string representation of this sort key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::EnrolledCount => "enrolled_count",
            Self::MaxAttendants => "max_attendants",
            Self::CreatedAt => "created_at",
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "start_date" => Ok(Self::StartDate),
            "end_date" => Ok(Self::EndDate),
            "enrolled_count" => Ok(Self::EnrolledCount),
            "max_attendants" => Ok(Self::MaxAttendants),
            "created_at" => Ok(Self::CreatedAt),
            _ => Err(DomainError::InvalidSortKey(s.to_string())),
        }
    }
}

/// The viewer-selected sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the string representation of this direction.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(DomainError::InvalidSortDirection(s.to_string())),
        }
    }
}

/// A course snapshot as a catalog listing sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// The canonical numeric identifier assigned by the collaborator.
    /// `None` for courses not yet persisted there.
    pub course_id: Option<i64>,
    /// The course title.
    pub title: String,
    /// The recurrence rule.
    pub schedule: ScheduleRule,
    /// The capacity snapshot.
    pub capacity: CourseCapacity,
    /// When the course record was created.
    pub created_at: Option<DateTime<Utc>>,
}

/// Orders courses for display.
///
/// Every course is classified at `now`, the list is partitioned into
/// active (upcoming, in progress, or unscheduled) and finished, each
/// partition is sorted by the chosen key and direction, and the
/// finished partition is appended after the active one. The sort is
/// stable within partitions.
#[must_use]
pub fn order_courses(
    courses: &[Course],
    key: SortKey,
    direction: SortDirection,
    now: DateTime<Utc>,
) -> Vec<Course> {
    let mut active: Vec<Course> = Vec::new();
    let mut finished: Vec<Course> = Vec::new();

    for course in courses {
        if classify(&course.schedule, now).is_finished() {
            finished.push(course.clone());
        } else {
            active.push(course.clone());
        }
    }

    sort_partition(&mut active, key, direction);
    sort_partition(&mut finished, key, direction);

    active.extend(finished);
    active
}

/// Classifies every course at `now`, preserving input order.
#[must_use]
pub fn classify_courses(courses: &[Course], now: DateTime<Utc>) -> Vec<LifecycleState> {
    courses
        .iter()
        .map(|course| classify(&course.schedule, now))
        .collect()
}

fn sort_partition(partition: &mut [Course], key: SortKey, direction: SortDirection) {
    partition.sort_by(|a, b| {
        let ordering: Ordering = compare_by_key(a, b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Compares two courses by the given key in ascending direction.
///
/// Unset optional values order after set values, so ascending listings
/// show dated courses first; descending reverses the full comparator.
fn compare_by_key(a: &Course, b: &Course, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::StartDate => cmp_unset_last(a.schedule.start_date(), b.schedule.start_date()),
        SortKey::EndDate => cmp_unset_last(a.schedule.end_date(), b.schedule.end_date()),
        SortKey::EnrolledCount => a.capacity.enrolled_count.cmp(&b.capacity.enrolled_count),
        SortKey::MaxAttendants => a.capacity.max_attendants.cmp(&b.capacity.max_attendants),
        SortKey::CreatedAt => cmp_unset_last(a.created_at, b.created_at),
    }
}

fn cmp_unset_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
