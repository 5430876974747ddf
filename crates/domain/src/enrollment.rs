// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment eligibility decisions.
//!
//! The policy is a pure decision table evaluated per course: lifecycle
//! state, a capacity snapshot, and the user's enrollment flag go in,
//! an advisory (can enroll, can cancel, blocked reason) triple comes
//! out. Nothing is persisted and no transition is stored.
//!
//! The decision is advisory only. Capacity is serialized by the
//! external course-management collaborator; two near-simultaneous
//! enrollments are resolved there, and callers must treat the actual
//! enroll call as the authority.

use crate::capacity::CourseCapacity;
use crate::lifecycle::LifecycleState;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cancellations close this many hours before the course starts.
pub const CANCELLATION_LOCKOUT_HOURS: i64 = 24;

/// Why an action is not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockedReason {
    /// The course has no complete schedule and is not bookable yet.
    NotScheduled,
    /// All seats are taken.
    CourseFull,
    /// The course starts within the cancellation lockout window.
    TooCloseToStart,
    /// The course has already started.
    AlreadyStarted,
    /// The course has already ended.
    CourseFinished,
}

impl BlockedReason {
    /// Returns the string representation of this reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotScheduled => "not_scheduled",
            Self::CourseFull => "course_full",
            Self::TooCloseToStart => "too_close_to_start",
            Self::AlreadyStarted => "already_started",
            Self::CourseFinished => "course_finished",
        }
    }
}

impl std::fmt::Display for BlockedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The eligibility triple for one user, course, and instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentDecision {
    /// Whether enrolling is offered.
    pub can_enroll: bool,
    /// Whether cancelling an existing enrollment is offered.
    pub can_cancel: bool,
    /// Why the relevant action is blocked, when neither is offered.
    pub blocked_reason: Option<BlockedReason>,
}

impl EnrollmentDecision {
    const fn blocked(reason: BlockedReason) -> Self {
        Self {
            can_enroll: false,
            can_cancel: false,
            blocked_reason: Some(reason),
        }
    }

    const fn allow_enroll() -> Self {
        Self {
            can_enroll: true,
            can_cancel: false,
            blocked_reason: None,
        }
    }

    const fn allow_cancel() -> Self {
        Self {
            can_enroll: false,
            can_cancel: true,
            blocked_reason: None,
        }
    }
}

/// Decides enrollment eligibility for one course.
///
/// # Arguments
///
/// * `state` - The course's lifecycle state at `now`
/// * `capacity` - A fresh capacity snapshot
/// * `is_enrolled` - Whether the current user already holds an
///   enrollment
/// * `now` - The decision instant
/// * `start_instant` - The course's resolved start instant, when
///   derivable
///
/// # Decision table, in priority order
///
/// 1. No schedule: the course is not bookable, neither action offered
/// 2. Finished: neither action offered regardless of enrollment
/// 3. Enrolled: cancelling is offered until the course starts or the
///    lockout window opens (within 24 hours of the start)
/// 4. Not enrolled: enrolling is offered for upcoming courses with an
///    open seat
#[must_use]
pub fn decide_enrollment(
    state: LifecycleState,
    capacity: CourseCapacity,
    is_enrolled: bool,
    now: DateTime<Utc>,
    start_instant: Option<DateTime<Utc>>,
) -> EnrollmentDecision {
    if state == LifecycleState::NoSchedule {
        return EnrollmentDecision::blocked(BlockedReason::NotScheduled);
    }
    if state == LifecycleState::Finished {
        return EnrollmentDecision::blocked(BlockedReason::CourseFinished);
    }

    if is_enrolled {
        return match start_instant {
            Some(start) if now >= start => {
                EnrollmentDecision::blocked(BlockedReason::AlreadyStarted)
            }
            Some(start) if start - now <= Duration::hours(CANCELLATION_LOCKOUT_HOURS) => {
                EnrollmentDecision::blocked(BlockedReason::TooCloseToStart)
            }
            // A missing start instant cannot happen for a classified
            // Upcoming/InProgress course; fail open for the user.
            _ => EnrollmentDecision::allow_cancel(),
        };
    }

    if state == LifecycleState::InProgress {
        return EnrollmentDecision::blocked(BlockedReason::AlreadyStarted);
    }

    // state == Upcoming, user not enrolled.
    if capacity.is_full() {
        return EnrollmentDecision::blocked(BlockedReason::CourseFull);
    }
    EnrollmentDecision::allow_enroll()
}
