// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course lifecycle classification.
//!
//! A course's lifecycle state is a pure function of its schedule rule
//! and the current instant. No state is stored; every query recomputes
//! the classification from the snapshot it is given.
//!
//! ## Invariants
//!
//! - A rule with any unset date or time field is `NoSchedule`,
//!   regardless of `now` — it is never reported as in progress or
//!   finished
//! - Inverted date ranges and unresolvable instants also classify as
//!   `NoSchedule`; upstream data quality must not crash a display path
//! - Start and end instants are wall-clock times in the course's
//!   declared timezone, resolved to UTC for comparison

use crate::occurrence::resolve_local;
use crate::rule::ScheduleRule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The lifecycle state of a course relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// The course has no complete schedule yet.
    NoSchedule,
    /// The course starts in the future.
    Upcoming,
    /// The course has started and not yet ended.
    InProgress,
    /// The course has ended.
    Finished,
}

impl LifecycleState {
    /// Returns the string representation of this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoSchedule => "no_schedule",
            Self::Upcoming => "upcoming",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }

    /// Returns whether this state is `Finished`.
    ///
    /// Finished courses are the partition that always sinks to the
    /// bottom of course listings.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the UTC instant the course starts, when derivable.
///
/// Combines `start_date` and `start_time` in the course's timezone.
#[must_use]
pub fn start_instant(rule: &ScheduleRule) -> Option<DateTime<Utc>> {
    let date = rule.start_date()?;
    let time_of_day = rule.start_time()?;
    let tz = rule.tz()?;
    resolve_local(date, time_of_day, tz)
}

/// Returns the UTC instant the course ends, when derivable.
///
/// Combines `end_date` and `end_time` in the course's timezone.
#[must_use]
pub fn end_instant(rule: &ScheduleRule) -> Option<DateTime<Utc>> {
    let date = rule.end_date()?;
    let time_of_day = rule.end_time()?;
    let tz = rule.tz()?;
    resolve_local(date, time_of_day, tz)
}

/// Classifies a course's lifecycle state at the given instant.
#[must_use]
pub fn classify(rule: &ScheduleRule, now: DateTime<Utc>) -> LifecycleState {
    if !rule.has_complete_schedule() {
        return LifecycleState::NoSchedule;
    }
    if rule.date_range().is_none() {
        // Inverted bounds denote an empty schedule.
        return LifecycleState::NoSchedule;
    }
    let (Some(start), Some(end)) = (start_instant(rule), end_instant(rule)) else {
        return LifecycleState::NoSchedule;
    };

    if now < start {
        LifecycleState::Upcoming
    } else if now < end {
        LifecycleState::InProgress
    } else {
        LifecycleState::Finished
    }
}
