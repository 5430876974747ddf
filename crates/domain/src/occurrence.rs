// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Occurrence expansion for schedule rules.
//!
//! [`Occurrences`] turns a [`ScheduleRule`] into a lazy, finite
//! sequence of session dates; the instant iterators resolve those
//! dates to UTC through the rule's timezone.
//!
//! ## Invariants
//!
//! - The sequence is always finite: it is bounded by `end_date`, or by
//!   a 366-day scan cap when `end_date` is unset
//! - Expansion never mutates the rule and never errors; missing or
//!   inconsistent data yields an empty sequence
//! - Excluded dates are matched by calendar date only
//! - Sessions before `start_date` or after `end_date` are never
//!   produced

use crate::rule::{Periodicity, ScheduleRule, WeekOfMonth, WeekdaySet};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::collections::BTreeSet;
use time::{Date, Duration, Month, Time, Weekday};

/// Scan bound for rules without an end date.
///
/// A year plus a day keeps "runs until further notice" courses
/// rendering a meaningful horizon while guaranteeing termination.
const UNBOUNDED_SCAN_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Exhausted,
    Single(Date),
    Scan { next: Date },
    Months { year: i32, month: u8 },
}

/// Lazy iterator over the session dates of a schedule rule.
///
/// Restartable: building a new `Occurrences` from the same rule always
/// produces the same sequence.
#[derive(Debug, Clone)]
pub struct Occurrences {
    periodicity: Periodicity,
    weekdays: WeekdaySet,
    week_step: u32,
    month_step: u32,
    monthly_weekday: Weekday,
    monthly_ordinal: WeekOfMonth,
    anchor_monday: Date,
    window_start: Date,
    window_end: Date,
    exclude: BTreeSet<Date>,
    cursor: Cursor,
}

impl Occurrences {
    /// Creates the occurrence sequence for a rule.
    #[must_use]
    pub fn new(rule: &ScheduleRule) -> Self {
        let Some(start) = rule.start_date() else {
            return Self::exhausted();
        };

        let window_end: Date = match rule.end_date() {
            Some(end) => {
                if end < start {
                    // Inverted bounds denote an empty range.
                    return Self::exhausted();
                }
                end
            }
            None => start
                .checked_add(Duration::days(UNBOUNDED_SCAN_DAYS))
                .unwrap_or(Date::MAX),
        };

        let cursor: Cursor = match rule.periodicity() {
            Periodicity::Once => {
                if rule.is_excluded(start) {
                    Cursor::Exhausted
                } else {
                    Cursor::Single(start)
                }
            }
            Periodicity::Daily => Cursor::Scan { next: start },
            Periodicity::Weekly | Periodicity::Biweekly | Periodicity::Custom => {
                if rule.weekdays().is_empty() {
                    // No recurring day selected: zero occurrences.
                    Cursor::Exhausted
                } else {
                    Cursor::Scan { next: start }
                }
            }
            Periodicity::Monthly => Cursor::Months {
                year: start.year(),
                month: u8::from(start.month()),
            },
        };

        Self {
            periodicity: rule.periodicity(),
            weekdays: rule.weekdays(),
            week_step: rule.periodicity().week_step(rule.interval()),
            month_step: rule.interval(),
            monthly_weekday: rule.weekdays().first().unwrap_or_else(|| start.weekday()),
            monthly_ordinal: rule
                .week_of_month()
                .unwrap_or_else(|| ordinal_within_month(start)),
            anchor_monday: monday_of_week(first_matching_date(start, rule.weekdays())),
            window_start: start,
            window_end,
            exclude: rule.exclude_dates().clone(),
            cursor,
        }
    }

    fn exhausted() -> Self {
        Self {
            periodicity: Periodicity::Once,
            weekdays: WeekdaySet::empty(),
            week_step: 1,
            month_step: 1,
            monthly_weekday: Weekday::Monday,
            monthly_ordinal: WeekOfMonth::First,
            anchor_monday: Date::MIN,
            window_start: Date::MIN,
            window_end: Date::MIN,
            exclude: BTreeSet::new(),
            cursor: Cursor::Exhausted,
        }
    }

    fn matches_scan(&self, date: Date) -> bool {
        match self.periodicity {
            Periodicity::Daily => true,
            Periodicity::Weekly | Periodicity::Biweekly | Periodicity::Custom => {
                if !self.weekdays.contains(date.weekday()) {
                    return false;
                }
                let weeks: i64 = (monday_of_week(date) - self.anchor_monday).whole_days() / 7;
                weeks % i64::from(self.week_step) == 0
            }
            Periodicity::Once | Periodicity::Monthly => false,
        }
    }
}

impl Iterator for Occurrences {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        loop {
            match self.cursor {
                Cursor::Exhausted => return None,
                Cursor::Single(date) => {
                    self.cursor = Cursor::Exhausted;
                    return Some(date);
                }
                Cursor::Scan { next } => {
                    if next > self.window_end {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }
                    self.cursor = match next.checked_add(Duration::days(1)) {
                        Some(following) => Cursor::Scan { next: following },
                        None => Cursor::Exhausted,
                    };
                    if self.matches_scan(next) && !self.exclude.contains(&next) {
                        return Some(next);
                    }
                }
                Cursor::Months { year, month } => {
                    let Some(first) = first_of_month(year, month) else {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    };
                    if first > self.window_end {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }
                    let (next_year, next_month) = add_months(year, month, self.month_step);
                    self.cursor = Cursor::Months {
                        year: next_year,
                        month: next_month,
                    };
                    let resolved: Option<Date> = nth_weekday_in_month(
                        year,
                        month,
                        self.monthly_weekday,
                        self.monthly_ordinal,
                    )
                    .filter(|date| {
                        *date >= self.window_start
                            && *date <= self.window_end
                            && !self.exclude.contains(date)
                    });
                    if let Some(date) = resolved {
                        return Some(date);
                    }
                }
            }
        }
    }
}

/// Lazy iterator over session start instants in UTC.
#[derive(Debug, Clone)]
pub struct OccurrenceInstants {
    dates: Occurrences,
    tz: Option<Tz>,
    start_time: Time,
}

impl Iterator for OccurrenceInstants {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<DateTime<Utc>> {
        let tz: Tz = self.tz?;
        loop {
            let date: Date = self.dates.next()?;
            // Non-existent local times (DST gaps) are skipped.
            if let Some(instant) = resolve_local(date, self.start_time, tz) {
                return Some(instant);
            }
        }
    }
}

/// Lazy iterator over (start, end) session spans in UTC.
#[derive(Debug, Clone)]
pub struct OccurrenceSpans {
    dates: Occurrences,
    tz: Option<Tz>,
    start_time: Time,
    end_time: Time,
}

impl Iterator for OccurrenceSpans {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let tz: Tz = self.tz?;
        loop {
            let date: Date = self.dates.next()?;
            let Some(start) = resolve_local(date, self.start_time, tz) else {
                continue;
            };
            // An end time at or before the start time yields a
            // zero-length span rather than an inverted one.
            let end: DateTime<Utc> = resolve_local(date, self.end_time, tz)
                .filter(|end| *end > start)
                .unwrap_or(start);
            return Some((start, end));
        }
    }
}

/// Returns the session dates of a rule.
#[must_use]
pub fn occurrence_dates(rule: &ScheduleRule) -> Occurrences {
    Occurrences::new(rule)
}

/// Returns the session start instants of a rule, resolved to UTC.
///
/// Missing start times resolve at midnight; an unresolvable timezone
/// yields an empty sequence.
#[must_use]
pub fn occurrence_instants(rule: &ScheduleRule) -> OccurrenceInstants {
    OccurrenceInstants {
        dates: Occurrences::new(rule),
        tz: rule.tz(),
        start_time: rule.start_time().unwrap_or(Time::MIDNIGHT),
    }
}

/// Returns (start, end) session spans of a rule, resolved to UTC.
#[must_use]
pub fn occurrence_spans(rule: &ScheduleRule) -> OccurrenceSpans {
    let start_time: Time = rule.start_time().unwrap_or(Time::MIDNIGHT);
    OccurrenceSpans {
        dates: Occurrences::new(rule),
        tz: rule.tz(),
        start_time,
        end_time: rule.end_time().unwrap_or(start_time),
    }
}

/// Collects up to `limit` session start instants.
#[must_use]
pub fn list_occurrences(rule: &ScheduleRule, limit: Option<usize>) -> Vec<DateTime<Utc>> {
    match limit {
        Some(limit) => occurrence_instants(rule).take(limit).collect(),
        None => occurrence_instants(rule).collect(),
    }
}

/// Collects the session dates that fall within `[from, to]`.
#[must_use]
pub fn occurrences_within(rule: &ScheduleRule, from: Date, to: Date) -> Vec<Date> {
    occurrence_dates(rule)
        .skip_while(|date| *date < from)
        .take_while(|date| *date <= to)
        .collect()
}

/// Resolves a wall-clock date and time to a UTC instant through the
/// given zone.
///
/// Ambiguous local times (DST fall-back) take the earlier offset;
/// non-existent local times (DST spring-forward) resolve to `None`.
pub(crate) fn resolve_local(date: Date, time_of_day: Time, tz: Tz) -> Option<DateTime<Utc>> {
    let naive_date = chrono::NaiveDate::from_ymd_opt(
        date.year(),
        date.month() as u32,
        u32::from(date.day()),
    )?;
    let naive_time = chrono::NaiveTime::from_hms_opt(
        u32::from(time_of_day.hour()),
        u32::from(time_of_day.minute()),
        u32::from(time_of_day.second()),
    )?;
    let local = tz.from_local_datetime(&naive_date.and_time(naive_time)).earliest()?;
    Some(local.with_timezone(&Utc))
}

/// Returns the first date at or after `start` whose weekday is in the
/// set.
///
/// The week of this date anchors interval counting: the first matching
/// week is week zero, so an every-N-weeks rule never skips its nearest
/// session. Falls back to `start` itself when the set is empty.
fn first_matching_date(start: Date, weekdays: WeekdaySet) -> Date {
    if weekdays.is_empty() {
        return start;
    }
    let mut candidate: Date = start;
    for _ in 0..7 {
        if weekdays.contains(candidate.weekday()) {
            return candidate;
        }
        match candidate.checked_add(Duration::days(1)) {
            Some(following) => candidate = following,
            None => return start,
        }
    }
    start
}

/// Returns the Monday of the week containing `date`.
fn monday_of_week(date: Date) -> Date {
    date.checked_sub(Duration::days(i64::from(
        date.weekday().number_days_from_monday(),
    )))
    .unwrap_or(date)
}

/// Returns which occurrence of its weekday `date` is within its month.
pub(crate) fn ordinal_within_month(date: Date) -> WeekOfMonth {
    match (date.day() - 1) / 7 {
        0 => WeekOfMonth::First,
        1 => WeekOfMonth::Second,
        2 => WeekOfMonth::Third,
        3 => WeekOfMonth::Fourth,
        _ => WeekOfMonth::Last,
    }
}

/// Steps a (year, month) anchor forward by `step` months.
fn add_months(year: i32, month: u8, step: u32) -> (i32, u8) {
    let step: i32 = i32::try_from(step).unwrap_or(i32::MAX);
    let index: i32 = year.saturating_mul(12) + i32::from(month) - 1 + step;
    let next_month: u8 = u8::try_from(index.rem_euclid(12) + 1).unwrap_or(1);
    (index.div_euclid(12), next_month)
}

fn first_of_month(year: i32, month: u8) -> Option<Date> {
    let month: Month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, 1).ok()
}

/// Resolves the nth (or last) occurrence of a weekday within a month.
fn nth_weekday_in_month(
    year: i32,
    month: u8,
    weekday: Weekday,
    ordinal: WeekOfMonth,
) -> Option<Date> {
    let month_enum: Month = Month::try_from(month).ok()?;
    if ordinal == WeekOfMonth::Last {
        let length: u8 = time::util::days_in_year_month(year, month_enum);
        let last: Date = Date::from_calendar_date(year, month_enum, length).ok()?;
        let back: u8 = (7 + last.weekday().number_days_from_monday()
            - weekday.number_days_from_monday())
            % 7;
        return last.checked_sub(Duration::days(i64::from(back)));
    }

    let first: Date = Date::from_calendar_date(year, month_enum, 1).ok()?;
    let forward: u8 = (7 + weekday.number_days_from_monday()
        - first.weekday().number_days_from_monday())
        % 7;
    let nth: i64 = i64::from(ordinal.ordinal()) - 1;
    let date: Date = first.checked_add(Duration::days(i64::from(forward) + 7 * nth))?;
    if u8::from(date.month()) == month {
        Some(date)
    } else {
        // A fourth occurrence always exists; this guard only trips for
        // arithmetic at the calendar boundary.
        None
    }
}
