// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurrence rule domain model.
//!
//! A [`ScheduleRule`] is an immutable description of when a course
//! meets: an optional date range, optional daily times, a recurrence
//! family, and the qualifiers that family needs (weekday set, week of
//! month, interval, exclusion dates). Rules are owned and persisted by
//! the external course-management collaborator; this crate only reads
//! snapshots and derives values from them.
//!
//! ## Invariants
//!
//! - `interval >= 1`; one-time schedules always carry `interval == 1`
//! - The timezone identifier parses as an IANA zone at construction
//! - Unset dates/times are represented as `None`, never as sentinel
//!   values; sentinel decoding is a boundary concern

use crate::error::DomainError;
use crate::validation::{validate_interval, validate_timezone};
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::{Date, Time, Weekday};

/// All weekdays in Monday-first order.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

/// The recurrence family governing how a course repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    /// A single session on `start_date`.
    #[default]
    Once,
    /// Every calendar day within the date range.
    Daily,
    /// Selected weekdays, every `interval` weeks.
    Weekly,
    /// Selected weekdays, every second week.
    Biweekly,
    /// One resolved weekday per month, every `interval` months.
    Monthly,
    /// Selected weekdays with a caller-chosen week interval.
    Custom,
}

impl Periodicity {
    /// Returns the string representation of this periodicity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }

    /// Returns whether this periodicity needs a non-empty weekday set
    /// to produce any occurrences.
    #[must_use]
    pub const fn requires_weekdays(&self) -> bool {
        matches!(self, Self::Weekly | Self::Biweekly | Self::Custom)
    }

    /// Returns the week step for weekly-family periodicities.
    ///
    /// Biweekly is weekly recurrence with a fixed step of two; the
    /// stored interval is ignored for it. Other families pass the
    /// interval through.
    #[must_use]
    pub const fn week_step(&self, interval: u32) -> u32 {
        match self {
            Self::Biweekly => 2,
            _ => interval,
        }
    }
}

impl FromStr for Periodicity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "once" => Ok(Self::Once),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "custom" => Ok(Self::Custom),
            _ => Err(DomainError::InvalidPeriodicity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the lowercase name of a weekday.
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "monday",
        Weekday::Tuesday => "tuesday",
        Weekday::Wednesday => "wednesday",
        Weekday::Thursday => "thursday",
        Weekday::Friday => "friday",
        Weekday::Saturday => "saturday",
        Weekday::Sunday => "sunday",
    }
}

/// Parses a weekday from its lowercase name.
///
/// # Errors
///
/// Returns `DomainError::InvalidWeekday` if the name is not recognized.
pub fn parse_weekday(s: &str) -> Result<Weekday, DomainError> {
    match s {
        "monday" => Ok(Weekday::Monday),
        "tuesday" => Ok(Weekday::Tuesday),
        "wednesday" => Ok(Weekday::Wednesday),
        "thursday" => Ok(Weekday::Thursday),
        "friday" => Ok(Weekday::Friday),
        "saturday" => Ok(Weekday::Saturday),
        "sunday" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(s.to_string())),
    }
}

/// A compact set of weekdays.
///
/// Iteration order is always Monday-first regardless of insertion
/// order, so callers get deterministic output for display and for the
/// monthly default-weekday resolution.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet {
    bits: u8,
}

impl WeekdaySet {
    /// Creates an empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a set from a slice of weekdays.
    #[must_use]
    pub fn from_days(days: &[Weekday]) -> Self {
        let mut set: Self = Self::empty();
        for day in days {
            set.insert(*day);
        }
        set
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.number_days_from_monday()
    }

    /// Adds a weekday to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.bits |= Self::bit(day);
    }

    /// Returns whether the set contains the given weekday.
    #[must_use]
    pub fn contains(&self, day: Weekday) -> bool {
        self.bits & Self::bit(day) != 0
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the number of weekdays in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates the set in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|day| self.contains(*day))
    }

    /// Returns the first weekday in Monday-first order, if any.
    #[must_use]
    pub fn first(&self) -> Option<Weekday> {
        self.iter().next()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set: Self = Self::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl std::fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_name))
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names: Vec<String> = Vec::deserialize(deserializer)?;
        let mut set: Self = Self::empty();
        for name in &names {
            let day: Weekday = parse_weekday(name).map_err(D::Error::custom)?;
            set.insert(day);
        }
        Ok(set)
    }
}

/// The week-of-month ordinal for monthly recurrence.
///
/// Wire value 1 through 4 selects the nth matching weekday of the
/// month; -1 selects the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekOfMonth {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl WeekOfMonth {
    /// Creates a `WeekOfMonth` from its wire ordinal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekOfMonth` if the ordinal is not
    /// in {1, 2, 3, 4, -1}.
    pub const fn new(ordinal: i8) -> Result<Self, DomainError> {
        match ordinal {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            -1 => Ok(Self::Last),
            _ => Err(DomainError::InvalidWeekOfMonth { ordinal }),
        }
    }

    /// Returns the wire ordinal of this week-of-month.
    #[must_use]
    pub const fn ordinal(&self) -> i8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Last => -1,
        }
    }
}

/// Immutable description of a course recurrence.
///
/// All fields are snapshots of externally owned data. Derived values
/// (occurrences, lifecycle state, display text) are recomputed on every
/// query; the rule itself carries no mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRule {
    /// First day a session may take place. `None` means not yet
    /// scheduled.
    start_date: Option<Date>,
    /// Last day a session may take place (inclusive).
    end_date: Option<Date>,
    /// Wall-clock start time of each session.
    start_time: Option<Time>,
    /// Wall-clock end time of each session.
    end_time: Option<Time>,
    /// The recurrence family.
    periodicity: Periodicity,
    /// Weekdays a weekly-family rule matches; also the weekday pool a
    /// monthly rule resolves from.
    weekdays: WeekdaySet,
    /// The monthly ordinal, when the periodicity is monthly.
    week_of_month: Option<WeekOfMonth>,
    /// Every N occurrence-units (weeks or months).
    interval: u32,
    /// Calendar dates to skip even when otherwise matched.
    exclude_dates: BTreeSet<Date>,
    /// IANA timezone identifier; one zone per course.
    timezone: String,
}

impl ScheduleRule {
    /// Creates a new `ScheduleRule`.
    ///
    /// # Arguments
    ///
    /// * `periodicity` - The recurrence family
    /// * `start_date` / `end_date` - The inclusive date range, either
    ///   bound may be unset
    /// * `start_time` / `end_time` - Daily session times
    /// * `weekdays` - Weekday qualifiers for weekly-family rules
    /// * `week_of_month` - Monthly ordinal qualifier
    /// * `interval` - Every N weeks/months; normalized to 1 for
    ///   one-time rules
    /// * `exclude_dates` - Dates to skip
    /// * `timezone` - IANA zone identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or the timezone is not
    /// a known IANA zone. Inverted date ranges and empty weekday sets
    /// are accepted; they denote empty schedules, not caller bugs.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        periodicity: Periodicity,
        start_date: Option<Date>,
        end_date: Option<Date>,
        start_time: Option<Time>,
        end_time: Option<Time>,
        weekdays: WeekdaySet,
        week_of_month: Option<WeekOfMonth>,
        interval: u32,
        exclude_dates: BTreeSet<Date>,
        timezone: &str,
    ) -> Result<Self, DomainError> {
        let interval: u32 = validate_interval(periodicity, interval)?;
        validate_timezone(timezone)?;

        Ok(Self {
            start_date,
            end_date,
            start_time,
            end_time,
            periodicity,
            weekdays,
            week_of_month,
            interval,
            exclude_dates,
            timezone: timezone.to_string(),
        })
    }

    /// Creates a rule with no schedule yet: no dates, no times.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the timezone is not a
    /// known IANA zone.
    pub fn unscheduled(timezone: &str) -> Result<Self, DomainError> {
        Self::new(
            Periodicity::Once,
            None,
            None,
            None,
            None,
            WeekdaySet::empty(),
            None,
            1,
            BTreeSet::new(),
            timezone,
        )
    }

    /// Returns the first scheduled day, if set.
    #[must_use]
    pub const fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    /// Returns the last scheduled day (inclusive), if set.
    #[must_use]
    pub const fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Returns the wall-clock session start time, if set.
    #[must_use]
    pub const fn start_time(&self) -> Option<Time> {
        self.start_time
    }

    /// Returns the wall-clock session end time, if set.
    #[must_use]
    pub const fn end_time(&self) -> Option<Time> {
        self.end_time
    }

    /// Returns the recurrence family.
    #[must_use]
    pub const fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    /// Returns the weekday qualifiers.
    #[must_use]
    pub const fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    /// Returns the monthly ordinal qualifier, if set.
    #[must_use]
    pub const fn week_of_month(&self) -> Option<WeekOfMonth> {
        self.week_of_month
    }

    /// Returns the recurrence interval.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Returns the excluded calendar dates.
    #[must_use]
    pub const fn exclude_dates(&self) -> &BTreeSet<Date> {
        &self.exclude_dates
    }

    /// Returns the IANA timezone identifier.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Returns the parsed timezone, or `None` when the stored
    /// identifier is not resolvable.
    ///
    /// Construction validates the zone, but deserialized snapshots may
    /// bypass the constructor; readers degrade instead of panicking.
    #[must_use]
    pub fn tz(&self) -> Option<chrono_tz::Tz> {
        self.timezone.parse().ok()
    }

    /// Returns whether all four date/time fields are set.
    #[must_use]
    pub const fn has_complete_schedule(&self) -> bool {
        self.start_date.is_some()
            && self.end_date.is_some()
            && self.start_time.is_some()
            && self.end_time.is_some()
    }

    /// Returns the effective date range, or `None` when a bound is
    /// unset or the bounds are inverted.
    #[must_use]
    pub fn date_range(&self) -> Option<(Date, Date)> {
        crate::validation::effective_date_range(self.start_date, self.end_date)
    }

    /// Returns whether the given calendar date is excluded.
    ///
    /// Exclusion matching is by calendar date only; time-of-day is
    /// ignored.
    #[must_use]
    pub fn is_excluded(&self, date: Date) -> bool {
        self.exclude_dates.contains(&date)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn weekly_rule(weekdays: &[Weekday], interval: u32) -> ScheduleRule {
        ScheduleRule::new(
            Periodicity::Weekly,
            Some(date!(2025 - 09 - 01)),
            Some(date!(2025 - 09 - 30)),
            None,
            None,
            WeekdaySet::from_days(weekdays),
            None,
            interval,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap()
    }

    #[test]
    fn test_periodicity_string_round_trip() {
        let all = [
            Periodicity::Once,
            Periodicity::Daily,
            Periodicity::Weekly,
            Periodicity::Biweekly,
            Periodicity::Monthly,
            Periodicity::Custom,
        ];
        for periodicity in all {
            let parsed: Periodicity = periodicity.as_str().parse().unwrap();
            assert_eq!(parsed, periodicity);
        }
    }

    #[test]
    fn test_periodicity_unknown_string() {
        let result: Result<Periodicity, DomainError> = "quarterly".parse();
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidPeriodicity(_)
        ));
    }

    #[test]
    fn test_biweekly_week_step_ignores_interval() {
        assert_eq!(Periodicity::Biweekly.week_step(1), 2);
        assert_eq!(Periodicity::Biweekly.week_step(5), 2);
        assert_eq!(Periodicity::Weekly.week_step(4), 4);
        assert_eq!(Periodicity::Custom.week_step(3), 3);
    }

    #[test]
    fn test_weekday_set_monday_first_iteration() {
        let set: WeekdaySet =
            WeekdaySet::from_days(&[Weekday::Sunday, Weekday::Tuesday, Weekday::Monday]);
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Tuesday, Weekday::Sunday]);
        assert_eq!(set.first(), Some(Weekday::Monday));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_weekday_set_empty() {
        let set: WeekdaySet = WeekdaySet::empty();
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
        assert!(!set.contains(Weekday::Monday));
    }

    #[test]
    fn test_weekday_set_duplicate_insert_is_idempotent() {
        let mut set: WeekdaySet = WeekdaySet::empty();
        set.insert(Weekday::Friday);
        set.insert(Weekday::Friday);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_week_of_month_valid_ordinals() {
        assert_eq!(WeekOfMonth::new(1).unwrap(), WeekOfMonth::First);
        assert_eq!(WeekOfMonth::new(4).unwrap(), WeekOfMonth::Fourth);
        assert_eq!(WeekOfMonth::new(-1).unwrap(), WeekOfMonth::Last);
        assert_eq!(WeekOfMonth::Last.ordinal(), -1);
    }

    #[test]
    fn test_week_of_month_invalid_ordinals() {
        for ordinal in [0, 5, -2] {
            assert!(matches!(
                WeekOfMonth::new(ordinal).unwrap_err(),
                DomainError::InvalidWeekOfMonth { .. }
            ));
        }
    }

    #[test]
    fn test_rule_rejects_zero_interval() {
        let result = ScheduleRule::new(
            Periodicity::Weekly,
            None,
            None,
            None,
            None,
            WeekdaySet::empty(),
            None,
            0,
            BTreeSet::new(),
            "Europe/Berlin",
        );
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidInterval { interval: 0 }
        ));
    }

    #[test]
    fn test_rule_rejects_unknown_timezone() {
        let result = ScheduleRule::unscheduled("Mars/OlympusMons");
        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidTimezone(_)
        ));
    }

    #[test]
    fn test_once_normalizes_interval() {
        let rule = ScheduleRule::new(
            Periodicity::Once,
            Some(date!(2025 - 07 - 08)),
            Some(date!(2025 - 07 - 08)),
            None,
            None,
            WeekdaySet::empty(),
            None,
            9,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap();
        assert_eq!(rule.interval(), 1);
    }

    #[test]
    fn test_unscheduled_rule_has_no_complete_schedule() {
        let rule: ScheduleRule = ScheduleRule::unscheduled("Europe/Berlin").unwrap();
        assert!(!rule.has_complete_schedule());
        assert_eq!(rule.date_range(), None);
    }

    #[test]
    fn test_inverted_range_is_empty_not_error() {
        let rule = ScheduleRule::new(
            Periodicity::Daily,
            Some(date!(2025 - 09 - 30)),
            Some(date!(2025 - 09 - 01)),
            None,
            None,
            WeekdaySet::empty(),
            None,
            1,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap();
        assert_eq!(rule.date_range(), None);
    }

    #[test]
    fn test_exclusion_lookup() {
        let mut exclude: BTreeSet<Date> = BTreeSet::new();
        exclude.insert(date!(2025 - 09 - 11));
        let rule = ScheduleRule::new(
            Periodicity::Daily,
            Some(date!(2025 - 09 - 01)),
            Some(date!(2025 - 09 - 30)),
            None,
            None,
            WeekdaySet::empty(),
            None,
            1,
            exclude,
            "Europe/Berlin",
        )
        .unwrap();
        assert!(rule.is_excluded(date!(2025 - 09 - 11)));
        assert!(!rule.is_excluded(date!(2025 - 09 - 12)));
    }

    #[test]
    fn test_tz_resolves_valid_zone() {
        let rule: ScheduleRule = weekly_rule(&[Weekday::Thursday], 1);
        assert_eq!(rule.tz(), Some(chrono_tz::Europe::Berlin));
        assert_eq!(rule.timezone(), "Europe/Berlin");
    }
}
