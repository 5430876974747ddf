// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Human-readable schedule rendering.
//!
//! A rule is first classified into one of a small closed set of
//! sentence shapes, then localized tokens are substituted. The text is
//! generated from the structured rule, never recovered by parsing
//! pre-rendered strings, so the output is deterministic and testable.
//!
//! Formatting is display-only and never fails: a rule no shape fits
//! falls back to a best-effort literal rendering.

use crate::occurrence::ordinal_within_month;
use crate::rule::{Periodicity, ScheduleRule, WeekOfMonth};
use time::{Date, Time, Weekday};

/// Token tables for one display language.
///
/// Localization string lookup is the host's concern; the formatter
/// only consumes whatever tables the caller passes. Two built-in
/// locales cover the product's shipped languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Weekday display names, Monday-first.
    pub weekday_names: [&'static str; 7],
    /// Month display names, January-first.
    pub month_names: [&'static str; 12],
    /// Ordinal words for first..fourth and last.
    pub ordinal_words: [&'static str; 5],
    /// "Every", for single-step recurrences.
    pub every: &'static str,
    /// "Every", for counted intervals ("every N weeks").
    pub every_interval: &'static str,
    /// "weeks on", joining an interval to its weekday list.
    pub weeks_on: &'static str,
    /// "months on the", joining a month interval to its ordinal slot.
    pub months_on_the: &'static str,
    /// "of the month".
    pub of_the_month: &'static str,
    /// "Daily".
    pub daily: &'static str,
    /// "from".
    pub from_word: &'static str,
    /// "to".
    pub to_word: &'static str,
    /// List conjunction ("and").
    pub list_and: &'static str,
    /// The fixed sentence for rules without a complete schedule.
    pub to_be_announced: &'static str,
    /// How calendar dates are written out.
    pub date_style: DateStyle,
}

/// Date rendering convention of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "July 08, 2025"
    MonthFirst,
    /// "08. Juli 2025"
    DayFirst,
}

impl Locale {
    /// English token tables.
    pub const ENGLISH: Self = Self {
        weekday_names: [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ],
        month_names: [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ],
        ordinal_words: ["first", "second", "third", "fourth", "last"],
        every: "Every",
        every_interval: "Every",
        weeks_on: "weeks on",
        months_on_the: "months on the",
        of_the_month: "of the month",
        daily: "Daily",
        from_word: "from",
        to_word: "to",
        list_and: "and",
        to_be_announced: "Schedule to be announced",
        date_style: DateStyle::MonthFirst,
    };

    /// German token tables.
    pub const GERMAN: Self = Self {
        weekday_names: [
            "Montag",
            "Dienstag",
            "Mittwoch",
            "Donnerstag",
            "Freitag",
            "Samstag",
            "Sonntag",
        ],
        month_names: [
            "Januar",
            "Februar",
            "März",
            "April",
            "Mai",
            "Juni",
            "Juli",
            "August",
            "September",
            "Oktober",
            "November",
            "Dezember",
        ],
        ordinal_words: ["ersten", "zweiten", "dritten", "vierten", "letzten"],
        every: "Jeden",
        every_interval: "Alle",
        weeks_on: "Wochen am",
        months_on_the: "Monate am",
        of_the_month: "im Monat",
        daily: "Täglich",
        from_word: "von",
        to_word: "bis",
        list_and: "und",
        to_be_announced: "Termine werden noch bekannt gegeben",
        date_style: DateStyle::DayFirst,
    };

    /// Returns the display name of a weekday.
    #[must_use]
    pub fn weekday(&self, day: Weekday) -> &'static str {
        self.weekday_names[usize::from(day.number_days_from_monday())]
    }

    /// Returns the display name of a month.
    #[must_use]
    pub fn month(&self, date: Date) -> &'static str {
        self.month_names[usize::from(u8::from(date.month())) - 1]
    }

    /// Returns the ordinal word for a week-of-month slot.
    #[must_use]
    pub const fn ordinal(&self, week: WeekOfMonth) -> &'static str {
        match week {
            WeekOfMonth::First => self.ordinal_words[0],
            WeekOfMonth::Second => self.ordinal_words[1],
            WeekOfMonth::Third => self.ordinal_words[2],
            WeekOfMonth::Fourth => self.ordinal_words[3],
            WeekOfMonth::Last => self.ordinal_words[4],
        }
    }

    /// Writes out a calendar date in this locale's convention.
    #[must_use]
    pub fn format_date(&self, date: Date) -> String {
        match self.date_style {
            DateStyle::MonthFirst => {
                format!("{} {:02}, {}", self.month(date), date.day(), date.year())
            }
            DateStyle::DayFirst => {
                format!("{:02}. {} {}", date.day(), self.month(date), date.year())
            }
        }
    }

    /// Joins weekday names with commas and the locale's conjunction.
    #[must_use]
    pub fn weekday_list<I: IntoIterator<Item = Weekday>>(&self, days: I) -> String {
        let names: Vec<&'static str> = days.into_iter().map(|day| self.weekday(day)).collect();
        match names.as_slice() {
            [] => String::new(),
            [single] => (*single).to_string(),
            [init @ .., tail] => format!("{} {} {tail}", init.join(", "), self.list_and),
        }
    }
}

/// Writes a time of day as HH:MM.
#[must_use]
pub fn format_time(time_of_day: Time) -> String {
    format!("{:02}:{:02}", time_of_day.hour(), time_of_day.minute())
}

/// The canonical sentence shapes a rule can render to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleShape {
    /// No complete schedule: the fixed announce sentence.
    Unscheduled,
    /// A single dated session.
    OneTime,
    /// Weekly-family recurrence with a one-week step.
    EveryWeekday,
    /// Weekly-family recurrence with a counted week step.
    WeekInterval,
    /// Every calendar day.
    EveryDay,
    /// A monthly ordinal slot.
    MonthlyOrdinal,
    /// No shape matched; render a best-effort literal.
    Fallback,
}

/// Classifies a rule into its sentence shape.
#[must_use]
pub fn classify_shape(rule: &ScheduleRule) -> ScheduleShape {
    if !rule.has_complete_schedule() {
        return ScheduleShape::Unscheduled;
    }
    match rule.periodicity() {
        Periodicity::Once => ScheduleShape::OneTime,
        Periodicity::Daily => ScheduleShape::EveryDay,
        Periodicity::Monthly => ScheduleShape::MonthlyOrdinal,
        Periodicity::Weekly | Periodicity::Biweekly | Periodicity::Custom => {
            if rule.weekdays().is_empty() {
                ScheduleShape::Fallback
            } else if rule.periodicity().week_step(rule.interval()) == 1 {
                ScheduleShape::EveryWeekday
            } else {
                ScheduleShape::WeekInterval
            }
        }
    }
}

/// Renders a rule as a human-readable sentence in the given locale.
#[must_use]
pub fn format_schedule(rule: &ScheduleRule, locale: &Locale) -> String {
    let shape: ScheduleShape = classify_shape(rule);
    if shape == ScheduleShape::Unscheduled {
        return locale.to_be_announced.to_string();
    }

    // Every other shape implies a complete schedule.
    let (Some(start_date), Some(end_date), Some(start_time), Some(end_time)) = (
        rule.start_date(),
        rule.end_date(),
        rule.start_time(),
        rule.end_time(),
    ) else {
        return locale.to_be_announced.to_string();
    };

    let times: String = format!("{}–{}", format_time(start_time), format_time(end_time));
    let dates: String = format!(
        "{}–{}",
        locale.format_date(start_date),
        locale.format_date(end_date)
    );

    match shape {
        ScheduleShape::OneTime => format!(
            "{} {} {} {} {}",
            locale.format_date(start_date),
            locale.from_word,
            format_time(start_time),
            locale.to_word,
            format_time(end_time),
        ),
        ScheduleShape::EveryWeekday => format!(
            "{} {} {} {} {} {}, {dates}",
            locale.every,
            locale.weekday_list(rule.weekdays().iter()),
            locale.from_word,
            format_time(start_time),
            locale.to_word,
            format_time(end_time),
        ),
        ScheduleShape::WeekInterval => format!(
            "{} {} {} {} {} {} {} {}, {times}",
            locale.every_interval,
            rule.periodicity().week_step(rule.interval()),
            locale.weeks_on,
            locale.weekday_list(rule.weekdays().iter()),
            locale.from_word,
            locale.format_date(start_date),
            locale.to_word,
            locale.format_date(end_date),
        ),
        ScheduleShape::EveryDay => format!(
            "{} {} {} {} {}, {dates}",
            locale.daily,
            locale.from_word,
            format_time(start_time),
            locale.to_word,
            format_time(end_time),
        ),
        ScheduleShape::MonthlyOrdinal => {
            let weekday: Weekday = rule
                .weekdays()
                .first()
                .unwrap_or_else(|| start_date.weekday());
            let ordinal: WeekOfMonth = rule
                .week_of_month()
                .unwrap_or_else(|| ordinal_within_month(start_date));
            if rule.interval() > 1 {
                format!(
                    "{} {} {} {} {} {} {} {} {}, {times}",
                    locale.every_interval,
                    rule.interval(),
                    locale.months_on_the,
                    locale.ordinal(ordinal),
                    locale.weekday(weekday),
                    locale.from_word,
                    locale.format_date(start_date),
                    locale.to_word,
                    locale.format_date(end_date),
                )
            } else {
                format!(
                    "{} {} {} {} {} {} {} {}, {dates}",
                    locale.every,
                    locale.ordinal(ordinal),
                    locale.weekday(weekday),
                    locale.of_the_month,
                    locale.from_word,
                    format_time(start_time),
                    locale.to_word,
                    format_time(end_time),
                )
            }
        }
        // Best-effort literal for rules no sentence shape fits.
        ScheduleShape::Unscheduled | ScheduleShape::Fallback => {
            format!("{} {dates}, {times}", rule.periodicity())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::rule::WeekdaySet;
    use std::collections::BTreeSet;
    use time::macros::{date, time};
    use time::Weekday;

    fn rule(
        periodicity: Periodicity,
        weekdays: &[Weekday],
        week_of_month: Option<WeekOfMonth>,
        interval: u32,
    ) -> ScheduleRule {
        ScheduleRule::new(
            periodicity,
            Some(date!(2025 - 09 - 01)),
            Some(date!(2025 - 09 - 30)),
            Some(time!(11:00)),
            Some(time!(13:00)),
            WeekdaySet::from_days(weekdays),
            week_of_month,
            interval,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap()
    }

    #[test]
    fn test_one_time_english() {
        let rule = ScheduleRule::new(
            Periodicity::Once,
            Some(date!(2025 - 07 - 08)),
            Some(date!(2025 - 07 - 08)),
            Some(time!(09:30)),
            Some(time!(11:30)),
            WeekdaySet::empty(),
            None,
            1,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap();
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "July 08, 2025 from 09:30 to 11:30"
        );
    }

    #[test]
    fn test_one_time_german() {
        let rule = ScheduleRule::new(
            Periodicity::Once,
            Some(date!(2025 - 07 - 08)),
            Some(date!(2025 - 07 - 08)),
            Some(time!(09:30)),
            Some(time!(11:30)),
            WeekdaySet::empty(),
            None,
            1,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap();
        assert_eq!(
            format_schedule(&rule, &Locale::GERMAN),
            "08. Juli 2025 von 09:30 bis 11:30"
        );
    }

    #[test]
    fn test_week_interval_english() {
        let rule = rule(Periodicity::Weekly, &[Weekday::Thursday], None, 4);
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Every 4 weeks on Thursday from September 01, 2025 to September 30, 2025, 11:00–13:00"
        );
    }

    #[test]
    fn test_week_interval_german() {
        let rule = rule(Periodicity::Weekly, &[Weekday::Thursday], None, 4);
        assert_eq!(
            format_schedule(&rule, &Locale::GERMAN),
            "Alle 4 Wochen am Donnerstag von 01. September 2025 bis 30. September 2025, 11:00–13:00"
        );
    }

    #[test]
    fn test_single_weekday_weekly() {
        let rule = rule(Periodicity::Weekly, &[Weekday::Thursday], None, 1);
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Every Thursday from 11:00 to 13:00, September 01, 2025–September 30, 2025"
        );
    }

    #[test]
    fn test_multiple_weekdays_single_step() {
        let rule = rule(
            Periodicity::Weekly,
            &[Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
            None,
            1,
        );
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Every Monday, Wednesday and Friday from 11:00 to 13:00, \
             September 01, 2025–September 30, 2025"
        );
    }

    #[test]
    fn test_biweekly_renders_two_week_interval() {
        let rule = rule(Periodicity::Biweekly, &[Weekday::Monday], None, 1);
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Every 2 weeks on Monday from September 01, 2025 to September 30, 2025, 11:00–13:00"
        );
    }

    #[test]
    fn test_daily_english() {
        let rule = rule(Periodicity::Daily, &[], None, 1);
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Daily from 11:00 to 13:00, September 01, 2025–September 30, 2025"
        );
    }

    #[test]
    fn test_monthly_ordinal_english() {
        let rule = rule(
            Periodicity::Monthly,
            &[Weekday::Tuesday],
            Some(WeekOfMonth::Second),
            1,
        );
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Every second Tuesday of the month from 11:00 to 13:00, \
             September 01, 2025–September 30, 2025"
        );
    }

    #[test]
    fn test_monthly_last_german() {
        let rule = rule(
            Periodicity::Monthly,
            &[Weekday::Friday],
            Some(WeekOfMonth::Last),
            1,
        );
        assert_eq!(
            format_schedule(&rule, &Locale::GERMAN),
            "Jeden letzten Freitag im Monat von 11:00 bis 13:00, \
             01. September 2025–30. September 2025"
        );
    }

    #[test]
    fn test_monthly_with_interval() {
        let rule = rule(
            Periodicity::Monthly,
            &[Weekday::Tuesday],
            Some(WeekOfMonth::First),
            2,
        );
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Every 2 months on the first Tuesday from September 01, 2025 \
             to September 30, 2025, 11:00–13:00"
        );
    }

    #[test]
    fn test_unscheduled_uses_fixed_sentence() {
        let rule: ScheduleRule = ScheduleRule::unscheduled("Europe/Berlin").unwrap();
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "Schedule to be announced"
        );
        assert_eq!(
            format_schedule(&rule, &Locale::GERMAN),
            "Termine werden noch bekannt gegeben"
        );
    }

    #[test]
    fn test_partial_schedule_never_renders_a_date() {
        let rule = ScheduleRule::new(
            Periodicity::Once,
            Some(date!(2025 - 07 - 08)),
            None,
            None,
            None,
            WeekdaySet::empty(),
            None,
            1,
            BTreeSet::new(),
            "Europe/Berlin",
        )
        .unwrap();
        let text: String = format_schedule(&rule, &Locale::ENGLISH);
        assert_eq!(text, "Schedule to be announced");
        assert!(!text.contains("2025"));
    }

    #[test]
    fn test_weekly_without_weekdays_falls_back_to_literal() {
        let rule = rule(Periodicity::Weekly, &[], None, 1);
        assert_eq!(classify_shape(&rule), ScheduleShape::Fallback);
        assert_eq!(
            format_schedule(&rule, &Locale::ENGLISH),
            "weekly September 01, 2025–September 30, 2025, 11:00–13:00"
        );
    }

    #[test]
    fn test_shape_classification() {
        assert_eq!(
            classify_shape(&rule(Periodicity::Weekly, &[Weekday::Monday], None, 1)),
            ScheduleShape::EveryWeekday
        );
        assert_eq!(
            classify_shape(&rule(Periodicity::Weekly, &[Weekday::Monday], None, 3)),
            ScheduleShape::WeekInterval
        );
        assert_eq!(
            classify_shape(&rule(Periodicity::Biweekly, &[Weekday::Monday], None, 1)),
            ScheduleShape::WeekInterval
        );
        assert_eq!(
            classify_shape(&rule(Periodicity::Daily, &[], None, 1)),
            ScheduleShape::EveryDay
        );
        assert_eq!(
            classify_shape(&ScheduleRule::unscheduled("Europe/Berlin").unwrap()),
            ScheduleShape::Unscheduled
        );
    }

    #[test]
    fn test_weekday_list_forms() {
        let locale = Locale::ENGLISH;
        assert_eq!(locale.weekday_list([Weekday::Monday]), "Monday");
        assert_eq!(
            locale.weekday_list([Weekday::Monday, Weekday::Friday]),
            "Monday and Friday"
        );
        assert_eq!(
            locale.weekday_list([Weekday::Monday, Weekday::Wednesday, Weekday::Friday]),
            "Monday, Wednesday and Friday"
        );
    }
}
