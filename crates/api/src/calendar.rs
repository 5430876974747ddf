// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar export feeds.
//!
//! The export surface hands a course's occurrence instants and display
//! text to external calendar tooling. For file downloads it produces a
//! [`CalendarFeed`] the external encoder turns into bytes; for Google
//! and Outlook it produces a prefilled event-creation URL the caller
//! redirects to. No file bytes are produced here.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use seminar_domain::{Course, Locale, occurrence_spans};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{course_from_snapshot, format_schedule};
use crate::request_response::CourseSnapshot;

/// Default number of sessions an export includes when the caller does
/// not bound it.
pub const DEFAULT_EXPORT_LIMIT: usize = 52;

/// The supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTarget {
    /// An iCalendar file download.
    Ics,
    /// A prefilled Google Calendar event page.
    Google,
    /// A prefilled Outlook event page.
    Outlook,
}

impl ExportTarget {
    /// Parses a wire selector.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::UnsupportedExportTarget` for anything other
    /// than `ics`, `google`, or `outlook`.
    pub fn parse(selector: &str) -> Result<Self, ApiError> {
        match selector {
            "ics" => Ok(Self::Ics),
            "google" => Ok(Self::Google),
            "outlook" => Ok(Self::Outlook),
            _ => Err(ApiError::UnsupportedExportTarget(selector.to_string())),
        }
    }
}

/// One exported session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarOccurrence {
    /// Session start, iCalendar basic format (`YYYYMMDDTHHMMSSZ`).
    pub start_utc: String,
    /// Session end, iCalendar basic format.
    pub end_utc: String,
}

/// The data an external iCalendar encoder needs for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeed {
    /// The event summary.
    pub title: String,
    /// The human-readable schedule sentence, for the description.
    pub schedule_text: String,
    /// The course timezone identifier.
    pub timezone: String,
    /// The sessions to encode.
    pub occurrences: Vec<CalendarOccurrence>,
}

/// The outcome of an export request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CalendarExport {
    /// Feed data for the external file encoder.
    Feed(CalendarFeed),
    /// A URL the caller redirects the user to.
    Redirect {
        /// The prefilled event-creation URL.
        url: String,
    },
}

/// Builds the export payload for one course.
///
/// The redirect targets prefill a single event from the first
/// session; the feed carries every session up to `limit`.
///
/// # Errors
///
/// Returns an error if the selector is unknown or the snapshot cannot
/// be normalized.
pub fn build_calendar_export(
    snapshot: &CourseSnapshot,
    selector: &str,
    locale: &Locale,
    limit: Option<usize>,
) -> Result<CalendarExport, ApiError> {
    let target: ExportTarget = ExportTarget::parse(selector)?;
    let course: Course = course_from_snapshot(snapshot)?;
    let schedule_text: String = format_schedule(snapshot, locale)?.text;

    let spans: Vec<(DateTime<Utc>, DateTime<Utc>)> = occurrence_spans(&course.schedule)
        .take(limit.unwrap_or(DEFAULT_EXPORT_LIMIT))
        .collect();

    match target {
        ExportTarget::Ics => Ok(CalendarExport::Feed(CalendarFeed {
            title: course.title,
            schedule_text,
            timezone: course.schedule.timezone().to_string(),
            occurrences: spans
                .iter()
                .map(|(start, end)| CalendarOccurrence {
                    start_utc: basic_stamp(*start),
                    end_utc: basic_stamp(*end),
                })
                .collect(),
        })),
        ExportTarget::Google => Ok(CalendarExport::Redirect {
            url: google_url(&course.title, course.schedule.timezone(), spans.first()),
        }),
        ExportTarget::Outlook => Ok(CalendarExport::Redirect {
            url: outlook_url(&course.title, spans.first()),
        }),
    }
}

/// Formats an instant in the iCalendar basic format, UTC.
fn basic_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

fn google_url(
    title: &str,
    timezone: &str,
    first_span: Option<&(DateTime<Utc>, DateTime<Utc>)>,
) -> String {
    let mut url: String =
        String::from("https://calendar.google.com/calendar/render?action=TEMPLATE");
    let _ = write!(url, "&text={}", escape_query_value(title));
    if let Some((start, end)) = first_span {
        let _ = write!(url, "&dates={}/{}", basic_stamp(*start), basic_stamp(*end));
    }
    let _ = write!(url, "&ctz={}", escape_query_value(timezone));
    url
}

fn outlook_url(title: &str, first_span: Option<&(DateTime<Utc>, DateTime<Utc>)>) -> String {
    let mut url: String =
        String::from("https://outlook.live.com/calendar/0/deeplink/compose?path=%2Fcalendar%2Faction%2Fcompose");
    let _ = write!(url, "&subject={}", escape_query_value(title));
    if let Some((start, end)) = first_span {
        let _ = write!(
            url,
            "&startdt={}&enddt={}",
            escape_query_value(&start.to_rfc3339()),
            escape_query_value(&end.to_rfc3339()),
        );
    }
    url
}

/// Percent-escapes a query value.
///
/// Unreserved characters pass through; every other byte is escaped.
fn escape_query_value(value: &str) -> String {
    let mut escaped: String = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                escaped.push(char::from(byte));
            }
            _ => {
                let _ = write!(escaped, "%{byte:02X}");
            }
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_export_target_parsing() {
        assert_eq!(ExportTarget::parse("ics").unwrap(), ExportTarget::Ics);
        assert_eq!(ExportTarget::parse("google").unwrap(), ExportTarget::Google);
        assert_eq!(
            ExportTarget::parse("outlook").unwrap(),
            ExportTarget::Outlook
        );
        assert!(matches!(
            ExportTarget::parse("caldav").unwrap_err(),
            ApiError::UnsupportedExportTarget(_)
        ));
    }

    #[test]
    fn test_escape_query_value() {
        assert_eq!(escape_query_value("Yoga"), "Yoga");
        assert_eq!(escape_query_value("Yoga im Park"), "Yoga%20im%20Park");
        assert_eq!(escape_query_value("A&B=C"), "A%26B%3DC");
        assert_eq!(escape_query_value("Europe/Berlin"), "Europe%2FBerlin");
    }

    #[test]
    fn test_basic_stamp_format() {
        use chrono::TimeZone;
        let instant = Utc.with_ymd_and_hms(2025, 7, 8, 7, 30, 0).unwrap();
        assert_eq!(basic_stamp(instant), "20250708T073000Z");
    }
}
