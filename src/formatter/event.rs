//! iCalendar VEVENT fragments

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;

use crate::error::FormatError;
use crate::models::Event;

/// Local date-time layouts accepted for `start`/`end`
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Minute-precision layouts with their own offset (`+02:00`, `+0200`, `+02`)
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

/// iCalendar UTC form, e.g. `20240101T100000Z`
const ICAL_UTC: &str = "%Y%m%dT%H%M%SZ";

/// VEVENT fragment with start/end converted from `tz` to UTC
pub fn format_event(event: &Event, tz: Tz) -> Result<String, FormatError> {
    let start = ical_timestamp("start", &event.start, tz)?;
    let end = ical_timestamp("end", &event.end, tz)?;

    Ok([
        "BEGIN:VEVENT".to_string(),
        format!("SUMMARY:{}", event.title),
        format!("DTSTART:{start}"),
        format!("DTEND:{end}"),
        format!("DESCRIPTION:{}", event.description),
        "END:VEVENT".to_string(),
    ]
    .join("\n"))
}

/// Parse one event field and render it as a 16-character UTC stamp
pub fn ical_timestamp(field: &'static str, value: &str, tz: Tz) -> Result<String, FormatError> {
    let instant = parse_instant(value, tz)
        .filter(fits_ical_stamp)
        .ok_or_else(|| FormatError::MalformedTimestamp {
            field,
            value: value.to_string(),
        })?;
    Ok(instant.format(ICAL_UTC).to_string())
}

/// Resolve a user-typed date-time to an absolute instant
///
/// An explicit offset wins over `tz`. A bare date is midnight UTC.
fn parse_instant(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Some(utc) = value.strip_suffix(['Z', 'z']) {
        return parse_local(utc).map(|naive| naive.and_utc());
    }
    if let Some(naive) = parse_local(value) {
        return localize(naive, tz);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    LOCAL_FORMATS
        .into_iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
}

/// Four-digit unsigned year, no leap second
fn fits_ical_stamp(instant: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&instant.year()) && instant.nanosecond() < 1_000_000_000
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    let local = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        // DST fold: take the first occurrence
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // DST gap: the wall clock skipped this hour, move past it
        LocalResult::None => tz
            .from_local_datetime(&naive.checked_add_signed(TimeDelta::hours(1))?)
            .earliest(),
    };
    local.map(|dt| dt.with_timezone(&Utc))
}
