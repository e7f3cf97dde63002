use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::core::{CalendarDateTime, Instant};
use crate::error::{TimelineError, TimelineResult};

/// Every shape of value accepted as an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstantInput<'a> {
    Instant(Instant),
    EpochMillis(i64),
    Calendar(CalendarDateTime),
    Text(&'a str),
}

impl From<Instant> for InstantInput<'_> {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl From<DateTime<Utc>> for InstantInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Instant(Instant::from_datetime(value))
    }
}

impl From<i64> for InstantInput<'_> {
    fn from(value: i64) -> Self {
        Self::EpochMillis(value)
    }
}

impl From<CalendarDateTime> for InstantInput<'_> {
    fn from(value: CalendarDateTime) -> Self {
        Self::Calendar(value)
    }
}

impl<'a> From<&'a str> for InstantInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for InstantInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

/// Separators of the compact `YYYY-MM-DD HH:mm:ss.fff` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactFormat {
    pub date_separator: char,
    pub time_separators: &'static [char],
}

impl Default for CompactFormat {
    fn default() -> Self {
        Self {
            date_separator: '-',
            time_separators: &['.', ':'],
        }
    }
}

/// Resolves any accepted input into an [`Instant`].
///
/// Unlike duration parsing, malformed input is a hard error.
pub fn parse_instant<'a>(input: impl Into<InstantInput<'a>>) -> TimelineResult<Instant> {
    parse_instant_with(input, CompactFormat::default())
}

pub fn parse_instant_with<'a>(
    input: impl Into<InstantInput<'a>>,
    format: CompactFormat,
) -> TimelineResult<Instant> {
    match input.into() {
        InstantInput::Instant(instant) => Ok(instant),
        InstantInput::EpochMillis(millis) => Instant::from_millis(millis),
        InstantInput::Calendar(calendar) => calendar.to_instant(),
        InstantInput::Text(text) => parse_text(text, format),
    }
}

const NAIVE_ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// RFC 3339 does not allow minute precision, ISO-8601 does.
const ZONED_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

fn parse_zoned(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
        return Some(zoned);
    }
    let normalized = match text.strip_suffix(['Z', 'z']) {
        Some(local) => Cow::Owned(format!("{local}+00:00")),
        None => Cow::Borrowed(text),
    };
    DateTime::parse_from_str(&normalized, ZONED_MINUTE_FORMAT).ok()
}

fn parse_text(raw: &str, format: CompactFormat) -> TimelineResult<Instant> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TimelineError::invalid_instant(raw, "empty input"));
    }

    if let Some(zoned) = parse_zoned(text) {
        return Ok(Instant::from_datetime(zoned.with_timezone(&Utc)));
    }

    if text.contains('T') {
        return NAIVE_ISO_FORMATS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(text, pattern).ok())
            .map(|naive| Instant::from_datetime(naive.and_utc()))
            .ok_or_else(|| TimelineError::invalid_instant(raw, "malformed ISO-8601 date-time"));
    }

    parse_compact(raw, text, format)
}

fn parse_compact(raw: &str, text: &str, format: CompactFormat) -> TimelineResult<Instant> {
    let mut parts = text.split_whitespace();
    let date_part = parts.next().unwrap_or_default();
    let time_part = parts.next();
    if parts.next().is_some() {
        return Err(TimelineError::invalid_instant(
            raw,
            "expected at most a date and a time part",
        ));
    }

    // A leading minus marks a year before 0001 (`-0005-01-01`).
    let (negative_year, date_part) = match date_part.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, date_part),
    };
    let date_fields: Vec<&str> = date_part.split(format.date_separator).collect();
    if date_fields.len() > 3 {
        return Err(TimelineError::invalid_instant(raw, "too many date fields"));
    }
    let year = parse_field::<i32>(raw, date_fields[0], "year")?;
    let year = if negative_year { -year } else { year };
    let month = optional_field(raw, date_fields.get(1), "month", 1)?;
    let day = optional_field(raw, date_fields.get(2), "day", 1)?;

    let mut calendar = CalendarDateTime::date(year, month, day);

    if let Some(time_part) = time_part {
        let time_fields: Vec<&str> = time_part.split(format.time_separators).collect();
        if time_fields.len() > 4 {
            return Err(TimelineError::invalid_instant(raw, "too many time fields"));
        }
        calendar.hour = parse_field(raw, time_fields[0], "hour")?;
        calendar.minute = optional_field(raw, time_fields.get(1), "minute", 0)?;
        calendar.second = optional_field(raw, time_fields.get(2), "second", 0)?;
        if let Some(fraction) = time_fields.get(3) {
            calendar.millisecond = parse_fraction_millis(raw, fraction)?;
        }
    }

    calendar
        .to_instant()
        .map_err(|_| TimelineError::invalid_instant(raw, "field out of range"))
}

fn parse_field<T: std::str::FromStr>(raw: &str, field: &str, name: &str) -> TimelineResult<T> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimelineError::invalid_instant(
            raw,
            format!("{name} must be numeric"),
        ));
    }
    field
        .parse::<T>()
        .map_err(|_| TimelineError::invalid_instant(raw, format!("{name} is out of range")))
}

fn optional_field(
    raw: &str,
    field: Option<&&str>,
    name: &str,
    default: u32,
) -> TimelineResult<u32> {
    field.map_or(Ok(default), |field| parse_field(raw, field, name))
}

/// `5` is half a second, `123` is 123 ms; digits past the third are rounded.
fn parse_fraction_millis(raw: &str, fraction: &str) -> TimelineResult<u32> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimelineError::invalid_instant(
            raw,
            "fractional seconds must be numeric",
        ));
    }
    let seconds: f64 = format!("0.{fraction}")
        .parse()
        .map_err(|_| TimelineError::invalid_instant(raw, "fractional seconds are malformed"))?;
    Ok(((seconds * 1_000.0).round() as u32).min(999))
}
