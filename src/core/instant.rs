use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Exact point in time, stored as a UTC `chrono` timestamp.
///
/// Values are immutable: every arithmetic operation returns a new `Instant`.
/// Equality and ordering follow the epoch offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// 1970-01-01T00:00:00Z, the anchor used for scale measurement.
    #[must_use]
    pub fn unix_epoch() -> Self {
        Self(DateTime::<Utc>::default())
    }

    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_millis(millis: i64) -> TimelineResult<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(Self)
            .ok_or_else(|| {
                TimelineError::invalid_instant(
                    millis.to_string(),
                    "epoch milliseconds out of range",
                )
            })
    }

    #[must_use]
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    #[must_use]
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    #[must_use]
    pub fn timestamp_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Signed milliseconds from `earlier` to `self`.
    #[must_use]
    pub fn millis_since(self, earlier: Instant) -> i64 {
        (self.0 - earlier.0).num_milliseconds()
    }

    pub fn checked_add_millis(self, millis: i64) -> TimelineResult<Self> {
        TimeDelta::try_milliseconds(millis)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .ok_or_else(|| {
                TimelineError::OutOfRange(format!("{self} shifted by {millis}ms"))
            })
    }

    /// Calendar breakdown in the reference zone (UTC).
    #[must_use]
    pub fn to_calendar(self) -> CalendarDateTime {
        let dt = self.0;
        CalendarDateTime {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            // Leap-second representations carry nanos >= 1e9.
            millisecond: (dt.nanosecond() / 1_000_000).min(999),
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

/// Human-readable UTC breakdown of an [`Instant`]. Months and days are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl CalendarDateTime {
    #[must_use]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        millisecond: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        }
    }

    /// Midnight of the given calendar date.
    #[must_use]
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    #[must_use]
    pub fn is_midnight(self) -> bool {
        self.hour == 0 && self.minute == 0 && self.second == 0 && self.millisecond == 0
    }

    pub fn to_instant(self) -> TimelineResult<Instant> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            TimelineError::invalid_instant(self.to_string(), "no such calendar date")
        })?;
        if self.millisecond > 999 {
            return Err(TimelineError::invalid_instant(
                self.to_string(),
                "millisecond must be < 1000",
            ));
        }
        let time =
            NaiveTime::from_hms_milli_opt(self.hour, self.minute, self.second, self.millisecond)
                .ok_or_else(|| {
                    TimelineError::invalid_instant(self.to_string(), "no such time of day")
                })?;
        Ok(Instant(NaiveDateTime::new(date, time).and_utc()))
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millisecond
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_round_trip_keeps_millis() {
        let instant = Instant::from_millis(1_709_251_199_123).expect("valid millis");
        let back = instant.to_calendar().to_instant().expect("round trip");
        assert_eq!(back, instant);
    }

    #[test]
    fn invalid_calendar_fields_are_rejected() {
        assert!(CalendarDateTime::date(2023, 2, 29).to_instant().is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 24, 0, 0, 0).to_instant().is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 0, 0, 0, 1000).to_instant().is_err());
    }

    #[test]
    fn display_is_iso_utc() {
        let instant = CalendarDateTime::new(2024, 3, 1, 9, 5, 7, 42)
            .to_instant()
            .expect("valid date");
        assert_eq!(instant.to_string(), "2024-03-01T09:05:07.042Z");
    }
}
