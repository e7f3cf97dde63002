use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
pub const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;

/// Time units understood by the calendar layer, largest first.
///
/// `Year` and `Month` are calendar units: their length depends on the instant
/// they are applied to. Every other unit has a constant millisecond length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        TimeUnit::Year,
        TimeUnit::Month,
        TimeUnit::Week,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Millisecond,
    ];

    /// Constant millisecond length, `None` for calendar units.
    #[must_use]
    pub const fn fixed_millis(self) -> Option<i64> {
        match self {
            Self::Year | Self::Month => None,
            Self::Week => Some(MILLIS_PER_WEEK),
            Self::Day => Some(MILLIS_PER_DAY),
            Self::Hour => Some(MILLIS_PER_HOUR),
            Self::Minute => Some(MILLIS_PER_MINUTE),
            Self::Second => Some(MILLIS_PER_SECOND),
            Self::Millisecond => Some(1),
        }
    }

    #[must_use]
    pub const fn is_calendar(self) -> bool {
        matches!(self, Self::Year | Self::Month)
    }

    /// Nominal length in days used for unit-ratio conversions
    /// (a month counts as 30 days, a year as 365).
    #[must_use]
    pub const fn nominal_days(self) -> f64 {
        match self {
            Self::Year => 365.0,
            Self::Month => 30.0,
            Self::Week => 7.0,
            Self::Day => 1.0,
            Self::Hour => 1.0 / 24.0,
            Self::Minute => 1.0 / 1_440.0,
            Self::Second => 1.0 / 86_400.0,
            Self::Millisecond => 1.0 / 86_400_000.0,
        }
    }

    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }

    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Year => "years",
            Self::Month => "months",
            Self::Week => "weeks",
            Self::Day => "days",
            Self::Hour => "hours",
            Self::Minute => "minutes",
            Self::Second => "seconds",
            Self::Millisecond => "milliseconds",
        }
    }

    /// Compact token, as accepted by the duration grammar.
    ///
    /// Months render as `mo`; the grammar also reads a bare `m` as month.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Year => "y",
            Self::Month => "mo",
            Self::Week => "w",
            Self::Day => "d",
            Self::Hour => "h",
            Self::Minute => "min",
            Self::Second => "s",
            Self::Millisecond => "ms",
        }
    }

    /// Resolves a compact duration token.
    ///
    /// `m` and `mo` both mean month; minutes are only reachable through `min`.
    #[must_use]
    pub fn from_abbreviation(token: &str) -> Option<Self> {
        match token {
            "y" => Some(Self::Year),
            "mo" | "m" => Some(Self::Month),
            "w" => Some(Self::Week),
            "d" => Some(Self::Day),
            "h" => Some(Self::Hour),
            "min" => Some(Self::Minute),
            "s" => Some(Self::Second),
            "ms" => Some(Self::Millisecond),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for TimeUnit {
    type Err = TimelineError;

    /// Accepts singular or plural unit names, case-insensitively.
    fn from_str(s: &str) -> TimelineResult<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_suffix('s').unwrap_or(&lowered);
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.singular() == name)
            .ok_or_else(|| TimelineError::InvalidData(format!("unknown time unit `{s}`")))
    }
}
