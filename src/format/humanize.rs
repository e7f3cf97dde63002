use serde::{Deserialize, Serialize};

use crate::core::unit::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::core::{DurationSpec, Instant, TimeUnit, calendar};

use super::template::format;

/// Sign and magnitude of a duration split into display units.
///
/// Weeks are folded into days; years and months only appear when the source
/// was calendar-aware (a [`DurationSpec`] with calendar units or
/// [`DurationParts::between`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationParts {
    pub negative: bool,
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub milliseconds: u64,
}

impl DurationParts {
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        let mut parts = Self::split_fixed(millis.unsigned_abs());
        parts.negative = millis < 0;
        parts
    }

    /// Splits a parsed duration. Calendar and fixed components are kept apart
    /// unless their signs disagree, in which case the span is resolved from
    /// the Unix epoch.
    #[must_use]
    pub fn from_spec(spec: &DurationSpec) -> Self {
        let mut months: i64 = 0;
        let mut fixed: i64 = 0;
        for component in spec.components() {
            match component.unit {
                TimeUnit::Year => {
                    months = months.saturating_add(component.count.saturating_mul(12));
                }
                TimeUnit::Month => months = months.saturating_add(component.count),
                unit => {
                    let unit_millis = unit.fixed_millis().unwrap_or(1);
                    fixed = fixed.saturating_add(component.count.saturating_mul(unit_millis));
                }
            }
        }

        if months.signum() * fixed.signum() < 0 {
            let anchor = Instant::unix_epoch();
            return match spec.apply_to(anchor) {
                Ok(end) => Self::between(anchor, end),
                Err(_) => Self::from_millis(fixed),
            };
        }

        let mut parts = Self::split_fixed(fixed.unsigned_abs());
        let months_abs = months.unsigned_abs();
        parts.years = months_abs / 12;
        parts.months = months_abs % 12;
        parts.negative = months < 0 || fixed < 0;
        parts
    }

    /// Calendar-aware span from `start` to `end`: whole months first (with the
    /// same day-of-month rule as [`calendar::diff`]), then the fixed remainder.
    #[must_use]
    pub fn between(start: Instant, end: Instant) -> Self {
        if end < start {
            let mut parts = Self::between(end, start);
            parts.negative = true;
            return parts;
        }

        let mut months = calendar::calendar_months_between(end, start).max(0);
        let mut anchor = start;
        while months > 0 {
            match calendar::add(start, months, TimeUnit::Month) {
                Ok(candidate) if candidate <= end => {
                    anchor = candidate;
                    break;
                }
                _ => months -= 1,
            }
        }

        let mut parts = Self::split_fixed(end.millis_since(anchor).unsigned_abs());
        let months = months.unsigned_abs();
        parts.years = months / 12;
        parts.months = months % 12;
        parts
    }

    fn split_fixed(millis: u64) -> Self {
        let day = MILLIS_PER_DAY.unsigned_abs();
        let hour = MILLIS_PER_HOUR.unsigned_abs();
        let minute = MILLIS_PER_MINUTE.unsigned_abs();
        let second = MILLIS_PER_SECOND.unsigned_abs();
        Self {
            negative: false,
            years: 0,
            months: 0,
            days: millis / day,
            hours: millis % day / hour,
            minutes: millis % hour / minute,
            seconds: millis % minute / second,
            milliseconds: millis % second,
        }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.milliseconds == 0
    }

    fn units(self) -> [(u64, TimeUnit); 7] {
        [
            (self.years, TimeUnit::Year),
            (self.months, TimeUnit::Month),
            (self.days, TimeUnit::Day),
            (self.hours, TimeUnit::Hour),
            (self.minutes, TimeUnit::Minute),
            (self.seconds, TimeUnit::Second),
            (self.milliseconds, TimeUnit::Millisecond),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationFormatOptions {
    pub show_milliseconds: bool,
    /// Maximum number of components, largest first. `None` and `Some(0)`
    /// keep all.
    pub max_units: Option<usize>,
    /// `1y 2mo 3d` instead of `1 year, 2 months, 3 days`.
    pub short_form: bool,
}

impl Default for DurationFormatOptions {
    fn default() -> Self {
        Self {
            show_milliseconds: true,
            max_units: None,
            short_form: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatetimeFormatOptions {
    pub show_milliseconds: bool,
    /// Same limit as [`DurationFormatOptions::max_units`].
    pub max_time_units: Option<usize>,
    pub short_form: bool,
    /// When set, the time of day follows this date template.
    pub date_template: Option<String>,
    pub language: String,
}

impl Default for DatetimeFormatOptions {
    fn default() -> Self {
        Self {
            show_milliseconds: false,
            max_time_units: None,
            short_form: false,
            date_template: None,
            language: super::locale::DEFAULT_LANGUAGE.to_owned(),
        }
    }
}

/// Renders the non-zero components of `parts`, largest first.
///
/// Zero renders as `0 milliseconds`; a sub-second magnitude with milliseconds
/// hidden renders as `less than 1 second`.
#[must_use]
pub fn format_duration(parts: &DurationParts, options: &DurationFormatOptions) -> String {
    if parts.is_zero() {
        return zero_unit(TimeUnit::Millisecond, options.short_form);
    }

    let visible: Vec<(u64, TimeUnit)> = parts
        .units()
        .into_iter()
        .filter(|(count, unit)| {
            *count > 0 && (options.show_milliseconds || *unit != TimeUnit::Millisecond)
        })
        .collect();

    let body = if visible.is_empty() {
        less_than_one_second(options.short_form)
    } else {
        join_units(&visible, options.max_units, options.short_form)
    };

    if parts.negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Convenience for fixed millisecond spans.
#[must_use]
pub fn format_millis(millis: i64, options: &DurationFormatOptions) -> String {
    format_duration(&DurationParts::from_millis(millis), options)
}

/// Renders the time of day of `instant` (UTC) as spoken components,
/// e.g. `9 hours, 30 minutes`. A time of exactly 00:00 renders as `midnight`.
#[must_use]
pub fn format_datetime(instant: Instant, options: &DatetimeFormatOptions) -> String {
    let fields = instant.to_calendar();
    let visible: Vec<(u64, TimeUnit)> = [
        (fields.hour, TimeUnit::Hour),
        (fields.minute, TimeUnit::Minute),
        (fields.second, TimeUnit::Second),
        (fields.millisecond, TimeUnit::Millisecond),
    ]
    .into_iter()
    .filter(|(count, unit)| {
        *count > 0 && (options.show_milliseconds || *unit != TimeUnit::Millisecond)
    })
    .map(|(count, unit)| (u64::from(count), unit))
    .collect();

    let time = if visible.is_empty() {
        "midnight".to_owned()
    } else {
        join_units(&visible, options.max_time_units, options.short_form)
    };

    match &options.date_template {
        Some(template) => format!("{} {time}", format(instant, template, &options.language)),
        None => time,
    }
}

fn join_units(units: &[(u64, TimeUnit)], max_units: Option<usize>, short_form: bool) -> String {
    let limit = max_units.filter(|max| *max > 0).unwrap_or(units.len());
    let rendered: Vec<String> = units
        .iter()
        .take(limit)
        .map(|(count, unit)| render_unit(*count, *unit, short_form))
        .collect();
    rendered.join(if short_form { " " } else { ", " })
}

fn render_unit(count: u64, unit: TimeUnit, short_form: bool) -> String {
    if short_form {
        format!("{count}{}", unit.abbreviation())
    } else if count == 1 {
        format!("{count} {}", unit.singular())
    } else {
        format!("{count} {}", unit.plural())
    }
}

fn zero_unit(unit: TimeUnit, short_form: bool) -> String {
    render_unit(0, unit, short_form)
}

fn less_than_one_second(short_form: bool) -> String {
    if short_form {
        "<1s".to_owned()
    } else {
        "less than 1 second".to_owned()
    }
}
