//! Calendar arithmetic over [`Instant`] values in the UTC reference zone.
//!
//! Fixed-length units are exact millisecond shifts. Month and year steps move
//! the calendar fields and keep the day of month; when that day does not exist
//! in the target month the surplus rolls into the following month
//! (2024-01-31 + 1 month = 2024-03-02). Nothing is clamped to the last valid
//! day.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{Instant, TimeUnit};
use crate::error::{TimelineError, TimelineResult};

/// Shifts `instant` by `quantity` units. Negative quantities move backwards.
pub fn add(instant: Instant, quantity: i64, unit: TimeUnit) -> TimelineResult<Instant> {
    match unit {
        TimeUnit::Year => add_months(instant, quantity.checked_mul(12)),
        TimeUnit::Month => add_months(instant, Some(quantity)),
        fixed => {
            let unit_millis = fixed.fixed_millis().unwrap_or(1);
            let millis = quantity.checked_mul(unit_millis).ok_or_else(|| {
                TimelineError::OutOfRange(format!("{quantity} {} overflows", fixed.plural()))
            })?;
            instant.checked_add_millis(millis)
        }
    }
}

fn add_months(instant: Instant, months: Option<i64>) -> TimelineResult<Instant> {
    let out_of_range = || TimelineError::OutOfRange(format!("{instant} shifted by months"));
    let months = months.ok_or_else(out_of_range)?;

    let datetime = instant.as_datetime();
    let date = datetime.date_naive();
    let month_index = i64::from(date.year()) * 12 + i64::from(date.month0());
    let target = month_index.checked_add(months).ok_or_else(out_of_range)?;

    let year = i32::try_from(target.div_euclid(12)).map_err(|_| out_of_range())?;
    let month0 = u32::try_from(target.rem_euclid(12)).map_err(|_| out_of_range())?;

    // Day overflow rolls forward, the same way a native calendar normalizes
    // "February 31st".
    let shifted = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .and_then(|first| first.checked_add_days(Days::new(u64::from(date.day0()))))
        .ok_or_else(out_of_range)?;

    Ok(Instant::from_datetime(
        NaiveDateTime::new(shifted, datetime.time()).and_utc(),
    ))
}

/// Truncates every field below `unit` to its minimum.
///
/// `Week` floors to the most recent Monday at midnight.
#[must_use]
pub fn floor(instant: Instant, unit: TimeUnit) -> Instant {
    let naive = instant.as_datetime().naive_utc();
    floor_naive(naive, unit)
        .map(|floored| Instant::from_datetime(floored.and_utc()))
        .unwrap_or(instant)
}

fn floor_naive(naive: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    let date = naive.date();
    let time = naive.time();
    let (date, time) = match unit {
        TimeUnit::Year => (NaiveDate::from_ymd_opt(date.year(), 1, 1)?, NaiveTime::MIN),
        TimeUnit::Month => (
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?,
            NaiveTime::MIN,
        ),
        TimeUnit::Week => {
            let back = u64::from(date.weekday().num_days_from_monday());
            (date.checked_sub_days(Days::new(back))?, NaiveTime::MIN)
        }
        TimeUnit::Day => (date, NaiveTime::MIN),
        TimeUnit::Hour => (date, NaiveTime::from_hms_opt(time.hour(), 0, 0)?),
        TimeUnit::Minute => (date, NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)?),
        TimeUnit::Second => (
            date,
            NaiveTime::from_hms_opt(time.hour(), time.minute(), time.second())?,
        ),
        TimeUnit::Millisecond => (
            date,
            time.with_nanosecond(time.nanosecond() / 1_000_000 * 1_000_000)?,
        ),
    };
    Some(NaiveDateTime::new(date, time))
}

/// Signed difference `a - b` expressed in `unit`, rounded to two decimals.
///
/// Fixed units use the exact millisecond ratio. Months use field subtraction
/// and lose one month when `a`'s day of month is before `b`'s; years are that
/// month count divided by twelve. Month results are therefore antisymmetric
/// only when both instants share the same day of month.
#[must_use]
pub fn diff(a: Instant, b: Instant, unit: TimeUnit) -> f64 {
    let value = match unit {
        TimeUnit::Year => Decimal::from(calendar_months_between(a, b)) / Decimal::from(12),
        TimeUnit::Month => Decimal::from(calendar_months_between(a, b)),
        fixed => {
            let unit_millis = fixed.fixed_millis().unwrap_or(1);
            Decimal::from(a.millis_since(b)) / Decimal::from(unit_millis)
        }
    };

    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_f64().unwrap_or_default()
}

/// Whole calendar months from `b` to `a` with the day-of-month correction.
#[must_use]
pub fn calendar_months_between(a: Instant, b: Instant) -> i64 {
    let a = a.as_datetime().date_naive();
    let b = b.as_datetime().date_naive();
    let mut months = (i64::from(a.year()) - i64::from(b.year())) * 12
        + (i64::from(a.month()) - i64::from(b.month()));
    if a.day() < b.day() {
        months -= 1;
    }
    months
}

#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` (1-based) of `year`. Returns 0 for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[must_use]
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalendarDateTime;

    fn date(y: i32, m: u32, d: u32) -> Instant {
        CalendarDateTime::date(y, m, d).to_instant().expect("valid date")
    }

    #[test]
    fn month_add_rolls_into_following_month() {
        assert_eq!(add(date(2024, 1, 31), 1, TimeUnit::Month).expect("add"), date(2024, 3, 2));
        assert_eq!(add(date(2023, 1, 31), 1, TimeUnit::Month).expect("add"), date(2023, 3, 3));
        assert_eq!(add(date(2024, 2, 29), 1, TimeUnit::Year).expect("add"), date(2025, 3, 1));
    }

    #[test]
    fn negative_month_add_crosses_year_boundary() {
        assert_eq!(add(date(2024, 2, 15), -3, TimeUnit::Month).expect("add"), date(2023, 11, 15));
    }

    #[test]
    fn week_floor_lands_on_monday() {
        // 2024-03-07 is a Thursday.
        let thursday = CalendarDateTime::new(2024, 3, 7, 15, 30, 0, 0)
            .to_instant()
            .expect("valid");
        assert_eq!(floor(thursday, TimeUnit::Week), date(2024, 3, 4));
        assert_eq!(floor(date(2024, 3, 4), TimeUnit::Week), date(2024, 3, 4));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 13), 0);
        assert_eq!(days_in_year(2023), 365);
    }
}
