use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, Weekday};
use tracing::warn;

use crate::core::{Instant, TimeUnit, add, floor, parse_instant};

/// Upper bound on days scanned by a single range query (about a century).
const MAX_SCANNED_DAYS: usize = 36_600;

pub type IgnorePredicate = Arc<dyn Fn(Instant) -> bool + Send + Sync>;

/// One reason a day is excluded from working time.
#[derive(Clone)]
pub enum IgnoreRule {
    /// Saturdays and Sundays.
    Weekend,
    /// A single calendar day, stored as its midnight.
    Date(Instant),
    Predicate(IgnorePredicate),
}

impl fmt::Debug for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekend => f.write_str("Weekend"),
            Self::Date(day) => f.debug_tuple("Date").field(day).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl IgnoreRule {
    fn matches(&self, instant: Instant) -> bool {
        match self {
            Self::Weekend => matches!(
                instant.as_datetime().weekday(),
                Weekday::Sat | Weekday::Sun
            ),
            Self::Date(day) => floor(instant, TimeUnit::Day) == *day,
            Self::Predicate(predicate) => predicate(instant),
        }
    }
}

/// Set of rules marking non-working days.
#[derive(Debug, Clone, Default)]
pub struct WorkingCalendar {
    rules: Vec<IgnoreRule>,
}

impl WorkingCalendar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds rules from configuration entries: `"weekend"` or a date.
    /// Entries that are neither are skipped with a warning.
    #[must_use]
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut calendar = Self::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.eq_ignore_ascii_case("weekend") {
                calendar.push(IgnoreRule::Weekend);
                continue;
            }
            match parse_instant(entry) {
                Ok(day) => calendar.ignore_date(day),
                Err(err) => warn!(entry, error = %err, "ignoring unparseable ignore entry"),
            }
        }
        calendar
    }

    pub fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    pub fn ignore_date(&mut self, day: Instant) {
        self.push(IgnoreRule::Date(floor(day, TimeUnit::Day)));
    }

    pub fn ignore_when<F>(&mut self, predicate: F)
    where
        F: Fn(Instant) -> bool + Send + Sync + 'static,
    {
        self.push(IgnoreRule::Predicate(Arc::new(predicate)));
    }

    #[must_use]
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_ignored(&self, instant: Instant) -> bool {
        self.rules.iter().any(|rule| rule.matches(instant))
    }

    /// Midnights of the ignored days overlapping `[start, end)`.
    #[must_use]
    pub fn ignored_days(&self, start: Instant, end: Instant) -> Vec<Instant> {
        Self::days(start, end)
            .filter(|day| self.is_ignored(*day))
            .collect()
    }

    /// Count of non-ignored days overlapping `[start, end)`.
    #[must_use]
    pub fn working_days(&self, start: Instant, end: Instant) -> usize {
        Self::days(start, end)
            .filter(|day| !self.is_ignored(*day))
            .count()
    }

    fn days(start: Instant, end: Instant) -> impl Iterator<Item = Instant> {
        let first = floor(start, TimeUnit::Day);
        std::iter::successors(Some(first), |day| add(*day, 1, TimeUnit::Day).ok())
            .take_while(move |day| *day < end)
            .take(MAX_SCANNED_DAYS)
    }
}
