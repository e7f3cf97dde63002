//! Compact duration strings such as `2h`, `30min` or `1y 2mo`.
//!
//! # Grammar
//!
//! ```text
//! duration  = token , { whitespace , token } ;
//! token     = digits , unit ;
//! unit      = "y" | "mo" | "m" | "w" | "d" | "h" | "min" | "s" | "ms" ;
//! ```
//!
//! A bare `m` is a **month**, exactly like `mo`. Minutes are written `min`.
//! Configuration written for other tools where `m` means minutes will be read
//! as months here.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::warn;

use crate::core::{Instant, TimeUnit, calendar};
use crate::error::TimelineResult;

/// One `{count, unit}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurationComponent {
    pub count: i64,
    pub unit: TimeUnit,
}

impl DurationComponent {
    #[must_use]
    pub fn new(count: i64, unit: TimeUnit) -> Self {
        Self { count, unit }
    }
}

/// Unit-tagged duration, one or more components in written order.
///
/// Calendar components (years, months) have no fixed millisecond length; use
/// [`DurationSpec::apply_to`] to resolve them against an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DurationSpec {
    components: SmallVec<[DurationComponent; 2]>,
}

impl DurationSpec {
    #[must_use]
    pub fn new(count: i64, unit: TimeUnit) -> Self {
        let mut components = SmallVec::new();
        components.push(DurationComponent::new(count, unit));
        Self { components }
    }

    /// Builds a composite duration. An empty list yields a zero-millisecond span.
    #[must_use]
    pub fn from_components(components: impl IntoIterator<Item = DurationComponent>) -> Self {
        let components: SmallVec<[DurationComponent; 2]> = components.into_iter().collect();
        if components.is_empty() {
            return Self::new(0, TimeUnit::Millisecond);
        }
        Self { components }
    }

    #[must_use]
    pub fn one_day() -> Self {
        Self::new(1, TimeUnit::Day)
    }

    #[must_use]
    pub fn components(&self) -> &[DurationComponent] {
        &self.components
    }

    /// The single component of a simple duration, `None` for composites.
    #[must_use]
    pub fn as_single(&self) -> Option<DurationComponent> {
        match self.components.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_calendar(&self) -> bool {
        self.components.iter().any(|c| c.unit.is_calendar())
    }

    /// Total length when every component is a fixed unit.
    #[must_use]
    pub fn fixed_millis(&self) -> Option<i64> {
        self.components.iter().try_fold(0i64, |acc, c| {
            let unit_millis = c.unit.fixed_millis()?;
            acc.checked_add(c.count.checked_mul(unit_millis)?)
        })
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(|c| DurationComponent::new(-c.count, c.unit))
                .collect(),
        }
    }

    /// Applies every component left to right, each one anchored at the result
    /// of the previous step.
    pub fn apply_to(&self, anchor: Instant) -> TimelineResult<Instant> {
        self.components
            .iter()
            .try_fold(anchor, |at, c| calendar::add(at, c.count, c.unit))
    }

    /// Millisecond span of this duration when applied at `anchor`.
    pub fn span_millis_at(&self, anchor: Instant) -> TimelineResult<i64> {
        Ok(self.apply_to(anchor)?.millis_since(anchor))
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, c) in self.components.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}{}", c.count, c.unit.abbreviation())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("duration input is empty")]
    Empty,
    #[error("token `{token}` must start with an unsigned integer")]
    MissingNumber { token: String },
    #[error("token `{token}` has no unit")]
    MissingUnit { token: String },
    #[error("token `{token}` uses unknown unit `{unit}`")]
    UnknownUnit { token: String, unit: String },
    #[error("token `{token}` count does not fit in 64 bits")]
    CountOverflow { token: String },
}

/// Strict parser: returns the reason a string is not a valid duration.
pub fn try_parse_duration(input: &str) -> Result<DurationSpec, DurationParseError> {
    let mut components = SmallVec::<[DurationComponent; 2]>::new();
    for token in input.split_whitespace() {
        components.push(parse_token(token)?);
    }
    if components.is_empty() {
        return Err(DurationParseError::Empty);
    }
    Ok(DurationSpec { components })
}

/// Lenient parser used for user-editable configuration.
///
/// Malformed input resolves to one day and emits a warning diagnostic instead
/// of failing.
#[must_use]
pub fn parse_duration(input: &str) -> DurationSpec {
    match try_parse_duration(input) {
        Ok(spec) => spec,
        Err(err) => {
            warn!(input, error = %err, "unparseable duration, defaulting to 1d");
            DurationSpec::one_day()
        }
    }
}

fn parse_token(token: &str) -> Result<DurationComponent, DurationParseError> {
    let digits_end = token
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(token.len(), |(idx, _)| idx);

    let (digits, unit) = token.split_at(digits_end);
    if digits.is_empty() {
        return Err(DurationParseError::MissingNumber {
            token: token.to_owned(),
        });
    }
    if unit.is_empty() {
        return Err(DurationParseError::MissingUnit {
            token: token.to_owned(),
        });
    }

    let count = digits
        .parse::<i64>()
        .map_err(|_| DurationParseError::CountOverflow {
            token: token.to_owned(),
        })?;
    let unit = TimeUnit::from_abbreviation(unit).ok_or_else(|| DurationParseError::UnknownUnit {
        token: token.to_owned(),
        unit: unit.to_owned(),
    })?;

    Ok(DurationComponent::new(count, unit))
}

/// Converts a duration into `to_unit` using nominal unit lengths
/// (30-day months, 365-day years).
#[must_use]
pub fn convert_duration(spec: &DurationSpec, to_unit: TimeUnit) -> f64 {
    let days: f64 = spec
        .components()
        .iter()
        .map(|c| c.count as f64 * c.unit.nominal_days())
        .sum();
    days / to_unit.nominal_days()
}
