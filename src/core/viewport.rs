use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{DurationSpec, Instant, TimeUnit, calendar};
use crate::error::{TimelineError, TimelineResult};

pub const DEFAULT_COLUMN_WIDTH: f64 = 45.0;
pub const DEFAULT_STEP_INTERVAL: u32 = 1;
pub const DEFAULT_STEP_UNIT: TimeUnit = TimeUnit::Day;

/// Pixels covered by `step_interval` units of `step_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub column_width: f64,
    pub step_interval: u32,
    pub step_unit: TimeUnit,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            step_interval: DEFAULT_STEP_INTERVAL,
            step_unit: DEFAULT_STEP_UNIT,
        }
    }
}

impl ScaleConfig {
    #[must_use]
    pub fn new(column_width: f64, step_interval: u32, step_unit: TimeUnit) -> Self {
        Self {
            column_width,
            step_interval,
            step_unit,
        }
    }

    /// Replaces invalid fields with the defaults (45px, 1 day). A step that
    /// cannot be applied to the epoch without overflowing is invalid too.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut scale = self;
        if !scale.column_width.is_finite() || scale.column_width <= 0.0 {
            warn!(
                column_width = scale.column_width,
                fallback = DEFAULT_COLUMN_WIDTH,
                "invalid column width, using default"
            );
            scale.column_width = DEFAULT_COLUMN_WIDTH;
        }
        if scale.step_interval == 0 {
            warn!(
                fallback_interval = DEFAULT_STEP_INTERVAL,
                fallback_unit = %DEFAULT_STEP_UNIT,
                "zero step interval, using default step"
            );
            scale.step_interval = DEFAULT_STEP_INTERVAL;
            scale.step_unit = DEFAULT_STEP_UNIT;
        }
        let anchor = Instant::unix_epoch();
        if calendar::add(anchor, i64::from(scale.step_interval), scale.step_unit).is_err() {
            warn!(
                step_interval = scale.step_interval,
                step_unit = %scale.step_unit,
                fallback_interval = DEFAULT_STEP_INTERVAL,
                fallback_unit = %DEFAULT_STEP_UNIT,
                "step overflows the calendar, using default step"
            );
            scale.step_interval = DEFAULT_STEP_INTERVAL;
            scale.step_unit = DEFAULT_STEP_UNIT;
        }
        scale
    }

    #[must_use]
    pub fn step(self) -> DurationSpec {
        DurationSpec::new(i64::from(self.step_interval), self.step_unit)
    }

    /// Milliseconds represented by one pixel.
    ///
    /// One step is measured from the Unix epoch (1970-01-01). Calendar steps
    /// therefore use January's length: a one-month column spans 31 days, a
    /// one-year column 365 days. Views anchored in other months drift by up to
    /// about 3% against the real calendar.
    #[must_use]
    pub fn millis_per_pixel(self) -> f64 {
        let scale = self.sanitized();
        let anchor = Instant::unix_epoch();
        let step_millis = calendar::add(anchor, i64::from(scale.step_interval), scale.step_unit)
            .map(|end| end.millis_since(anchor))
            .unwrap_or(DEFAULT_MILLIS_PER_STEP);
        step_millis as f64 / scale.column_width
    }
}

const DEFAULT_MILLIS_PER_STEP: i64 = crate::core::unit::MILLIS_PER_DAY;

/// Pure instant/pixel transform: `x = (instant - origin) / ms_per_pixel`.
///
/// The viewport knows nothing about what is visible or scrollable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    origin: Instant,
    scale: ScaleConfig,
    millis_per_pixel: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(origin: Instant, scale: ScaleConfig) -> Self {
        let scale = scale.sanitized();
        Self {
            origin,
            scale,
            millis_per_pixel: scale.millis_per_pixel(),
        }
    }

    #[must_use]
    pub fn origin(self) -> Instant {
        self.origin
    }

    #[must_use]
    pub fn scale(self) -> ScaleConfig {
        self.scale
    }

    #[must_use]
    pub fn millis_per_pixel(self) -> f64 {
        self.millis_per_pixel
    }

    pub fn set_origin(&mut self, origin: Instant) {
        self.origin = origin;
    }

    pub fn set_scale(&mut self, column_width: f64, step_interval: u32, step_unit: TimeUnit) {
        self.set_scale_config(ScaleConfig::new(column_width, step_interval, step_unit));
    }

    pub fn set_scale_config(&mut self, scale: ScaleConfig) {
        self.scale = scale.sanitized();
        self.millis_per_pixel = self.scale.millis_per_pixel();
    }

    #[must_use]
    pub fn date_to_x(self, instant: Instant) -> f64 {
        instant.millis_since(self.origin) as f64 / self.millis_per_pixel
    }

    /// Inverse of [`Viewport::date_to_x`], rounded to the nearest millisecond.
    pub fn x_to_date(self, x: f64) -> TimelineResult<Instant> {
        self.origin.checked_add_millis(self.pixels_to_millis(x)?)
    }

    #[must_use]
    pub fn range_to_pixels(self, start: Instant, end: Instant) -> f64 {
        end.millis_since(start) as f64 / self.millis_per_pixel
    }

    /// Fixed-length duration covered by `pixels`.
    pub fn pixels_to_duration(self, pixels: f64) -> TimelineResult<DurationSpec> {
        Ok(DurationSpec::new(
            self.pixels_to_millis(pixels)?,
            TimeUnit::Millisecond,
        ))
    }

    /// Width of `duration` when laid out from the viewport origin.
    pub fn duration_to_pixels(self, duration: &DurationSpec) -> TimelineResult<f64> {
        Ok(duration.span_millis_at(self.origin)? as f64 / self.millis_per_pixel)
    }

    fn pixels_to_millis(self, pixels: f64) -> TimelineResult<i64> {
        if !pixels.is_finite() {
            return Err(TimelineError::InvalidData(
                "pixel offset must be finite".to_owned(),
            ));
        }
        let millis = (pixels * self.millis_per_pixel).round();
        if millis >= i64::MAX as f64 || millis <= i64::MIN as f64 {
            return Err(TimelineError::OutOfRange(format!(
                "{pixels}px exceeds the representable time range"
            )));
        }
        Ok(millis as i64)
    }
}
