use chrono::Locale;
use tracing::warn;

use crate::core::{DurationSpec, ScaleConfig, parse_duration};
use crate::format::resolve_locale;
use crate::interaction::DEFAULT_DRAG_THRESHOLD_PX;

use super::TimelineConfig;

/// Runtime values derived from a [`TimelineConfig`].
///
/// Resolution never fails: malformed user-editable fields fall back to the
/// view-mode preset or the crate defaults with a warning.
#[derive(Debug, Clone)]
pub struct ResolvedTimelineConfig {
    pub scale: ScaleConfig,
    /// `None` snaps to whole columns.
    pub snap_at: Option<DurationSpec>,
    pub padding: DurationSpec,
    pub date_format: &'static str,
    pub column_label: &'static str,
    pub locale: Locale,
    pub drag_threshold_px: f64,
}

pub(super) fn resolve_config(config: &TimelineConfig) -> ResolvedTimelineConfig {
    let preset = config.view_mode.preset();

    let step = config
        .step
        .as_deref()
        .map_or_else(|| preset.step.clone(), parse_duration);
    let column_width = config.column_width.unwrap_or(preset.column_width);
    let scale = scale_from_step(&step, column_width)
        .or_else(|| scale_from_step(&preset.step, column_width))
        .unwrap_or_default()
        .sanitized();

    let snap_at = match config.snap_at.as_deref().map(str::trim) {
        None => preset.snap_at,
        Some("unit") => None,
        Some(snap) => Some(parse_duration(snap)),
    };

    let padding = config
        .padding
        .as_deref()
        .map_or(preset.padding, parse_duration);

    let drag_threshold_px =
        if config.drag_threshold_px.is_finite() && config.drag_threshold_px >= 0.0 {
            config.drag_threshold_px
        } else {
            warn!(
                drag_threshold_px = config.drag_threshold_px,
                fallback = DEFAULT_DRAG_THRESHOLD_PX,
                "invalid drag threshold, using default"
            );
            DEFAULT_DRAG_THRESHOLD_PX
        };

    ResolvedTimelineConfig {
        scale,
        snap_at,
        padding,
        date_format: preset.date_format,
        column_label: preset.column_label,
        locale: resolve_locale(&config.language),
        drag_threshold_px,
    }
}

/// A scale step must be a single positive component.
fn scale_from_step(step: &DurationSpec, column_width: f64) -> Option<ScaleConfig> {
    let resolved = step
        .as_single()
        .filter(|c| c.count > 0)
        .and_then(|c| u32::try_from(c.count).ok().map(|interval| (interval, c.unit)));
    match resolved {
        Some((interval, unit)) => Some(ScaleConfig::new(column_width, interval, unit)),
        None => {
            warn!(step = %step, "step must be a single positive unit, using preset step");
            None
        }
    }
}
