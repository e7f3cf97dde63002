use tracing::warn;

use crate::core::{DurationSpec, Instant, ScaleConfig};

/// Pixel width of one snap increment under `scale`.
///
/// `snap = None` snaps to whole columns (one step). The snap duration is
/// measured from the same Unix-epoch anchor as the scale, so a `7d` snap in a
/// one-month view is `7 / 31` of a column.
#[must_use]
pub fn snap_width_px(scale: &ScaleConfig, snap: Option<&DurationSpec>) -> f64 {
    let scale = scale.sanitized();
    let step = scale.step();
    let snap = snap.unwrap_or(&step);

    match snap.span_millis_at(Instant::unix_epoch()) {
        Ok(millis) if millis > 0 => millis as f64 / scale.millis_per_pixel(),
        _ => {
            warn!(snap = %snap, "snap duration is not positive, snapping to columns");
            scale.column_width
        }
    }
}

/// Rounds a raw drag delta to the nearest snap increment (halves round away
/// from zero).
///
/// The result depends only on the arguments, so calling it on every move
/// event with the gesture's total delta never accumulates drift.
#[must_use]
pub fn snap_pixel_delta(
    raw_delta_px: f64,
    scale: &ScaleConfig,
    snap: Option<&DurationSpec>,
) -> f64 {
    if !raw_delta_px.is_finite() {
        return 0.0;
    }
    let width = snap_width_px(scale, snap);
    (raw_delta_px / width).round() * width
}
