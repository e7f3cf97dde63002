use approx::assert_relative_eq;
use gantt_rs::core::{
    CalendarDateTime, DurationSpec, Instant, ScaleConfig, TimeUnit, Viewport, parse_duration,
};
use gantt_rs::schedule::snap_width_px;

const DAY_MS: f64 = 86_400_000.0;

fn date(year: i32, month: u32, day: u32) -> Instant {
    CalendarDateTime::date(year, month, day)
        .to_instant()
        .expect("valid date")
}

fn day_viewport() -> Viewport {
    Viewport::new(date(2024, 1, 1), ScaleConfig::default())
}

#[test]
fn default_scale_is_forty_five_pixels_per_day() {
    let viewport = day_viewport();
    assert_relative_eq!(viewport.millis_per_pixel(), DAY_MS / 45.0);
    assert_relative_eq!(viewport.date_to_x(date(2024, 1, 3)), 90.0);
    assert_relative_eq!(viewport.date_to_x(date(2023, 12, 31)), -45.0);
}

#[test]
fn x_to_date_inverts_date_to_x() {
    let viewport = day_viewport();
    let at = viewport.x_to_date(67.5).expect("x to date");
    assert_eq!(
        at.to_calendar(),
        CalendarDateTime::new(2024, 1, 2, 12, 0, 0, 0)
    );
    assert_relative_eq!(viewport.date_to_x(at), 67.5);
}

#[test]
fn x_to_date_rejects_non_finite_offsets() {
    let viewport = day_viewport();
    assert!(viewport.x_to_date(f64::NAN).is_err());
    assert!(viewport.x_to_date(f64::INFINITY).is_err());
}

#[test]
fn month_columns_measure_the_epoch_month() {
    let mut viewport = day_viewport();
    viewport.set_scale(120.0, 1, TimeUnit::Month);
    assert_relative_eq!(viewport.millis_per_pixel(), 31.0 * DAY_MS / 120.0);

    // February 2024 is narrower than a column.
    let width = viewport.range_to_pixels(date(2024, 2, 1), date(2024, 3, 1));
    assert_relative_eq!(width, 29.0 * 120.0 / 31.0, epsilon = 1e-9);
}

#[test]
fn multi_step_scale() {
    let viewport = Viewport::new(date(2024, 1, 1), ScaleConfig::new(60.0, 6, TimeUnit::Hour));
    assert_relative_eq!(viewport.date_to_x(date(2024, 1, 2)), 240.0);
}

#[test]
fn invalid_scale_falls_back_to_defaults() {
    let viewport = Viewport::new(date(2024, 1, 1), ScaleConfig::new(-3.0, 0, TimeUnit::Day));
    assert_eq!(viewport.scale(), ScaleConfig::default());

    let viewport = Viewport::new(date(2024, 1, 1), ScaleConfig::new(f64::NAN, 1, TimeUnit::Day));
    assert_relative_eq!(viewport.scale().column_width, 45.0);
}

#[test]
fn overflowing_step_falls_back_to_one_day() {
    let scale = ScaleConfig::new(45.0, u32::MAX, TimeUnit::Day).sanitized();
    assert_eq!(scale, ScaleConfig::default());

    let viewport = Viewport::new(
        date(2024, 1, 1),
        ScaleConfig::new(120.0, u32::MAX, TimeUnit::Year),
    );
    assert_eq!(viewport.scale(), ScaleConfig::new(120.0, 1, TimeUnit::Day));
    assert_relative_eq!(viewport.millis_per_pixel(), DAY_MS / 120.0);

    // Snapping measures the same step as the pixel scale.
    let snap = snap_width_px(&ScaleConfig::new(45.0, u32::MAX, TimeUnit::Day), None);
    assert_relative_eq!(snap, 45.0);
}

#[test]
fn pixels_convert_to_exact_millisecond_durations() {
    let viewport = day_viewport();
    let duration = viewport.pixels_to_duration(45.0).expect("pixels to duration");
    assert_eq!(duration, DurationSpec::new(86_400_000, TimeUnit::Millisecond));
    assert_eq!(duration.fixed_millis(), Some(86_400_000));

    let back = viewport.pixels_to_duration(-22.5).expect("pixels to duration");
    assert_eq!(back.fixed_millis(), Some(-43_200_000));
}

#[test]
fn calendar_durations_are_measured_from_origin() {
    let mut viewport = day_viewport();
    viewport.set_origin(date(2024, 2, 1));
    let width = viewport
        .duration_to_pixels(&parse_duration("1mo"))
        .expect("duration to pixels");
    assert_relative_eq!(width, 29.0 * 45.0);

    viewport.set_origin(date(2024, 3, 1));
    let width = viewport
        .duration_to_pixels(&parse_duration("1mo"))
        .expect("duration to pixels");
    assert_relative_eq!(width, 31.0 * 45.0);
}
