use gantt_rs::core::{Instant, ScaleConfig, TimeUnit, Viewport};
use gantt_rs::schedule::{snap_pixel_delta, snap_width_px};
use proptest::prelude::*;

fn scale_strategy() -> impl Strategy<Value = ScaleConfig> {
    (
        5.0f64..400.0,
        1u32..12,
        prop::sample::select(vec![
            TimeUnit::Year,
            TimeUnit::Month,
            TimeUnit::Week,
            TimeUnit::Day,
            TimeUnit::Hour,
            TimeUnit::Minute,
        ]),
    )
        .prop_map(|(width, interval, unit)| ScaleConfig::new(width, interval, unit))
}

proptest! {
    #[test]
    fn snapped_delta_is_a_multiple_of_snap_width(
        raw in -5_000.0f64..5_000.0,
        scale in scale_strategy()
    ) {
        let width = snap_width_px(&scale, None);
        let snapped = snap_pixel_delta(raw, &scale, None);
        let steps = snapped / width;
        prop_assert!((steps - steps.round()).abs() <= 1e-9);
        prop_assert!((snapped - raw).abs() <= width / 2.0 + 1e-9);
    }

    #[test]
    fn snapping_is_idempotent(
        raw in -5_000.0f64..5_000.0,
        scale in scale_strategy()
    ) {
        let once = snap_pixel_delta(raw, &scale, None);
        let twice = snap_pixel_delta(once, &scale, None);
        prop_assert!((once - twice).abs() <= 1e-9 * once.abs().max(1.0));
    }

    #[test]
    fn date_to_x_and_back_stays_within_a_millisecond(
        origin_ms in -2_000_000_000_000i64..4_000_000_000_000,
        offset_ms in -500_000_000_000i64..500_000_000_000,
        scale in scale_strategy()
    ) {
        let origin = Instant::from_millis(origin_ms).expect("origin");
        let instant = Instant::from_millis(origin_ms + offset_ms).expect("instant");
        let viewport = Viewport::new(origin, scale);

        let x = viewport.date_to_x(instant);
        let back = viewport.x_to_date(x).expect("x to date");
        prop_assert!((back.millis_since(instant)).abs() <= 1);
    }
}
