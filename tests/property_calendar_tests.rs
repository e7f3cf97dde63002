use gantt_rs::core::{CalendarDateTime, Instant, TimeUnit, add, diff, floor, parse_instant};
use gantt_rs::format::format;
use proptest::prelude::*;

fn instant_strategy() -> impl Strategy<Value = Instant> {
    let date = (-99_999i32..=99_999, 1u32..=12, 1u32..=28);
    let time = (0u32..24, 0u32..60, 0u32..60, 0u32..1000);
    (date, time).prop_map(|((year, month, day), (hour, minute, second, millisecond))| {
        CalendarDateTime::new(year, month, day, hour, minute, second, millisecond)
            .to_instant()
            .expect("valid generated instant")
    })
}

fn unit_strategy() -> impl Strategy<Value = TimeUnit> {
    prop::sample::select(TimeUnit::ALL.to_vec())
}

fn fixed_unit_strategy() -> impl Strategy<Value = TimeUnit> {
    prop::sample::select(vec![
        TimeUnit::Week,
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
    ])
}

proptest! {
    #[test]
    fn formatted_instant_parses_back(instant in instant_strategy()) {
        let text = format(instant, "YYYY-MM-DD HH:mm:ss.SSS", "en");
        let parsed = parse_instant(text.as_str()).expect("round trip parse");
        prop_assert_eq!(parsed, instant);
    }

    #[test]
    fn floor_is_idempotent_and_never_moves_forward(
        instant in instant_strategy(),
        unit in unit_strategy()
    ) {
        let once = floor(instant, unit);
        prop_assert!(once <= instant);
        prop_assert_eq!(floor(once, unit), once);
    }

    #[test]
    fn fixed_unit_diff_is_antisymmetric(
        a in instant_strategy(),
        b in instant_strategy(),
        unit in fixed_unit_strategy()
    ) {
        prop_assert_eq!(diff(a, b, unit), -diff(b, a, unit));
    }

    #[test]
    fn fixed_unit_add_is_reversible(
        instant in instant_strategy(),
        quantity in -10_000i64..10_000,
        unit in fixed_unit_strategy()
    ) {
        let shifted = add(instant, quantity, unit).expect("forward");
        let back = add(shifted, -quantity, unit).expect("backward");
        prop_assert_eq!(back, instant);
    }

    #[test]
    fn month_add_keeps_early_days_of_month(
        instant in instant_strategy(),
        months in -240i64..240
    ) {
        // Generated days stop at 28, so no roll-over can happen.
        let shifted = add(instant, months, TimeUnit::Month).expect("add months");
        prop_assert_eq!(shifted.to_calendar().day, instant.to_calendar().day);
        prop_assert_eq!(diff(shifted, instant, TimeUnit::Month), months as f64);
    }
}
