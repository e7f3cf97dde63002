use approx::assert_relative_eq;
use gantt_rs::api::{TimelineConfig, TimelineEngine};
use gantt_rs::core::{CalendarDateTime, DurationSpec, Instant, ScaleConfig, TimeUnit};
use gantt_rs::schedule::{Task, TaskRecord, TimelineBounds, ViewMode};
use gantt_rs::TimelineError;

fn date(year: i32, month: u32, day: u32) -> Instant {
    CalendarDateTime::date(year, month, day)
        .to_instant()
        .expect("valid date")
}

#[test]
fn every_view_mode_resolves_to_a_valid_scale() {
    for mode in ViewMode::ALL {
        let engine = TimelineEngine::new(TimelineConfig::new(mode));
        let preset = mode.preset();
        let scale = engine.scale();
        assert_relative_eq!(scale.column_width, preset.column_width);
        assert_eq!(scale.step(), preset.step, "{mode:?}");
        assert!(engine.viewport().millis_per_pixel() > 0.0);
    }
}

#[test]
fn month_view_config_from_json() {
    let config = TimelineConfig::from_json_str(
        r#"{"view_mode": "Month", "snap_at": "unit", "language": "fr"}"#,
    )
    .expect("valid config");
    assert!(config.move_dependencies);

    let engine = TimelineEngine::new(config);
    assert_eq!(engine.scale(), ScaleConfig::new(120.0, 1, TimeUnit::Month));
    assert_eq!(engine.resolved_config().snap_at, None);
    assert_eq!(engine.column_label(date(2024, 1, 1)), "Janvier");
    assert_eq!(engine.format_date(date(2024, 1, 1)), "2024-01");
}

#[test]
fn preset_snap_applies_when_not_overridden() {
    let engine = TimelineEngine::new(TimelineConfig::new(ViewMode::Month));
    assert_eq!(
        engine.resolved_config().snap_at,
        Some(DurationSpec::new(7, TimeUnit::Day))
    );
}

#[test]
fn config_round_trips_through_json() {
    let config = TimelineConfig::new(ViewMode::Week)
        .with_column_width(90.0)
        .with_step("14d")
        .with_snap_at("12h")
        .with_language("de")
        .with_ignore(["weekend"])
        .with_move_dependencies(false);
    let json = config.to_json_pretty().expect("serialize");
    let restored = TimelineConfig::from_json_str(&json).expect("deserialize");
    assert_eq!(restored, config);

    let engine = TimelineEngine::new(restored);
    assert_eq!(engine.scale(), ScaleConfig::new(90.0, 14, TimeUnit::Day));
    assert_eq!(
        engine.resolved_config().snap_at,
        Some(DurationSpec::new(12, TimeUnit::Hour))
    );
}

#[test]
fn malformed_overrides_fall_back() {
    let engine = TimelineEngine::new(TimelineConfig::default().with_step("1d 2h"));
    assert_eq!(engine.scale(), ScaleConfig::default());

    let engine = TimelineEngine::new(TimelineConfig::default().with_step("banana"));
    assert_eq!(engine.scale(), ScaleConfig::default());

    let engine = TimelineEngine::new(TimelineConfig::default().with_column_width(-1.0));
    assert_relative_eq!(engine.scale().column_width, 45.0);

    let config = TimelineConfig {
        drag_threshold_px: f64::NAN,
        ..TimelineConfig::default()
    };
    let engine = TimelineEngine::new(config);
    assert_relative_eq!(engine.resolved_config().drag_threshold_px, 5.0);
}

#[test]
fn malformed_json_is_rejected() {
    let err = TimelineConfig::from_json_str(r#"{"view_mode": "Fortnight"}"#).expect_err("bad mode");
    assert!(matches!(err, TimelineError::Config(_)));
}

#[test]
fn month_bounds_snap_to_month_starts() {
    let task = Task::from_record(
        &TaskRecord::new("a")
            .with_start("2024-03-10")
            .with_end("2024-05-20"),
    )
    .expect("valid task");
    let preset = ViewMode::Month.preset();
    let scale = ScaleConfig::new(preset.column_width, 1, TimeUnit::Month);

    let bounds = TimelineBounds::fit([&task], scale, &preset.padding)
        .expect("fit")
        .expect("non-empty");
    assert_eq!(bounds.start, date(2024, 1, 1));
    assert_eq!(bounds.end, date(2024, 7, 1));
    assert_eq!(bounds.column_count(), 6);

    let columns = bounds.columns().expect("columns");
    let labels: Vec<(i32, u32)> = columns
        .iter()
        .map(|c| {
            let fields = c.to_calendar();
            (fields.year, fields.month)
        })
        .collect();
    assert_eq!(
        labels,
        [(2024, 1), (2024, 2), (2024, 3), (2024, 4), (2024, 5), (2024, 6)]
    );
}

#[test]
fn week_bounds_start_on_a_day_boundary() {
    let task = Task::from_record(
        &TaskRecord::new("a")
            .with_start("2024-03-13 15:00")
            .with_end("2024-03-20 09:00"),
    )
    .expect("valid task");
    let preset = ViewMode::Week.preset();
    let scale = ScaleConfig::new(preset.column_width, 7, TimeUnit::Day);

    let bounds = TimelineBounds::fit([&task], scale, &preset.padding)
        .expect("fit")
        .expect("non-empty");
    assert_eq!(bounds.start, date(2024, 2, 13));
    assert_eq!(bounds.end, date(2024, 4, 20));
    assert_eq!(bounds.columns().expect("columns").len(), bounds.column_count());
}

#[test]
fn empty_task_list_has_no_bounds() {
    let bounds = TimelineBounds::fit(
        std::iter::empty::<&Task>(),
        ScaleConfig::default(),
        &DurationSpec::new(7, TimeUnit::Day),
    )
    .expect("fit");
    assert!(bounds.is_none());
}
