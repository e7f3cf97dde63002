use criterion::{Criterion, criterion_group, criterion_main};
use gantt_rs::api::{DragKind, TimelineConfig, TimelineEngine};
use gantt_rs::core::{
    CalendarDateTime, Instant, ScaleConfig, TimeUnit, Viewport, add, diff, parse_duration,
    parse_instant,
};
use gantt_rs::format::format;
use gantt_rs::schedule::TaskRecord;
use std::hint::black_box;

fn anchor() -> Instant {
    CalendarDateTime::new(2024, 1, 31, 9, 30, 0, 0)
        .to_instant()
        .expect("valid anchor")
}

fn bench_calendar_add_and_diff(c: &mut Criterion) {
    let start = anchor();

    c.bench_function("calendar_add_month_then_diff", |b| {
        b.iter(|| {
            let end = add(black_box(start), black_box(7), TimeUnit::Month).expect("add month");
            let _ = diff(end, start, TimeUnit::Day);
        })
    });
}

fn bench_parse_and_format(c: &mut Criterion) {
    c.bench_function("parse_instant_compact", |b| {
        b.iter(|| parse_instant(black_box("2024-03-05 09:07:03.045")).expect("parse"))
    });

    c.bench_function("parse_duration_composite", |b| {
        b.iter(|| parse_duration(black_box("1y 2mo 3d 4h")))
    });

    let at = anchor();
    c.bench_function("format_template_localized", |b| {
        b.iter(|| format(black_box(at), "D MMMM YYYY HH:mm", "fr"))
    });
}

fn bench_viewport_round_trip(c: &mut Criterion) {
    let viewport = Viewport::new(anchor(), ScaleConfig::new(120.0, 1, TimeUnit::Month));
    let target = add(anchor(), 400, TimeUnit::Day).expect("target");

    c.bench_function("viewport_round_trip", |b| {
        b.iter(|| {
            let x = viewport.date_to_x(black_box(target));
            let _ = viewport.x_to_date(x).expect("x to date");
        })
    });
}

fn bench_cascade_drag_1k(c: &mut Criterion) {
    let records: Vec<TaskRecord> = (0..1_000)
        .map(|i| {
            let record = TaskRecord::new(format!("t{i}"))
                .with_start(format!("2024-01-01 {:02}:00", i % 24))
                .with_duration("1d");
            if i == 0 {
                record
            } else {
                record.with_dependencies([format!("t{}", i - 1)])
            }
        })
        .collect();

    c.bench_function("cascade_drag_1k", |b| {
        b.iter_batched(
            || {
                let mut engine = TimelineEngine::new(TimelineConfig::default());
                engine.load_tasks(records.clone());
                engine
            },
            |mut engine| {
                engine
                    .begin_drag("t0", DragKind::Move, 0.0, 0.0)
                    .expect("begin drag");
                engine.end_drag(black_box(90.0), 0.0).expect("end drag")
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_calendar_add_and_diff,
    bench_parse_and_format,
    bench_viewport_round_trip,
    bench_cascade_drag_1k
);
criterion_main!(benches);
