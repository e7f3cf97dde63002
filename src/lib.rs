//! gantt-rs: calendar-aware temporal core for timeline and Gantt widgets.
//!
//! The crate turns date and duration input into exact UTC instants, performs
//! calendar arithmetic on them, maps them to pixels under a variable-scale
//! viewport and renders them back to strings. Drawing and raw event capture
//! stay with the host toolkit.

pub mod api;
pub mod core;
pub mod error;
pub mod format;
pub mod interaction;
pub mod schedule;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use crate::core::{
    CalendarDateTime, DurationSpec, Instant, TimeUnit, add, diff, floor, parse_duration,
    parse_instant,
};
pub use error::{TimelineError, TimelineResult};
pub use format::{format, format_datetime, format_duration};
