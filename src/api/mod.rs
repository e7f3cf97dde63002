//! Engine facade wiring configuration, viewport, tasks and drag gestures.

mod drag_controller;
mod engine;
mod engine_config;
mod validation;

pub use drag_controller::{DragCommit, DragKind};
pub use engine::{TaskBar, TimelineEngine};
pub use engine_config::TimelineConfig;
pub use validation::ResolvedTimelineConfig;
