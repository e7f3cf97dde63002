//! Timeline use cases built on the calendar core: snapping, dependency
//! cascades, task validation, working days and grid bounds.

pub mod bounds;
pub mod dependencies;
pub mod snap;
pub mod task;
pub mod view_mode;
pub mod working_calendar;

pub use bounds::TimelineBounds;
pub use dependencies::DependencyGraph;
pub use snap::{snap_pixel_delta, snap_width_px};
pub use task::{RejectedTask, Task, TaskLoadReport, TaskRecord, load_tasks, load_tasks_json};
pub use view_mode::{ViewMode, ViewModePreset};
pub use working_calendar::{IgnorePredicate, IgnoreRule, WorkingCalendar};
