use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Instant, ScaleConfig, Viewport};
use crate::error::{TimelineError, TimelineResult};
use crate::format::format_with_locale;
use crate::interaction::DragGesture;
use crate::schedule::{
    DependencyGraph, Task, TaskLoadReport, TaskRecord, TimelineBounds, ViewMode,
    WorkingCalendar, load_tasks,
};

use super::drag_controller::ActiveDrag;
use super::validation::{ResolvedTimelineConfig, resolve_config};
use super::TimelineConfig;

/// Horizontal placement of a task bar, in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskBar {
    pub x: f64,
    pub width: f64,
}

/// Main orchestration facade consumed by the rendering layer.
///
/// Owns the viewport, the validated tasks and their dependency graph; every
/// temporal computation goes through the `core` and `schedule` modules.
#[derive(Debug)]
pub struct TimelineEngine {
    pub(super) config: TimelineConfig,
    pub(super) resolved: ResolvedTimelineConfig,
    pub(super) viewport: Viewport,
    pub(super) bounds: Option<TimelineBounds>,
    pub(super) tasks: IndexMap<String, Task>,
    pub(super) graph: DependencyGraph,
    pub(super) calendar: WorkingCalendar,
    pub(super) gesture: DragGesture,
    pub(super) active_drag: Option<ActiveDrag>,
}

impl TimelineEngine {
    #[must_use]
    pub fn new(config: TimelineConfig) -> Self {
        let resolved = resolve_config(&config);
        let calendar = WorkingCalendar::from_entries(&config.ignore);
        Self {
            viewport: Viewport::new(Instant::now(), resolved.scale),
            gesture: DragGesture::new(resolved.drag_threshold_px),
            bounds: None,
            tasks: IndexMap::new(),
            graph: DependencyGraph::new(),
            active_drag: None,
            calendar,
            resolved,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn resolved_config(&self) -> &ResolvedTimelineConfig {
        &self.resolved
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn scale(&self) -> ScaleConfig {
        self.viewport.scale()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<TimelineBounds> {
        self.bounds
    }

    #[must_use]
    pub fn tasks(&self) -> &IndexMap<String, Task> {
        &self.tasks
    }

    pub fn task(&self, task_id: &str) -> TimelineResult<&Task> {
        self.tasks
            .get(task_id)
            .ok_or_else(|| TimelineError::UnknownTask(task_id.to_owned()))
    }

    #[must_use]
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.graph
    }

    #[must_use]
    pub fn working_calendar(&self) -> &WorkingCalendar {
        &self.calendar
    }

    /// Adds a host-supplied non-working-day predicate.
    pub fn ignore_when<F>(&mut self, predicate: F)
    where
        F: Fn(Instant) -> bool + Send + Sync + 'static,
    {
        self.calendar.ignore_when(predicate);
    }

    /// Replaces all tasks. Invalid records are skipped and reported.
    pub fn load_tasks<I>(&mut self, records: I) -> TaskLoadReport
    where
        I: IntoIterator<Item = TaskRecord>,
    {
        let report = load_tasks(records);
        self.tasks = report.tasks.clone();
        self.rebuild_graph();
        self.refit();
        report
    }

    /// Switches zoom level, keeping all config overrides.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        debug!(?view_mode, "set view mode");
        self.config.view_mode = view_mode;
        self.resolved = resolve_config(&self.config);
        self.viewport.set_scale_config(self.resolved.scale);
        self.gesture = DragGesture::new(self.resolved.drag_threshold_px);
        self.active_drag = None;
        self.refit();
    }

    #[must_use]
    pub fn date_to_x(&self, instant: Instant) -> f64 {
        self.viewport.date_to_x(instant)
    }

    pub fn x_to_date(&self, x: f64) -> TimelineResult<Instant> {
        self.viewport.x_to_date(x)
    }

    pub fn task_bar(&self, task_id: &str) -> TimelineResult<TaskBar> {
        let task = self.task(task_id)?;
        Ok(TaskBar {
            x: self.viewport.date_to_x(task.start),
            width: self.viewport.range_to_pixels(task.start, task.end),
        })
    }

    /// Non-ignored days covered by a task.
    pub fn working_days(&self, task_id: &str) -> TimelineResult<usize> {
        let task = self.task(task_id)?;
        Ok(self.calendar.working_days(task.start, task.end))
    }

    /// Renders `instant` with the view mode's date template.
    #[must_use]
    pub fn format_date(&self, instant: Instant) -> String {
        format_with_locale(instant, self.resolved.date_format, self.resolved.locale)
    }

    /// Header label of the column starting at `instant`.
    #[must_use]
    pub fn column_label(&self, instant: Instant) -> String {
        format_with_locale(instant, self.resolved.column_label, self.resolved.locale)
    }

    fn rebuild_graph(&mut self) {
        let mut graph = DependencyGraph::new();
        for task in self.tasks.values() {
            graph.set_dependencies(task.id.as_str(), task.dependencies.iter().map(String::as_str));
        }
        self.graph = graph;
    }

    pub(super) fn refit(&mut self) {
        let fitted = TimelineBounds::fit(
            self.tasks.values(),
            self.resolved.scale,
            &self.resolved.padding,
        );
        match fitted {
            Ok(Some(bounds)) => {
                self.viewport.set_origin(bounds.start);
                self.bounds = Some(bounds);
            }
            Ok(None) => self.bounds = None,
            Err(err) => {
                warn!(error = %err, "cannot fit timeline bounds, keeping previous origin");
            }
        }
    }
}
