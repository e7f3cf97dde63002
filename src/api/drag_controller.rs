use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::Instant;
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{DragOutcome, DragPhase};
use crate::schedule::snap_pixel_delta;

use super::TimelineEngine;

/// Which part of a task bar the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ActiveDrag {
    task_id: String,
    kind: DragKind,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DragCommit {
    /// Pointer released without passing the drag threshold.
    Click { task_id: String },
    /// Snapped delta was zero; nothing moved.
    Unchanged { task_id: String },
    /// Tasks whose dates changed, in cascade order, and the applied delta.
    Moved { task_ids: Vec<String>, dx: f64 },
}

impl TimelineEngine {
    pub fn begin_drag(
        &mut self,
        task_id: &str,
        kind: DragKind,
        x: f64,
        y: f64,
    ) -> TimelineResult<()> {
        self.task(task_id)?;
        self.gesture.pointer_down(x, y);
        self.active_drag = Some(ActiveDrag {
            task_id: task_id.to_owned(),
            kind,
        });
        trace!(task_id, ?kind, x, "drag start");
        Ok(())
    }

    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.gesture.phase()
    }

    /// Feeds a pointer move and returns the snapped preview delta once the
    /// gesture is a drag.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<f64> {
        self.active_drag.as_ref()?;
        let raw = self.gesture.pointer_move(x, y)?;
        let snapped = self.snap_delta(raw);
        trace!(raw, snapped, "drag move");
        Some(snapped)
    }

    pub fn cancel_drag(&mut self) {
        self.gesture.cancel();
        self.active_drag = None;
    }

    /// Releases the pointer and applies the snapped delta.
    ///
    /// Moves shift both edges of the task and, when `move_dependencies` is
    /// on, of every transitive dependent. Resizes shift one edge of the
    /// grabbed task only and fail when the bar would end before it starts.
    /// Either every affected task changes or none does.
    pub fn end_drag(&mut self, x: f64, y: f64) -> TimelineResult<DragCommit> {
        let drag = self
            .active_drag
            .take()
            .ok_or_else(|| TimelineError::InvalidData("no drag in progress".to_owned()))?;
        let outcome = self
            .gesture
            .pointer_up(x, y)
            .ok_or_else(|| TimelineError::InvalidData("no drag in progress".to_owned()))?;

        let raw = match outcome {
            DragOutcome::Click => return Ok(DragCommit::Click { task_id: drag.task_id }),
            DragOutcome::Commit { dx } => dx,
        };
        let dx = self.snap_delta(raw);
        if dx == 0.0 {
            return Ok(DragCommit::Unchanged { task_id: drag.task_id });
        }

        let shift_millis = self
            .viewport
            .pixels_to_duration(dx)?
            .fixed_millis()
            .unwrap_or_default();

        let targets: Vec<String> = match drag.kind {
            DragKind::Move => self
                .graph
                .affected_task_ids(&drag.task_id, self.config.move_dependencies)
                .into_iter()
                .filter(|id| self.tasks.contains_key(id))
                .collect(),
            DragKind::ResizeStart | DragKind::ResizeEnd => vec![drag.task_id.clone()],
        };

        let mut updates: Vec<(String, Instant, Instant)> = Vec::with_capacity(targets.len());
        for id in &targets {
            let task = self.task(id)?;
            let (start, end) = match drag.kind {
                DragKind::Move => (
                    task.start.checked_add_millis(shift_millis)?,
                    task.end.checked_add_millis(shift_millis)?,
                ),
                DragKind::ResizeStart => (task.start.checked_add_millis(shift_millis)?, task.end),
                DragKind::ResizeEnd => (task.start, task.end.checked_add_millis(shift_millis)?),
            };
            if end <= start {
                return Err(TimelineError::InvalidRange(format!(
                    "task `{id}` would end at {end}, not after its start {start}"
                )));
            }
            updates.push((id.clone(), start, end));
        }

        for (id, start, end) in updates {
            if let Some(task) = self.tasks.get_mut(&id) {
                task.start = start;
                task.end = end;
            }
        }

        debug!(
            task_id = %drag.task_id,
            kind = ?drag.kind,
            dx,
            moved = targets.len(),
            "drag committed"
        );
        Ok(DragCommit::Moved { task_ids: targets, dx })
    }

    fn snap_delta(&self, raw: f64) -> f64 {
        snap_pixel_delta(raw, &self.viewport.scale(), self.resolved.snap_at.as_ref())
    }
}
