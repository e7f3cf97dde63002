use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{DurationSpec, Instant, ScaleConfig, TimeUnit, add, diff, floor};
use crate::error::TimelineResult;

use super::Task;

/// Guard against runaway column enumeration on degenerate scales.
pub const MAX_COLUMNS: usize = 100_000;

/// Overall time range drawn by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineBounds {
    pub start: Instant,
    pub end: Instant,
    pub scale: ScaleConfig,
}

impl TimelineBounds {
    /// Fits the range around `tasks`: both ends are floored to the step unit,
    /// widened by `padding`, and the start is finally floored to midnight.
    ///
    /// Returns `None` when there are no tasks.
    pub fn fit<'a, I>(
        tasks: I,
        scale: ScaleConfig,
        padding: &DurationSpec,
    ) -> TimelineResult<Option<Self>>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let scale = scale.sanitized();
        let mut range: Option<(Instant, Instant)> = None;
        for task in tasks {
            range = Some(match range {
                Some((start, end)) => (start.min(task.start), end.max(task.end)),
                None => (task.start, task.end),
            });
        }
        let Some((earliest, latest)) = range else {
            return Ok(None);
        };

        let start = padding
            .negated()
            .apply_to(floor(earliest, scale.step_unit))?;
        let end = padding.apply_to(floor(latest, scale.step_unit))?;

        Ok(Some(Self {
            start: floor(start, TimeUnit::Day),
            end,
            scale,
        }))
    }

    /// Number of step columns between `start` and `end`, rounded up.
    #[must_use]
    pub fn column_count(&self) -> usize {
        let steps =
            diff(self.end, self.start, self.scale.step_unit) / f64::from(self.scale.step_interval);
        (steps.ceil().max(0.0) as usize).min(MAX_COLUMNS)
    }

    /// Start instant of every column, stepping with calendar arithmetic so
    /// month columns stay on month boundaries.
    pub fn columns(&self) -> TimelineResult<Vec<Instant>> {
        let interval = i64::from(self.scale.step_interval);
        let mut columns = Vec::new();
        let mut at = self.start;
        while at < self.end {
            if columns.len() == MAX_COLUMNS {
                warn!(limit = MAX_COLUMNS, "column enumeration truncated");
                break;
            }
            columns.push(at);
            at = add(self.start, interval * columns.len() as i64, self.scale.step_unit)?;
        }
        Ok(columns)
    }
}
