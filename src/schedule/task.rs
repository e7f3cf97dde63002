use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::core::{Instant, TimeUnit, add, diff, parse_duration, parse_instant};
use crate::error::{TimelineError, TimelineResult};

/// Longest span a task may cover, in years.
pub const MAX_TASK_YEARS: f64 = 10.0;

/// Raw task as supplied by the storage layer, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// Composite duration (`"2w 3d"`), used when `end` is absent.
    #[serde(default)]
    pub duration: Option<String>,
    /// Progress from 0 to 100.
    #[serde(default)]
    pub progress: f64,
    /// Either a list of ids or a comma-separated string.
    #[serde(default, deserialize_with = "dependency_list::deserialize")]
    pub dependencies: Vec<String>,
}

impl TaskRecord {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }
}

/// Validated task occupying the half-open interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start: Instant,
    pub end: Instant,
    pub progress: f64,
    pub dependencies: Vec<String>,
}

impl Task {
    #[must_use]
    pub fn duration_millis(&self) -> i64 {
        self.end.millis_since(self.start)
    }

    /// Validates a record.
    ///
    /// The end comes from `end`, or from `start` plus `duration` applied token
    /// by token. A date-only `end` (exactly midnight) includes that whole day,
    /// so 24 hours are added to it.
    pub fn from_record(record: &TaskRecord) -> TimelineResult<Self> {
        let task_id = record.id.clone();

        let start = match non_blank(record.start.as_deref()) {
            Some(start) => parse_instant(start)?,
            None => return Err(TimelineError::MissingStart { task_id }),
        };

        let end_text = non_blank(record.end.as_deref());
        let duration_text = non_blank(record.duration.as_deref());
        let mut end = match (end_text, duration_text) {
            (Some(end), _) => parse_instant(end)?,
            (None, Some(duration)) => duration
                .split_whitespace()
                .try_fold(start, |at, token| parse_duration(token).apply_to(at))?,
            (None, None) => return Err(TimelineError::MissingEnd { task_id }),
        };

        if end < start {
            return Err(TimelineError::EndBeforeStart { task_id });
        }

        let years = diff(end, start, TimeUnit::Year);
        if years > MAX_TASK_YEARS {
            return Err(TimelineError::DurationTooLong { task_id, years });
        }

        if non_blank(record.end.as_deref()).is_some() && end.to_calendar().is_midnight() {
            end = add(end, 24, TimeUnit::Hour)?;
        }

        Ok(Self {
            id: task_id,
            name: record.name.clone(),
            start,
            end,
            progress: record.progress.clamp(0.0, 100.0),
            dependencies: record.dependencies.clone(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A record that failed validation, kept for reporting.
#[derive(Debug)]
pub struct RejectedTask {
    pub index: usize,
    pub task_id: String,
    pub error: TimelineError,
}

/// Outcome of loading a batch of records: one bad record never blocks the rest.
#[derive(Debug, Default)]
pub struct TaskLoadReport {
    pub tasks: IndexMap<String, Task>,
    pub rejected: Vec<RejectedTask>,
}

impl TaskLoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub fn load_tasks<I>(records: I) -> TaskLoadReport
where
    I: IntoIterator<Item = TaskRecord>,
{
    let mut report = TaskLoadReport::default();

    for (index, record) in records.into_iter().enumerate() {
        let outcome = if record.id.trim().is_empty() {
            Err(TimelineError::InvalidData("task id must not be empty".to_owned()))
        } else if report.tasks.contains_key(&record.id) {
            Err(TimelineError::InvalidData(format!(
                "duplicate task id `{}`",
                record.id
            )))
        } else {
            Task::from_record(&record)
        };

        match outcome {
            Ok(task) => {
                report.tasks.insert(task.id.clone(), task);
            }
            Err(error) => {
                warn!(index, task_id = %record.id, error = %error, "skipping invalid task");
                report.rejected.push(RejectedTask {
                    index,
                    task_id: record.id,
                    error,
                });
            }
        }
    }

    debug!(
        loaded = report.tasks.len(),
        rejected = report.rejected.len(),
        "loaded task records"
    );
    report
}

/// Parses a JSON array of records and loads it.
pub fn load_tasks_json(json: &str) -> TimelineResult<TaskLoadReport> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    Ok(load_tasks(records))
}

mod dependency_list {
    use super::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Csv(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ids = match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::List(ids)) => ids,
            Some(Raw::Csv(csv)) => csv.split(',').map(str::to_owned).collect(),
            None => Vec::new(),
        };
        Ok(ids
            .into_iter()
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .collect())
    }
}
