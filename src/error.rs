use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid instant `{input}`: {reason}")]
    InvalidInstant { input: String, reason: String },

    #[error("instant arithmetic out of range: {0}")]
    OutOfRange(String),

    #[error("task `{task_id}` has no start date")]
    MissingStart { task_id: String },

    #[error("task `{task_id}` has no end date or duration")]
    MissingEnd { task_id: String },

    #[error("task `{task_id}` ends before it starts")]
    EndBeforeStart { task_id: String },

    #[error("task `{task_id}` spans {years} years, above the ten year limit")]
    DurationTooLong { task_id: String, years: f64 },

    #[error("unknown task `{0}`")]
    UnknownTask(String),

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl TimelineError {
    pub(crate) fn invalid_instant(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInstant {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
