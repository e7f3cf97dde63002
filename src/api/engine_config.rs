use serde::{Deserialize, Serialize};

use crate::error::TimelineResult;
use crate::interaction::DEFAULT_DRAG_THRESHOLD_PX;
use crate::schedule::ViewMode;

/// Public timeline configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup. Every field is optional in JSON; omitted fields take the defaults
/// and overrides left at `None` fall back to the view-mode preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub view_mode: ViewMode,
    /// Column width override in pixels.
    pub column_width: Option<f64>,
    /// Step override as a compact duration (`"1d"`, `"6h"`, `"1m"` = one month).
    pub step: Option<String>,
    /// Snap override as a compact duration, or `"unit"` for whole columns.
    pub snap_at: Option<String>,
    /// Padding override applied on both sides of the task range.
    pub padding: Option<String>,
    /// Language tag for month names (`"en"`, `"fr-FR"`).
    pub language: String,
    /// Non-working days: `"weekend"` and/or dates.
    pub ignore: Vec<String>,
    /// Moving a task also moves every task depending on it.
    pub move_dependencies: bool,
    pub drag_threshold_px: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            column_width: None,
            step: None,
            snap_at: None,
            padding: None,
            language: crate::format::locale::DEFAULT_LANGUAGE.to_owned(),
            ignore: Vec::new(),
            move_dependencies: true,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> TimelineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn with_column_width(mut self, column_width: f64) -> Self {
        self.column_width = Some(column_width);
        self
    }

    #[must_use]
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }

    #[must_use]
    pub fn with_snap_at(mut self, snap_at: impl Into<String>) -> Self {
        self.snap_at = Some(snap_at.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub fn with_ignore<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = entries.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_move_dependencies(mut self, enabled: bool) -> Self {
        self.move_dependencies = enabled;
        self
    }
}
