use serde::{Deserialize, Serialize};

use crate::core::{DurationSpec, TimeUnit};

/// Built-in zoom levels of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    Hour,
    QuarterDay,
    HalfDay,
    #[default]
    Day,
    Week,
    Month,
    Year,
}

/// Grid parameters of a [`ViewMode`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModePreset {
    /// Added before the earliest and after the latest task.
    pub padding: DurationSpec,
    /// Time covered by one column.
    pub step: DurationSpec,
    pub column_width: f64,
    /// Template for dates shown in this mode (popups, tooltips).
    pub date_format: &'static str,
    /// Template for the per-column header label.
    pub column_label: &'static str,
    /// Snap increment for drags; `None` snaps to whole columns.
    pub snap_at: Option<DurationSpec>,
}

impl ViewMode {
    pub const ALL: [ViewMode; 7] = [
        ViewMode::Hour,
        ViewMode::QuarterDay,
        ViewMode::HalfDay,
        ViewMode::Day,
        ViewMode::Week,
        ViewMode::Month,
        ViewMode::Year,
    ];

    #[must_use]
    pub fn preset(self) -> ViewModePreset {
        let days = |n| DurationSpec::new(n, TimeUnit::Day);
        let hours = |n| DurationSpec::new(n, TimeUnit::Hour);
        match self {
            Self::Hour => ViewModePreset {
                padding: days(7),
                step: hours(1),
                column_width: 45.0,
                date_format: "YYYY-MM-DD HH:",
                column_label: "HH",
                snap_at: None,
            },
            Self::QuarterDay => ViewModePreset {
                padding: days(7),
                step: hours(6),
                column_width: 45.0,
                date_format: "YYYY-MM-DD HH:",
                column_label: "HH",
                snap_at: None,
            },
            Self::HalfDay => ViewModePreset {
                padding: days(14),
                step: hours(12),
                column_width: 45.0,
                date_format: "YYYY-MM-DD HH:",
                column_label: "HH",
                snap_at: None,
            },
            Self::Day => ViewModePreset {
                padding: days(7),
                step: days(1),
                column_width: 45.0,
                date_format: "YYYY-MM-DD",
                column_label: "D",
                snap_at: None,
            },
            Self::Week => ViewModePreset {
                padding: DurationSpec::new(1, TimeUnit::Month),
                step: days(7),
                column_width: 140.0,
                date_format: "YYYY-MM-DD",
                column_label: "D MMM",
                snap_at: Some(days(1)),
            },
            Self::Month => ViewModePreset {
                padding: DurationSpec::new(2, TimeUnit::Month),
                step: DurationSpec::new(1, TimeUnit::Month),
                column_width: 120.0,
                date_format: "YYYY-MM",
                column_label: "MMMM",
                snap_at: Some(days(7)),
            },
            Self::Year => ViewModePreset {
                padding: DurationSpec::new(2, TimeUnit::Year),
                step: DurationSpec::new(1, TimeUnit::Year),
                column_width: 120.0,
                date_format: "YYYY",
                column_label: "YYYY",
                snap_at: Some(days(30)),
            },
        }
    }
}
