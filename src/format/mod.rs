//! String rendering for instants and durations.

pub mod humanize;
pub mod locale;
pub mod template;

pub use humanize::{
    DatetimeFormatOptions, DurationFormatOptions, DurationParts, format_datetime,
    format_duration, format_millis,
};
pub use locale::{month_name, month_name_short, resolve_locale};
pub use template::{format, format_with_locale, to_date_string};
