pub mod calendar;
pub mod duration;
pub mod instant;
pub mod parse;
pub mod unit;
pub mod viewport;

pub use calendar::{add, days_in_month, days_in_year, diff, floor, is_leap_year};
pub use duration::{
    DurationComponent, DurationParseError, DurationSpec, convert_duration, parse_duration,
    try_parse_duration,
};
pub use instant::{CalendarDateTime, Instant};
pub use parse::{CompactFormat, InstantInput, parse_instant, parse_instant_with};
pub use unit::TimeUnit;
pub use viewport::{ScaleConfig, Viewport};
