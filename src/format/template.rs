use chrono::Locale;

use crate::core::Instant;

use super::locale::{month_name, month_name_short, resolve_locale};

/// Template tokens, longest first so `D` never matches inside `DD`.
const TOKENS: [&str; 10] = [
    "YYYY", "MMMM", "MMM", "SSS", "MM", "DD", "HH", "mm", "ss", "D",
];

pub const DATE_TEMPLATE: &str = "YYYY-MM-DD";
pub const DATE_TIME_TEMPLATE: &str = "YYYY-MM-DD HH:mm:ss.SSS";

/// Renders `instant` (UTC) through a token template.
///
/// | token | value |
/// |-------|-------|
/// | `YYYY` | four-digit year, `-` prefixed before year 1 (`-0005`) |
/// | `MMMM` / `MMM` | full / abbreviated month name in `language` |
/// | `MM` | zero-padded month |
/// | `DD` / `D` | zero-padded / plain day of month |
/// | `HH`, `mm`, `ss` | zero-padded hour, minute, second |
/// | `SSS` | zero-padded milliseconds |
///
/// Text inside square brackets is copied without the brackets and never
/// read as tokens (`[Day] D` renders `Day 5`). Everything else outside a
/// token is copied verbatim.
#[must_use]
pub fn format(instant: Instant, template: &str, language: &str) -> String {
    format_with_locale(instant, template, resolve_locale(language))
}

#[must_use]
pub fn format_with_locale(instant: Instant, template: &str, locale: Locale) -> String {
    let fields = instant.to_calendar();
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while !rest.is_empty() {
        if let Some((literal, after)) = bracket_literal(rest) {
            out.push_str(literal);
            rest = after;
            continue;
        }
        match TOKENS.iter().find(|token| rest.starts_with(**token)) {
            Some(token) => {
                match *token {
                    "YYYY" => out.push_str(&format_year(fields.year)),
                    "MMMM" => out.push_str(&month_name(instant, locale)),
                    "MMM" => out.push_str(&month_name_short(instant, locale)),
                    "SSS" => out.push_str(&format!("{:03}", fields.millisecond)),
                    "MM" => out.push_str(&format!("{:02}", fields.month)),
                    "DD" => out.push_str(&format!("{:02}", fields.day)),
                    "HH" => out.push_str(&format!("{:02}", fields.hour)),
                    "mm" => out.push_str(&format!("{:02}", fields.minute)),
                    "ss" => out.push_str(&format!("{:02}", fields.second)),
                    _ => out.push_str(&fields.day.to_string()),
                }
                rest = &rest[token.len()..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(ch) = chars.next() {
                    out.push(ch);
                }
                rest = chars.as_str();
            }
        }
    }

    out
}

/// Splits `[literal]` off the front of `rest`. An unclosed `[` is not a
/// literal.
fn bracket_literal(rest: &str) -> Option<(&str, &str)> {
    let body = rest.strip_prefix('[')?;
    let close = body.find(']')?;
    Some((&body[..close], &body[close + 1..]))
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

/// Canonical `YYYY-MM-DD`, optionally followed by `HH:mm:ss.SSS`.
#[must_use]
pub fn to_date_string(instant: Instant, with_time: bool) -> String {
    let template = if with_time {
        DATE_TIME_TEMPLATE
    } else {
        DATE_TEMPLATE
    };
    format_with_locale(instant, template, Locale::en_US)
}
