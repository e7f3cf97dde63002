use chrono::Locale;
use tracing::debug;

use crate::core::Instant;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Resolves a language tag (`en`, `fr-FR`, `de_de`) to a chrono locale.
///
/// Bare languages pick their most common region. Unknown tags fall back to
/// `en_US`.
#[must_use]
pub fn resolve_locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    let mut parts = normalized.split('_');
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    let region = parts.next().map(str::to_ascii_uppercase);

    let candidates = match region {
        Some(region) => vec![format!("{language}_{region}"), default_region(&language)],
        None => vec![default_region(&language)],
    };

    candidates
        .iter()
        .find_map(|candidate| Locale::try_from(candidate.as_str()).ok())
        .unwrap_or_else(|| {
            debug!(tag, "unknown locale tag, using en_US month names");
            Locale::en_US
        })
}

fn default_region(language: &str) -> String {
    let region = match language {
        "en" => "US",
        "zh" => "CN",
        "ja" => "JP",
        "ko" => "KR",
        "pt" => "BR",
        "sv" => "SE",
        "da" => "DK",
        "uk" => "UA",
        "el" => "GR",
        "cs" => "CZ",
        "nb" | "no" => return "nb_NO".to_owned(),
        other => return format!("{other}_{}", other.to_ascii_uppercase()),
    };
    format!("{language}_{region}")
}

/// Full month name with its first letter upper-cased (`January`, `Janvier`).
#[must_use]
pub fn month_name(instant: Instant, locale: Locale) -> String {
    let name = instant
        .as_datetime()
        .format_localized("%B", locale)
        .to_string();
    capitalize_first(&name)
}

/// Abbreviated month name, first letter capitalized (`Jan`, `Janv.`).
#[must_use]
pub fn month_name_short(instant: Instant, locale: Locale) -> String {
    let name = instant
        .as_datetime()
        .format_localized("%b", locale)
        .to_string();
    capitalize_first(&name)
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
