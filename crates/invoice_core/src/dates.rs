use chrono::NaiveDate;
use pure_rust_locales::{locale_match, Locale};
use thiserror::Error;

/// How displayed issue dates are read and how output filenames are derived.
///
/// Both patterns are chrono strftime patterns. `locale` applies to parsing
/// only: month names in row labels are translated to English before the
/// pattern is applied, since chrono's parser accepts English names only.
#[derive(Debug, Clone)]
pub struct DateConfig {
    pub input_format: String,
    pub output_format: String,
    pub extension: String,
    pub locale: Locale,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            input_format: "%d.%m.%Y".to_string(),
            output_format: "%d-%m-%y".to_string(),
            extension: "pdf".to_string(),
            locale: Locale::POSIX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("date label '{label}' does not match format '{format}': {message}")]
pub struct DateParseError {
    pub label: String,
    pub format: String,
    pub message: String,
}

/// Parse one displayed date label into an issue date.
pub fn parse_issue_date(label: &str, config: &DateConfig) -> Result<NaiveDate, DateParseError> {
    let trimmed = label.trim();
    let normalized = if wants_month_names(&config.input_format) {
        translate_month_names(trimmed, config.locale)
    } else {
        trimmed.to_string()
    };
    NaiveDate::parse_from_str(&normalized, &config.input_format).map_err(|err| DateParseError {
        label: label.to_string(),
        format: config.input_format.clone(),
        message: err.to_string(),
    })
}

fn wants_month_names(format: &str) -> bool {
    format.contains("%B") || format.contains("%b") || format.contains("%h")
}

/// Replace a localized month name in `label` with its English equivalent.
///
/// Works word-by-word; anything that is not a month name in the configured
/// locale passes through unchanged. The POSIX tables carry the English names.
fn translate_month_names(label: &str, locale: Locale) -> String {
    let full = locale_match!(locale => LC_TIME::MON);
    let abbreviated = locale_match!(locale => LC_TIME::ABMON);
    let english_full = locale_match!(Locale::POSIX => LC_TIME::MON);
    let english_abbreviated = locale_match!(Locale::POSIX => LC_TIME::ABMON);

    let translate = |word: &str| -> Option<&str> {
        let lowered = word.to_lowercase();
        if let Some(month) = full.iter().position(|name| name.to_lowercase() == lowered) {
            return Some(english_full[month]);
        }
        if let Some(month) = abbreviated
            .iter()
            .position(|name| name.to_lowercase() == lowered)
        {
            return Some(english_abbreviated[month]);
        }
        None
    };

    label
        .split_whitespace()
        .map(|word| translate(word).unwrap_or(word).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
