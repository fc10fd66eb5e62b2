use chrono::NaiveDate;

use crate::DateConfig;

/// Canonical on-disk name for a document issued on `issue_date`: the date
/// rendered with the configured output pattern, plus the configured
/// extension. Deterministic for a given date and config.
pub fn document_filename(issue_date: NaiveDate, config: &DateConfig) -> String {
    format!(
        "{}.{}",
        issue_date.format(&config.output_format),
        config.extension
    )
}
