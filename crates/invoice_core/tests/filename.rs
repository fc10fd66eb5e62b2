use chrono::NaiveDate;
use invoice_core::{document_filename, DateConfig};
use pretty_assertions::assert_eq;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn derived_name_is_the_formatted_issue_date_plus_extension() {
    let config = DateConfig::default();
    assert_eq!(document_filename(date(2024, 3, 5), &config), "05-03-24.pdf");
}

#[test]
fn pattern_and_extension_come_from_the_config() {
    let config = DateConfig {
        output_format: "%Y%m%d".to_string(),
        extension: "PDF".to_string(),
        ..DateConfig::default()
    };
    assert_eq!(document_filename(date(2024, 3, 5), &config), "20240305.PDF");
}

#[test]
fn same_date_always_yields_the_same_name() {
    let config = DateConfig::default();
    let first = document_filename(date(2023, 12, 31), &config);
    let second = document_filename(date(2023, 12, 31), &config);
    assert_eq!(first, second);
    assert_eq!(first, "31-12-23.pdf");
}
