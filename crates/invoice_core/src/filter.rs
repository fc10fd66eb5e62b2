use crate::{parse_issue_date, CandidateRecord, DateConfig, DateParseError, Watermark};

/// Select the rows whose issue date lies strictly after the watermark.
///
/// `labels` holds one displayed date label per list row, in on-page order;
/// the returned records keep that order and carry 1-based row indices. A
/// single unparsable label fails the whole call: discovery either sees the
/// complete list or nothing.
pub fn select_candidates(
    labels: &[String],
    watermark: &Watermark,
    config: &DateConfig,
) -> Result<Vec<CandidateRecord>, DateParseError> {
    let mut selected = Vec::new();
    for (position, label) in labels.iter().enumerate() {
        let issue_date = parse_issue_date(label, config)?;
        if watermark.selects(issue_date) {
            selected.push(CandidateRecord {
                issue_date,
                row_index: position + 1,
                raw_label: label.clone(),
            });
        }
    }
    Ok(selected)
}
