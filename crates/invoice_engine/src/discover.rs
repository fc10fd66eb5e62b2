use invoice_core::{select_candidates, CandidateRecord, DateConfig, Watermark};

use crate::{selectors, Browser, HarvestError, SessionSettings};

/// Load the invoice list route and wait for the row container.
///
/// Retryable from the download loop's perspective (the caller may invoke
/// it again before each record); never retried internally.
pub async fn navigate_to_list_view(
    browser: &dyn Browser,
    settings: &SessionSettings,
) -> Result<(), HarvestError> {
    let list = settings
        .route(selectors::LIST_ROUTE)
        .map_err(|err| HarvestError::Navigation(err.to_string()))?;
    browser
        .open(list.as_str())
        .await
        .map_err(|err| HarvestError::Navigation(err.to_string()))?;
    browser
        .wait_for_selector(selectors::ROW_CONTAINER, settings.wait_timeout)
        .await
        .map_err(|err| HarvestError::Navigation(err.to_string()))
}

/// Enumerate the rows of the current list view and keep those issued
/// strictly after the watermark, in on-page order.
///
/// A date label that does not parse fails the whole call; the caller sees
/// either the complete candidate set or an error.
pub async fn discover_candidates(
    browser: &dyn Browser,
    watermark: &Watermark,
    config: &DateConfig,
) -> Result<Vec<CandidateRecord>, HarvestError> {
    let rows = browser
        .count(selectors::ROW)
        .await
        .map_err(|err| HarvestError::Navigation(err.to_string()))?;

    let mut labels = Vec::with_capacity(rows);
    for index in 1..=rows {
        let cell = selectors::row_date_cell(index);
        let label = browser
            .extract_text(&cell)
            .await
            .map_err(|err| HarvestError::Navigation(err.to_string()))?;
        labels.push(label);
    }

    let candidates = select_candidates(&labels, watermark, config)?;
    log::info!(
        "{} of {} invoice rows lie after the watermark",
        candidates.len(),
        rows
    );
    Ok(candidates)
}
