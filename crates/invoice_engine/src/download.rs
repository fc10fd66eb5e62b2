use std::path::{Path, PathBuf};
use std::time::Duration;

use invoice_core::{document_filename, CandidateRecord, RunResult};
use tokio::time::Instant;

use crate::discover::navigate_to_list_view;
use crate::{selectors, Browser, FileStore, HarvestError, HarvestParams, Reporter, SessionSettings};

/// Bounded download polling: a fixed interval and an explicit deadline.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            deadline: Duration::from_secs(120),
        }
    }
}

/// Materialize each candidate as a locally stored, date-named file.
///
/// Records are processed strictly in discovered order. Any error while
/// approaching, opening or downloading one record is logged and the loop
/// moves on; a failed record never aborts the batch. The progress handle
/// is advanced exactly once per record, success or failure.
pub async fn download_all(
    browser: &dyn Browser,
    store: &dyn FileStore,
    reporter: &dyn Reporter,
    candidates: &[CandidateRecord],
    params: &HarvestParams,
) -> RunResult {
    let total = candidates.len();
    let mut progress = reporter.progress(total);
    let mut downloaded = 0usize;

    for (position, record) in candidates.iter().enumerate() {
        match process_record(browser, store, position, record, params).await {
            Ok(stored) => {
                downloaded += 1;
                reporter.success(&format!("invoice dated {} downloaded", record.raw_label));
                reporter.print_path(&stored);
            }
            Err(err) => {
                reporter.warn(&format!("invoice row {} skipped: {err}", record.row_index));
            }
        }
        progress.tick();
    }

    RunResult {
        total_candidates: total,
        downloaded_count: downloaded,
    }
}

async fn process_record(
    browser: &dyn Browser,
    store: &dyn FileStore,
    position: usize,
    record: &CandidateRecord,
    params: &HarvestParams,
) -> Result<PathBuf, HarvestError> {
    // Opening a detail view leaves the list, and row locators are
    // position-based: every record after the first must be approached from
    // a freshly restored list view.
    if position > 0 {
        navigate_to_list_view(browser, &params.session).await?;
    }
    open_record(browser, &params.session, record).await?;
    download_document(browser, store, record, params).await
}

/// Click the record's action control and wait for the detail surface.
pub async fn open_record(
    browser: &dyn Browser,
    settings: &SessionSettings,
    record: &CandidateRecord,
) -> Result<(), HarvestError> {
    let open_err = |err: crate::BrowserError| HarvestError::Open {
        index: record.row_index,
        message: err.to_string(),
    };
    let open_link = selectors::row_open_link(record.row_index);
    browser.click(&open_link).await.map_err(open_err)?;
    browser
        .wait_for_selector(selectors::DETAIL_SURFACE, settings.wait_timeout)
        .await
        .map_err(open_err)
}

/// Trigger the document download, wait for the file, rename it to its
/// date-derived name. Returns the stored path.
pub async fn download_document(
    browser: &dyn Browser,
    store: &dyn FileStore,
    record: &CandidateRecord,
    params: &HarvestParams,
) -> Result<PathBuf, HarvestError> {
    let download_err = |err: crate::BrowserError| HarvestError::Download {
        index: record.row_index,
        message: err.to_string(),
    };
    browser
        .set_download_dir(&params.output_dir)
        .await
        .map_err(download_err)?;
    browser
        .click(selectors::DOWNLOAD_TRIGGER)
        .await
        .map_err(download_err)?;

    let source = params.output_dir.join(selectors::SOURCE_FILENAME);
    wait_for_file(store, &source, &params.poll, record.row_index).await?;

    let target = params
        .output_dir
        .join(document_filename(record.issue_date, &params.date_config));
    store
        .rename(&source, &target)
        .map_err(|err| HarvestError::Download {
            index: record.row_index,
            message: err.to_string(),
        })?;
    log::debug!("renamed {} -> {}", source.display(), target.display());
    Ok(target)
}

async fn wait_for_file(
    store: &dyn FileStore,
    path: &Path,
    poll: &PollSettings,
    index: usize,
) -> Result<(), HarvestError> {
    let deadline = Instant::now() + poll.deadline;
    loop {
        if store.exists(path) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(HarvestError::DownloadTimeout {
                index,
                waited: poll.deadline,
            });
        }
        tokio::time::sleep(poll.interval).await;
    }
}
