use std::path::PathBuf;

use invoice_core::{Credentials, DateConfig, RunOutcome, RunResult, Watermark};

use crate::discover::{discover_candidates, navigate_to_list_view};
use crate::download::{download_all, PollSettings};
use crate::fsops::ensure_output_dir;
use crate::session::{PortalSession, SessionSettings};
use crate::{Browser, FileStore, HarvestError, Reporter};

/// Everything one harvesting run needs.
#[derive(Debug, Clone)]
pub struct HarvestParams {
    pub credentials: Credentials,
    pub watermark: Watermark,
    pub output_dir: PathBuf,
    pub date_config: DateConfig,
    pub session: SessionSettings,
    pub poll: PollSettings,
}

/// Run one full harvesting pass: authenticate, discover, download, report.
///
/// The browsing session is released on every exit path: success, login
/// failure, or an unexpected error mid-download. Only session
/// establishment is fatal; per-record failures are absorbed by the
/// download loop and show up in the counts.
pub async fn run(
    browser: Box<dyn Browser>,
    store: &dyn FileStore,
    reporter: &dyn Reporter,
    params: &HarvestParams,
) -> Result<RunResult, HarvestError> {
    let mut session = PortalSession::new(browser, params.session.clone());
    let result = harvest(&mut session, store, reporter, params).await;
    session.teardown().await;

    match &result {
        Ok(counts) => report_outcome(reporter, counts),
        Err(err) => reporter.error(&err.to_string()),
    }
    result
}

async fn harvest(
    session: &mut PortalSession,
    store: &dyn FileStore,
    reporter: &dyn Reporter,
    params: &HarvestParams,
) -> Result<RunResult, HarvestError> {
    ensure_output_dir(&params.output_dir)?;
    session.initialize().await?;
    session.authenticate(&params.credentials).await?;

    let browser = session
        .browser()
        .ok_or_else(|| HarvestError::Navigation("browsing session is gone".to_string()))?;

    navigate_to_list_view(browser, &params.session).await?;
    let candidates = discover_candidates(browser, &params.watermark, &params.date_config).await?;
    reporter.info(&format!(
        "{} invoice(s) issued after {}",
        candidates.len(),
        params.watermark.date()
    ));

    Ok(download_all(browser, store, reporter, &candidates, params).await)
}

fn report_outcome(reporter: &dyn Reporter, counts: &RunResult) {
    let message = format!(
        "{}: {} of {} new invoice(s) downloaded",
        counts.outcome(),
        counts.downloaded_count,
        counts.total_candidates
    );
    match counts.outcome() {
        RunOutcome::FullSuccess => reporter.success(&message),
        RunOutcome::NothingToDo => reporter.info(&message),
        RunOutcome::PartialSuccess => reporter.warn(&message),
        RunOutcome::TotalFailure => reporter.error(&message),
    }
}
