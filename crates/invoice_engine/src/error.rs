use std::time::Duration;

use thiserror::Error;

use crate::StoreError;
use invoice_core::DateParseError;

/// Error taxonomy for one harvesting run.
///
/// Only session establishment (`Initialization`, `Authentication`) and run
/// setup (`Store`) are fatal to the whole run; `Open`, `Download` and
/// `DownloadTimeout` are caught per record by the download loop.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("session initialization failed: {0}")]
    Initialization(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("list navigation failed: {0}")]
    Navigation(String),

    #[error("could not open invoice row {index}: {message}")]
    Open { index: usize, message: String },

    #[error("download failed for invoice row {index}: {message}")]
    Download { index: usize, message: String },

    #[error(
        "timed out after {}s waiting for the download from invoice row {index}",
        waited.as_secs()
    )]
    DownloadTimeout { index: usize, waited: Duration },

    #[error(transparent)]
    DateParse(#[from] DateParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
