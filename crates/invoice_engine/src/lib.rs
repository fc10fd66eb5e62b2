//! Invoice harvester engine: browser session pipeline and IO adapters.
mod browser;
mod discover;
mod download;
mod error;
mod fsops;
mod report;
mod run;
pub mod selectors;
mod session;
mod webdriver;

pub use browser::{Browser, BrowserError, BrowserFailure};
pub use discover::{discover_candidates, navigate_to_list_view};
pub use download::{download_all, download_document, open_record, PollSettings};
pub use error::HarvestError;
pub use fsops::{ensure_output_dir, FileStore, LocalStore, StoreError};
pub use report::{LogReporter, NullReporter, ProgressHandle, Reporter};
pub use run::{run, HarvestParams};
pub use session::{Phase, PortalSession, SessionSettings};
pub use webdriver::{WebDriverBrowser, WebDriverSettings};
