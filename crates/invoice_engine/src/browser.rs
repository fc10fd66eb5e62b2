use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

/// Narrow browser-automation capability consumed by the pipeline.
///
/// Any backend satisfying this trait is substitutable; the production
/// implementation drives a WebDriver endpoint, tests script a fake.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate the browsing surface to `url`.
    async fn open(&self, url: &str) -> Result<(), BrowserError>;

    /// Resize the browsing surface.
    async fn set_window_size(&self, width: u32, height: u32) -> Result<(), BrowserError>;

    /// Block until an element matching `selector` is present, or time out.
    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError>;

    /// Click the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), BrowserError>;

    /// Type `text` into the first element matching `selector`.
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), BrowserError>;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize, BrowserError>;

    /// Visible text of the first element matching `selector`.
    async fn extract_text(&self, selector: &str) -> Result<String, BrowserError>;

    /// Point the session's download destination at `dir`.
    async fn set_download_dir(&self, dir: &Path) -> Result<(), BrowserError>;

    /// Release the browsing surface and the underlying session.
    async fn close(&self) -> Result<(), BrowserError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserError {
    pub kind: BrowserFailure,
    pub message: String,
}

impl BrowserError {
    pub fn new(kind: BrowserFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for BrowserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for BrowserError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFailure {
    Connect,
    Navigation,
    Timeout,
    ElementMissing,
    Interaction,
    DownloadDir,
    Session,
    Protocol,
}

impl fmt::Display for BrowserFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserFailure::Connect => write!(f, "webdriver connect failed"),
            BrowserFailure::Navigation => write!(f, "navigation failed"),
            BrowserFailure::Timeout => write!(f, "wait timed out"),
            BrowserFailure::ElementMissing => write!(f, "element missing"),
            BrowserFailure::Interaction => write!(f, "element interaction failed"),
            BrowserFailure::DownloadDir => write!(f, "download directory rejected"),
            BrowserFailure::Session => write!(f, "session error"),
            BrowserFailure::Protocol => write!(f, "webdriver protocol error"),
        }
    }
}
