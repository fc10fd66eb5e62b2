//! Scripted in-memory stand-ins for the engine's capability traits.
#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use invoice_core::{Credentials, DateConfig, Watermark};
use invoice_engine::{
    selectors, Browser, BrowserError, BrowserFailure, HarvestParams, PollSettings, ProgressHandle,
    Reporter, SessionSettings,
};
use url::Url;

/// Observable side of a [`FakeBrowser`], kept by the test after the
/// browser itself is boxed into the pipeline.
#[derive(Default)]
pub struct FakeState {
    pub list_loads: AtomicUsize,
    pub close_calls: AtomicUsize,
    pub opened_rows: Mutex<Vec<usize>>,
    pub typed: Mutex<Vec<(String, String)>>,
    open_row: Mutex<Option<usize>>,
    download_dir: Mutex<Option<PathBuf>>,
}

/// Scripted `Browser`: serves a fixed set of list rows, simulates the
/// portal's download behavior by writing the canonical source file into
/// the configured download directory, and can inject per-row failures.
pub struct FakeBrowser {
    labels: Vec<String>,
    pub fail_open_rows: HashSet<usize>,
    /// Rows whose download click succeeds but whose file never lands.
    pub swallow_download_rows: HashSet<usize>,
    pub fail_login_wait: bool,
    pub state: Arc<FakeState>,
}

impl FakeBrowser {
    pub fn with_rows(labels: &[&str]) -> (Self, Arc<FakeState>) {
        let state = Arc::new(FakeState::default());
        let browser = Self {
            labels: labels.iter().map(|label| label.to_string()).collect(),
            fail_open_rows: HashSet::new(),
            swallow_download_rows: HashSet::new(),
            fail_login_wait: false,
            state: Arc::clone(&state),
        };
        (browser, state)
    }

    fn row_index_for(&self, selector: &str, build: fn(usize) -> String) -> Option<usize> {
        (1..=self.labels.len()).find(|&index| build(index) == selector)
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn open(&self, url: &str) -> Result<(), BrowserError> {
        if url.ends_with(selectors::LIST_ROUTE) {
            self.state.list_loads.fetch_add(1, Ordering::SeqCst);
            *self.state.open_row.lock().unwrap() = None;
        }
        Ok(())
    }

    async fn set_window_size(&self, _width: u32, _height: u32) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<(), BrowserError> {
        if selector == selectors::LOGGED_IN_MARKER && self.fail_login_wait {
            return Err(BrowserError::new(
                BrowserFailure::Timeout,
                "login marker never appeared",
            ));
        }
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        if let Some(row) = self.row_index_for(selector, selectors::row_open_link) {
            if self.fail_open_rows.contains(&row) {
                return Err(BrowserError::new(
                    BrowserFailure::ElementMissing,
                    "open link missing",
                ));
            }
            *self.state.open_row.lock().unwrap() = Some(row);
            self.state.opened_rows.lock().unwrap().push(row);
            return Ok(());
        }
        if selector == selectors::DOWNLOAD_TRIGGER {
            let open_row = *self.state.open_row.lock().unwrap();
            let row = open_row.ok_or_else(|| {
                BrowserError::new(BrowserFailure::ElementMissing, "no detail view open")
            })?;
            if !self.swallow_download_rows.contains(&row) {
                let dir = self.state.download_dir.lock().unwrap();
                let dir = dir.as_ref().ok_or_else(|| {
                    BrowserError::new(BrowserFailure::DownloadDir, "no download directory set")
                })?;
                std::fs::write(dir.join(selectors::SOURCE_FILENAME), b"%PDF-1.4 stub").unwrap();
            }
            return Ok(());
        }
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        self.state
            .typed
            .lock()
            .unwrap()
            .push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn count(&self, _selector: &str) -> Result<usize, BrowserError> {
        Ok(self.labels.len())
    }

    async fn extract_text(&self, selector: &str) -> Result<String, BrowserError> {
        self.row_index_for(selector, selectors::row_date_cell)
            .map(|row| self.labels[row - 1].clone())
            .ok_or_else(|| {
                BrowserError::new(
                    BrowserFailure::ElementMissing,
                    format!("no element for {selector}"),
                )
            })
    }

    async fn set_download_dir(&self, dir: &Path) -> Result<(), BrowserError> {
        *self.state.download_dir.lock().unwrap() = Some(dir.to_path_buf());
        Ok(())
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.state.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Reporter that records warnings and counts progress ticks.
#[derive(Default)]
pub struct CountingReporter {
    pub ticks: Arc<AtomicUsize>,
    pub warnings: Arc<Mutex<Vec<String>>>,
}

impl Reporter for CountingReporter {
    fn info(&self, _message: &str) {}
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
    fn error(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn log(&self, _message: &str) {}

    fn progress(&self, _total: usize) -> Box<dyn ProgressHandle> {
        Box::new(CountingTick(Arc::clone(&self.ticks)))
    }

    fn print_path(&self, _path: &Path) {}
}

struct CountingTick(Arc<AtomicUsize>);

impl ProgressHandle for CountingTick {
    fn tick(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test settings: real portal shape, but no settle delay and a tight
/// download poll so suites stay fast.
pub fn session_settings() -> SessionSettings {
    let mut settings = SessionSettings::new(Url::parse("https://portal.example.com/").unwrap());
    settings.wait_timeout = Duration::from_millis(50);
    settings.quiescence = Duration::ZERO;
    settings
}

pub fn harvest_params(output_dir: &Path, since: NaiveDate) -> HarvestParams {
    HarvestParams {
        credentials: Credentials::new("billing-bot", "hunter2"),
        watermark: Watermark::new(since),
        output_dir: output_dir.to_path_buf(),
        date_config: DateConfig::default(),
        session: session_settings(),
        poll: PollSettings {
            interval: Duration::from_millis(5),
            deadline: Duration::from_millis(40),
        },
    }
}
