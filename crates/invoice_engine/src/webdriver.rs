use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};

use crate::{Browser, BrowserError, BrowserFailure};

#[derive(Debug, Clone)]
pub struct WebDriverSettings {
    /// WebDriver endpoint, e.g. a local chromedriver.
    pub webdriver_url: String,
    pub headless: bool,
}

impl Default for WebDriverSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
        }
    }
}

/// `Browser` implementation over a WebDriver session.
///
/// The download destination is baked into the Chrome profile at session
/// creation; WebDriver offers no portable way to move it afterwards, so
/// `set_download_dir` only verifies the requested directory matches.
pub struct WebDriverBrowser {
    client: Client,
    download_dir: PathBuf,
}

impl WebDriverBrowser {
    pub async fn connect(
        settings: &WebDriverSettings,
        download_dir: PathBuf,
    ) -> Result<Self, BrowserError> {
        let capabilities = chrome_capabilities(settings, &download_dir);
        let mut builder = ClientBuilder::native();
        builder.capabilities(capabilities);
        let client = builder
            .connect(&settings.webdriver_url)
            .await
            .map_err(|err| BrowserError::new(BrowserFailure::Connect, err.to_string()))?;
        Ok(Self {
            client,
            download_dir,
        })
    }
}

fn chrome_capabilities(
    settings: &WebDriverSettings,
    download_dir: &Path,
) -> serde_json::map::Map<String, serde_json::Value> {
    let mut args: Vec<String> = Vec::new();
    if settings.headless {
        args.push("--headless=new".to_string());
    }
    let options = serde_json::json!({
        "args": args,
        "prefs": {
            "download.default_directory": download_dir.to_string_lossy(),
            "download.prompt_for_download": false,
            // Invoices are PDFs; fetch them instead of opening the viewer.
            "plugins.always_open_pdf_externally": true,
        }
    });
    let mut capabilities = serde_json::map::Map::new();
    capabilities.insert("goog:chromeOptions".to_string(), options);
    capabilities
}

fn browser_error(err: CmdError, fallback: BrowserFailure) -> BrowserError {
    let kind = match &err {
        CmdError::WaitTimeout => BrowserFailure::Timeout,
        e if e.is_no_such_element() => BrowserFailure::ElementMissing,
        _ => fallback,
    };
    BrowserError::new(kind, err.to_string())
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn open(&self, url: &str) -> Result<(), BrowserError> {
        self.client
            .goto(url)
            .await
            .map_err(|err| browser_error(err, BrowserFailure::Navigation))
    }

    async fn set_window_size(&self, width: u32, height: u32) -> Result<(), BrowserError> {
        self.client
            .set_window_size(width, height)
            .await
            .map_err(|err| browser_error(err, BrowserFailure::Session))
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map(|_| ())
            .map_err(|err| browser_error(err, BrowserFailure::Timeout))
    }

    async fn click(&self, selector: &str) -> Result<(), BrowserError> {
        let element = self
            .client
            .find(Locator::Css(selector))
            .await
            .map_err(|err| browser_error(err, BrowserFailure::ElementMissing))?;
        element
            .click()
            .await
            .map(|_| ())
            .map_err(|err| browser_error(err, BrowserFailure::Interaction))
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), BrowserError> {
        let element = self
            .client
            .find(Locator::Css(selector))
            .await
            .map_err(|err| browser_error(err, BrowserFailure::ElementMissing))?;
        element
            .send_keys(text)
            .await
            .map_err(|err| browser_error(err, BrowserFailure::Interaction))
    }

    async fn count(&self, selector: &str) -> Result<usize, BrowserError> {
        let elements = self
            .client
            .find_all(Locator::Css(selector))
            .await
            .map_err(|err| browser_error(err, BrowserFailure::Protocol))?;
        Ok(elements.len())
    }

    async fn extract_text(&self, selector: &str) -> Result<String, BrowserError> {
        let element = self
            .client
            .find(Locator::Css(selector))
            .await
            .map_err(|err| browser_error(err, BrowserFailure::ElementMissing))?;
        element
            .text()
            .await
            .map_err(|err| browser_error(err, BrowserFailure::Protocol))
    }

    async fn set_download_dir(&self, dir: &Path) -> Result<(), BrowserError> {
        if dir == self.download_dir {
            Ok(())
        } else {
            Err(BrowserError::new(
                BrowserFailure::DownloadDir,
                format!(
                    "download directory is fixed to {} at session creation",
                    self.download_dir.display()
                ),
            ))
        }
    }

    async fn close(&self) -> Result<(), BrowserError> {
        self.client
            .clone()
            .close()
            .await
            .map_err(|err| browser_error(err, BrowserFailure::Session))
    }
}
