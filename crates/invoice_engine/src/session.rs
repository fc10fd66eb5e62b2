use std::time::Duration;

use invoice_core::Credentials;
use url::Url;

use crate::{selectors, Browser, BrowserError, BrowserFailure, HarvestError};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub base_url: Url,
    pub viewport: (u32, u32),
    /// Budget for every element-presence wait.
    pub wait_timeout: Duration,
    /// Settle delay after login, so client-side redirects finish.
    pub quiescence: Duration,
}

impl SessionSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            viewport: (1280, 960),
            wait_timeout: Duration::from_secs(10),
            quiescence: Duration::from_secs(2),
        }
    }

    pub(crate) fn route(&self, path: &str) -> Result<Url, BrowserError> {
        self.base_url
            .join(path)
            .map_err(|err| BrowserError::new(BrowserFailure::Navigation, err.to_string()))
    }
}

/// Session lifecycle phase. `Closed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    Authenticated,
    Closed,
    Failed,
}

/// Owns the one authenticated browsing session of a run.
///
/// The browser handle is held in an `Option` and taken on teardown, which
/// makes teardown idempotent and safe on a partially initialized session.
pub struct PortalSession {
    browser: Option<Box<dyn Browser>>,
    settings: SessionSettings,
    phase: Phase,
}

impl PortalSession {
    pub fn new(browser: Box<dyn Browser>, settings: SessionSettings) -> Self {
        Self {
            browser: Some(browser),
            settings,
            phase: Phase::Uninitialized,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live browsing session, handed by reference to the later pipeline
    /// stages. `None` once the session has been torn down.
    pub fn browser(&self) -> Option<&dyn Browser> {
        self.browser.as_deref()
    }

    /// Size the browsing surface to the fixed viewport and open the portal
    /// root. Failure here is fatal to the run.
    pub async fn initialize(&mut self) -> Result<(), HarvestError> {
        if self.phase != Phase::Uninitialized {
            return Err(HarvestError::Initialization(format!(
                "cannot initialize in phase {:?}",
                self.phase
            )));
        }
        match self.initialize_steps().await {
            Ok(()) => {
                self.phase = Phase::Initialized;
                Ok(())
            }
            Err(err) => {
                self.phase = Phase::Failed;
                Err(HarvestError::Initialization(err.to_string()))
            }
        }
    }

    async fn initialize_steps(&self) -> Result<(), BrowserError> {
        let browser = self.live_browser()?;
        let (width, height) = self.settings.viewport;
        browser.set_window_size(width, height).await?;
        let root = self.settings.route("")?;
        browser.open(root.as_str()).await
    }

    /// Run the login flow. Any step failing or timing out aborts the run
    /// before discovery or download is attempted.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), HarvestError> {
        if self.phase != Phase::Initialized {
            return Err(HarvestError::Authentication(format!(
                "cannot authenticate in phase {:?}",
                self.phase
            )));
        }
        match self.authenticate_steps(credentials).await {
            Ok(()) => {
                self.phase = Phase::Authenticated;
                log::info!("authenticated as {}", credentials.username);
                Ok(())
            }
            Err(err) => {
                self.phase = Phase::Failed;
                Err(HarvestError::Authentication(err.to_string()))
            }
        }
    }

    async fn authenticate_steps(&self, credentials: &Credentials) -> Result<(), BrowserError> {
        let browser = self.live_browser()?;
        let login = self.settings.route(selectors::LOGIN_ROUTE)?;
        browser.open(login.as_str()).await?;
        browser
            .wait_for_selector(selectors::USERNAME_INPUT, self.settings.wait_timeout)
            .await?;
        browser
            .type_text(selectors::USERNAME_INPUT, &credentials.username)
            .await?;
        browser
            .type_text(selectors::PASSWORD_INPUT, &credentials.password)
            .await?;
        // The consent overlay intercepts the submit click until dismissed.
        browser.click(selectors::COOKIE_ACCEPT).await?;
        browser.click(selectors::LOGIN_SUBMIT).await?;
        browser
            .wait_for_selector(selectors::LOGGED_IN_MARKER, self.settings.wait_timeout)
            .await?;
        tokio::time::sleep(self.settings.quiescence).await;
        Ok(())
    }

    /// Release the browsing surface. Safe to call repeatedly and on a
    /// partially initialized session; missing pieces are no-ops.
    pub async fn teardown(&mut self) {
        if let Some(browser) = self.browser.take() {
            if let Err(err) = browser.close().await {
                log::warn!("browser session close failed: {err}");
            }
        }
        if self.phase != Phase::Failed {
            self.phase = Phase::Closed;
        }
    }

    fn live_browser(&self) -> Result<&dyn Browser, BrowserError> {
        self.browser
            .as_deref()
            .ok_or_else(|| BrowserError::new(BrowserFailure::Session, "session already closed"))
    }
}
