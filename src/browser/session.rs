//! chromiumoxide-backed browser session
//!
//! Owns the headless Chrome process, the CDP handler task, and the single
//! page used for the whole run. Closing is idempotent; dropping without a
//! close still kills the child process.

use crate::browser::UiDriver;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventFileChooserOpened, SetInterceptFileChooserDialogParams,
};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long to wait for the native file chooser after the triggering click
const CHOOSER_TIMEOUT: Duration = Duration::from_secs(10);

/// Headless Chrome session implementing [`UiDriver`]
pub struct ChromiumDriver {
    browser: Option<Browser>,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch headless Chrome and open a blank page
    pub async fn launch() -> Result<Self> {
        info!("launching headless browser");

        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .window_size(1280, 1024)
            .build()
            .map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(Error::browser)?;

        // The handler task pumps CDP websocket messages until the browser
        // goes away.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler loop ended");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(Error::browser)?;

        Ok(Self {
            browser: Some(browser),
            page,
            handler,
        })
    }

    async fn set_chooser_interception(&self, enabled: bool) -> Result<()> {
        let params = SetInterceptFileChooserDialogParams::builder()
            .enabled(enabled)
            .build()
            .map_err(Error::Browser)?;
        self.page.execute(params).await.map_err(Error::browser)?;
        Ok(())
    }
}

#[async_trait]
impl UiDriver for ChromiumDriver {
    async fn goto(&mut self, url: &str) -> Result<()> {
        info!("navigating to {url}");
        self.page.goto(url).await.map_err(Error::navigation)?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(Error::navigation)?;
        Ok(())
    }

    async fn probe(&mut self, selector: &str) -> Result<bool> {
        let found = self.page.find_element(selector).await.is_ok();
        debug!("probe '{selector}': {found}");
        Ok(found)
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        info!("clicking '{selector}'");
        self.page
            .find_element(selector)
            .await
            .map_err(|e| Error::Browser(format!("element '{selector}' not found: {e}")))?
            .click()
            .await
            .map_err(|e| Error::Browser(format!("failed to click '{selector}': {e}")))?;
        Ok(())
    }

    async fn type_text(&mut self, selector: &str, text: &str, key_delay: Duration) -> Result<()> {
        info!("typing {} chars into '{selector}'", text.len());
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| Error::Browser(format!("input '{selector}' not found: {e}")))?;

        element
            .click()
            .await
            .map_err(|e| Error::Browser(format!("failed to focus '{selector}': {e}")))?;

        // One keystroke per character, paced like a human typist.
        for ch in text.chars() {
            element
                .type_str(ch.to_string())
                .await
                .map_err(|e| Error::Browser(format!("failed to type into '{selector}': {e}")))?;
            tokio::time::sleep(key_delay).await;
        }
        Ok(())
    }

    async fn eval(&mut self, script: &str) -> Result<()> {
        debug!("evaluating script: {script}");
        self.page.evaluate(script).await.map_err(Error::browser)?;
        Ok(())
    }

    async fn upload_file(&mut self, trigger: &str, file: &Path) -> Result<()> {
        info!("uploading {} via '{trigger}'", file.display());

        self.set_chooser_interception(true).await?;

        let mut chooser_events = self
            .page
            .event_listener::<EventFileChooserOpened>()
            .await
            .map_err(Error::browser)?;

        let element = self
            .page
            .find_element(trigger)
            .await
            .map_err(|e| Error::Browser(format!("upload trigger '{trigger}' not found: {e}")))?;

        // The chooser only opens in response to the click, and the listener
        // must already be armed when that happens, so both are issued as one
        // concurrent pair.
        let (opened, clicked) = tokio::join!(
            tokio::time::timeout(CHOOSER_TIMEOUT, chooser_events.next()),
            element.click(),
        );

        clicked.map_err(|e| Error::Browser(format!("failed to click '{trigger}': {e}")))?;
        let opened = opened
            .map_err(|_| {
                Error::Browser(format!(
                    "file chooser did not open within {}s after clicking '{trigger}'",
                    CHOOSER_TIMEOUT.as_secs()
                ))
            })?
            .ok_or_else(|| Error::Browser("file chooser event stream ended".to_string()))?;

        let node = opened.backend_node_id.clone().ok_or_else(|| {
            Error::Browser("file chooser event carried no target node".to_string())
        })?;

        let params = SetFileInputFilesParams::builder()
            .files(vec![file.display().to_string()])
            .backend_node_id(node)
            .build()
            .map_err(Error::Browser)?;
        self.page.execute(params).await.map_err(Error::browser)?;

        self.set_chooser_interception(false).await?;
        Ok(())
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>> {
        let bytes = self
            .page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
            )
            .await
            .map_err(Error::browser)?;
        debug!("captured screenshot ({} bytes)", bytes.len());
        Ok(bytes)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut browser) = self.browser.take() {
            info!("closing browser session");
            let closed = browser.close().await;
            let _ = tokio::time::timeout(Duration::from_secs(5), browser.wait()).await;
            self.handler.abort();
            closed.map_err(Error::browser)?;
        }
        Ok(())
    }
}

impl Drop for ChromiumDriver {
    fn drop(&mut self) {
        // chromiumoxide kills the child process when the Browser handle
        // drops; we only reclaim the handler task here.
        if self.browser.is_some() {
            warn!("browser session dropped without an explicit close");
        }
        self.handler.abort();
    }
}
