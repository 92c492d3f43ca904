use crate::scrapers::render::{RenderError, Renderer, Session};
use anyhow::Context;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tracing::{debug, info, warn};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";
const OUTER_HTML: &str = "document.documentElement.outerHTML";

/// Headless Chrome rendering engine. One browser process is shared; every
/// session is its own tab.
pub struct ChromeRenderer {
    browser: Arc<Browser>,
    nav_timeout: Duration,
}

impl ChromeRenderer {
    pub fn launch(nav_timeout: Duration) -> anyhow::Result<Self> {
        info!("Launching headless Chrome...");

        let options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(Duration::from_secs(600))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;

        Ok(Self {
            browser: Arc::new(browser),
            nav_timeout,
        })
    }
}

#[async_trait]
impl Renderer for ChromeRenderer {
    async fn new_session(&self) -> Result<Box<dyn Session>, RenderError> {
        let browser = Arc::clone(&self.browser);
        let timeout = self.nav_timeout;
        let tab = blocking(move || {
            let tab = browser.new_tab()?;
            tab.set_default_timeout(timeout);
            Ok(tab)
        })
        .await
        .map_err(|e| RenderError::Session(e.to_string()))?;

        Ok(Box::new(ChromeSession { tab, closed: false }))
    }

    fn name(&self) -> &'static str {
        "chrome"
    }
}

pub struct ChromeSession {
    tab: Arc<Tab>,
    closed: bool,
}

#[async_trait]
impl Session for ChromeSession {
    async fn goto(&mut self, url: &str) -> Result<(), RenderError> {
        let tab = Arc::clone(&self.tab);
        let target = url.to_string();
        blocking(move || {
            tab.navigate_to(&target)?;
            tab.wait_until_navigated()?;
            Ok(())
        })
        .await
        .map_err(|e| classify(url, e))
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError> {
        let tab = Arc::clone(&self.tab);
        blocking(move || {
            tab.evaluate(SCROLL_TO_BOTTOM, false)?;
            Ok(())
        })
        .await
        .map_err(|e| RenderError::Session(e.to_string()))
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        let tab = Arc::clone(&self.tab);
        let html = blocking(move || {
            let result = tab.evaluate(OUTER_HTML, false)?;
            match result.value.as_ref().and_then(|v| v.as_str()) {
                Some(html) => Ok(html.to_string()),
                None => tab.get_content(),
            }
        })
        .await
        .map_err(|e| RenderError::Session(e.to_string()))?;

        debug!("Captured {} bytes of HTML", html.len());
        Ok(html)
    }

    async fn close(mut self: Box<Self>) -> Result<(), RenderError> {
        let tab = Arc::clone(&self.tab);
        blocking(move || {
            tab.close(false)?;
            Ok(())
        })
        .await
        .map_err(|e| RenderError::Session(e.to_string()))?;

        // Left unset on failure so drop gets another try
        self.closed = true;
        Ok(())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.tab.close(false) {
                warn!("Failed to close abandoned tab: {}", e);
            }
        }
    }
}

/// headless_chrome is synchronous; keep its calls off the async workers
async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .context("Chrome worker panicked")?
}

fn classify(url: &str, err: anyhow::Error) -> RenderError {
    let message = err.to_string();
    let lowered = message.to_lowercase();
    if err.downcast_ref::<headless_chrome::util::Timeout>().is_some()
        || lowered.contains("timeout")
        || lowered.contains("timed out")
    {
        RenderError::Timeout { url: url.to_string() }
    } else {
        RenderError::Navigation {
            url: url.to_string(),
            reason: message,
        }
    }
}
