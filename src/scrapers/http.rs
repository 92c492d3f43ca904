use crate::scrapers::render::{RenderError, Renderer, Session};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP fetcher for sources that serve their listings without
/// client-side rendering. Scrolling is a no-op.
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn new_session(&self) -> Result<Box<dyn Session>, RenderError> {
        Ok(Box::new(HttpSession {
            client: self.client.clone(),
            body: None,
        }))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

pub struct HttpSession {
    client: Client,
    body: Option<String>,
}

#[async_trait]
impl Session for HttpSession {
    async fn goto(&mut self, url: &str) -> Result<(), RenderError> {
        self.body = None;
        debug!("Fetching URL: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| classify(url, e))?;
        if !response.status().is_success() {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        let html = response.text().await.map_err(|e| classify(url, e))?;
        debug!("Downloaded {} bytes of HTML", html.len());
        self.body = Some(html);
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        self.body
            .clone()
            .ok_or_else(|| RenderError::Session("no document loaded".to_string()))
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        Ok(())
    }
}

fn classify(url: &str, err: reqwest::Error) -> RenderError {
    if err.is_timeout() {
        RenderError::Timeout { url: url.to_string() }
    } else {
        RenderError::Navigation {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn content_before_navigation_is_an_error() {
        let renderer = HttpRenderer::new(Duration::from_secs(5)).unwrap();
        let mut session = renderer.new_session().await.unwrap();
        assert!(matches!(session.content().await, Err(RenderError::Session(_))));
        session.close().await.unwrap();
    }
}
