//! Rendering capability the scrapers consume: open a session, load a URL,
//! optionally scroll, read back the document markup.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("timed out loading {url}")]
    Timeout { url: String },
    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },
    #[error("session error: {0}")]
    Session(String),
}

impl RenderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RenderError::Timeout { .. })
    }
}

/// A rendering engine that hands out independent sessions
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn new_session(&self) -> Result<Box<dyn Session>, RenderError>;

    fn name(&self) -> &'static str;
}

/// One page-sized session (a browser tab)
#[async_trait]
pub trait Session: Send {
    async fn goto(&mut self, url: &str) -> Result<(), RenderError>;

    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError>;

    /// Markup of the currently loaded document
    async fn content(&mut self) -> Result<String, RenderError>;

    async fn close(self: Box<Self>) -> Result<(), RenderError>;
}
