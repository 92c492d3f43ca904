//! In-memory renderer that replays canned pages for scraper tests.

use crate::scrapers::render::{RenderError, Renderer, Session};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    pages: HashMap<String, String>,
    /// Remaining forced failures per URL
    failures: HashMap<String, u32>,
    visits: Vec<String>,
    opened: usize,
    closed: usize,
}

#[derive(Clone, Default)]
pub struct ScriptedRenderer {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: &str) -> Self {
        self.with(|s| {
            s.pages.insert(url.to_string(), html.to_string());
        })
    }

    /// Fail the first `times` navigations to `url` with a timeout
    pub fn fail_first(self, url: &str, times: u32) -> Self {
        self.with(|s| {
            s.failures.insert(url.to_string(), times);
        })
    }

    pub fn visits(&self, url: &str) -> usize {
        self.with_ref(|s| s.visits.iter().filter(|v| *v == url).count())
    }

    pub fn visited(&self) -> Vec<String> {
        self.with_ref(|s| s.visits.clone())
    }

    pub fn open_sessions(&self) -> usize {
        self.with_ref(|s| s.opened - s.closed)
    }

    fn with(self, f: impl FnOnce(&mut Script)) -> Self {
        f(&mut self.script.lock().unwrap());
        self
    }

    fn with_ref<T>(&self, f: impl FnOnce(&Script) -> T) -> T {
        f(&self.script.lock().unwrap())
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn new_session(&self) -> Result<Box<dyn Session>, RenderError> {
        self.script.lock().unwrap().opened += 1;
        Ok(Box::new(ScriptedSession {
            script: Arc::clone(&self.script),
            current: None,
        }))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

struct ScriptedSession {
    script: Arc<Mutex<Script>>,
    current: Option<String>,
}

#[async_trait]
impl Session for ScriptedSession {
    async fn goto(&mut self, url: &str) -> Result<(), RenderError> {
        let mut script = self.script.lock().unwrap();
        script.visits.push(url.to_string());

        if let Some(left) = script.failures.get_mut(url) {
            if *left > 0 {
                *left -= 1;
                return Err(RenderError::Timeout { url: url.to_string() });
            }
        }
        match script.pages.get(url) {
            Some(html) => {
                self.current = Some(html.clone());
                Ok(())
            }
            None => Err(RenderError::Navigation {
                url: url.to_string(),
                reason: "404".to_string(),
            }),
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    async fn content(&mut self) -> Result<String, RenderError> {
        self.current
            .clone()
            .ok_or_else(|| RenderError::Session("nothing loaded".to_string()))
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        self.script.lock().unwrap().closed += 1;
        Ok(())
    }
}
