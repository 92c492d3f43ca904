use crate::scrapers::render::Session;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Bounded retry schedule for a single navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    /// Base delay; a timeout waits `base * attempt`, any other failure half that
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    fn delay(&self, timed_out: bool, attempt: u32) -> Duration {
        let base = if timed_out { self.backoff } else { self.backoff / 2 };
        base.saturating_mul(attempt)
    }
}

/// The only place that asks a session to load a URL.
///
/// Failure is a return value: `false` means the page could not be loaded
/// after every attempt and the session's document must not be trusted.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    policy: RetryPolicy,
}

impl Navigator {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub async fn navigate(&self, session: &mut dyn Session, url: &str) -> bool {
        let attempts = self.policy.attempts.max(1);

        for attempt in 1..=attempts {
            match session.goto(url).await {
                Ok(()) => {
                    debug!(url, attempt, "Loaded page");
                    return true;
                }
                Err(e) => {
                    let class = if e.is_timeout() { "timeout" } else { "error" };
                    warn!(url, attempt, class, "Navigation failed: {}", e);
                    if attempt < attempts {
                        sleep(self.policy.delay(e.is_timeout(), attempt)).await;
                    }
                }
            }
        }

        warn!(url, attempts, "Giving up on page");
        false
    }
}
