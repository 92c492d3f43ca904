use crate::models::{Ad, RunDate};
use crate::scrapers::navigator::Navigator;
use crate::scrapers::render::{Renderer, Session};
use crate::scrapers::traits::{Candidate, DetailOutcome, Freshness, SourceAdapter, TerminationPolicy};
use crate::scrapers::types::PageResult;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// What one source's pagination produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceRun {
    pub ads: Vec<Ad>,
    /// Highest list page that was requested
    pub pages: u32,
}

/// Walks one source's list pages from page 1 upwards until the adapter's
/// termination policy fires or a page cannot be loaded.
///
/// Everything is sequential: one list session, plus one short-lived session
/// per detail page, never two navigations in flight.
pub struct PaginationDriver<'a> {
    adapter: &'a dyn SourceAdapter,
    renderer: &'a dyn Renderer,
    navigator: &'a Navigator,
    today: RunDate,
}

impl<'a> PaginationDriver<'a> {
    pub fn new(
        adapter: &'a dyn SourceAdapter,
        renderer: &'a dyn Renderer,
        navigator: &'a Navigator,
        today: RunDate,
    ) -> Self {
        Self {
            adapter,
            renderer,
            navigator,
            today,
        }
    }

    pub async fn run(&self) -> SourceRun {
        let name = self.adapter.name().to_string();
        let mut run = SourceRun::default();

        let mut session = match self.renderer.new_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(source = %name, "Could not open a session: {}", e);
                return run;
            }
        };

        let policy = self.adapter.termination();
        let mut page = 1;
        loop {
            run.pages = page;
            let Some(html) = self.load_list_page(session.as_mut(), page).await else {
                info!(source = %name, page, "List page unavailable, treating as end of results");
                break;
            };

            let result = self.extract_page(&html).await;
            info!(
                source = %name,
                page,
                candidates = result.candidates,
                today = result.today_matches,
                kept = result.ads.len(),
                "Processed list page"
            );

            let stop = policy.should_stop(&result);
            run.ads.extend(result.ads);
            if stop {
                break;
            }
            page += 1;
        }

        if let Err(e) = session.close().await {
            warn!(source = %name, "Failed to close list session: {}", e);
        }

        info!(source = %name, ads = run.ads.len(), pages = run.pages, "✅ Source finished");
        run
    }

    async fn load_list_page(&self, session: &mut dyn Session, page: u32) -> Option<String> {
        let config = self.adapter.config();
        let url = config.page_url(page);

        if !self.navigator.navigate(session, &url).await {
            return None;
        }

        if config.scroll_lazy {
            if let Err(e) = session.scroll_to_bottom().await {
                warn!(url = %url, "Scroll to bottom failed: {}", e);
            }
            sleep(config.scroll_settle).await;
        }
        sleep(config.settle).await;

        match session.content().await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!(url = %url, "Could not read rendered page: {}", e);
                None
            }
        }
    }

    /// Apply the adapter's parsing and today-predicate to one list page
    pub async fn extract_page(&self, html: &str) -> PageResult {
        let policy = self.adapter.termination();
        let needs_detail = self.adapter.config().needs_detail;
        let parsed = self.adapter.parse_list(html);

        let mut result = PageResult {
            candidates: parsed.len(),
            ..PageResult::default()
        };

        for card in parsed {
            let candidate = match card {
                Ok(candidate) => candidate,
                Err(e) => {
                    debug!(source = self.adapter.name(), "Skipping card: {}", e);
                    continue;
                }
            };

            let freshness = self.adapter.judge_listing(&candidate, &self.today);
            match freshness {
                Freshness::Stale if policy == TerminationPolicy::FirstStale => {
                    result.reached_stale = true;
                    break;
                }
                Freshness::Stale => continue,
                Freshness::Today => result.today_matches += 1,
                Freshness::Undecided => {}
            }

            if !needs_detail {
                result.ads.push(candidate.ad);
                continue;
            }

            match self.confirm(candidate).await {
                Some(DetailOutcome::Fresh(ad)) => {
                    if freshness == Freshness::Undecided {
                        result.today_matches += 1;
                    }
                    result.ads.push(ad);
                }
                Some(DetailOutcome::Stale) if policy == TerminationPolicy::FirstStale => {
                    result.reached_stale = true;
                    break;
                }
                Some(DetailOutcome::Stale) | Some(DetailOutcome::Missing) | None => {}
            }
        }

        result
    }

    /// Check a candidate on its own detail session, closing it on every path
    async fn confirm(&self, candidate: Candidate) -> Option<DetailOutcome> {
        let mut session = match self.renderer.new_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(url = %candidate.ad.href, "Could not open a detail session: {}", e);
                return None;
            }
        };

        let outcome = self.load_detail(session.as_mut(), candidate).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close detail session: {}", e);
        }
        outcome
    }

    async fn load_detail(&self, session: &mut dyn Session, candidate: Candidate) -> Option<DetailOutcome> {
        let href = candidate.ad.href.clone();
        if !self.navigator.navigate(session, &href).await {
            return None;
        }
        sleep(self.adapter.config().detail_settle).await;

        let html = match session.content().await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %href, "Could not read detail page: {}", e);
                return None;
            }
        };

        match self.adapter.parse_detail(candidate, &html, &self.today) {
            Ok(outcome) => {
                if outcome == DetailOutcome::Missing {
                    debug!(url = %href, "Detail page has no publication label");
                }
                Some(outcome)
            }
            Err(e) => {
                warn!(url = %href, "Skipping detail page: {}", e);
                None
            }
        }
    }
}
