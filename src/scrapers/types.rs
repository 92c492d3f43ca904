use crate::models::{Ad, Category};
use std::time::Duration;

/// Placeholder replaced by the page number in a source URL template
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Which parsing and termination rules a source uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    /// Card list with a date label, confirmed against the detail page
    ListingPortal,
    /// Self-contained cards with a full date label
    ClassifiedBox,
    /// Cards marked with a relative "today" token
    FeedSource,
    /// Newest-first cards whose date only appears on the detail page
    DetailRequired,
}

/// Immutable configuration of one source listing
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Unique key, e.g. `index-houses`
    pub key: String,
    /// Site label shown in the digest and CSV
    pub site: String,
    pub category: Category,
    pub kind: AdapterKind,
    /// Listing URL with a `{page}` placeholder
    pub url_template: String,
    /// Candidates must be confirmed on their detail page
    pub needs_detail: bool,
    /// Scroll to the bottom before parsing so lazy content loads
    pub scroll_lazy: bool,
    /// Wait after a list page navigation
    pub settle: Duration,
    /// Wait after a scroll-to-bottom
    pub scroll_settle: Duration,
    /// Wait after a detail page navigation
    pub detail_settle: Duration,
}

impl SourceConfig {
    pub fn new(
        key: impl Into<String>,
        site: impl Into<String>,
        category: Category,
        kind: AdapterKind,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            site: site.into(),
            category,
            kind,
            url_template: url_template.into(),
            needs_detail: matches!(kind, AdapterKind::ListingPortal | AdapterKind::DetailRequired),
            scroll_lazy: false,
            settle: Duration::from_secs(4),
            scroll_settle: Duration::ZERO,
            detail_settle: Duration::ZERO,
        }
    }

    pub fn with_scroll(mut self, scroll_settle: Duration) -> Self {
        self.scroll_lazy = true;
        self.scroll_settle = scroll_settle;
        self
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    pub fn with_detail_settle(mut self, detail_settle: Duration) -> Self {
        self.detail_settle = detail_settle;
        self
    }

    /// Drop every artificial delay (used when replaying fixtures)
    #[cfg(test)]
    pub fn without_delays(mut self) -> Self {
        self.settle = Duration::ZERO;
        self.scroll_settle = Duration::ZERO;
        self.detail_settle = Duration::ZERO;
        self
    }

    pub fn page_url(&self, page: u32) -> String {
        self.url_template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

/// Outcome of extracting one rendered list page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub ads: Vec<Ad>,
    /// Candidates judged "posted today" on this page
    pub today_matches: usize,
    /// Candidates the list parser found at all
    pub candidates: usize,
    /// A confirmed stale ad was reached under the first-stale policy
    pub reached_stale: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_substitutes_every_placeholder() {
        let config = SourceConfig::new(
            "t",
            "Test",
            Category::Flats,
            AdapterKind::FeedSource,
            "https://example.hr/list?str={page}&again={page}",
        );
        assert_eq!(config.page_url(3), "https://example.hr/list?str=3&again=3");
    }

    #[test]
    fn detail_requirement_follows_adapter_kind() {
        let url = "https://example.hr/?p={page}";
        assert!(SourceConfig::new("a", "A", Category::Houses, AdapterKind::ListingPortal, url).needs_detail);
        assert!(SourceConfig::new("b", "B", Category::Houses, AdapterKind::DetailRequired, url).needs_detail);
        assert!(!SourceConfig::new("c", "C", Category::Houses, AdapterKind::ClassifiedBox, url).needs_detail);
        assert!(!SourceConfig::new("d", "D", Category::Houses, AdapterKind::FeedSource, url).needs_detail);
    }
}
