use crate::models::{Ad, RunDate};
use crate::scrapers::types::{PageResult, SourceConfig};
use thiserror::Error;

/// Why a single card or detail page could not be turned into an ad
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("missing landmark: {0}")]
    MissingLandmark(&'static str),
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

/// Verdict of a today-predicate on a list card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Today,
    Stale,
    /// The card carries no date; only the detail page can decide
    Undecided,
}

/// Outcome of parsing a candidate's detail page
#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    /// Confirmed as posted today, with the detail fields merged in
    Fresh(Ad),
    /// Confirmed as not posted today
    Stale,
    /// The publication landmark was absent
    Missing,
}

/// When a source's pagination has run out of today's ads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Stop after a page that yields zero today-matches
    ZeroMatchPage,
    /// Stop at the first confirmed stale ad; relies on newest-first ordering.
    /// A page without any cards also stops.
    FirstStale,
}

impl TerminationPolicy {
    pub fn should_stop(&self, page: &PageResult) -> bool {
        match self {
            TerminationPolicy::ZeroMatchPage => page.today_matches == 0,
            TerminationPolicy::FirstStale => page.reached_stale || page.candidates == 0,
        }
    }
}

/// A card parsed from a list page, before the today-predicate runs
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub ad: Ad,
    /// Date text exactly as the card shows it
    pub date_label: Option<String>,
}

/// Parsing and termination rules for one classifieds site
pub trait SourceAdapter: Send + Sync {
    fn config(&self) -> &SourceConfig;

    /// Parse every card on a rendered list page. A malformed card yields an
    /// error for that card only.
    fn parse_list(&self, html: &str) -> Vec<Result<Candidate, ExtractError>>;

    /// Today-predicate applied to a list card
    fn judge_listing(&self, candidate: &Candidate, today: &RunDate) -> Freshness;

    /// Confirm a candidate on its rendered detail page and fill in the
    /// detail-only fields. Only called when the source needs detail pages.
    fn parse_detail(
        &self,
        candidate: Candidate,
        _html: &str,
        _today: &RunDate,
    ) -> Result<DetailOutcome, ExtractError> {
        Ok(DetailOutcome::Fresh(candidate.ad))
    }

    fn termination(&self) -> TerminationPolicy {
        TerminationPolicy::ZeroMatchPage
    }

    fn name(&self) -> &str {
        &self.config().key
    }
}
