use crate::models::{Ad, RunDate};
use crate::scrapers::html::{absolute, attr, first_text, selector, text};
use crate::scrapers::traits::{Candidate, ExtractError, Freshness, SourceAdapter};
use crate::scrapers::types::SourceConfig;
use scraper::{ElementRef, Html};

const SITE_ROOT: &str = "https://www.gohome.hr";
const CARD: &str = "div[class*='JQSearchResult']";
const DATE: &str = "p.indexed[itemprop='datePosted']";
const TODAY_TOKEN: &str = "danas";

/// Aggregator feed whose cards say "Danas" instead of a date
pub struct FeedSourceAdapter {
    config: SourceConfig,
}

impl FeedSourceAdapter {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<Candidate, ExtractError> {
        let date_label = first_text(card, DATE)?;

        let link_sel = selector("a.JQEstateUrl")?;
        let link = card
            .select(&link_sel)
            .next()
            .ok_or(ExtractError::MissingLandmark("card link"))?;
        let href = attr(link, "href")
            .and_then(|h| absolute(SITE_ROOT, &h))
            .ok_or(ExtractError::MissingLandmark("card link"))?;
        let title = first_text(link, "span[itemprop='name']")?.unwrap_or_else(|| text(link));

        let mut ad = Ad::new(title, href);
        let currency = meta_content(card, "meta[itemprop='priceCurrency']")?;
        ad.price = meta_content(card, "meta[itemprop='price']")?.map(|amount| match &currency {
            Some(currency) => format!("{} {}", amount, currency),
            None => amount,
        });
        ad.price_per_m2 = first_text(card, "span.square-price")?;
        ad.description = first_text(card, "p.describe[itemprop='description']")?;
        ad.source = first_text(card, "p.source")?.or_else(|| Some(self.config.site.clone()));
        ad.date_posted = Some("Danas".to_string());
        Ok(Candidate { ad, date_label })
    }
}

fn meta_content(card: ElementRef<'_>, css: &str) -> Result<Option<String>, ExtractError> {
    let sel = selector(css)?;
    Ok(card.select(&sel).next().and_then(|meta| attr(meta, "content")))
}

/// `Danas,` / `DANAS.` -> `danas`
fn normalize_token(label: &str) -> String {
    label
        .trim()
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .trim()
        .to_lowercase()
}

impl SourceAdapter for FeedSourceAdapter {
    fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn parse_list(&self, html: &str) -> Vec<Result<Candidate, ExtractError>> {
        let document = Html::parse_document(html);
        let cards = match selector(CARD) {
            Ok(sel) => sel,
            Err(e) => return vec![Err(e)],
        };
        document
            .select(&cards)
            .map(|card| self.parse_card(card))
            .collect()
    }

    fn judge_listing(&self, candidate: &Candidate, _today: &RunDate) -> Freshness {
        match &candidate.date_label {
            Some(label) if normalize_token(label) == TODAY_TOKEN => Freshness::Today,
            _ => Freshness::Stale,
        }
    }
}
