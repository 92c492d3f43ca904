use crate::models::{Ad, RunDate};
use crate::scrapers::html::{absolute, attr, find_labelled, first_text, next_element, selector, text};
use crate::scrapers::traits::{Candidate, DetailOutcome, ExtractError, Freshness, SourceAdapter};
use crate::scrapers::types::SourceConfig;
use scraper::{ElementRef, Html};
use tracing::debug;

const SITE_ROOT: &str = "https://www.index.hr";
const CARD: &str = "a.AdLink__link___3Iz86";
const SUMMARY_INFO: &str = "div.AdSummary__info___2tUOv";
const PUBLISHED_MARKER: &str = "Objavljen:";
const PRICE: &str = "span.SummarySection__price___1dmYQ";
const PRICE_PER_M2: &str = "span.SummarySection__priceM2___1L68A";
const SPECIAL_CARD: &str = "div.SpecialSection__specialCardContent___ISmYx";
const SPECIAL_LABEL: &str = "div.SpecialSection__iconContainer___1iKeI";
const SPECIAL_VALUE: &str = "div.SpecialSection__value___383Fy";

/// Portal whose cards show a full date label and whose detail page repeats
/// the publication date in short form. Both must name the run's day.
pub struct ListingPortalAdapter {
    config: SourceConfig,
}

impl ListingPortalAdapter {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<Candidate, ExtractError> {
        let info_sel = selector(SUMMARY_INFO)?;
        let info = card
            .select(&info_sel)
            .next()
            .ok_or(ExtractError::MissingLandmark("summary info"))?;
        let date_label = first_text(info, "span")?;

        let href = attr(card, "href")
            .and_then(|h| absolute(SITE_ROOT, &h))
            .ok_or(ExtractError::MissingLandmark("card link"))?;
        let title = attr(card, "title").unwrap_or_default();

        let mut ad = Ad::new(title, href);
        ad.source = Some(self.config.site.clone());
        Ok(Candidate { ad, date_label })
    }
}

/// `Objavljen: 16.10.26. u 09:14` -> `16.10.26`
fn published_day(published: &str) -> Option<&str> {
    let (_, rest) = published.split_once(PUBLISHED_MARKER)?;
    rest.split_whitespace()
        .next()
        .map(|token| token.trim_matches('.'))
}

impl SourceAdapter for ListingPortalAdapter {
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

    fn judge_listing(&self, candidate: &Candidate, today: &RunDate) -> Freshness {
        match &candidate.date_label {
            Some(label) if *label == today.full_label() => Freshness::Today,
            _ => Freshness::Stale,
        }
    }

    fn parse_detail(
        &self,
        candidate: Candidate,
        html: &str,
        today: &RunDate,
    ) -> Result<DetailOutcome, ExtractError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let Some(published) = find_labelled(root, "span", PUBLISHED_MARKER)? else {
            return Ok(DetailOutcome::Missing);
        };
        let published = text(published);
        if published_day(&published) != Some(today.short_label().as_str()) {
            debug!("{}: detail date '{}' is not today", candidate.ad.href, published);
            return Ok(DetailOutcome::Stale);
        }

        let mut ad = candidate.ad;
        ad.price = first_text(root, PRICE)?;
        ad.price_per_m2 = first_text(root, PRICE_PER_M2)?;
        ad.location = find_labelled(root, "div", "Lokacija")?
            .and_then(next_element)
            .map(text)
            .filter(|t| !t.is_empty());

        let card_sel = selector(SPECIAL_CARD)?;
        for block in root.select(&card_sel) {
            let (Some(label), Some(value)) = (
                first_text(block, SPECIAL_LABEL)?,
                first_text(block, SPECIAL_VALUE)?,
            ) else {
                continue;
            };
            match label.as_str() {
                "Broj soba" => ad.number_of_rooms = Some(value),
                "Godina izgradnje" => ad.year_built = Some(value),
                "Stambena površina" => ad.area = Some(value),
                _ => {}
            }
        }

        ad.date_posted = Some(published);
        Ok(DetailOutcome::Fresh(ad))
    }
}
