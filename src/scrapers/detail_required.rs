use crate::models::{Ad, RunDate};
use crate::scrapers::html::{absolute, attr, find_labelled, first_text, next_element, selector, text};
use crate::scrapers::traits::{
    Candidate, DetailOutcome, ExtractError, Freshness, SourceAdapter, TerminationPolicy,
};
use crate::scrapers::types::SourceConfig;
use scraper::{ElementRef, Html};
use tracing::debug;

const SITE_ROOT: &str = "https://bijelojaje.dnevnik.hr";
const CARD: &str = "div.flex-1.flex-col";
const TITLE_LINK: &str = "span.text-base.font-semibold a";
const LOCATION: &str = "ul.text-brand-primary";
const TAG: &str = "li.rounded.bg-gray-200";
const PRICE: &str = "div.text-3xl.font-bold";

/// Newest-first listing where the publication date only appears on the
/// detail page, next to a label saying whether the ad was published or
/// merely updated.
///
/// Pagination ends at the first ad confirmed as not published today. This
/// trusts the site to never rank an older ad above a fresh one.
pub struct DetailRequiredAdapter {
    config: SourceConfig,
}

impl DetailRequiredAdapter {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<Candidate, ExtractError> {
        let link_sel = selector(TITLE_LINK)?;
        let link = card
            .select(&link_sel)
            .next()
            .ok_or(ExtractError::MissingLandmark("title link"))?;
        let href = attr(link, "href")
            .and_then(|h| absolute(SITE_ROOT, &h))
            .ok_or(ExtractError::MissingLandmark("card link"))?;

        let mut ad = Ad::new(text(link), href);
        ad.location = first_text(card, LOCATION)?;
        ad.source = Some(self.config.site.clone());

        let tag_sel = selector(TAG)?;
        for tag in card.select(&tag_sel) {
            let tag = text(tag);
            let value = tag
                .rsplit(':')
                .next()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string);
            if tag.contains("Stambena površina") {
                ad.area = value;
            } else if tag.contains("Tip stana") || tag.contains("Vrsta") {
                ad.property_type = value;
            }
        }

        Ok(Candidate { ad, date_label: None })
    }
}

impl SourceAdapter for DetailRequiredAdapter {
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

    fn judge_listing(&self, _candidate: &Candidate, _today: &RunDate) -> Freshness {
        Freshness::Undecided
    }

    fn parse_detail(
        &self,
        candidate: Candidate,
        html: &str,
        today: &RunDate,
    ) -> Result<DetailOutcome, ExtractError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let Some(label) = find_labelled(root, "span", "Oglas")? else {
            return Ok(DetailOutcome::Missing);
        };
        let published = text(label).to_lowercase().contains("objavljen");
        let date = next_element(label)
            .map(text)
            .ok_or(ExtractError::MissingLandmark("publication date"))?;

        if !published || date != today.full_label() {
            debug!(
                "{}: '{}' {} is not a fresh publication",
                candidate.ad.href,
                text(label),
                date
            );
            return Ok(DetailOutcome::Stale);
        }

        let mut ad = candidate.ad;
        let row_sel = selector("tr")?;
        for row in root.select(&row_sel) {
            let (Some(label), Some(value)) = (first_text(row, "th")?, first_text(row, "td")?) else {
                continue;
            };
            match label.as_str() {
                "Godina izgradnje" => ad.year_built = Some(value),
                "Broj soba" => ad.number_of_rooms = Some(value),
                _ => {}
            }
        }
        ad.price = first_text(root, PRICE)?;
        ad.date_posted = Some(date);
        Ok(DetailOutcome::Fresh(ad))
    }

    fn termination(&self) -> TerminationPolicy {
        TerminationPolicy::FirstStale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::scrapers::types::AdapterKind;
    use chrono::NaiveDate;

    fn adapter() -> DetailRequiredAdapter {
        DetailRequiredAdapter::new(SourceConfig::new(
            "bijelojaje-flats",
            "Bijelo jaje",
            Category::Flats,
            AdapterKind::DetailRequired,
            "https://bijelojaje.dnevnik.hr/oglasi/nekretnine/stanovi?page={page}",
        ))
    }

    fn today() -> RunDate {
        RunDate::from_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    const LIST: &str = r#"
        <html><body>
          <div class="flex-1 flex-col">
            <span class="text-base font-semibold mb-2"><a href="/oglasi/stan-samobor/1">Stan u Samoboru</a></span>
            <ul class="flex items-center text-brand-primary text-sm"><li>Samobor</li><li>Zagrebačka</li></ul>
            <ul>
              <li class="rounded bg-gray-200 py-0.5 px-1 mr-1 mb-1">Stambena površina: 61 m²</li>
              <li class="rounded bg-gray-200 py-0.5 px-1 mr-1 mb-1">Tip stana: U stambenoj zgradi</li>
            </ul>
          </div>
          <div class="flex-1 flex-col"><span>Reklama</span></div>
        </body></html>"#;

    fn detail(label: &str, date: &str) -> String {
        format!(
            r#"<html><body>
              <div class="text-3xl font-bold">165.000 €</div>
              <p><span>{label}</span> <span>{date}</span></p>
              <table>
                <tr><th>Godina izgradnje</th><td>2004</td></tr>
                <tr><th>Broj soba</th><td>3</td></tr>
              </table>
            </body></html>"#
        )
    }

    #[test]
    fn list_cards_carry_tags_and_never_decide_freshness() {
        let adapter = adapter();
        let parsed = adapter.parse_list(LIST);
        let first = parsed[0].as_ref().unwrap();
        assert_eq!(first.ad.title, "Stan u Samoboru");
        assert_eq!(first.ad.href, "https://bijelojaje.dnevnik.hr/oglasi/stan-samobor/1");
        assert_eq!(first.ad.location.as_deref(), Some("Samobor Zagrebačka"));
        assert_eq!(first.ad.area.as_deref(), Some("61 m²"));
        assert_eq!(first.ad.property_type.as_deref(), Some("U stambenoj zgradi"));
        assert_eq!(adapter.judge_listing(first, &today()), Freshness::Undecided);
        assert_eq!(parsed[1], Err(ExtractError::MissingLandmark("title link")));
        assert_eq!(adapter.termination(), TerminationPolicy::FirstStale);
    }

    #[test]
    fn published_today_is_fresh() {
        let adapter = adapter();
        let candidate = adapter.parse_list(LIST).remove(0).unwrap();
        let outcome = adapter
            .parse_detail(candidate, &detail("Oglas objavljen", "16.10.2026."), &today())
            .unwrap();
        let DetailOutcome::Fresh(ad) = outcome else {
            panic!("expected fresh ad");
        };
        assert_eq!(ad.price.as_deref(), Some("165.000 €"));
        assert_eq!(ad.year_built.as_deref(), Some("2004"));
        assert_eq!(ad.number_of_rooms.as_deref(), Some("3"));
        assert_eq!(ad.date_posted.as_deref(), Some("16.10.2026."));
    }

    #[test]
    fn updated_today_is_stale() {
        let adapter = adapter();
        let candidate = adapter.parse_list(LIST).remove(0).unwrap();
        let outcome = adapter.parse_detail(candidate, &detail("Oglas ažuriran", "16.10.2026."), &today());
        assert_eq!(outcome, Ok(DetailOutcome::Stale));
    }

    #[test]
    fn published_yesterday_is_stale() {
        let adapter = adapter();
        let candidate = adapter.parse_list(LIST).remove(0).unwrap();
        let outcome = adapter.parse_detail(candidate, &detail("Oglas objavljen", "15.10.2026."), &today());
        assert_eq!(outcome, Ok(DetailOutcome::Stale));
    }

    #[test]
    fn missing_label_is_not_a_stale_signal() {
        let adapter = adapter();
        let candidate = adapter.parse_list(LIST).remove(0).unwrap();
        let outcome = adapter.parse_detail(candidate, "<html><body><p>404</p></body></html>", &today());
        assert_eq!(outcome, Ok(DetailOutcome::Missing));
    }
}
