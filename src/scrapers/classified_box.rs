use crate::models::{Ad, RunDate};
use crate::scrapers::html::{absolute, attr, first_text, selector, text};
use crate::scrapers::traits::{Candidate, ExtractError, Freshness, SourceAdapter};
use crate::scrapers::types::SourceConfig;
use scraper::{ElementRef, Html};

const SITE_ROOT: &str = "https://www.oglasnik.hr";
const CARD: &str = "a.classified-box";
const BODY: &str = "div.pad-xs-only-lr";
const PARAM: &str = "div.description span.classified-param";
const PARAM_VALUE: &str = "span.classified-param-value";

/// Classifieds box grid: every field lives on the card itself and the date
/// label is the full `DD.MM.YYYY.` form.
pub struct ClassifiedBoxAdapter {
    config: SourceConfig,
}

impl ClassifiedBoxAdapter {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<Candidate, ExtractError> {
        let body_sel = selector(BODY)?;
        let body = card
            .select(&body_sel)
            .next()
            .ok_or(ExtractError::MissingLandmark("card body"))?;

        let href = attr(card, "href")
            .and_then(|h| absolute(SITE_ROOT, &h))
            .ok_or(ExtractError::MissingLandmark("card link"))?;
        let title = first_text(body, "h3.classified-title")?.unwrap_or_default();

        let mut ad = Ad::new(title, href);
        ad.price = first_text(body, "div.price-block span.main")?;
        ad.location = first_text(card, "div.image-wrapper-bg span.location")?;
        ad.source = Some(self.config.site.clone());

        let param_sel = selector(PARAM)?;
        let value_sel = selector(PARAM_VALUE)?;
        for param in body.select(&param_sel) {
            let label = text(param);
            let value = param
                .select(&value_sel)
                .next()
                .map(text)
                .filter(|v| !v.is_empty());
            if label.contains("Vrsta") {
                ad.property_type = value;
            } else if label.contains("Površina") {
                ad.area = value;
            }
        }

        let date_label = first_text(body, "span.date")?;
        ad.date_posted = date_label.clone();
        Ok(Candidate { ad, date_label })
    }
}

impl SourceAdapter for ClassifiedBoxAdapter {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::scrapers::types::AdapterKind;
    use chrono::NaiveDate;

    fn adapter() -> ClassifiedBoxAdapter {
        ClassifiedBoxAdapter::new(SourceConfig::new(
            "plavi-flats",
            "Plavi oglasnik",
            Category::Flats,
            AdapterKind::ClassifiedBox,
            "https://www.oglasnik.hr/stanovi-prodaja?page={page}",
        ))
    }

    const LIST: &str = r#"
        <html><body>
          <a class="classified-box" href="https://www.oglasnik.hr/stanovi-prodaja/stan-jarun-oglas-1">
            <div class="image-wrapper-bg"><span class="location">Zagreb, Jarun</span></div>
            <div class="pad-xs-only-lr">
              <h3 class="classified-title">Stan 3-sobni, Jarun</h3>
              <div class="price-block"><span class="main">210.000 €</span></div>
              <span class="date">16.10.2026.</span>
              <div class="description">
                <span class="classified-param">Vrsta stana: <span class="classified-param-value">u zgradi</span></span>
                <span class="classified-param">Površina: <span class="classified-param-value">74 m²</span></span>
              </div>
            </div>
          </a>
          <a class="classified-box" href="/stanovi-prodaja/stan-2">
            <div class="pad-xs-only-lr"><span class="date">14.10.2026.</span></div>
          </a>
          <a class="classified-box" href="/stanovi-prodaja/promo"><div class="banner"></div></a>
        </body></html>"#;

    #[test]
    fn card_carries_every_field() {
        let adapter = adapter();
        let parsed = adapter.parse_list(LIST);
        let first = parsed[0].as_ref().unwrap();
        assert_eq!(first.ad.title, "Stan 3-sobni, Jarun");
        assert_eq!(first.ad.price.as_deref(), Some("210.000 €"));
        assert_eq!(first.ad.location.as_deref(), Some("Zagreb, Jarun"));
        assert_eq!(first.ad.property_type.as_deref(), Some("u zgradi"));
        assert_eq!(first.ad.area.as_deref(), Some("74 m²"));
        assert_eq!(first.ad.date_posted.as_deref(), Some("16.10.2026."));
        assert_eq!(parsed[1].as_ref().unwrap().ad.href, "https://www.oglasnik.hr/stanovi-prodaja/stan-2");
        assert_eq!(parsed[2], Err(ExtractError::MissingLandmark("card body")));
    }

    #[test]
    fn only_exact_full_date_is_today() {
        let adapter = adapter();
        let today = RunDate::from_date(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let parsed: Vec<_> = adapter.parse_list(LIST).into_iter().flatten().collect();
        assert_eq!(adapter.judge_listing(&parsed[0], &today), Freshness::Today);
        assert_eq!(adapter.judge_listing(&parsed[1], &today), Freshness::Stale);
    }
}
