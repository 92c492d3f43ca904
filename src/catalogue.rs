//! The classifieds sites a run visits, one entry per site and category.

use crate::models::Category;
use crate::scrapers::{AdapterKind, SourceConfig};
use std::time::Duration;

const INDEX_HOUSES: &str = "https://www.index.hr/oglasi/nekretnine/prodaja-kuca/pretraga?\
searchQuery=%257B%2522category%2522%253A%2522prodaja-kuca%2522%252C\
%2522module%2522%253A%2522nekretnine%2522%252C%2522sortOption%2522%253A4%252C\
%2522priceTo%2522%253A%2522220000%2522%252C%2522numberOfRoomsFrom%2522%253A%25223%2522%252C\
%2522page%2522%253A{page}%257D";

const INDEX_FLATS: &str = "https://www.index.hr/oglasi/nekretnine/prodaja-stanova/pretraga?\
searchQuery=%257B%2522category%2522%253A%2522prodaja-stanova%2522%252C%2522module%2522%253A%2522nekretnine%2522%252C\
%2522priceTo%2522%253A%2522220000%2522%252C%2522numberOfRoomsFrom%2522%253A%25223%2522%252C\
%2522page%2522%253A{page}%252C%2522sortOption%2522%253A4%257D";

const PLAVI_HOUSES: &str = "https://www.oglasnik.hr/kuce-prodaja?ad_price_from=50000&ad_price_to=220000&page={page}";
const PLAVI_FLATS: &str = "https://www.oglasnik.hr/stanovi-prodaja?ad_price_from=50000&ad_price_to=220000&page={page}";

const GOHOME_HOUSES: &str = "https://www.gohome.hr/nekretnine.aspx?\
q=od+50000+do+200000+ku%e6a+%b9to+jeftinije+Oglasi+objavljeni+od+zadnjeg+puta&str={page}";
const GOHOME_FLATS: &str = "https://www.gohome.hr/nekretnine.aspx?\
q=od+50000+do+220000+stan+%b9to+jeftinije+Oglasi+objavljeni+od+zadnjeg+puta&str={page}";

const BIJELO_JAJE_HOUSES: &str = "https://bijelojaje.dnevnik.hr/oglasi/nekretnine/kuce/prodaja?sort=newest&page={page}";
const BIJELO_JAJE_FLATS: &str = "https://bijelojaje.dnevnik.hr/oglasi/nekretnine/stanovi/prodaja?sort=newest&page={page}";

pub fn sources() -> Vec<SourceConfig> {
    let secs = Duration::from_secs;
    let index = |key: &str, category: Category, url: &str| {
        SourceConfig::new(key, "Index oglasi", category, AdapterKind::ListingPortal, url)
            .with_settle(secs(4))
            .with_detail_settle(secs(5))
    };
    let plavi = |key: &str, category: Category, url: &str| {
        SourceConfig::new(key, "Plavi oglasnik", category, AdapterKind::ClassifiedBox, url)
            .with_settle(secs(4))
    };
    let gohome = |key: &str, category: Category, url: &str| {
        SourceConfig::new(key, "GoHome oglasnik", category, AdapterKind::FeedSource, url)
            .with_scroll(secs(2))
            .with_settle(secs(3))
    };
    let bijelo_jaje = |key: &str, category: Category, url: &str| {
        SourceConfig::new(key, "Bijelo jaje", category, AdapterKind::DetailRequired, url)
            .with_settle(secs(3))
            .with_detail_settle(secs(3))
    };

    vec![
        index("index-houses", Category::Houses, INDEX_HOUSES),
        index("index-flats", Category::Flats, INDEX_FLATS),
        plavi("plavi-houses", Category::Houses, PLAVI_HOUSES),
        plavi("plavi-flats", Category::Flats, PLAVI_FLATS),
        gohome("gohome-houses", Category::Houses, GOHOME_HOUSES),
        gohome("gohome-flats", Category::Flats, GOHOME_FLATS),
        bijelo_jaje("bijelojaje-houses", Category::Houses, BIJELO_JAJE_HOUSES),
        bijelo_jaje("bijelojaje-flats", Category::Flats, BIJELO_JAJE_FLATS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::types::PAGE_PLACEHOLDER;
    use std::collections::HashSet;

    #[test]
    fn every_source_paginates_and_has_a_unique_key() {
        let sources = sources();
        let keys: HashSet<_> = sources.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys.len(), sources.len());
        for source in &sources {
            assert!(source.url_template.contains(PAGE_PLACEHOLDER), "{}", source.key);
            assert!(!source.page_url(2).contains(PAGE_PLACEHOLDER), "{}", source.key);
        }
    }

    #[test]
    fn both_categories_are_covered_by_every_site() {
        let sources = sources();
        for site in ["Index oglasi", "Plavi oglasnik", "GoHome oglasnik", "Bijelo jaje"] {
            let categories: HashSet<_> = sources
                .iter()
                .filter(|s| s.site == site)
                .map(|s| s.category)
                .collect();
            assert_eq!(categories.len(), 2, "{}", site);
        }
    }

    #[test]
    fn lazy_feed_scrolls_before_parsing() {
        let gohome = sources().into_iter().find(|s| s.key == "gohome-flats").unwrap();
        assert!(gohome.scroll_lazy);
        assert!(!gohome.needs_detail);
    }
}
