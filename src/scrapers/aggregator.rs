use crate::filter::LocationFilter;
use crate::models::{Ad, Category, RunDate};
use crate::scrapers::navigator::Navigator;
use crate::scrapers::pagination::PaginationDriver;
use crate::scrapers::render::Renderer;
use crate::scrapers::traits::SourceAdapter;
use crate::scrapers::types::SourceConfig;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Ads gathered from one source
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub config: SourceConfig,
    pub ads: Vec<Ad>,
}

/// Every source's ads, in catalogue order
#[derive(Debug, Clone, Default)]
pub struct Harvest {
    pub reports: Vec<SourceReport>,
}

impl Harvest {
    #[cfg(test)]
    pub fn ads(&self, key: &str) -> Option<&[Ad]> {
        self.reports
            .iter()
            .find(|r| r.config.key == key)
            .map(|r| r.ads.as_slice())
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &SourceReport> {
        self.reports
            .iter()
            .filter(move |r| r.config.category == category)
    }

    pub fn total(&self) -> usize {
        self.reports.iter().map(|r| r.ads.len()).sum()
    }

    /// Narrow every source's list to the filter's targets
    pub fn filtered(self, filter: &LocationFilter) -> Self {
        let reports = self
            .reports
            .into_iter()
            .map(|report| SourceReport {
                ads: filter.apply(report.ads),
                config: report.config,
            })
            .collect();
        Self { reports }
    }
}

/// Runs every source's pagination concurrently, one task per source
pub struct Aggregator {
    renderer: Arc<dyn Renderer>,
    navigator: Navigator,
    today: RunDate,
}

impl Aggregator {
    pub fn new(renderer: Arc<dyn Renderer>, navigator: Navigator, today: RunDate) -> Self {
        Self {
            renderer,
            navigator,
            today,
        }
    }

    /// Waits for all sources. A source whose task dies contributes an empty
    /// list; the others are unaffected.
    pub async fn run(&self, adapters: Vec<Arc<dyn SourceAdapter>>) -> Harvest {
        info!(
            "Scraping {} sources with the {} renderer",
            adapters.len(),
            self.renderer.name()
        );

        let mut tasks = JoinSet::new();
        for (index, adapter) in adapters.iter().enumerate() {
            let adapter = Arc::clone(adapter);
            let renderer = Arc::clone(&self.renderer);
            let navigator = self.navigator.clone();
            let today = self.today;
            tasks.spawn(async move {
                let driver = PaginationDriver::new(adapter.as_ref(), renderer.as_ref(), &navigator, today);
                (index, driver.run().await)
            });
        }

        let mut collected = vec![Vec::new(); adapters.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, run)) => collected[index] = run.ads,
                Err(e) => error!("Source task failed: {}", e),
            }
        }

        let reports = adapters
            .iter()
            .zip(collected)
            .map(|(adapter, ads)| SourceReport {
                config: adapter.config().clone(),
                ads,
            })
            .collect();

        Harvest { reports }
    }
}
