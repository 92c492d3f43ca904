mod catalogue;
mod config;
mod filter;
mod models;
mod output;
mod scrapers;
#[cfg(test)]
mod testing;

use anyhow::Context;
use config::{AppConfig, RenderBackend};
use filter::LocationFilter;
use models::RunDate;
use output::digest::display_targets;
use scrapers::{build_adapter, Aggregator, ChromeRenderer, HttpRenderer, Navigator, Renderer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let today = RunDate::today();

    info!("🏠 Housing Digest - {}", today.full_label());
    info!("==========================================");

    let renderer: Arc<dyn Renderer> = match config.backend {
        RenderBackend::Chrome => Arc::new(ChromeRenderer::launch(config.nav_timeout)?),
        RenderBackend::Http => Arc::new(HttpRenderer::new(config.nav_timeout)?),
    };

    let adapters = catalogue::sources().into_iter().map(build_adapter).collect();
    let harvest = Aggregator::new(renderer, Navigator::new(config.retry), today)
        .run(adapters)
        .await;
    info!("Found {} ads posted today before filtering", harvest.total());

    let filter = LocationFilter::new(&config.targets);
    let harvest = harvest.filtered(&filter);
    for report in &harvest.reports {
        info!(
            "{} / {}: {} matching ads",
            report.config.site,
            report.config.category,
            report.ads.len()
        );
    }

    let html = output::render_digest(&harvest, filter.targets());
    let file_name = format!(
        "nekretnine_{}_{}.csv",
        today.iso_label(),
        filter.targets().join("_")
    );
    let csv_path = output::export_csv(&config.output_dir, &file_name, &harvest)?;

    let subject = format!(
        "Nekretnine ({}) {}",
        display_targets(filter.targets()).replace(", ", "/"),
        today.full_label()
    );
    output::send_digest(&config.mail, &subject, html, &[csv_path]).await?;

    info!("✅ Digest with {} ads sent", harvest.total());
    Ok(())
}
