pub mod aggregator;
pub mod browser;
pub mod classified_box;
pub mod detail_required;
pub mod feed_source;
pub mod html;
pub mod http;
pub mod listing_portal;
pub mod navigator;
pub mod pagination;
pub mod render;
pub mod traits;
pub mod types;

pub use aggregator::{Aggregator, Harvest};
pub use browser::ChromeRenderer;
pub use http::HttpRenderer;
pub use navigator::{Navigator, RetryPolicy};
pub use render::Renderer;
pub use traits::SourceAdapter;
pub use types::{AdapterKind, SourceConfig};

use std::sync::Arc;

/// Pick the adapter implementation a source's configuration asks for
pub fn build_adapter(config: SourceConfig) -> Arc<dyn SourceAdapter> {
    match config.kind {
        AdapterKind::ListingPortal => Arc::new(listing_portal::ListingPortalAdapter::new(config)),
        AdapterKind::ClassifiedBox => Arc::new(classified_box::ClassifiedBoxAdapter::new(config)),
        AdapterKind::FeedSource => Arc::new(feed_source::FeedSourceAdapter::new(config)),
        AdapterKind::DetailRequired => Arc::new(detail_required::DetailRequiredAdapter::new(config)),
    }
}
