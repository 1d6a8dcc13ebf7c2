// ── Runtime catalog configuration ──
//
// These types describe *how* to talk to the catalog and how long query
// results stay fresh. They never touch disk: the CLI (via dexly-config)
// constructs a `CatalogConfig` and hands it in.

use std::time::Duration;

use crate::query::QueryOptions;

/// Default public API root.
pub const DEFAULT_BASE_URL: &str = dexly_api::client::DEFAULT_BASE_URL;

/// Configuration for one catalog session.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root (e.g., `https://pokeapi.co/api/v2/`).
    pub base_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// `limit` used when fetching the whole list for client-side filtering.
    pub full_list_limit: u32,
    /// Items per grid page.
    pub page_size: usize,
    /// How many page numbers the pager shows at once.
    pub page_window: usize,
    /// Cache behaviour for list queries.
    pub list_query: QueryOptions,
    /// Cache behaviour for single-item detail queries.
    pub detail_query: QueryOptions,
    /// Cache behaviour for metadata (species) queries.
    pub metadata_query: QueryOptions,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
            full_list_limit: 2000,
            page_size: 30,
            page_window: 5,
            list_query: QueryOptions::with_stale_time(Duration::from_secs(5 * 60)),
            detail_query: QueryOptions::with_stale_time(Duration::from_secs(10 * 60)),
            metadata_query: QueryOptions::with_stale_time(Duration::from_secs(10 * 60)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_freshness_windows() {
        let config = CatalogConfig::default();
        assert_eq!(config.list_query.stale_time, Duration::from_secs(300));
        assert_eq!(config.detail_query.stale_time, Duration::from_secs(600));
        assert_eq!(config.metadata_query.stale_time, Duration::from_secs(600));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2/");
    }
}
