// ── Catalog facade ──
//
// Single entry point for consumers: owns the API client, one query cache
// per operation and the favorites store. Every read goes through the
// cache, so repeated and concurrent requests are served once.

use std::sync::Arc;

use dexly_api::{CatalogClient, TransportConfig};
use futures_util::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::error::CoreError;
use crate::favorites::FavoritesStore;
use crate::filter::{enhance, filter_by_name};
use crate::model::{EnhancedItem, ItemDetail, ItemId, ItemMetadata, ItemProfile, ListPage};
use crate::query::QueryCache;

/// One server-side page of the list, with derived ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemListing {
    /// Total number of items the API reports.
    pub total: u32,
    pub items: Vec<EnhancedItem>,
}

/// A server-side page narrowed by a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub total: u32,
    pub items: Vec<EnhancedItem>,
    pub total_filtered: usize,
    pub has_results: bool,
}

/// Cache key for detail lookups: trimmed and lowercased.
fn detail_key(id_or_name: &str) -> String {
    id_or_name.trim().to_lowercase()
}

/// Cheaply cloneable handle to the catalog query layer.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    client: CatalogClient,
    lists: QueryCache<(u32, u32), Arc<ListPage>>,
    details: QueryCache<String, Arc<ItemDetail>>,
    metadata: QueryCache<ItemId, Arc<ItemMetadata>>,
    favorites: FavoritesStore,
}

impl Catalog {
    /// Build a catalog talking to `config.base_url`.
    pub fn new(config: CatalogConfig, favorites: FavoritesStore) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = CatalogClient::new(&config.base_url, &transport)?;
        Ok(Self::with_client(config, client, favorites))
    }

    /// Build a catalog around an existing client.
    pub fn with_client(
        config: CatalogConfig,
        client: CatalogClient,
        favorites: FavoritesStore,
    ) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                lists: QueryCache::new("list", config.list_query.clone()),
                details: QueryCache::new("detail", config.detail_query.clone()),
                metadata: QueryCache::new("metadata", config.metadata_query.clone()),
                config,
                client,
                favorites,
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.inner.favorites
    }

    // ── List ─────────────────────────────────────────────────────────

    /// Raw list page at `offset` (cached per `(offset, limit)`).
    pub async fn list(&self, offset: u32, limit: u32) -> Result<Arc<ListPage>, CoreError> {
        let client = &self.inner.client;
        let timeout = self.inner.config.timeout;
        self.inner
            .lists
            .fetch((offset, limit), || async move {
                let raw = client
                    .list(offset, limit)
                    .await
                    .map_err(|e| CoreError::from(e).with_timeout(timeout))?;
                Ok::<_, CoreError>(Arc::new(ListPage::try_from(raw)?))
            })
            .await
    }

    /// The whole catalog, enhanced with ids, for client-side filtering.
    pub async fn all_items(&self) -> Result<Vec<EnhancedItem>, CoreError> {
        let page = self.list(0, self.inner.config.full_list_limit).await?;
        Ok(enhance(&page.items))
    }

    /// Server-side page `page_index` (zero-based) of `limit` items.
    pub async fn list_page(&self, page_index: u32, limit: u32) -> Result<ItemListing, CoreError> {
        let offset = page_index.saturating_mul(limit);
        let page = self.list(offset, limit).await?;
        Ok(ItemListing {
            total: page.total,
            items: enhance(&page.items),
        })
    }

    /// Server-side page narrowed to names containing `term`.
    pub async fn search_page(
        &self,
        page_index: u32,
        limit: u32,
        term: &str,
    ) -> Result<SearchResults, CoreError> {
        let listing = self.list_page(page_index, limit).await?;
        let items = filter_by_name(&listing.items, term);
        Ok(SearchResults {
            total: listing.total,
            total_filtered: items.len(),
            has_results: !items.is_empty(),
            items,
        })
    }

    // ── Detail & metadata ────────────────────────────────────────────

    /// Full record for one item by numeric id or name.
    pub async fn detail(&self, id_or_name: &str) -> Result<Arc<ItemDetail>, CoreError> {
        let key = detail_key(id_or_name);
        if key.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "item id or name must not be empty".into(),
            });
        }

        let client = &self.inner.client;
        let timeout = self.inner.config.timeout;
        let lookup = key.as_str();
        self.inner
            .details
            .fetch(key.clone(), || async move {
                let raw = client
                    .pokemon(lookup)
                    .await
                    .map_err(|e| {
                        CoreError::from(e)
                            .for_entity("item", lookup)
                            .with_timeout(timeout)
                    })?;
                Ok::<_, CoreError>(Arc::new(ItemDetail::try_from(raw)?))
            })
            .await
    }

    /// Localized descriptions for item `id`.
    pub async fn metadata(&self, id: ItemId) -> Result<Arc<ItemMetadata>, CoreError> {
        if id == 0 {
            return Err(CoreError::ValidationFailed {
                message: "item id must be a positive integer".into(),
            });
        }

        let client = &self.inner.client;
        let timeout = self.inner.config.timeout;
        self.inner
            .metadata
            .fetch(id, || async move {
                let raw = client
                    .species(id)
                    .await
                    .map_err(|e| {
                        CoreError::from(e)
                            .for_entity("metadata", id.to_string())
                            .with_timeout(timeout)
                    })?;
                Ok::<_, CoreError>(Arc::new(ItemMetadata::try_from(raw)?))
            })
            .await
    }

    /// Detail, then metadata keyed by the detail's id.
    pub async fn profile(&self, id_or_name: &str) -> Result<ItemProfile, CoreError> {
        let detail = self.detail(id_or_name).await?;
        let metadata = self.metadata(detail.id).await?;
        Ok(ItemProfile {
            description: metadata.english_description(),
            detail: ItemDetail::clone(&detail),
            metadata: ItemMetadata::clone(&metadata),
        })
    }

    /// Details for every item of a page, fetched concurrently.
    ///
    /// All-or-nothing: the first failure (in item order) fails the page,
    /// but every request still runs to completion and fills the cache.
    pub async fn page_details(
        &self,
        items: &[EnhancedItem],
    ) -> Result<Vec<Arc<ItemDetail>>, CoreError> {
        debug!(count = items.len(), "fetching page details");
        join_all(items.iter().map(|item| self.detail(&item.name)))
            .await
            .into_iter()
            .collect()
    }

    // ── Cache control ────────────────────────────────────────────────

    /// Mark every cached result stale. Returns how many were invalidated.
    pub fn invalidate_all(&self) -> usize {
        self.inner.lists.invalidate_all()
            + self.inner.details.invalidate_all()
            + self.inner.metadata.invalidate_all()
    }

    /// Drop expired, unobserved cache entries across all operations.
    pub fn collect_garbage(&self) -> usize {
        self.inner.lists.collect_garbage()
            + self.inner.details.collect_garbage()
            + self.inner.metadata.collect_garbage()
    }

    /// Cached detail for `id_or_name`, if any, without fetching.
    pub fn cached_detail(&self, id_or_name: &str) -> Option<Arc<ItemDetail>> {
        self.inner.details.get_cached(&detail_key(id_or_name))
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("base_url", &self.inner.client.base_url().as_str())
            .field("lists", &self.inner.lists.len())
            .field("details", &self.inner.details.len())
            .field("metadata", &self.inner.metadata.len())
            .finish_non_exhaustive()
    }
}
