// dexly-core: Catalog query layer between dexly-api and consumers (CLI).

pub mod browser;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod model;
pub mod pagination;
pub mod query;

// ── Primary re-exports ──────────────────────────────────────────────
pub use browser::{BrowseQuery, Browser, GridItem, GridPage, LoadStatus, PageLoad, PageState};
pub use catalog::{Catalog, ItemListing, SearchResults};
pub use config::{CatalogConfig, DEFAULT_BASE_URL};
pub use error::CoreError;
pub use favorites::{
    FAVORITES_SCHEMA_VERSION, FAVORITES_STORAGE_KEY, FavoritesPersistence, FavoritesStore,
    FileBackend, MemoryBackend,
};
pub use filter::ItemFilter;
pub use pagination::Pager;
pub use query::{QueryCache, QueryOptions, QueryState, QueryStatus, RetryPolicy};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Ability, EnhancedItem, ItemDetail, ItemId, ItemMetadata, ItemProfile, ItemSummary, ListPage,
    LocalizedText, Sprites, StatValue, TypeSlot,
};
