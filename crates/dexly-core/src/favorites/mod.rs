// ── Favorites ──
//
// A process-wide set of favorited item ids behind an explicit store
// object. Every mutation is written through a `FavoritesPersistence`
// port before it becomes visible.

mod persist;
mod store;

pub use persist::{FavoritesPersistence, FileBackend, MemoryBackend};
pub use store::{FAVORITES_SCHEMA_VERSION, FAVORITES_STORAGE_KEY, FavoritesStore};
