use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use super::persist::{FavoritesPersistence, MemoryBackend};
use crate::error::CoreError;
use crate::model::ItemId;

/// Storage key for the favorites record.
pub const FAVORITES_STORAGE_KEY: &str = "pokemon-favorites-storage";

/// Version written with every record. Records with any other version
/// are discarded on load.
pub const FAVORITES_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct FavoritesRecord {
    version: u32,
    favorites: Vec<ItemId>,
}

/// Set of favorited ids, persisted on every change.
///
/// Cheap to clone; clones share the same set. Readers observe changes
/// through [`subscribe`](Self::subscribe).
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    favorites: watch::Sender<Arc<BTreeSet<ItemId>>>,
    backend: Arc<dyn FavoritesPersistence>,
}

impl FavoritesStore {
    /// Load the persisted set from `backend`.
    ///
    /// Unparseable or version-mismatched records start an empty set; the
    /// stale record is overwritten on the next mutation.
    pub fn load(backend: Arc<dyn FavoritesPersistence>) -> Result<Self, CoreError> {
        let initial = match backend.load(FAVORITES_STORAGE_KEY)? {
            None => BTreeSet::new(),
            Some(blob) => match serde_json::from_str::<FavoritesRecord>(&blob) {
                Ok(record) if record.version == FAVORITES_SCHEMA_VERSION => {
                    record.favorites.into_iter().collect()
                }
                Ok(record) => {
                    warn!(
                        found = record.version,
                        expected = FAVORITES_SCHEMA_VERSION,
                        "discarding favorites with unsupported schema version"
                    );
                    BTreeSet::new()
                }
                Err(e) => {
                    warn!(error = %e, "discarding unreadable favorites record");
                    BTreeSet::new()
                }
            },
        };

        Ok(Self {
            inner: Arc::new(StoreInner {
                favorites: watch::Sender::new(Arc::new(initial)),
                backend,
            }),
        })
    }

    /// Empty store backed by memory only.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                favorites: watch::Sender::new(Arc::new(BTreeSet::new())),
                backend: Arc::new(MemoryBackend::new()),
            }),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn contains(&self, id: ItemId) -> bool {
        self.inner.favorites.borrow().contains(&id)
    }

    pub fn snapshot(&self) -> Arc<BTreeSet<ItemId>> {
        Arc::clone(&self.inner.favorites.borrow())
    }

    pub fn len(&self) -> usize {
        self.inner.favorites.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.favorites.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<BTreeSet<ItemId>>> {
        self.inner.favorites.subscribe()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Add `id`. Returns `false` if it was already a favorite.
    pub fn add(&self, id: ItemId) -> Result<bool, CoreError> {
        self.mutate("add", |set| set.insert(id))
    }

    /// Remove `id`. Returns `false` if it was not a favorite.
    pub fn remove(&self, id: ItemId) -> Result<bool, CoreError> {
        self.mutate("remove", |set| set.remove(&id))
    }

    /// Flip membership of `id` and return the new membership.
    pub fn toggle(&self, id: ItemId) -> Result<bool, CoreError> {
        let mut member = false;
        self.mutate("toggle", |set| {
            member = !set.remove(&id);
            if member {
                set.insert(id);
            }
            true
        })?;
        Ok(member)
    }

    /// Remove every favorite. Returns how many were removed.
    pub fn clear(&self) -> Result<usize, CoreError> {
        let mut count = 0;
        self.mutate("clear", |set| {
            count = set.len();
            set.clear();
            count > 0
        })?;
        Ok(count)
    }

    /// Apply `change` to a copy of the set; if it reports a change,
    /// persist the copy and only then publish it.
    fn mutate(
        &self,
        action: &'static str,
        change: impl FnOnce(&mut BTreeSet<ItemId>) -> bool,
    ) -> Result<bool, CoreError> {
        let mut outcome = Ok(false);
        self.inner.favorites.send_if_modified(|current| {
            let mut next = BTreeSet::clone(current);
            if !change(&mut next) {
                return false;
            }
            match self.persist(&next) {
                Ok(()) => {
                    info!(action, count = next.len(), "favorites updated");
                    *current = Arc::new(next);
                    outcome = Ok(true);
                    true
                }
                Err(e) => {
                    outcome = Err(e);
                    false
                }
            }
        });
        outcome
    }

    fn persist(&self, set: &BTreeSet<ItemId>) -> Result<(), CoreError> {
        let record = FavoritesRecord {
            version: FAVORITES_SCHEMA_VERSION,
            favorites: set.iter().copied().collect(),
        };
        let blob = serde_json::to_string(&record).map_err(|e| CoreError::Storage {
            message: format!("cannot encode favorites: {e}"),
        })?;
        self.inner.backend.save(FAVORITES_STORAGE_KEY, &blob)
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("favorites", &*self.inner.favorites.borrow())
            .finish_non_exhaustive()
    }
}
