use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::QueryOptions;
use super::state::{QueryState, QueryStatus};
use super::stream::QueryStream;
use crate::error::CoreError;

/// Read-through cache for one operation, keyed by its parameters.
///
/// Each key owns a `watch` channel carrying its [`QueryState`]. Readers
/// either get fresh data straight from the channel, attach to the fetch
/// already in flight, or become the single caller that runs the fetcher.
pub struct QueryCache<K, V> {
    name: &'static str,
    options: QueryOptions,
    entries: DashMap<K, Arc<QueryEntry<V>>>,
}

struct QueryEntry<V> {
    state: watch::Sender<QueryState<V>>,
}

/// Outcome of inspecting an entry on read.
enum Claim<V> {
    Fresh(V),
    /// This caller runs the fetch; `restore` is written back if it is dropped.
    Leader { restore: QueryState<V> },
    Follower,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(name: &'static str, options: QueryOptions) -> Self {
        Self {
            name,
            options,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, key: &K) -> Arc<QueryEntry<V>> {
        Arc::clone(&self.entries.entry(key.clone()).or_insert_with(|| {
            Arc::new(QueryEntry {
                state: watch::Sender::new(QueryState::Idle),
            })
        }))
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Return fresh data for `key`, fetching it with `fetcher` if needed.
    ///
    /// Concurrent calls for the same key share one fetch. Retryable
    /// failures are retried per the cache's [`RetryPolicy`](super::RetryPolicy)
    /// before the error is stored and returned to every attached caller.
    pub async fn fetch<F, Fut>(&self, key: K, fetcher: F) -> Result<V, CoreError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<V, CoreError>>,
    {
        let entry = self.entry(&key);
        loop {
            let mut rx = entry.state.subscribe();
            match self.claim(&entry) {
                Claim::Fresh(data) => {
                    debug!(query = self.name, ?key, "cache hit");
                    return Ok(data);
                }
                Claim::Leader { restore } => {
                    debug!(query = self.name, ?key, "cache miss, fetching");
                    return self.lead(&key, &entry, restore, &fetcher).await;
                }
                Claim::Follower => {
                    debug!(query = self.name, ?key, "attaching to in-flight fetch");
                    let settled = match rx.wait_for(|s| !s.is_pending()).await {
                        Ok(state) => state.clone(),
                        Err(_) => QueryState::Idle,
                    };
                    match settled {
                        QueryState::Success {
                            data,
                            invalidated: false,
                            ..
                        } => return Ok(data),
                        QueryState::Error { error, .. } => return Err(error),
                        // The leader was dropped; take over on the next pass.
                        _ => {}
                    }
                }
            }
        }
    }

    fn claim(&self, entry: &QueryEntry<V>) -> Claim<V> {
        let now = Instant::now();
        let stale_time = self.options.stale_time;
        let mut claim = Claim::Follower;

        entry.state.send_if_modified(|state| {
            if state.is_fresh(now, stale_time) {
                if let Some(data) = state.data() {
                    claim = Claim::Fresh(data.clone());
                }
                return false;
            }
            if state.is_pending() {
                return false;
            }

            let restore = match state {
                QueryState::Success {
                    data, fetched_at, ..
                } => QueryState::Success {
                    data: data.clone(),
                    updated_at: now,
                    fetched_at: *fetched_at,
                    invalidated: true,
                },
                _ => QueryState::Idle,
            };
            *state = QueryState::Pending {
                failure_count: 0,
                previous: state.data().cloned(),
            };
            claim = Claim::Leader { restore };
            true
        });

        claim
    }

    async fn lead<F, Fut>(
        &self,
        key: &K,
        entry: &QueryEntry<V>,
        restore: QueryState<V>,
        fetcher: &F,
    ) -> Result<V, CoreError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<V, CoreError>>,
    {
        let mut guard = PendingGuard {
            entry,
            restore: Some(restore),
        };
        let policy = self.options.retry;
        let mut failures: u32 = 0;

        let result = loop {
            match fetcher().await {
                Ok(data) => break Ok(data),
                Err(error) if error.is_retryable() && failures < policy.max_retries => {
                    let delay = policy.delay_for(failures);
                    failures += 1;
                    warn!(
                        query = self.name,
                        ?key,
                        attempt = failures,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "fetch failed, retrying"
                    );
                    entry.state.send_modify(|state| {
                        if let QueryState::Pending { failure_count, .. } = state {
                            *failure_count = failures;
                        }
                    });
                    tokio::time::sleep(delay).await;
                }
                Err(error) => {
                    failures += 1;
                    break Err(error);
                }
            }
        };

        guard.disarm();
        match &result {
            Ok(data) => {
                entry.state.send_replace(QueryState::Success {
                    data: data.clone(),
                    updated_at: Instant::now(),
                    fetched_at: Utc::now(),
                    invalidated: false,
                });
            }
            Err(error) => {
                debug!(query = self.name, ?key, attempts = failures, %error, "fetch failed");
                entry.state.send_replace(QueryState::Error {
                    error: error.clone(),
                    failure_count: failures,
                    updated_at: Instant::now(),
                });
            }
        }
        result
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Last good data for `key` regardless of freshness.
    pub fn get_cached(&self, key: &K) -> Option<V> {
        self.entries
            .get(key)
            .and_then(|e| e.state.borrow().data().cloned())
    }

    /// Current state of `key` (`Idle` if it was never requested).
    pub fn snapshot(&self, key: &K) -> QueryState<V> {
        self.entries
            .get(key)
            .map_or(QueryState::Idle, |e| e.state.borrow().clone())
    }

    pub fn status(&self, key: &K) -> QueryStatus {
        self.entries
            .get(key)
            .map_or(QueryStatus::Idle, |e| e.state.borrow().status())
    }

    /// Observe every transition of `key`. Creates an idle entry if needed.
    pub fn subscribe(&self, key: &K) -> QueryStream<V> {
        QueryStream::new(self.entry(key).state.subscribe())
    }

    // ── Invalidation & housekeeping ──────────────────────────────────

    /// Mark `key` stale so the next read refetches. Returns whether the
    /// entry held data to invalidate.
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| Self::invalidate_entry(&e))
    }

    pub fn invalidate_all(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| Self::invalidate_entry(e.value()))
            .count()
    }

    fn invalidate_entry(entry: &QueryEntry<V>) -> bool {
        entry.state.send_if_modified(|state| match state {
            QueryState::Success { invalidated, .. } if !*invalidated => {
                *invalidated = true;
                true
            }
            _ => false,
        })
    }

    /// Drop settled entries nobody observes that are older than `gc_time`.
    /// Returns the number of entries removed.
    pub fn collect_garbage(&self) -> usize {
        let now = Instant::now();
        let gc_time = self.options.gc_time;
        let before = self.entries.len();
        self.entries.retain(|_, entry| {
            let idle = Arc::strong_count(entry) == 1 && entry.state.receiver_count() == 0;
            let expired = entry
                .state
                .borrow()
                .settled_age(now)
                .is_some_and(|age| age >= gc_time);
            !(idle && expired)
        });
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(query = self.name, removed, "collected cache entries");
        }
        removed
    }
}

/// Puts a pending entry back the way it was if its leader is dropped
/// before the fetch settles.
struct PendingGuard<'a, V> {
    entry: &'a QueryEntry<V>,
    restore: Option<QueryState<V>>,
}

impl<V> PendingGuard<'_, V> {
    fn disarm(&mut self) {
        self.restore = None;
    }
}

impl<V> Drop for PendingGuard<'_, V> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            self.entry.state.send_replace(restore);
        }
    }
}
