// ── Read-through query cache ──
//
// Per-key cache entries driven by an explicit state machine:
//
//   idle → pending → success | error
//   success → pending   (stale or invalidated, on the next read)
//   error   → pending   (on the next read)
//
// At most one fetch runs per key; concurrent readers attach to it.
// Retryable failures are retried with exponential backoff while the
// entry stays pending.

mod cache;
mod retry;
mod state;
mod stream;

use std::time::Duration;

pub use cache::QueryCache;
pub use retry::RetryPolicy;
pub use state::{QueryState, QueryStatus};
pub use stream::{QueryStream, QueryWatchStream};

/// Default window after which settled, unobserved entries may be dropped.
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(5 * 60);

/// Tunables for one [`QueryCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// How long a successful result is served without refetching.
    pub stale_time: Duration,
    /// How long a settled entry with no subscribers survives `collect_garbage`.
    pub gc_time: Duration,
    pub retry: RetryPolicy,
}

impl QueryOptions {
    pub fn with_stale_time(stale_time: Duration) -> Self {
        Self {
            stale_time,
            ..Self::default()
        }
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn gc_time(mut self, gc_time: Duration) -> Self {
        self.gc_time = gc_time;
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            gc_time: DEFAULT_GC_TIME,
            retry: RetryPolicy::default(),
        }
    }
}
