// ── Reactive query streams ──
//
// Subscription handle for one cache key.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::state::QueryState;

/// A subscription to one cache entry.
///
/// Offers the state seen at creation, the latest state, and change
/// notification via [`changed`](Self::changed) or as a `Stream`.
pub struct QueryStream<V: Clone + Send + Sync + 'static> {
    current: QueryState<V>,
    receiver: watch::Receiver<QueryState<V>>,
}

impl<V: Clone + Send + Sync + 'static> QueryStream<V> {
    pub(crate) fn new(receiver: watch::Receiver<QueryState<V>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    pub fn current(&self) -> &QueryState<V> {
        &self.current
    }

    pub fn latest(&self) -> QueryState<V> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next transition. `None` once the entry is gone.
    pub async fn changed(&mut self) -> Option<QueryState<V>> {
        self.receiver.changed().await.ok()?;
        let state = self.receiver.borrow_and_update().clone();
        self.current = state.clone();
        Some(state)
    }

    pub fn into_stream(self) -> QueryWatchStream<V> {
        QueryWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding every observed state of one entry.
pub struct QueryWatchStream<V: Clone + Send + Sync + 'static> {
    inner: WatchStream<QueryState<V>>,
}

impl<V: Clone + Send + Sync + 'static> Stream for QueryWatchStream<V> {
    type Item = QueryState<V>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
