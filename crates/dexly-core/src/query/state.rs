use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{Display, EnumString};
use tokio::time::Instant;

use crate::error::CoreError;

/// Coarse status of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Full state of one cache entry.
#[derive(Debug, Clone)]
pub enum QueryState<V> {
    /// Never fetched, or a dropped fetch had nothing to fall back to.
    Idle,
    /// A fetch is in flight. `previous` keeps the last good data visible.
    Pending {
        failure_count: u32,
        previous: Option<V>,
    },
    Success {
        data: V,
        updated_at: Instant,
        fetched_at: DateTime<Utc>,
        /// Set by `invalidate`; the next read refetches.
        invalidated: bool,
    },
    Error {
        error: CoreError,
        /// Total failed attempts, including the final one.
        failure_count: u32,
        updated_at: Instant,
    },
}

impl<V> QueryState<V> {
    pub fn status(&self) -> QueryStatus {
        match self {
            Self::Idle => QueryStatus::Idle,
            Self::Pending { .. } => QueryStatus::Pending,
            Self::Success { .. } => QueryStatus::Success,
            Self::Error { .. } => QueryStatus::Error,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Last good data, including the placeholder kept while pending.
    pub fn data(&self) -> Option<&V> {
        match self {
            Self::Success { data, .. } => Some(data),
            Self::Pending { previous, .. } => previous.as_ref(),
            Self::Idle | Self::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&CoreError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn failure_count(&self) -> u32 {
        match self {
            Self::Pending { failure_count, .. } | Self::Error { failure_count, .. } => {
                *failure_count
            }
            Self::Idle | Self::Success { .. } => 0,
        }
    }

    /// Wall-clock time of the last successful fetch.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Success { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    /// Whether a read at `now` may be served without a fetch.
    pub(crate) fn is_fresh(&self, now: Instant, stale_time: Duration) -> bool {
        match self {
            Self::Success {
                updated_at,
                invalidated,
                ..
            } => !invalidated && now.saturating_duration_since(*updated_at) < stale_time,
            _ => false,
        }
    }

    /// Time since the entry settled, `None` while pending.
    pub(crate) fn settled_age(&self, now: Instant) -> Option<Duration> {
        match self {
            Self::Idle => Some(Duration::MAX),
            Self::Pending { .. } => None,
            Self::Success { updated_at, .. } | Self::Error { updated_at, .. } => {
                Some(now.saturating_duration_since(*updated_at))
            }
        }
    }
}
