// ── Core error types ──
//
// User-facing errors from dexly-core. Consumers never see reqwest errors
// or raw JSON failures directly: the `From<dexly_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.
//
// `CoreError` is `Clone` so a settled query can hand the same failure to
// every caller that attached to it.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach catalog at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Malformed catalog response: {message}")]
    MalformedResponse { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if the server answered).
        status: Option<u16>,
    },

    // ── Caller errors ────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Favorites storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Whether the query layer should retry the operation that produced
    /// this error. Only failures that may succeed on a second attempt
    /// qualify: lost connections, timeouts, 5xx and 429.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => status.is_none_or(|s| s == 429 || s >= 500),
            _ => false,
        }
    }

    /// Re-label a generic `NotFound` with the entity the caller asked for.
    pub(crate) fn for_entity(self, entity_type: &str, identifier: impl Into<String>) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: entity_type.into(),
                identifier: identifier.into(),
            },
            other => other,
        }
    }

    /// Fill in the request timeout the client was configured with.
    pub(crate) fn with_timeout(self, timeout: std::time::Duration) -> Self {
        match self {
            Self::Timeout { .. } => Self::Timeout {
                timeout_secs: timeout.as_secs(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dexly_api::Error> for CoreError {
    fn from(err: dexly_api::Error) -> Self {
        match err {
            dexly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            dexly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            dexly_api::Error::ClientBuild(message) => CoreError::Config { message },
            dexly_api::Error::Http { status: 404, path, .. } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: path,
            },
            dexly_api::Error::Http {
                status,
                path,
                message,
            } => CoreError::Api {
                message: format!("{path}: {message}"),
                status: Some(status),
            },
            dexly_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
            dexly_api::Error::InvalidArgument { field, reason } => CoreError::ValidationFailed {
                message: format!("{field} {reason}"),
            },
        }
    }
}
