//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use dexly_config::ConfigError;
use dexly_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the catalog at {url}")]
    #[diagnostic(
        code(dexly::connection_failed),
        help(
            "Check your network connection and try again.\n\
             Cause: {reason}\n\
             A different API root can be set with --base-url."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("The catalog did not answer in time")]
    #[diagnostic(
        code(dexly::timeout),
        help("Try again, or raise the limit with --timeout.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(dexly::not_found),
        help("Check the spelling, or find names with: dexly list --search <TEXT>")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Catalog request failed ({status}): {message}")]
    #[diagnostic(code(dexly::api_error), help("Something went wrong. Try again later."))]
    ApiError { status: String, message: String },

    #[error("Unexpected catalog response: {message}")]
    #[diagnostic(code(dexly::malformed_response))]
    MalformedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dexly::validation))]
    Validation { field: String, reason: String },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Favorites could not be saved or read: {message}")]
    #[diagnostic(
        code(dexly::storage),
        help("Check that the data directory is writable, or pick another with --data-dir.")
    )]
    Storage { message: String },

    #[error("Configuration could not be loaded: {message}")]
    #[diagnostic(
        code(dexly::config),
        help("Inspect the file printed by: dexly config path")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(dexly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(dexly::prompt))]
    Prompt(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode output as JSON: {0}")]
    #[diagnostic(code(dexly::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not encode output as YAML: {0}")]
    #[diagnostic(code(dexly::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not encode output as TOML: {0}")]
    #[diagnostic(code(dexly::toml))]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout { .. } => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::Api { message, status } => CliError::ApiError {
                status: status.map_or_else(|| "no status".into(), |s| s.to_string()),
                message,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Storage { message } => CliError::Storage { message },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::Toml(e),
            other @ ConfigError::Figment(_) => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
