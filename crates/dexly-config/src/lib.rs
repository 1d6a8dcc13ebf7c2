//! Shared configuration for the dexly CLI.
//!
//! TOML file in the platform config directory, layered under
//! `DEXLY_`-prefixed environment variables, and translation to
//! `dexly_core::CatalogConfig`. The CLI adds flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dexly_core::{CatalogConfig, DEFAULT_BASE_URL, QueryOptions, RetryPolicy};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub defaults: Defaults,
    pub api: ApiSection,
    pub cache: CacheSection,
    pub browse: BrowseSection,
    pub favorites: FavoritesSection,
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Defaults {
    /// `table`, `json`, `json-compact`, `yaml` or `plain`.
    pub output: String,
    /// `auto`, `always` or `never`.
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: "table".into(),
            color: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// `limit` for the full-list request behind search and favorites.
    pub full_list_limit: u32,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: 30,
            full_list_limit: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSection {
    pub list_stale_secs: u64,
    pub detail_stale_secs: u64,
    pub metadata_stale_secs: u64,
    pub gc_secs: u64,
    pub retries: u32,
    pub retry_base_ms: u64,
    pub retry_max_ms: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            list_stale_secs: 5 * 60,
            detail_stale_secs: 10 * 60,
            metadata_stale_secs: 10 * 60,
            gc_secs: 5 * 60,
            retries: 3,
            retry_base_ms: 1000,
            retry_max_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowseSection {
    pub page_size: usize,
    pub page_window: usize,
}

impl Default for BrowseSection {
    fn default() -> Self {
        Self {
            page_size: 30,
            page_window: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FavoritesSection {
    /// Directory holding the favorites file (defaults to the data dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "dexly", "dexly")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "dexly", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for local state (the favorites file).
pub fn data_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "share", "dexly"]),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing files are fine) layered under `DEXLY_*`
/// environment variables. Nested keys use `__`, e.g.
/// `DEXLY_CACHE__RETRIES=5`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DEXLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core config ──────────────────────────────────────

impl Config {
    /// Directory for the favorites file.
    pub fn favorites_dir(&self) -> PathBuf {
        self.favorites.dir.clone().unwrap_or_else(data_dir)
    }

    /// Validate and build the runtime `CatalogConfig`.
    pub fn to_catalog_config(&self) -> Result<CatalogConfig, ConfigError> {
        let base_url: url::Url =
            self.api
                .base_url
                .parse()
                .map_err(|_| ConfigError::Validation {
                    field: "api.base_url".into(),
                    reason: format!("invalid URL: {}", self.api.base_url),
                })?;
        if self.browse.page_size == 0 {
            return Err(ConfigError::Validation {
                field: "browse.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.browse.page_window == 0 {
            return Err(ConfigError::Validation {
                field: "browse.page_window".into(),
                reason: "must be at least 1".into(),
            });
        }

        let cache = &self.cache;
        let retry = RetryPolicy {
            max_retries: cache.retries,
            base_delay: Duration::from_millis(cache.retry_base_ms),
            max_delay: Duration::from_millis(cache.retry_max_ms),
        };
        let gc_time = Duration::from_secs(cache.gc_secs);
        let options = |stale_secs: u64| {
            QueryOptions::with_stale_time(Duration::from_secs(stale_secs))
                .gc_time(gc_time)
                .retry(retry)
        };

        Ok(CatalogConfig {
            base_url: base_url.into(),
            timeout: Duration::from_secs(self.api.timeout),
            full_list_limit: self.api.full_list_limit,
            page_size: self.browse.page_size,
            page_window: self.browse.page_window,
            list_query: options(cache.list_stale_secs),
            detail_query: options(cache.detail_stale_secs),
            metadata_query: options(cache.metadata_stale_secs),
        })
    }
}
