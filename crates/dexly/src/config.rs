//! CLI configuration: thin wrapper around `dexly_config` shared types.
//!
//! Loads the config file and environment, then applies `GlobalOpts` flag
//! overrides (--base-url, --timeout, --data-dir, ...) on top.

use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;

use dexly_core::{Catalog, CatalogConfig, FavoritesStore, FileBackend};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use dexly_config::{Config, config_path, load_config, save_config};

// ── Resolved session ────────────────────────────────────────────────

/// Everything a command handler needs, resolved from config + flags.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: Config,
    pub catalog_config: CatalogConfig,
    pub favorites_dir: PathBuf,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
}

impl Session {
    /// Open the favorites file in the data directory.
    pub fn favorites(&self) -> Result<FavoritesStore, CliError> {
        let backend = Arc::new(FileBackend::new(&self.favorites_dir));
        Ok(FavoritesStore::load(backend)?)
    }

    /// Build the catalog facade with this session's favorites.
    pub fn catalog(&self) -> Result<Catalog, CliError> {
        let favorites = self.favorites()?;
        Ok(Catalog::new(self.catalog_config.clone(), favorites)?)
    }

    /// Table output on an interactive terminal, where a spinner helps.
    pub fn interactive(&self) -> bool {
        self.output == OutputFormat::Table && !self.quiet && output::stderr_is_terminal()
    }
}

/// Resolve a session from the config file, `DEXLY_*` env and flags.
///
/// Flags take priority over the file and environment.
pub fn resolve(global: &GlobalOpts) -> Result<Session, CliError> {
    let config = load_config()?;
    resolve_with(config, global)
}

pub fn resolve_with(mut config: Config, global: &GlobalOpts) -> Result<Session, CliError> {
    if let Some(ref url) = global.base_url {
        config.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        config.api.timeout = timeout;
    }
    if let Some(ref dir) = global.data_dir {
        config.favorites.dir = Some(dir.clone());
    }

    let catalog_config = config.to_catalog_config()?;
    let favorites_dir = config.favorites_dir();

    let output = match global.output {
        Some(format) => format,
        None => parse_setting::<OutputFormat>("defaults.output", &config.defaults.output)?,
    };
    let color_mode = match global.color {
        Some(mode) => mode,
        None => parse_setting::<ColorMode>("defaults.color", &config.defaults.color)?,
    };

    Ok(Session {
        catalog_config,
        favorites_dir,
        output,
        color: output::should_color(color_mode),
        quiet: global.quiet,
        yes: global.yes,
        config,
    })
}

fn parse_setting<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unknown value '{value}'"),
    })
}
