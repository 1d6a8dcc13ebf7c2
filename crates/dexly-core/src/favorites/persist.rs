// ── Favorites persistence port ──

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::CoreError;

/// Key-value storage for serialized favorites.
///
/// Calls are synchronous: mutations persist before they are published.
pub trait FavoritesPersistence: Send + Sync {
    /// Read the blob stored under `key`, `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn save(&self, key: &str, blob: &str) -> Result<(), CoreError>;
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> CoreError {
    CoreError::Storage {
        message: format!("cannot {action} {}: {err}", path.display()),
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl FavoritesPersistence for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error("read", &path, &e)),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| storage_error("create", &self.dir, &e))?;

        // Write-then-rename so a crash never leaves a truncated file.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, blob).map_err(|e| storage_error("write", &tmp, &e))?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(storage_error("replace", &path, &e));
        }

        debug!(path = %path.display(), "favorites saved");
        Ok(())
    }
}

/// In-process storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed `key` with `blob`.
    pub fn with_blob(key: &str, blob: impl Into<String>) -> Self {
        let backend = Self::default();
        if let Ok(mut blobs) = backend.blobs.lock() {
            blobs.insert(key.to_owned(), blob.into());
        }
        backend
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage {
        message: "in-memory favorites storage is poisoned".into(),
    }
}

impl FavoritesPersistence for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let blobs = self.blobs.lock().map_err(|_| poisoned())?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        let mut blobs = self.blobs.lock().map_err(|_| poisoned())?;
        blobs.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}
