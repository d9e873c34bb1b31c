use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError},
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{
    fs,
    sync::{Mutex, OwnedMutexGuard},
};
use tracing::debug;
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoreResult, Stored};

/// Collection document kept as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    gate: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Store with its own write gate. Use [`JsonFileStore::with_locks`] when
    /// several stores may point at the same file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            gate: Arc::default(),
        }
    }

    pub fn with_locks(path: impl Into<PathBuf>, locks: &PathLocks) -> Self {
        let path = path.into();
        let gate = locks.gate(&path);
        Self { path, gate }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4()))
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for JsonFileStore {
    async fn read(&self) -> StoreResult<Option<String>> {
        match fs::read(&self.path).await {
            // Invalid UTF-8 is left for the JSON parser to reject.
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write(&self, contents: String) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.write_error(source))?;
        }

        let temp = self.temp_path();
        let written = match fs::write(&temp, contents.as_bytes()).await {
            Ok(()) => fs::rename(&temp, &self.path).await,
            Err(err) => Err(err),
        };
        if let Err(source) = written {
            let _ = fs::remove_file(&temp).await;
            return Err(self.write_error(source));
        }

        debug!(path = %self.path.display(), bytes = contents.len(), "collection document written");
        Ok(())
    }

    async fn lock(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.gate).lock_owned().await
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Hands out one write gate per file so that every store bound to the same
/// path serializes its read-modify-write cycles.
#[derive(Debug, Default)]
pub struct PathLocks {
    gates: std::sync::Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self, path: &Path) -> Arc<Mutex<()>> {
        let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let mut gates = self.gates.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(gates.entry(key).or_default())
    }
}

/// Load the collection stored at `path`.
pub async fn load_path<T: DeserializeOwned>(
    path: impl Into<PathBuf>,
) -> StoreResult<Vec<Stored<T>>> {
    super::load(&JsonFileStore::new(path)).await
}

/// Overwrite the collection stored at `path`.
pub async fn save_path<T: Serialize + Sync>(
    path: impl Into<PathBuf>,
    docs: &[T],
) -> StoreResult<()> {
    super::save(&JsonFileStore::new(path), docs).await
}
