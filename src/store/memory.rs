use std::sync::{
    Arc, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{DocumentStore, StoreResult};

/// In-memory collection document, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: std::sync::Mutex<Option<String>>,
    writes: AtomicUsize,
    gate: Arc<Mutex<()>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: std::sync::Mutex::new(Some(text.into())),
            ..Self::default()
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of completed writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl DocumentStore for MemoryStore {
    async fn read(&self) -> StoreResult<Option<String>> {
        Ok(self.contents())
    }

    async fn write(&self, contents: String) -> StoreResult<()> {
        *self.contents.lock().unwrap_or_else(PoisonError::into_inner) = Some(contents);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn lock(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.gate).lock_owned().await
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
