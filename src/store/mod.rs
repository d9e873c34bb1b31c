//! Document Store: whole-collection load/save of JSON array documents.
//!
//! A backend ([`DocumentStore`]) only moves raw text. Decoding, and the
//! normalization of missing or corrupt documents into an empty collection,
//! happens once in [`load`].

use std::{future::Future, io, path::PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;
use tracing::{trace, warn};

pub mod file;
pub mod memory;
pub mod stored;

pub use file::{JsonFileStore, PathLocks, load_path, save_path};
pub use memory::MemoryStore;
pub use stored::{Entity, Stored};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read collection document {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write collection document {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode collection document")]
    Encode(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend for exactly one collection document.
pub trait DocumentStore: Send + Sync + 'static {
    /// Raw document text, or `None` when the document does not exist.
    fn read(&self) -> impl Future<Output = StoreResult<Option<String>>> + Send;

    /// Replace the whole document.
    fn write(&self, contents: String) -> impl Future<Output = StoreResult<()>> + Send;

    /// Exclusive access for one read-modify-write cycle.
    fn lock(&self) -> impl Future<Output = OwnedMutexGuard<()>> + Send;

    /// Human readable location, used in logs.
    fn location(&self) -> String;
}

/// Load a collection, treating a missing or malformed document as empty.
pub async fn load<S, T>(store: &S) -> StoreResult<Vec<Stored<T>>>
where
    S: DocumentStore,
    T: DeserializeOwned,
{
    match store.read().await? {
        Some(text) => Ok(decode_collection(&text, &store.location())),
        None => {
            trace!(location = %store.location(), "collection document missing, using empty collection");
            Ok(Vec::new())
        }
    }
}

/// Write the full collection as pretty printed JSON.
pub async fn save<S, T>(store: &S, docs: &[T]) -> StoreResult<()>
where
    S: DocumentStore,
    T: Serialize + Sync,
{
    let text = encode_collection(docs)?;
    store.write(text).await
}

pub fn encode_collection<T: Serialize>(docs: &[T]) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(docs)?)
}

/// Only a document that is not an array of objects is discarded; each object
/// that does not decode into `T` is kept as [`Stored::Raw`].
pub fn decode_collection<T: DeserializeOwned>(text: &str, location: &str) -> Vec<Stored<T>> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            warn!(location, error = %err, "collection document is not valid JSON, using empty collection");
            return Vec::new();
        }
    };

    let Value::Array(items) = value else {
        warn!(location, "collection document is not a JSON array, using empty collection");
        return Vec::new();
    };
    if !items.iter().all(Value::is_object) {
        warn!(location, "collection document is not an array of objects, using empty collection");
        return Vec::new();
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match serde_json::from_value(item.clone()) {
            Ok(entity) => Stored::Entity(entity),
            Err(err) => {
                warn!(location, index, error = %err, "collection entry kept as stored, it does not match the entity shape");
                Stored::Raw(item)
            }
        })
        .collect()
}
