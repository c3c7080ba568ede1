use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use chipreg_core::Entity;

/// A record type persisted as one collection.
pub trait Record: Entity + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name (also the file stem for file-backed stores).
    const COLLECTION: &'static str;

    /// Value that must be unique across the collection, if the type has one.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Another record already holds this id or unique key.
    #[error("{collection}: '{key}' is already taken")]
    Duplicate { collection: &'static str, key: String },

    #[error("{collection}: record {id} not found")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection}: I/O error on {path:?}: {source}")]
    Io {
        collection: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{collection}: stored data is not valid JSON: {source}")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection}: failed to serialize records: {source}")]
    Serialize {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}: lock poisoned")]
    Poisoned(&'static str),
}

/// Key-addressable record storage for one collection.
///
/// Each call is atomic with respect to the collection. `insert` and `replace`
/// reject a record whose id or [`Record::unique_key`] collides with another
/// record, under the same lock as the write itself.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn get(&self, id: &R::Id) -> StoreResult<Option<R>>;

    /// All records matching `filter`, in storage order.
    async fn list(&self, filter: &(dyn for<'a> Fn(&'a R) -> bool + Send + Sync)) -> StoreResult<Vec<R>>;

    /// First record matching `filter`.
    async fn find(&self, filter: &(dyn for<'a> Fn(&'a R) -> bool + Send + Sync)) -> StoreResult<Option<R>> {
        Ok(self.list(filter).await?.into_iter().next())
    }

    async fn insert(&self, record: R) -> StoreResult<()>;

    /// Overwrite the record with the same id.
    async fn replace(&self, record: R) -> StoreResult<()>;

    /// Remove and return the record, `None` if it did not exist.
    async fn remove(&self, id: &R::Id) -> StoreResult<Option<R>>;
}
