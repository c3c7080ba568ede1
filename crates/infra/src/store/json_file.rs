//! JSON-file collection store.
//!
//! One file per collection, holding a pretty-printed JSON array:
//!
//! ```json
//! [
//!   { "id": "0190...", "chipNumber": "CH1", "petName": "Rex", ... }
//! ]
//! ```
//!
//! The collection is cached in memory. Every write goes to `<file>.tmp` and is
//! renamed over the original; the cache only changes after the rename
//! succeeds, so a failed write leaves disk and memory on the previous state.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::{Record, RecordStore, StoreError, StoreResult, collection};

#[derive(Debug)]
pub struct JsonFileStore<R> {
    path: PathBuf,
    records: RwLock<Vec<R>>,
}

impl<R: Record> JsonFileStore<R> {
    /// Open (or create) `<data_dir>/<collection>.json`.
    pub async fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)
            .await
            .map_err(|e| io_error::<R>(data_dir, e))?;

        let path = data_dir.join(format!("{}.json", R::COLLECTION));
        let records = match fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                collection: R::COLLECTION,
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                write_atomically::<R>(&path, &[]).await?;
                tracing::info!(path = %path.display(), "created empty collection file");
                Vec::new()
            }
            Err(e) => return Err(io_error::<R>(&path, e)),
        };

        tracing::debug!(
            collection = R::COLLECTION,
            count = records.len(),
            path = %path.display(),
            "collection loaded"
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `op` to a copy of the collection, persist it, then publish it.
    async fn mutate<T>(&self, op: impl FnOnce(&mut Vec<R>) -> StoreResult<T>) -> StoreResult<T> {
        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        let out = op(&mut next)?;
        write_atomically::<R>(&self.path, &next).await?;
        *guard = next;
        Ok(out)
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    async fn get(&self, id: &R::Id) -> StoreResult<Option<R>> {
        let records = self.records.read().await;
        Ok(collection::get::<R>(&records, id))
    }

    async fn list(&self, filter: &(dyn for<'a> Fn(&'a R) -> bool + Send + Sync)) -> StoreResult<Vec<R>> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter(r)).cloned().collect())
    }

    async fn insert(&self, record: R) -> StoreResult<()> {
        self.mutate(|records| collection::insert(records, record)).await
    }

    async fn replace(&self, record: R) -> StoreResult<()> {
        self.mutate(|records| collection::replace(records, record)).await
    }

    async fn remove(&self, id: &R::Id) -> StoreResult<Option<R>> {
        {
            let records = self.records.read().await;
            if collection::get::<R>(&records, id).is_none() {
                return Ok(None);
            }
        }
        self.mutate(|records| Ok(collection::remove(records, id))).await
    }
}

async fn write_atomically<R: Record>(path: &Path, records: &[R]) -> StoreResult<()> {
    let json = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Serialize {
        collection: R::COLLECTION,
        source,
    })?;

    let temp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| io_error::<R>(&temp_path, e))?;
        file.write_all(&json)
            .await
            .map_err(|e| io_error::<R>(&temp_path, e))?;
        file.sync_all()
            .await
            .map_err(|e| io_error::<R>(&temp_path, e))?;
    }

    fs::rename(&temp_path, path)
        .await
        .map_err(|e| io_error::<R>(path, e))?;

    tracing::trace!(collection = R::COLLECTION, count = records.len(), "collection written");
    Ok(())
}

fn io_error<R: Record>(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        collection: R::COLLECTION,
        path: path.to_path_buf(),
        source,
    }
}
