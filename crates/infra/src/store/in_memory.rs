use std::sync::RwLock;

use async_trait::async_trait;

use super::{Record, RecordStore, StoreError, StoreResult, collection};

/// In-memory collection for tests/dev. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    inner: RwLock<Vec<R>>,
}

impl<R> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> InMemoryStore<R> {
    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Vec<R>>> {
        self.inner.read().map_err(|_| StoreError::Poisoned(R::COLLECTION))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Vec<R>>> {
        self.inner.write().map_err(|_| StoreError::Poisoned(R::COLLECTION))
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for InMemoryStore<R> {
    async fn get(&self, id: &R::Id) -> StoreResult<Option<R>> {
        let records = self.read()?;
        Ok(collection::get::<R>(&records, id))
    }

    async fn list(&self, filter: &(dyn for<'a> Fn(&'a R) -> bool + Send + Sync)) -> StoreResult<Vec<R>> {
        let records = self.read()?;
        Ok(records.iter().filter(|r| filter(r)).cloned().collect())
    }

    async fn insert(&self, record: R) -> StoreResult<()> {
        let mut records = self.write()?;
        collection::insert::<R>(&mut records, record)
    }

    async fn replace(&self, record: R) -> StoreResult<()> {
        let mut records = self.write()?;
        collection::replace::<R>(&mut records, record)
    }

    async fn remove(&self, id: &R::Id) -> StoreResult<Option<R>> {
        let mut records = self.write()?;
        Ok(collection::remove::<R>(&mut records, id))
    }
}
