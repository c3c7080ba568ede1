//! Store wiring for the three registry collections.

use std::path::Path;
use std::sync::Arc;

use chipreg_registry::{Activity, Animal, User};

use crate::store::{InMemoryStore, JsonFileStore, RecordStore, StoreResult};

/// Handles to every collection, backend-erased.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn RecordStore<User>>,
    pub animals: Arc<dyn RecordStore<Animal>>,
    pub activities: Arc<dyn RecordStore<Activity>>,
}

impl Stores {
    /// Volatile stores (dev/test).
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStore::<User>::new()),
            animals: Arc::new(InMemoryStore::<Animal>::new()),
            activities: Arc::new(InMemoryStore::<Activity>::new()),
        }
    }

    /// One JSON file per collection under `data_dir`.
    pub async fn json_files(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = data_dir.as_ref();
        Ok(Self {
            users: Arc::new(JsonFileStore::<User>::open(dir).await?),
            animals: Arc::new(JsonFileStore::<Animal>::open(dir).await?),
            activities: Arc::new(JsonFileStore::<Activity>::open(dir).await?),
        })
    }
}
