//! Bounded, append-only activity log on top of a record store.

use std::cmp::Reverse;
use std::sync::Arc;

use chipreg_core::UserId;
use chipreg_registry::Activity;

use crate::store::{RecordStore, StoreResult};

/// Entries kept in the collection after each append.
pub const DEFAULT_RETENTION: usize = 50;

/// Entries returned per user on read.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone)]
pub struct ActivityLog {
    store: Arc<dyn RecordStore<Activity>>,
    retention: usize,
}

impl ActivityLog {
    pub fn new(store: Arc<dyn RecordStore<Activity>>, retention: usize) -> Self {
        Self { store, retention }
    }

    /// Append `entry`, then drop everything older than the newest `retention` entries.
    pub async fn append(&self, entry: Activity) -> StoreResult<()> {
        self.store.insert(entry).await?;
        let pruned = self.prune().await?;
        if pruned > 0 {
            tracing::debug!(pruned, retention = self.retention, "activity log pruned");
        }
        Ok(())
    }

    /// The newest `limit` entries of `user_id`, most recent first.
    pub async fn recent_for(&self, user_id: UserId, limit: usize) -> StoreResult<Vec<Activity>> {
        let mut entries = self.store.list(&|a: &Activity| a.user_id == user_id).await?;
        entries.sort_by_key(|a| Reverse(a.recency()));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn prune(&self) -> StoreResult<usize> {
        let mut all = self.store.list(&|_: &Activity| true).await?;
        if all.len() <= self.retention {
            return Ok(0);
        }

        all.sort_by_key(|a| Reverse(a.recency()));
        let stale = all.split_off(self.retention);
        for entry in &stale {
            self.store.remove(&entry.id).await?;
        }
        Ok(stale.len())
    }
}
