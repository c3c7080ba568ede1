//! Per-user activity log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chipreg_core::{ActivityId, Entity, UserId};

use crate::animal::Animal;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    AnimalAdded,
    AnimalUpdated,
    AnimalDeleted,
}

/// Append-only log entry, created as a side effect of animal mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub user_id: UserId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default)]
    pub kind: Option<ActivityKind>,
}

impl Activity {
    pub fn new(user_id: UserId, kind: ActivityKind, message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ActivityId::new(),
            user_id,
            message: message.into(),
            timestamp: now,
            kind: Some(kind),
        }
    }

    pub fn animal_added(user_id: UserId, animal: &Animal, now: DateTime<Utc>) -> Self {
        let msg = format!("Added pet: {}", animal.details.pet_name);
        Self::new(user_id, ActivityKind::AnimalAdded, msg, now)
    }

    pub fn animal_updated(user_id: UserId, animal: &Animal, now: DateTime<Utc>) -> Self {
        let msg = format!("Updated pet: {}", animal.details.pet_name);
        Self::new(user_id, ActivityKind::AnimalUpdated, msg, now)
    }

    pub fn animal_deleted(user_id: UserId, animal: &Animal, now: DateTime<Utc>) -> Self {
        let msg = format!("Deleted pet: {}", animal.details.pet_name);
        Self::new(user_id, ActivityKind::AnimalDeleted, msg, now)
    }

    /// Sort key for "most recent first" listings.
    pub fn recency(&self) -> (DateTime<Utc>, ActivityId) {
        (self.timestamp, self.id)
    }
}

impl Entity for Activity {
    type Id = ActivityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
