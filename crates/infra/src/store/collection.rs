//! Vec-backed collection operations shared by the backends.

use super::{Record, StoreError, StoreResult};

pub(crate) fn get<R: Record>(records: &[R], id: &R::Id) -> Option<R> {
    records.iter().find(|r| r.id() == id).cloned()
}

pub(crate) fn insert<R: Record>(records: &mut Vec<R>, record: R) -> StoreResult<()> {
    if records.iter().any(|r| r.id() == record.id()) {
        return Err(duplicate::<R>(record.id().to_string()));
    }
    if let Some(key) = record.unique_key() {
        if records.iter().any(|r| r.unique_key() == Some(key)) {
            return Err(duplicate::<R>(key.to_string()));
        }
    }
    records.push(record);
    Ok(())
}

pub(crate) fn replace<R: Record>(records: &mut [R], record: R) -> StoreResult<()> {
    if let Some(key) = record.unique_key() {
        let taken = records
            .iter()
            .any(|r| r.id() != record.id() && r.unique_key() == Some(key));
        if taken {
            return Err(duplicate::<R>(key.to_string()));
        }
    }

    let slot = records
        .iter_mut()
        .find(|r| r.id() == record.id())
        .ok_or_else(|| StoreError::NotFound {
            collection: R::COLLECTION,
            id: record.id().to_string(),
        })?;
    *slot = record;
    Ok(())
}

pub(crate) fn remove<R: Record>(records: &mut Vec<R>, id: &R::Id) -> Option<R> {
    let idx = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(idx))
}

fn duplicate<R: Record>(key: String) -> StoreError {
    StoreError::Duplicate {
        collection: R::COLLECTION,
        key,
    }
}
