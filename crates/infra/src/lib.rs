//! Infrastructure layer: record storage and the activity log.

pub mod activity_log;
pub mod store;
pub mod stores;

pub use activity_log::ActivityLog;
pub use stores::Stores;
