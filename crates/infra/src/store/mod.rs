//! Record store boundary.
//!
//! Handlers talk to a collection through [`RecordStore`]; the backends below
//! are interchangeable as long as they honour the uniqueness checks done on
//! `insert`/`replace`.

mod collection;
pub mod in_memory;
pub mod json_file;
pub mod records;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use r#trait::{Record, RecordStore, StoreError, StoreResult};
