//! `chipreg-core`: shared domain building blocks.
//!
//! This crate holds **pure domain** primitives (no storage or transport concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, Violations};
pub use id::{ActivityId, AnimalId, UserId};
