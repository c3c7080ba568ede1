//! Registry domain module.
//!
//! Records and business rules for account holders, their animals and the
//! activity log, implemented as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod activity;
pub mod animal;
pub mod user;

mod text;

pub use activity::{Activity, ActivityKind};
pub use animal::{Animal, AnimalDetails, AnimalPatch, AnimalRegistration, NewAnimal, PublicAnimal};
pub use user::{Credentials, LoginAttempt, NewUser, Registration, User, UserView, MIN_PASSWORD_LEN};
