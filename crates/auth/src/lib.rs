//! `chipreg-auth`: password hashing and bearer tokens.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256Jwt, JwtValidator, TokenError};
pub use password::{Argon2Hasher, HashingParams, PasswordError, PasswordHasher};
