//! Account holders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chipreg_core::{DomainResult, Entity, UserId, Violations};

use crate::text;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Stored account record.
///
/// # Invariants
/// - `phone` is unique across all users (enforced by the store on insert).
/// - `password_hash` never leaves the server; responses use [`UserView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password_hash: String,
    pub registration_date: DateTime<Utc>,
}

impl User {
    /// Build a new account from a validated registration and an already computed hash.
    pub fn register(registration: &Registration, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            full_name: registration.full_name.clone(),
            phone: registration.phone.clone(),
            email: registration.email.clone(),
            password_hash,
            registration_date: now,
        }
    }

    pub fn view(&self) -> UserView {
        UserView::from(self)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A user as returned to clients (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub registration_date: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            registration_date: user.registration_date,
        }
    }
}

/// Raw registration request, as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Registration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub password: String,
}

impl NewUser {
    /// Check every registration rule, reporting all failures at once.
    pub fn validate(self) -> DomainResult<Registration> {
        let full_name = text::required(self.full_name);
        let phone = text::required(self.phone);
        let email = text::optional(self.email);
        let password = self.password.unwrap_or_default();

        let mut violations = Violations::new();
        violations
            .check(full_name.is_empty(), "fullName is required")
            .check(phone.is_empty(), "phone is required");
        if password.is_empty() {
            violations.push("password is required");
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            violations.push(format!("password must be at least {MIN_PASSWORD_LEN} characters"));
        }
        violations.into_result()?;

        Ok(Registration {
            full_name,
            phone,
            email,
            password,
        })
    }
}

/// Raw login request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    pub phone: Option<String>,
    pub password: Option<String>,
}

/// Login request with both fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAttempt {
    pub phone: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(self) -> DomainResult<LoginAttempt> {
        let phone = text::required(self.phone);
        let password = self.password.unwrap_or_default();

        let mut violations = Violations::new();
        violations
            .check(phone.is_empty(), "phone is required")
            .check(password.is_empty(), "password is required");
        violations.into_result()?;

        Ok(LoginAttempt { phone, password })
    }
}
