//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing records). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed one or more validation rules.
    #[error("{0}")]
    Validation(Violations),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found (or is not visible to the caller).
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound(what)
    }
}

impl From<Violations> for DomainError {
    fn from(value: Violations) -> Self {
        Self::Validation(value)
    }
}

/// Collects every violated validation rule instead of stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rule` when `violated` holds.
    pub fn check(&mut self, violated: bool, rule: impl Into<String>) -> &mut Self {
        if violated {
            self.0.push(rule.into());
        }
        self
    }

    pub fn push(&mut self, rule: impl Into<String>) {
        self.0.push(rule.into());
    }

    pub fn rules(&self) -> &[String] {
        &self.0
    }

    /// `Ok(())` when nothing was recorded, otherwise a `Validation` error.
    pub fn into_result(self) -> DomainResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}
