use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use chipreg_auth::{PasswordError, TokenError};
use chipreg_core::{DomainError, Violations};
use chipreg_infra::store::StoreError;

/// Every failure a handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad or incomplete input; lists every violated rule.
    #[error("{0}")]
    Validation(Violations),

    #[error("{0}")]
    Conflict(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid phone or password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(rule: impl Into<String>) -> Self {
        let mut violations = Violations::new();
        violations.push(rule);
        Self::Validation(violations)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a store failure, turning a uniqueness clash into `Conflict(message)`.
    pub fn from_store(err: StoreError, conflict_message: &str) -> Self {
        match err {
            StoreError::Duplicate { .. } => Self::Conflict(conflict_message.to_string()),
            other => Self::from(other),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(violations) => Self::Validation(violations),
            DomainError::InvalidId(msg) => Self::validation(msg),
            DomainError::NotFound(what) => Self::NotFound(what),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(anyhow::Error::new(err).context("data store failure"))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(anyhow::Error::new(err).context("password hashing failed"))
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        Self::Internal(anyhow::Error::new(err).context("token signing failed"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        }
        json_error(self.status(), self.to_string())
    }
}

/// `{"error": message}` with the given status.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
