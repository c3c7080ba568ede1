use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use chipreg_auth::JwtValidator;

use crate::app::errors::{self, ApiError};
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Require a valid bearer token and expose the caller as [`PrincipalContext`].
///
/// A missing or malformed header is 401; a token that fails verification is 403.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        ApiError::InvalidToken
    })?;

    req.extensions_mut()
        .insert(PrincipalContext::new(claims.id));

    Ok(next.run(req).await)
}

/// Replace the timeout layer's empty 408 with the usual `{"error": ...}` body.
pub async fn timeout_as_json(res: Response) -> Response {
    if res.status() == StatusCode::REQUEST_TIMEOUT && !res.headers().contains_key(CONTENT_TYPE) {
        return errors::json_error(StatusCode::REQUEST_TIMEOUT, "request timed out");
    }
    res
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ApiError::Unauthenticated)?;

    let header = header.to_str().map_err(|_| ApiError::Unauthenticated)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthenticated)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(ApiError::Unauthenticated);
    }

    Ok(token)
}
