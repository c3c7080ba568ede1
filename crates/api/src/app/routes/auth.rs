use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::IntoResponse};

use chipreg_registry::{Credentials, NewUser};

use crate::app::dto::{self, ApiJson, SessionPayload, UserPayload};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = services.register(body).await?;
    Ok((StatusCode::CREATED, dto::success_with("registration successful", SessionPayload { token, user })))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = services.login(body).await?;
    Ok(dto::success_with("login successful", SessionPayload { token, user }))
}

pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    let user = services.me(&principal).await?;
    Ok(dto::success(UserPayload { user }))
}
