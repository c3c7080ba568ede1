use std::sync::Arc;

use axum::{Extension, response::IntoResponse};

use crate::app::dto::{self, ActivitiesPayload};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// The caller's most recent activity, newest first.
pub async fn recent(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    let activities = services.activities(&principal).await?;
    Ok(dto::success(ActivitiesPayload { activities }))
}
