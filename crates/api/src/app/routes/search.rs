use std::sync::Arc;

use axum::{Extension, extract::Path, response::IntoResponse};

use crate::app::dto::{self, PublicAnimalPayload};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

/// Public chip lookup; no token, reduced projection.
pub async fn by_chip_number(
    Extension(services): Extension<Arc<AppServices>>,
    Path(chip_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = services.search(&chip_number).await?;
    Ok(dto::success(PublicAnimalPayload { animal }))
}
