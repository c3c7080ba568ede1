use std::sync::Arc;

use axum::{
    Extension, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use chipreg_registry::{AnimalPatch, NewAnimal};

use crate::app::dto::{self, AnimalPayload, AnimalsPayload, ApiJson, Nothing};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_animals).post(add_animal))
        .route("/:id", get(get_animal).put(update_animal).delete(delete_animal))
}

pub async fn add_animal(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    ApiJson(body): ApiJson<NewAnimal>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = services.add_animal(&principal, body).await?;
    Ok((StatusCode::CREATED, dto::success_with("pet added", AnimalPayload { animal })))
}

pub async fn list_animals(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<impl IntoResponse, ApiError> {
    let animals = services.list_animals(&principal).await?;
    Ok(dto::success(AnimalsPayload { animals }))
}

pub async fn get_animal(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = services.get_animal(&principal, &id).await?;
    Ok(dto::success(AnimalPayload { animal }))
}

pub async fn update_animal(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<AnimalPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = services.update_animal(&principal, &id, patch).await?;
    Ok(dto::success_with("pet updated", AnimalPayload { animal }))
}

pub async fn delete_animal(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    services.delete_animal(&principal, &id).await?;
    Ok(dto::success_with("pet deleted", Nothing {}))
}
