//! Request extraction and response envelopes.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use chipreg_registry::{Activity, Animal, PublicAnimal, UserView};

use crate::app::errors::ApiError;

// -------------------------
// Request extraction
// -------------------------

/// `axum::Json`, but a bad body is answered as a validation error in the
/// usual `{"error": ...}` shape instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(rejection.body_text())),
        }
    }
}

// -------------------------
// Response envelopes
// -------------------------

/// `{"success": true, "message"?: ..., ...payload}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(flatten)]
    payload: T,
}

pub fn success<T: Serialize>(payload: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        message: None,
        payload,
    })
}

/// Like [`success`], with a human-readable confirmation for the client to show.
pub fn success_with<T: Serialize>(message: &'static str, payload: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        message: Some(message),
        payload,
    })
}

#[derive(Debug, Serialize)]
pub struct Nothing {}

#[derive(Debug, Serialize)]
pub struct HealthPayload {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SessionPayload {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct AnimalPayload {
    pub animal: Animal,
}

#[derive(Debug, Serialize)]
pub struct AnimalsPayload {
    pub animals: Vec<Animal>,
}

#[derive(Debug, Serialize)]
pub struct PublicAnimalPayload {
    pub animal: PublicAnimal,
}

#[derive(Debug, Serialize)]
pub struct ActivitiesPayload {
    pub activities: Vec<Activity>,
}
