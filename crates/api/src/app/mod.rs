//! HTTP API application wiring (axum router + service wiring).
//!
//! - `services.rs`: the registry operations, over the stores and auth codecs
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request extraction and response envelopes
//! - `errors.rs`: error kinds and their `{"error": ...}` responses

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{Extension, Router, http::StatusCode};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use chipreg_auth::{Argon2Hasher, Hs256Jwt, JwtValidator};
use chipreg_infra::Stores;

use crate::config::{Config, StoreBackend};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::{AppServices, ServiceSettings};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &Config) -> anyhow::Result<Router> {
    let stores = match config.store_backend {
        StoreBackend::Memory => Stores::in_memory(),
        StoreBackend::File => Stores::json_files(&config.data_dir)
            .await
            .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?,
    };

    let jwt = Arc::new(Hs256Jwt::new(config.jwt_secret.as_bytes(), config.token_ttl));
    let hasher = Argon2Hasher::new(config.hashing).context("invalid password hashing parameters")?;

    let services = AppServices::new(
        stores,
        jwt.clone(),
        Arc::new(hasher),
        ServiceSettings {
            activity_retention: config.activity_retention,
            activity_page_size: config.activity_page_size,
        },
    )
    .await?;

    tracing::info!(backend = ?config.store_backend, "registry services ready");
    Ok(router(Arc::new(services), jwt, config.request_timeout))
}

/// Assemble routes and layers around already built services.
pub fn router(services: Arc<AppServices>, jwt: Arc<dyn JwtValidator>, request_timeout: Duration) -> Router {
    let auth_state = middleware::AuthState { jwt };

    // Protected routes: require a verified bearer token.
    let protected = routes::protected_router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let api = routes::public_router().merge(protected);

    let app = Router::new()
        .nest("/api", api)
        .fallback(routes::system::not_found)
        .layer(Extension(services));

    with_http_layers(app, request_timeout)
}

/// Tracing, CORS and the request timeout. A timed-out request is answered
/// with a JSON error like every other failure.
fn with_http_layers(app: Router, request_timeout: Duration) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(axum::middleware::map_response(middleware::timeout_as_json))
            .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout)),
    )
}
