use axum::{
    Router,
    routing::{get, post},
};

pub mod activities;
pub mod animals;
pub mod auth;
pub mod search;
pub mod system;

/// Endpoints reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/search/:chip_number", get(search::by_chip_number))
}

/// Endpoints that require a verified bearer token.
pub fn protected_router() -> Router {
    Router::new()
        .route("/me", get(auth::me))
        .nest("/animals", animals::router())
        .route("/activities", get(activities::recent))
}
