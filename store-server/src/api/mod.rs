//! API routing
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - registration, login, profile
//! - [`products`] - product catalog CRUD
//! - [`orders`] - order CRUD
//!
//! All resource routers are merged behind the auth middleware; CORS and
//! request tracing wrap the whole stack.

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::require_auth;
use crate::core::ServerState;
use crate::utils::AppError;

/// Build the application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(orders::router())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::not_found("Route not found")
}
