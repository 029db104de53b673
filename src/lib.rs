//! Quote pricing engine and HTTP service for a home-cleaning business.
//!
//! The [`pricing`] module holds the engine itself: hours estimation, cleaner
//! allocation and cost aggregation over a [`pricing::PricingConfig`]. The
//! rest of the crate serves it over HTTP/JSON.

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use cache::AppCache;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: AppCache,
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/pricing", pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}
