//! Pricing API route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

use super::config::PricingConfig;
use super::requests::{AdjustQuoteRequest, QuoteRequest};
use super::responses::{AdjustedQuoteResponse, QuoteResponse};
use super::services;

/// Pricing API router, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", post(calculate_quote))
        .route("/quote/adjust", post(adjust_quote))
        .route("/config", get(current_config))
        .route("/config/reload", post(reload_config))
        .route("/cache", get(cache_stats))
}

/// POST /api/pricing/quote
async fn calculate_quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>> {
    let Json(request) = payload?;
    let result = services::quote(&state.cache, &request).await?;

    Ok(Json(QuoteResponse {
        breakdown: result.breakdown,
        staffing_options: result.staffing_options,
        quoted_at: Utc::now(),
    }))
}

/// POST /api/pricing/quote/adjust
async fn adjust_quote(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AdjustQuoteRequest>, JsonRejection>,
) -> Result<Json<AdjustedQuoteResponse>> {
    let Json(body) = payload?;
    let quote = services::adjusted_quote(&state.cache, &body.request, &body.adjustment).await?;

    Ok(Json(AdjustedQuoteResponse {
        quote,
        quoted_at: Utc::now(),
    }))
}

/// GET /api/pricing/config
async fn current_config(State(state): State<AppState>) -> Result<Json<PricingConfig>> {
    let config = state.cache.pricing_config().await?;
    Ok(Json(PricingConfig::clone(&config)))
}

/// POST /api/pricing/config/reload
async fn reload_config(State(state): State<AppState>) -> Result<Json<PricingConfig>> {
    let config = state.cache.reload_pricing_config().await?;
    Ok(Json(PricingConfig::clone(&config)))
}

/// GET /api/pricing/cache
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
