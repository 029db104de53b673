//! Tests for the pricing HTTP endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cleaning_quotes::{cache::AppCache, pricing::ConfigStore, AppState};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a fresh config file in a temporary directory
fn create_test_router() -> (Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path().join("pricing_config.json"));
    let state = AppState {
        cache: AppCache::new(store, Duration::from_secs(60)),
    };
    (cleaning_quotes::app(state), dir)
}

fn quote_body() -> Value {
    json!({
        "property": {
            "region": "Bedfordshire",
            "property_size": "2 Bedroom",
            "num_bathrooms": 1,
            "num_reception_rooms": 1
        },
        "service": {
            "service_type": "Regular Clean",
            "cleanliness_level": "Normal",
            "pet_status": "No Pets",
            "cleaning_materials": false,
            "additional_services": {}
        }
    })
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_post_quote() {
    let (app, _dir) = create_test_router();

    let (status, body) = send(app, "POST", "/api/pricing/quote", Some(quote_body())).await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &body["breakdown"];
    assert_eq!(decimal(&breakdown["total_price"]), dec!(91));
    assert_eq!(decimal(&breakdown["hours_required"]), dec!(3.5));
    assert_eq!(breakdown["cleaners_required"], 1);
    assert_eq!(body["staffing_options"].as_array().unwrap().len(), 3);
    assert!(body["quoted_at"].is_string());
}

#[tokio::test]
async fn test_post_quote_with_add_ons_lists_staffing_rules() {
    let (app, _dir) = create_test_router();
    let mut body = quote_body();
    body["service"]["additional_services"] = json!({ "external_windows": true });

    let (status, body) = send(app, "POST", "/api/pricing/quote", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &body["breakdown"];
    assert_eq!(breakdown["cleaners_required"], 2);
    assert_eq!(decimal(&breakdown["hours_required"]), dec!(1.75));
    assert_eq!(breakdown["staffing_rules_applied"], json!(["external_windows_extra_cleaner"]));
    assert_eq!(breakdown["additional_services"][0]["service"], "external_windows");
}

#[tokio::test]
async fn test_post_quote_invalid_input() {
    let (app, _dir) = create_test_router();
    let mut body = quote_body();
    body["property"]["num_bathrooms"] = json!(0);

    let (status, body) = send(app, "POST", "/api/pricing/quote", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "invalid_input");
    assert_eq!(body["details"]["field"], "num_bathrooms");
}

#[tokio::test]
async fn test_post_quote_unknown_region() {
    let (app, _dir) = create_test_router();
    let mut body = quote_body();
    body["property"]["region"] = json!("Kent");

    let (status, body) = send(app, "POST", "/api/pricing/quote", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "bad_request");
}

#[tokio::test]
async fn test_post_quote_adjust() {
    let (app, _dir) = create_test_router();
    let body = json!({
        "request": quote_body(),
        "adjustment": {
            "cleaners_required": 2,
            "regular_client_discount_percentage": "10",
            "admin_notes": "  weekly client  "
        }
    });

    let (status, body) = send(app, "POST", "/api/pricing/quote/adjust", Some(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"]["cleaners_required"], 2);
    assert_eq!(body["original_cleaners"], 1);
    assert_eq!(decimal(&body["original_price"]), dec!(91));
    // 91 less 10%
    assert_eq!(decimal(&body["breakdown"]["total_price"]), dec!(81.9));
    assert_eq!(body["admin_notes"], "weekly client");
    assert!(body["quoted_at"].is_string());
}

#[tokio::test]
async fn test_post_quote_adjust_rejects_zero_cleaners() {
    let (app, _dir) = create_test_router();
    let body = json!({
        "request": quote_body(),
        "adjustment": { "cleaners_required": 0 }
    });

    let (status, body) = send(app, "POST", "/api/pricing/quote/adjust", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_type"], "invalid_input");
}

#[tokio::test]
async fn test_get_config_and_cache_stats() {
    let (app, dir) = create_test_router();

    let (status, config) = send(app.clone(), "GET", "/api/pricing/config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&config["hourly_rate"]), dec!(20));
    assert_eq!(decimal(&config["markup_percentage"]), dec!(30));
    // Defaults are written out on first load
    assert!(dir.path().join("pricing_config.json").exists());

    let (status, stats) = send(app, "GET", "/api/pricing/cache", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["pricing_config_cached"], true);
}

#[tokio::test]
async fn test_reload_picks_up_edited_config() {
    let (app, dir) = create_test_router();
    let store = ConfigStore::new(dir.path().join("pricing_config.json"));

    let (status, _) = send(app.clone(), "GET", "/api/pricing/config", None).await;
    assert_eq!(status, StatusCode::OK);

    let mut edited = store.load().unwrap();
    edited.hourly_rate = dec!(25);
    store.save(&edited).unwrap();

    let (status, config) = send(app.clone(), "POST", "/api/pricing/config/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&config["hourly_rate"]), dec!(25));

    let (_, body) = send(app, "POST", "/api/pricing/quote", Some(quote_body())).await;
    // 25 * 3.5 = 87.5, plus 30%
    assert_eq!(decimal(&body["breakdown"]["total_price"]), dec!(113.75));
}

#[tokio::test]
async fn test_malformed_config_is_a_server_error() {
    let (app, dir) = create_test_router();
    std::fs::write(dir.path().join("pricing_config.json"), "{ not json").unwrap();

    let (status, body) = send(app, "POST", "/api/pricing/quote", Some(quote_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "configuration_error");
}

#[tokio::test]
async fn test_out_of_range_config_is_a_server_error() {
    let (app, dir) = create_test_router();
    let store = ConfigStore::new(dir.path().join("pricing_config.json"));
    let mut config = store.load().unwrap();
    config.hourly_rate = Decimal::MAX;
    store.save(&config).unwrap();

    let (status, body) = send(app, "POST", "/api/pricing/quote", Some(quote_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error_type"], "configuration_error");
}
