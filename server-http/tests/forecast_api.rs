//! End-to-end tests for the forecast HTTP API.
//!
//! The file-backed source reads the JSON fixtures under `testdata/source`,
//! and the moka store plays the cache.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::Value;
use server_http::{build_service, AppState};
use shared::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storage_engine::MokaForecastStore;
use tower::ServiceExt;
use weather::{
    Forecast, ForecastManager, ForecastManagerService, ForecastProvider, Forecasts,
    WriteableForecastProvider,
};
use weather_sources::FileWeatherSource;

const SOURCE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../testdata/source");
const RESPONSE_1: &str = include_str!("../../testdata/response/1.json");
const LONDON: &str = include_str!("../../testdata/source/london.json");

/// External source that fails every call and counts them
#[derive(Default)]
struct UnreachableSource {
    calls: AtomicUsize,
}

#[async_trait]
impl ForecastProvider for UnreachableSource {
    async fn get_forecast(&self, _city: &str) -> Result<Forecast> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::internal("connection refused"))
    }
}

/// Manager stub returning a fixed error
struct FailingManager {
    err: Error,
}

#[async_trait]
impl ForecastManager for FailingManager {
    async fn get_forecasts(&self, _cities: &[String]) -> Result<Forecasts> {
        Err(self.err.clone())
    }
}

/// Manager stub answering with an empty forecast per requested city
struct EchoManager;

#[async_trait]
impl ForecastManager for EchoManager {
    async fn get_forecasts(&self, cities: &[String]) -> Result<Forecasts> {
        let mut forecasts = Forecasts::new();
        for city in cities {
            forecasts.insert(city.clone(), Forecast::default());
        }
        Ok(forecasts)
    }
}

fn file_backed_state() -> AppState {
    let manager = ForecastManagerService::new(
        Arc::new(FileWeatherSource::new(SOURCE_DIR)),
        Arc::new(MokaForecastStore::new(Duration::from_secs(5))),
    );
    AppState::new(Arc::new(manager))
}

async fn get(state: AppState, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    build_service(state).oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_forecasts_for_two_cities() {
    let response = get(file_backed_state(), "/forecast?city=london&city=warsaw").await;

    assert_eq!(response.status(), StatusCode::OK);
    let expected: Value = serde_json::from_str(RESPONSE_1).unwrap();
    assert_eq!(json_body(response).await, expected);
}

#[tokio::test]
async fn test_one_missing_city_fails_batch() {
    let response = get(file_backed_state(), "/forecast?city=london&city=szczebrzeszyn").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "status": "forecast not found" })
    );
}

#[tokio::test]
async fn test_no_cities_given() {
    for uri in ["/forecast", "/forecast?city=", "/forecast?units=metric"] {
        let response = get(file_backed_state(), uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({ "status": "unable to parse cities" })
        );
    }
}

#[tokio::test]
async fn test_city_values_reach_manager_verbatim() {
    let state = AppState::new(Arc::new(EchoManager));
    let response = get(state, "/forecast?city=%20london&city=&city=New%20York").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let mut keys: Vec<&str> = body["cities"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort();
    assert_eq!(keys, vec![" london", "New York"]);
}

#[tokio::test]
async fn test_manager_errors_map_to_status() {
    let cases = [
        (
            Error::Misconfigured.wrap("error fetching forecast from external provider for london"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "misconfigured service",
        ),
        (
            Error::RateLimited.wrap("error fetching forecast from external provider for london"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "too many requests",
        ),
        (
            Error::internal("other error"),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal error",
        ),
        (
            Error::NotFound.wrap("error fetching forecast from external provider for szczebrzeszyn"),
            StatusCode::NOT_FOUND,
            "forecast not found",
        ),
    ];

    for (err, status, message) in cases {
        let state = AppState::new(Arc::new(FailingManager { err }));
        let response = get(state, "/forecast?city=london&city=szczebrzeszyn").await;

        assert_eq!(response.status(), status);
        assert_eq!(json_body(response).await, serde_json::json!({ "status": message }));
    }
}

#[tokio::test]
async fn test_cached_city_served_while_upstream_is_down() {
    let storage = Arc::new(MokaForecastStore::new(Duration::from_secs(60)));
    let london: Forecast = serde_json::from_str(LONDON).unwrap();
    storage.save_forecast("london", london.clone()).await.unwrap();

    let external = Arc::new(UnreachableSource::default());
    let manager = ForecastManagerService::new(external.clone(), storage);

    let response = get(AppState::new(Arc::new(manager)), "/forecast?city=london").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["cities"]["london"], serde_json::to_value(&london).unwrap());
    assert_eq!(external.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_miss_populates_cache() {
    let storage = Arc::new(MokaForecastStore::new(Duration::from_secs(60)));
    let manager = ForecastManagerService::new(
        Arc::new(FileWeatherSource::new(SOURCE_DIR)),
        storage.clone(),
    );

    let response = get(AppState::new(Arc::new(manager)), "/forecast?city=london").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(storage.get_forecast("london").await.unwrap().name, "London");
}

#[tokio::test]
async fn test_trailing_slash_and_request_id() {
    let response = get(file_backed_state(), "/forecast/?city=warsaw").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await["cities"]["warsaw"]["name"], "Warsaw");
}

#[tokio::test]
async fn test_health() {
    let response = get(file_backed_state(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({ "message": "OK" }));
}
