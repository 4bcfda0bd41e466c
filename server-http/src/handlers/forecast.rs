use crate::api::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use tracing::{info, warn};
use weather::Forecasts;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// GET /forecast?city=london&city=warsaw
pub async fn get_forecasts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Forecasts>, ApiError> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    let cities = parse_cities(&params);
    if cities.is_empty() {
        return Err(ApiError::bad_request("unable to parse cities"));
    }

    info!("GET_FORECASTS: request_id={}, cities={:?}", request_id, cities);

    match state.forecast_manager.get_forecasts(&cities).await {
        Ok(forecasts) => Ok(Json(forecasts)),
        Err(err) => {
            warn!("error for {}: {}", request_id, err);
            Err(ApiError::from(&err))
        }
    }
}

/// Every non-empty `city` value as given, in query order
fn parse_cities(params: &[(String, String)]) -> Vec<String> {
    params
        .iter()
        .filter(|(key, value)| key == "city" && !value.is_empty())
        .map(|(_, value)| value.clone())
        .collect()
}
