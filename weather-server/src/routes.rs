//! HTTP surface: a single `GET /weather/{city}` route.

use std::{sync::Arc, time::Instant};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{info, warn};
use weather_core::{AggregateResult, TemperatureProvider};

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone)]
pub struct AppState {
    provider: Arc<dyn TemperatureProvider>,
}

/// Build the router around the provider that answers every request.
pub fn router(provider: Arc<dyn TemperatureProvider>) -> Router {
    Router::new()
        .route("/weather", get(missing_city))
        .route("/weather/", get(missing_city))
        .route("/weather/{*city}", get(weather))
        .with_state(AppState { provider })
}

#[derive(Debug)]
pub enum ApiError {
    /// The path carried no city after `/weather/`.
    MissingCity,
    Provider(weather_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingCity => (
                StatusCode::BAD_REQUEST,
                "missing city: expected /weather/{city}".to_string(),
            )
                .into_response(),
            ApiError::Provider(err) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
            }
        }
    }
}

async fn missing_city() -> ApiError {
    warn!("weather request without a city");
    ApiError::MissingCity
}

async fn weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Response, ApiError> {
    let begin = Instant::now();

    if city.trim().is_empty() {
        return Err(missing_city().await);
    }

    let temp = state.provider.temperature(&city).await.map_err(|err| {
        warn!(%city, error = %err, "temperature lookup failed");
        ApiError::Provider(err)
    })?;

    let result = AggregateResult::new(city, temp, begin.elapsed());
    info!(city = %result.city, temp = result.temp, took = %result.took, "served");

    Ok(([(header::CONTENT_TYPE, JSON_UTF8)], Json(result)).into_response())
}
