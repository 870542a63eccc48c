use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::forecast::{ForecastDays, WEATHER_CODES};
use crate::location::Location;
use crate::service::{ForecastReport, LookupError};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(pub StatusCode, pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        let status = match e {
            LookupError::EmptyQuery => StatusCode::BAD_REQUEST,
            LookupError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            LookupError::ForecastUnavailable(_) => StatusCode::BAD_GATEWAY,
        };
        api_error(status, e.user_message())
    }
}

// ─── GET /api/forecast ───────────────────────────────────────────

/// `days` stays a string so a bad value reaches the handler and gets the
/// JSON error body instead of the extractor's plain-text rejection.
#[derive(Deserialize)]
pub struct ForecastQuery {
    pub q: Option<String>,
    pub days: Option<String>,
}

pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<ForecastReport>, ApiError> {
    let start = Instant::now();

    let days = match params.days {
        Some(raw) => raw
            .parse::<ForecastDays>()
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => state.default_days,
    };
    let query = params.q.unwrap_or_default();

    let worker = Arc::clone(&state);
    let q = query.clone();
    let report = tokio::task::spawn_blocking(move || worker.service().lookup(&q, days))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    info!(
        query = %query,
        days = days.count(),
        rows = report.daily.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/forecast"
    );

    Ok(Json(report))
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub q: Option<String>,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<Location>, ApiError> {
    let start = Instant::now();
    let query = params.q.unwrap_or_default();

    let worker = Arc::clone(&state);
    let q = query.clone();
    let location = tokio::task::spawn_blocking(move || worker.service().locate(&q))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    info!(
        query = %query,
        name = %location.display_name,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/resolve"
    );

    Ok(Json(location))
}

// ─── GET /api/codes ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct CodeEntry {
    pub code: i64,
    pub label: &'static str,
}

pub async fn codes() -> Json<Vec<CodeEntry>> {
    Json(
        WEATHER_CODES
            .iter()
            .map(|&(code, label)| CodeEntry { code, label })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_status() {
        assert_eq!(ApiError::from(LookupError::EmptyQuery).0, StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(LookupError::LocationNotFound("x".into())).0,
            StatusCode::NOT_FOUND
        );
        let e = ApiError::from(LookupError::ForecastUnavailable("x".into()));
        assert_eq!(e.0, StatusCode::BAD_GATEWAY);
        assert!(e.1.contains("Open-Meteo"));
    }

    #[tokio::test]
    async fn test_codes_lists_table() {
        let Json(entries) = codes().await;
        assert_eq!(entries.len(), WEATHER_CODES.len());
        assert_eq!(entries[3].code, 3);
        assert_eq!(entries[3].label, "Overcast");
    }
}
