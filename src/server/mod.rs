//! JSON HTTP surface over the same pipeline the CLI uses.

pub mod handlers;
pub mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::forecast::ForecastDays;
use crate::service::ForecastService;
pub use state::AppState;

pub fn build_router(service: ForecastService, default_days: ForecastDays) -> Router {
    let state = Arc::new(AppState::new(service, default_days));

    Router::new()
        .route("/api/forecast", get(handlers::forecast))
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/codes", get(handlers::codes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(
    host: &str,
    port: u16,
    service: ForecastService,
    default_days: ForecastDays,
) -> std::io::Result<()> {
    let app = build_router(service, default_days);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("listening on http://{}", addr);
    eprintln!("  Atlas forecast server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await
}
