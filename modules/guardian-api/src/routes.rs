use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rest;
use crate::AppState;

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(health))
        .route("/state", get(rest::get_state))
        // Round actions
        .route(
            "/action/transportation/{city}/{mode}",
            post(rest::set_transportation),
        )
        .route("/action/energy/{city}/{mode}", post(rest::set_energy))
        .route("/next-round", post(rest::next_round))
        .route("/restart", post(rest::restart))
        // News
        .route("/news", get(rest::news))
        .route("/news/ai", get(rest::news))
        .route("/news/force-ai", get(rest::news_force_ai))
        .route("/news/type/{category}", get(rest::news_by_category))
        .route("/news/severity/{severity}", get(rest::news_by_severity))
        .route("/news/statistics", get(rest::news_statistics))
        // Generator configuration
        .route("/config/api-key", post(rest::set_api_key))
        .route("/test/ai", get(rest::test_ai))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}

async fn health() -> &'static str {
    "ok"
}
