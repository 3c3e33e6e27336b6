use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use guardian_common::{EnergySource, NewsCategory, NewsEvent, Severity, Transportation};
use guardian_core::{GameState, NewsOrchestrator, NewsRequest, NewsStatistics};

use crate::{ApiError, AppState};

pub async fn get_state(State(app): State<AppState>) -> Json<GameState> {
    Json(app.lock().await.session.state().clone())
}

pub async fn set_transportation(
    State(app): State<AppState>,
    Path((city, mode)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let mode: Transportation = mode.parse()?;
    let mut inner = app.lock().await;
    let projected = inner.session.select_transportation(&city, mode)?;

    Ok(Json(json!({
        "message": format!("Transportation for {city} set to {mode}"),
        "state": inner.session.state(),
        "projected_effects": projected,
    })))
}

pub async fn set_energy(
    State(app): State<AppState>,
    Path((city, mode)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let source: EnergySource = mode.parse()?;
    let mut inner = app.lock().await;
    let projected = inner.session.select_energy(&city, source)?;

    Ok(Json(json!({
        "message": format!("Energy source for {city} set to {source}"),
        "state": inner.session.state(),
        "projected_effects": projected,
    })))
}

pub async fn next_round(State(app): State<AppState>) -> Result<Json<Value>, ApiError> {
    let mut inner = app.lock().await;
    let outcome = inner.session.advance_round().await?;

    Ok(Json(json!({
        "news": outcome.news,
        "year": outcome.year,
        "state": inner.session.state(),
    })))
}

pub async fn restart(State(app): State<AppState>) -> Json<Value> {
    let mut inner = app.lock().await;
    inner.session.restart();
    Json(json!({
        "message": "Game restarted",
        "state": inner.session.state(),
    }))
}

pub async fn news(State(app): State<AppState>) -> Result<Json<NewsEvent>, ApiError> {
    request_news(&app, NewsRequest::any()).await
}

pub async fn news_force_ai(State(app): State<AppState>) -> Result<Json<NewsEvent>, ApiError> {
    request_news(&app, NewsRequest::forced_ai()).await
}

pub async fn news_by_category(
    State(app): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<NewsEvent>, ApiError> {
    let category: NewsCategory = category.parse()?;
    request_news(&app, NewsRequest::of_category(category)).await
}

pub async fn news_by_severity(
    State(app): State<AppState>,
    Path(severity): Path<String>,
) -> Result<Json<NewsEvent>, ApiError> {
    let severity: Severity = severity.parse()?;
    request_news(&app, NewsRequest::of_severity(severity)).await
}

async fn request_news(app: &AppState, request: NewsRequest) -> Result<Json<NewsEvent>, ApiError> {
    let mut inner = app.lock().await;
    let event = inner.session.request_news(request).await?;
    Ok(Json(event))
}

pub async fn news_statistics(State(app): State<AppState>) -> Json<NewsStatistics> {
    Json(app.lock().await.session.news().statistics())
}

#[derive(Deserialize)]
pub struct ApiKeyParams {
    api_key: String,
}

pub async fn set_api_key(
    State(app): State<AppState>,
    Query(params): Query<ApiKeyParams>,
) -> Json<Value> {
    let mut inner = app.lock().await;
    inner.config.set_api_key(params.api_key);

    let news = NewsOrchestrator::from_config(&inner.config);
    let ai_enabled = news.ai_enabled();
    inner.session.set_news(news);
    info!(ai_enabled, "News generator reconfigured");

    Json(json!({
        "message": "API key updated",
        "ai_enabled": ai_enabled,
    }))
}

pub async fn test_ai(State(app): State<AppState>) -> Json<Value> {
    let inner = app.lock().await;
    let news = inner.session.news();
    if !news.ai_enabled() {
        return Json(json!({
            "ai_test_passed": false,
            "message": "AI news generation is not configured",
        }));
    }

    let passed = news.self_test().await;
    Json(json!({ "ai_test_passed": passed }))
}
