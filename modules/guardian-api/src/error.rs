use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use guardian_common::GameError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Game(#[from] GameError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Game(err) = self;

        // Game over is a notice, not a failure.
        if err == GameError::GameOver {
            return Json(json!({ "message": err.to_string() })).into_response();
        }

        let status = match err {
            GameError::CityNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(json!({ "error": err.to_string() }))).into_response()
    }
}
