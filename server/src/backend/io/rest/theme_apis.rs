//! # REST API for Themes of the Week

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;

use super::error_response;
use crate::backend::AppState;
use shared::ThemeListResponse;

/// Create a router for theme APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_themes))
}

/// Theme labels offered on the report form
async fn list_themes(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/themes");

    match state.theme_service.available_themes().await {
        Ok(themes) => (StatusCode::OK, Json(ThemeListResponse { themes })).into_response(),
        Err(e) => error_response("Error loading themes", e),
    }
}
