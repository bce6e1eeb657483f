//! Request handlers

mod books;
mod categories;

pub use books::*;
pub use categories::*;

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use bookcase_core::Settings;
use serde::Serialize;

/// Error response: status plus message body
pub type ApiError = (StatusCode, String);

/// Log a collaborator failure and turn it into a 500
pub(crate) fn internal_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Current catalog settings
pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings().clone())
}
