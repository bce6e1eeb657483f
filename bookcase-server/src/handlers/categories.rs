//! Category handlers

use super::{internal_error, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bookcase_core::catalog::{category_listing, top_categories, CategoryCount, CategoryListing};
use bookcase_core::TermId;
use serde::Deserialize;

/// Query parameters for the category ranking
#[derive(Debug, Deserialize)]
pub struct TopCategoriesQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

/// Categories ranked by number of books
pub async fn list_top_categories(
    State(state): State<AppState>,
    Query(query): Query<TopCategoriesQuery>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let counts = top_categories(state.store.as_ref(), query.limit)
        .await
        .map_err(internal_error)?;
    Ok(Json(counts))
}

/// Published books of one category
pub async fn list_category_books(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CategoryListing>, ApiError> {
    category_listing(state.store.as_ref(), TermId(id))
        .await
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("No books in category {}", id)))
}
