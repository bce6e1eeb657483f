//! Book handlers

use super::{internal_error, ApiError};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bookcase_core::catalog::{archive_page, save_metadata};
use bookcase_core::types::Taxonomy;
use bookcase_core::{BookId, BookItem, DisplayRecord, MetaKey, Page, PostStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Render every book matching the filter attributes in the query string
/// (`id`, `author_name`, `year`, `publisher`, `category`, `tag`)
pub async fn find_books(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<DisplayRecord>>, ApiError> {
    let records = state
        .engine
        .render_matches(params)
        .await
        .map_err(internal_error)?;
    tracing::debug!("Filter matched {} books", records.len());
    Ok(Json(records))
}

/// Query parameters for the archive
#[derive(Debug, Deserialize)]
pub struct ArchiveQuery {
    /// Page number (1-indexed, 0 treated as 1)
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

/// Book summary for list responses
#[derive(Debug, Serialize)]
pub struct BookSummary {
    pub id: BookId,
    pub title: String,
}

impl From<BookItem> for BookSummary {
    fn from(book: BookItem) -> Self {
        Self {
            id: book.id,
            title: book.title,
        }
    }
}

/// Published books, paged by the configured page size
pub async fn list_archive(
    State(state): State<AppState>,
    Query(query): Query<ArchiveQuery>,
) -> Result<Json<Page<BookSummary>>, ApiError> {
    let page = archive_page(state.store.as_ref(), state.settings(), query.page)
        .await
        .map_err(internal_error)?;

    Ok(Json(Page {
        items: page.items.into_iter().map(BookSummary::from).collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// A book to create
#[derive(Debug, Deserialize)]
pub struct NewBook {
    pub title: String,

    #[serde(default)]
    pub body: String,

    #[serde(default = "default_status")]
    pub status: PostStatus,

    /// Metadata keyed by storage key (`author-name`, `price`, ...)
    #[serde(default)]
    pub meta: HashMap<String, String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> PostStatus {
    PostStatus::Published
}

/// Create response
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: BookId,
    pub title: String,
    pub message: String,
}

/// Reject metadata forms naming keys outside [`MetaKey::ALL`]
fn check_meta_keys(form: &HashMap<String, String>) -> Result<(), ApiError> {
    for key in form.keys() {
        key.parse::<MetaKey>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    }
    Ok(())
}

/// Store metadata and terms of a freshly created book, then persist
async fn file_book(state: &AppState, id: BookId, new_book: &NewBook) -> anyhow::Result<()> {
    save_metadata(state.store.as_ref(), id, &new_book.meta).await?;

    let terms = new_book
        .categories
        .iter()
        .map(|name| (Taxonomy::Category, name))
        .chain(new_book.tags.iter().map(|name| (Taxonomy::Tag, name)));
    for (taxonomy, name) in terms {
        let term = state.store.add_term(taxonomy, name, None)?;
        state.store.assign_term(term, id)?;
    }

    state.save_library().await
}

/// Create a book with its metadata and terms. A failure on the way leaves
/// no trace of the book.
pub async fn create_book(
    State(state): State<AppState>,
    Json(new_book): Json<NewBook>,
) -> Result<Json<CreateResponse>, ApiError> {
    if new_book.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Title is required".to_string()));
    }
    check_meta_keys(&new_book.meta)?;

    let book = state
        .store
        .create_book(new_book.title.clone(), new_book.body.clone(), new_book.status)
        .map_err(internal_error)?;

    if let Err(e) = file_book(&state, book.id, &new_book).await {
        if let Err(undo) = state.store.remove_book(book.id) {
            tracing::error!("Failed to roll back book {}: {}", book.id, undo);
        }
        return Err(internal_error(format!("{:#}", e)));
    }
    tracing::info!("Created book {} ({})", book.id, book.title);

    Ok(Json(CreateResponse {
        id: book.id,
        title: book.title,
        message: "Book created successfully".to_string(),
    }))
}

/// Replace the metadata of a book. Fields left empty or omitted are removed;
/// unknown keys are rejected.
pub async fn update_book_meta(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(form): Json<HashMap<String, String>>,
) -> Result<StatusCode, ApiError> {
    let id = BookId(id);
    if state.store.book(id).map_err(internal_error)?.is_none() {
        return Err((StatusCode::NOT_FOUND, format!("Book {} not found", id)));
    }
    check_meta_keys(&form)?;

    save_metadata(state.store.as_ref(), id, &form)
        .await
        .map_err(internal_error)?;
    state.save_library().await.map_err(internal_error)?;

    Ok(StatusCode::NO_CONTENT)
}
