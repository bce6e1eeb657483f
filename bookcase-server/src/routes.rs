//! API routes

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build the CORS layer from `BOOKCASE_CORS_ORIGINS`
/// (comma-separated origins, or "*" for any)
fn cors_layer() -> CorsLayer {
    let origins = match std::env::var("BOOKCASE_CORS_ORIGINS").ok() {
        Some(origins) if origins == "*" => AllowOrigin::any(),
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            AllowOrigin::list(allowed)
        }
        // Default: allow localhost origins for development
        None => AllowOrigin::list([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
        ]),
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Books
        .route("/books", get(handlers::find_books).post(handlers::create_book))
        .route("/books/archive", get(handlers::list_archive))
        .route("/books/:id/meta", put(handlers::update_book_meta))
        // Categories
        .route("/categories/top", get(handlers::list_top_categories))
        .route("/categories/:id/books", get(handlers::list_category_books))
        // Settings
        .route("/settings", get(handlers::get_settings));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
