use std::path::Path;

use axum::{
    Json, Router,
    handler::HandlerWithoutStateExt,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{response::ErrorBody, state::AppState};

pub mod carts;
pub mod doc;
pub mod health;
pub mod payload;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/carts", carts::router())
}

/// Full application: health, API, docs, then static files from `public_dir`.
pub fn create_app(state: AppState, public_dir: &Path) -> Router {
    let home = ServeFile::new(public_dir.join("home.html"));
    let assets = ServeDir::new(public_dir).not_found_service(not_found.into_service());

    Router::new()
        .route("/health", get(health::health_check))
        .route_service("/", home)
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback_service(assets)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorBody>) {
    let body = ErrorBody {
        error: format!("No resource at {}", uri.path()),
    };
    (StatusCode::NOT_FOUND, Json(body))
}
