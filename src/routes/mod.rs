//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API under `/api` and serves the single-page
//! UI as static files from the fallback. The UI is plain HTML/CSS/JS with
//! no build step; `STATIC_DIR` overrides its location.

pub mod assets;
pub mod brand;

use std::path::PathBuf;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Multipart uploads carry a logo of up to 4 MiB plus form overhead.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/brand/analyze", post(brand::analyze))
        .route(
            "/api/session/{id}",
            get(brand::get_session).delete(brand::delete_session),
        )
        .route(
            "/api/session/{id}/assets",
            get(assets::list_assets).post(assets::create_asset),
        )
        .route(
            "/api/session/{id}/assets/{asset_id}",
            delete(assets::delete_asset),
        )
        .route(
            "/api/session/{id}/assets/{asset_id}/media",
            get(assets::serve_media),
        )
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Resolve the path to the static UI directory.
fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}

/// Full application: API routes + static UI fallback + HTTP middleware.
pub fn app(state: AppState) -> Router {
    let ui = ServeDir::new(static_dir()).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(ui)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
