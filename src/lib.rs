pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod static_files;
pub mod storage;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Database;
use crate::storage::BlobStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub blobs: Arc<dyn BlobStore>,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.storage.max_upload_bytes;

    Router::new()
        .route("/", get(static_files::index))
        .route("/health", get(handlers::document::health))
        .route("/documents", get(handlers::document::list_documents))
        .route(
            "/documents/upload",
            post(handlers::document::upload_document),
        )
        .route(
            "/documents/:id",
            get(handlers::document::download_document)
                .delete(handlers::document::delete_document),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
