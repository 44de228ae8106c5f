pub mod config;
pub mod error;
pub mod handlers;
pub mod metadata;
pub mod models;
pub mod state;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

/// Application routes wired to `state`. Middleware and `/metrics` are added
/// by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/link-preview", get(handlers::link_preview::get_link_preview))
        .route(
            "/link-preview/preload",
            post(handlers::link_preview::preload_link_previews),
        )
        .route(
            "/link-preview/cache",
            delete(handlers::link_preview::clear_link_preview_cache),
        )
        .route("/resume/links", get(handlers::resume::list_link_previews))
        .with_state(state)
}
