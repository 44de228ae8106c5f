use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::error::AppResult;
use crate::models::MetadataRecord;
use crate::state::AppState;

pub const MAX_PRELOAD_URLS: usize = 100;
const MAX_PRELOAD_URLS_U64: u64 = MAX_PRELOAD_URLS as u64;

// ── Request types ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LinkPreviewQuery {
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PreloadRequest {
    #[validate(length(max = MAX_PRELOAD_URLS_U64))]
    pub urls: Vec<String>,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /link-preview?url=<encoded-url>
///
/// Always answers with a record. Unparsable URLs get the generic
/// "External Link" record rather than an error.
pub async fn get_link_preview(
    State(state): State<AppState>,
    Query(params): Query<LinkPreviewQuery>,
) -> Json<MetadataRecord> {
    Json(state.resolver.resolve(&params.url).await)
}

/// POST /link-preview/preload
///
/// Warms the cache for a batch of URLs and returns once every resolution has
/// settled.
pub async fn preload_link_previews(
    State(state): State<AppState>,
    Json(req): Json<PreloadRequest>,
) -> AppResult<StatusCode> {
    req.validate()?;

    state.resolver.preload(&req.urls).await;
    info!(count = req.urls.len(), "Preloaded link previews");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /link-preview/cache
pub async fn clear_link_preview_cache(State(state): State<AppState>) -> StatusCode {
    state.resolver.clear_cache();
    info!("Link preview cache cleared");
    StatusCode::NO_CONTENT
}

// ── Unit tests ─────────────────────────────────────────────────────────────
