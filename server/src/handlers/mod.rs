pub mod link_preview;
pub mod resume;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let stats = state.resolver.stats();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "folio-server",
            "version": env!("CARGO_PKG_VERSION"),
            "mode": state.mode,
            "cachedLinks": stats.cached_links,
            "resolver": stats,
        })),
    )
}
