use axum::{extract::State, Json};
use futures::future::join_all;

use crate::{
    error::{AppError, AppResult},
    models::MetadataRecord,
    state::AppState,
};

/// GET /resume/links
///
/// Metadata for every outbound link in the loaded resume config, in the
/// order the links appear.
pub async fn list_link_previews(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MetadataRecord>>> {
    let resume = state
        .resume
        .as_ref()
        .ok_or(AppError::ResumeNotLoaded)?;

    let links = resume.outbound_links();
    let records = join_all(links.iter().map(|url| state.resolver.resolve(url))).await;

    Ok(Json(records))
}
