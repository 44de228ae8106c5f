use std::sync::Arc;

use crate::config::DeploymentMode;
use crate::metadata::MetadataResolver;
use crate::models::ResumeConfig;

/// Shared application state passed to all handlers.
/// The resolver is chosen once at startup and never swapped.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn MetadataResolver>,
    pub mode: DeploymentMode,
    pub resume: Option<Arc<ResumeConfig>>,
}
