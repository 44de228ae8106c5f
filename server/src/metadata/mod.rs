//! Link metadata resolution: presets, URL-shape fallbacks, and the local and
//! remote resolver strategies.

pub mod fallback;
pub mod local;
pub mod presets;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Config, DeploymentMode};
use crate::models::MetadataRecord;

pub use local::LocalResolver;
pub use remote::{RemoteError, RemoteResolver};

/// A strategy that always produces a [`MetadataRecord`] for a URL.
///
/// Failures are absorbed inside the resolver; the worst outcome a caller
/// sees is a less specific record.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> MetadataRecord;

    /// Resolve every URL concurrently and wait for all of them. Per-URL
    /// outcomes are not reported.
    async fn preload(&self, urls: &[String]) {
        let records = join_all(urls.iter().map(|url| self.resolve(url))).await;
        debug!(count = records.len(), "Preloaded link metadata");
    }

    fn clear_cache(&self);

    fn stats(&self) -> ResolverStats;
}

/// Counters exposed for health reporting and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverStats {
    pub cached_links: usize,
    pub cache_hits: u64,
    pub preset_lookups: u64,
    pub remote_calls: u64,
    pub remote_fallbacks: u64,
}

/// Pick the resolver for the process. Production goes through the remote
/// API with a local fallback; every other mode stays local.
pub fn select_resolver(config: &Config, client: reqwest::Client) -> Arc<dyn MetadataResolver> {
    let local = Arc::new(LocalResolver::with_delay(config.simulated_delay));
    match config.mode {
        DeploymentMode::Production => {
            info!(api_url = %config.api_url, "Using remote link metadata resolver");
            Arc::new(RemoteResolver::new(
                client,
                config.api_url.clone(),
                config.api_key.clone(),
                local,
            ))
        }
        DeploymentMode::Development => {
            info!("Using local link metadata resolver");
            local
        }
    }
}
