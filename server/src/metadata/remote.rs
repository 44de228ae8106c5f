use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, warn};
use url::Url;

use super::{LocalResolver, MetadataResolver, ResolverStats};
use crate::models::MetadataRecord;

pub const DEFAULT_API_URL: &str = "https://api.linkpreview.net";

/// Reasons a remote lookup did not produce a record. Every variant ends in
/// the local fallback.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("no link preview API key configured")]
    MissingApiKey,

    #[error("not an absolute URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    #[error("link preview API request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("link preview API returned status {0}")]
    Status(StatusCode),

    #[error("link preview API response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct LinkPreviewApiResponse {
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    site_name: Option<String>,
    favicon: Option<String>,
}

impl LinkPreviewApiResponse {
    fn into_record(self, url: &str, host: Option<&str>) -> MetadataRecord {
        let site_name = self
            .site_name
            .filter(|s| !s.is_empty())
            .or_else(|| host.map(str::to_string));
        MetadataRecord {
            title: self.title,
            description: self.description,
            image: self.image,
            site_name,
            favicon: self.favicon,
            ..MetadataRecord::new(url)
        }
    }
}

/// Resolver backed by the link preview API. Successful lookups are not
/// cached; failed ones defer to the wrapped [`LocalResolver`], which caches
/// as usual.
pub struct RemoteResolver {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    local: Arc<LocalResolver>,
    remote_calls: AtomicU64,
    remote_fallbacks: AtomicU64,
}

impl RemoteResolver {
    pub fn new(
        client: ReqwestClient,
        api_url: impl Into<String>,
        api_key: Option<String>,
        local: Arc<LocalResolver>,
    ) -> Self {
        RemoteResolver {
            client,
            api_url: api_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            local,
            remote_calls: AtomicU64::new(0),
            remote_fallbacks: AtomicU64::new(0),
        }
    }

    pub fn local(&self) -> &LocalResolver {
        &self.local
    }

    /// One API round trip, without any fallback. URLs that do not parse are
    /// rejected before any request is made.
    pub async fn fetch(&self, url: &str) -> Result<MetadataRecord, RemoteError> {
        let api_key = self.api_key.as_deref().ok_or(RemoteError::MissingApiKey)?;
        let parsed = Url::parse(url).map_err(RemoteError::InvalidUrl)?;
        let host = parsed.host_str().filter(|h| !h.is_empty());

        let endpoint = format!(
            "{}/?key={}&q={}",
            self.api_url.trim_end_matches('/'),
            urlencoding::encode(api_key),
            urlencoding::encode(url),
        );

        self.remote_calls.fetch_add(1, Ordering::Relaxed);
        let resp = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        if !resp.status().is_success() {
            return Err(RemoteError::Status(resp.status()));
        }

        let body: LinkPreviewApiResponse = resp.json().await.map_err(RemoteError::Decode)?;
        Ok(body.into_record(url, host))
    }
}

#[async_trait]
impl MetadataResolver for RemoteResolver {
    async fn resolve(&self, url: &str) -> MetadataRecord {
        match self.fetch(url).await {
            Ok(record) => record,
            Err(RemoteError::MissingApiKey) => {
                warn!(url = %url, "No link preview API key configured, using local metadata");
                self.local.resolve(url).await
            }
            Err(e @ RemoteError::InvalidUrl(_)) => {
                self.remote_fallbacks.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, url = %url, "Skipping link preview API for unparsable URL");
                self.local.resolve(url).await
            }
            Err(e) => {
                self.remote_fallbacks.fetch_add(1, Ordering::Relaxed);
                error!(error = %e, url = %url, "Link preview API failed, using local metadata");
                self.local.resolve(url).await
            }
        }
    }

    fn clear_cache(&self) {
        self.local.clear_cache();
    }

    fn stats(&self) -> ResolverStats {
        ResolverStats {
            remote_calls: self.remote_calls.load(Ordering::Relaxed),
            remote_fallbacks: self.remote_fallbacks.load(Ordering::Relaxed),
            ..self.local.stats()
        }
    }
}
