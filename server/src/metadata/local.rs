use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::fallback::{self, DEFAULT_KIND};
use super::presets::{self, PresetEntry};
use super::{MetadataResolver, ResolverStats};
use crate::models::MetadataRecord;

/// Stand-in for the round trip a real fetch would take.
pub const SIMULATED_DELAY: Duration = Duration::from_millis(100);

/// Network-free resolver built from the preset table and URL-shape
/// fallbacks, with a cache that is never evicted.
///
/// The cache lock is not held across the simulated delay. Two concurrent
/// first-time resolutions of one URL both do the work and both write the
/// same record.
#[derive(Debug)]
pub struct LocalResolver {
    cache: Mutex<HashMap<String, MetadataRecord>>,
    delay: Duration,
    cache_hits: AtomicU64,
    preset_lookups: AtomicU64,
}

impl Default for LocalResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalResolver {
    pub fn new() -> Self {
        Self::with_delay(SIMULATED_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        LocalResolver {
            cache: Mutex::new(HashMap::new()),
            delay,
            cache_hits: AtomicU64::new(0),
            preset_lookups: AtomicU64::new(0),
        }
    }

    /// The cached record for `url`, if any.
    pub fn cached(&self, url: &str) -> Option<MetadataRecord> {
        self.cache().get(url).cloned()
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, MetadataRecord>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup_preset(&self, host: &str) -> PresetEntry {
        self.preset_lookups.fetch_add(1, Ordering::Relaxed);
        presets::lookup(host)
    }
}

/// Layer preset fields over URL-derived fallbacks. Host-less URLs
/// (`file:`, `mailto:`) get no site name or favicon fallback.
fn assemble(url: &str, parsed: &Url, host: Option<&str>, preset: PresetEntry) -> MetadataRecord {
    let kind = preset.kind.unwrap_or(DEFAULT_KIND);
    MetadataRecord {
        title: Some(
            preset
                .site_name
                .map(str::to_string)
                .unwrap_or_else(|| fallback::title_from_parsed(parsed)),
        ),
        description: Some(fallback::description_for_kind(Some(kind)).to_string()),
        site_name: preset.site_name.or(host).map(str::to_string),
        favicon: preset
            .favicon
            .map(str::to_string)
            .or_else(|| host.map(fallback::favicon_url)),
        kind: Some(kind.to_string()),
        ..MetadataRecord::new(url)
    }
}

#[async_trait]
impl MetadataResolver for LocalResolver {
    async fn resolve(&self, url: &str) -> MetadataRecord {
        if let Some(record) = self.cached(url) {
            self.cache_hits.fetch_add(1, Ordering::Relaxed);
            debug!(url = %url, "Link metadata cache hit");
            return record;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(url = %url, error = %e, "Unparsable link, using minimal metadata");
                return fallback::minimal_record(url);
            }
        };
        let host = parsed.host_str().filter(|h| !h.is_empty());

        let preset = self.lookup_preset(host.unwrap_or_default());
        tokio::time::sleep(self.delay).await;

        let record = assemble(url, &parsed, host, preset);
        self.cache().insert(url.to_string(), record.clone());
        record
    }

    fn clear_cache(&self) {
        let mut cache = self.cache();
        debug!(entries = cache.len(), "Clearing link metadata cache");
        cache.clear();
    }

    fn stats(&self) -> ResolverStats {
        ResolverStats {
            cached_links: self.cache().len(),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            preset_lookups: self.preset_lookups.load(Ordering::Relaxed),
            ..ResolverStats::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn second_resolve_is_served_from_cache() {
        let resolver = LocalResolver::new();
        let url = "https://example.com/my-cool-project";

        let started = Instant::now();
        let first = resolver.resolve(url).await;
        assert!(started.elapsed() >= SIMULATED_DELAY);

        let started = Instant::now();
        let second = resolver.resolve(url).await;
        assert_eq!(started.elapsed(), Duration::ZERO);

        assert_eq!(first, second);
        let stats = resolver.stats();
        assert_eq!(stats.preset_lookups, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cached_links, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn preset_host_uses_preset_values() {
        let resolver = LocalResolver::new();
        let record = resolver.resolve("https://github.com/janedoe/folio").await;

        assert_eq!(record.url, "https://github.com/janedoe/folio");
        assert_eq!(record.title.as_deref(), Some("GitHub"));
        assert_eq!(record.site_name.as_deref(), Some("GitHub"));
        assert_eq!(record.favicon.as_deref(), Some("https://github.com/favicon.ico"));
        assert_eq!(record.kind.as_deref(), Some("repository"));
        assert_eq!(
            record.description.as_deref(),
            Some("Source code repository with documentation and examples")
        );
        assert!(record.image.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_host_uses_synthesized_values() {
        let resolver = LocalResolver::new();
        let record = resolver.resolve("https://www.example.com/my-cool-project").await;

        assert_eq!(record.title.as_deref(), Some("My Cool Project"));
        assert_eq!(record.site_name.as_deref(), Some("www.example.com"));
        assert_eq!(
            record.favicon.as_deref(),
            Some("https://www.google.com/s2/favicons?domain=www.example.com&sz=32")
        );
        assert_eq!(record.kind.as_deref(), Some("website"));
        assert_eq!(
            record.description.as_deref(),
            Some("External website with additional information")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unparsable_url_is_not_cached() {
        let resolver = LocalResolver::new();
        let record = resolver.resolve("definitely not a url").await;

        assert_eq!(record.title.as_deref(), Some("External Link"));
        assert_eq!(record.url, "definitely not a url");
        assert!(resolver.cached("definitely not a url").is_none());
        assert_eq!(resolver.stats().preset_lookups, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hostless_url_takes_title_from_path_and_is_cached() {
        let resolver = LocalResolver::new();
        let url = "file:///home/jane/my-notes";

        let record = resolver.resolve(url).await;

        assert_eq!(record.title.as_deref(), Some("My Notes"));
        assert_eq!(record.kind.as_deref(), Some("website"));
        assert_eq!(
            record.description.as_deref(),
            Some("External website with additional information")
        );
        assert!(record.site_name.is_none());
        assert!(record.favicon.is_none());
        assert_eq!(resolver.cached(url), Some(record));
    }

    #[tokio::test(start_paused = true)]
    async fn mailto_link_uses_address_as_title() {
        let resolver = LocalResolver::new();
        let record = resolver.resolve("mailto:jane@example.com").await;
        assert_eq!(record.title.as_deref(), Some("Jane@Example.Com"));
        assert!(resolver.cached("mailto:jane@example.com").is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cache_forces_rederivation() {
        let resolver = LocalResolver::new();
        let url = "https://codepen.io/jane/pen/abc";

        resolver.resolve(url).await;
        resolver.clear_cache();
        assert!(resolver.cached(url).is_none());

        let record = resolver.resolve(url).await;
        assert_eq!(record.site_name.as_deref(), Some("CodePen"));
        assert_eq!(resolver.stats().preset_lookups, 2);
        assert_eq!(resolver.stats().cache_hits, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn preload_caches_every_resolvable_url() {
        let resolver = LocalResolver::new();
        let urls = vec![
            "https://github.com/jane".to_string(),
            "::broken::".to_string(),
            "https://example.org/portfolio".to_string(),
        ];

        let started = Instant::now();
        resolver.preload(&urls).await;
        // Resolutions overlap, so the batch costs one delay, not three.
        assert!(started.elapsed() < SIMULATED_DELAY * 2);

        assert!(resolver.cached("https://github.com/jane").is_some());
        assert!(resolver.cached("https://example.org/portfolio").is_some());
        assert!(resolver.cached("::broken::").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_first_resolutions_duplicate_work() {
        let resolver = LocalResolver::new();
        let url = "https://netlify.app/";

        let (a, b) = tokio::join!(resolver.resolve(url), resolver.resolve(url));

        assert_eq!(a, b);
        assert_eq!(resolver.stats().preset_lookups, 2);
        assert_eq!(resolver.stats().cached_links, 1);
    }
}
