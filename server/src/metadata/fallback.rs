//! Best-effort metadata derived from nothing but the shape of a URL.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

use crate::models::MetadataRecord;

pub const EXTERNAL_LINK_TITLE: &str = "External Link";
pub const GENERIC_DESCRIPTION: &str = "Visit link for more information";
pub const DEFAULT_KIND: &str = "website";
pub const FAVICON_SIZE: u32 = 32;

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("valid regex"));

/// Title from the last non-empty path segment, or the bare hostname when the
/// path is empty. Unparsable input yields [`EXTERNAL_LINK_TITLE`].
pub fn title_from_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => title_from_parsed(&parsed),
        Err(_) => EXTERNAL_LINK_TITLE.to_string(),
    }
}

pub(crate) fn title_from_parsed(url: &Url) -> String {
    if let Some(segment) = url.path().split('/').filter(|s| !s.is_empty()).last() {
        return capitalize_words(&segment.replace(['-', '_'], " "));
    }
    match url.host_str() {
        Some(host) => strip_www(host).to_string(),
        None => EXTERNAL_LINK_TITLE.to_string(),
    }
}

fn capitalize_words(text: &str) -> String {
    WORD_START
        .replace_all(text, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Canned description for a content-type tag.
pub fn description_for_kind(kind: Option<&str>) -> &'static str {
    match kind {
        Some("repository") => "Source code repository with documentation and examples",
        Some("profile") => "Professional profile and work experience",
        Some("video") => "Video content and tutorials",
        Some("demo") => "Live demonstration of the project in action",
        Some("sandbox") => "Interactive code playground and examples",
        Some("website") => "External website with additional information",
        _ => GENERIC_DESCRIPTION,
    }
}

/// Third-party favicon service URL for a host.
pub fn favicon_url(host: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={host}&sz={FAVICON_SIZE}")
}

/// Record for a URL that does not parse. Never cached.
pub fn minimal_record(url: &str) -> MetadataRecord {
    MetadataRecord {
        title: Some(EXTERNAL_LINK_TITLE.to_string()),
        description: Some(GENERIC_DESCRIPTION.to_string()),
        ..MetadataRecord::new(url)
    }
}
