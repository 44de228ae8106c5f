use serde::{Deserialize, Serialize};

/// Display metadata resolved for an outbound link.
///
/// `url` always echoes the requested URL exactly. Every other field is
/// best-effort and omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Free-form category tag such as "repository", "profile" or "demo".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MetadataRecord {
    /// A record carrying only the URL.
    pub fn new(url: impl Into<String>) -> Self {
        MetadataRecord {
            url: url.into(),
            title: None,
            description: None,
            image: None,
            site_name: None,
            favicon: None,
            kind: None,
        }
    }
}
