use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canned metadata for a well-known host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetEntry {
    pub site_name: Option<&'static str>,
    pub favicon: Option<&'static str>,
    pub kind: Option<&'static str>,
}

impl PresetEntry {
    const fn new(site_name: &'static str, favicon: &'static str, kind: &'static str) -> Self {
        PresetEntry {
            site_name: Some(site_name),
            favicon: Some(favicon),
            kind: Some(kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.site_name.is_none() && self.favicon.is_none() && self.kind.is_none()
    }
}

static PRESETS: Lazy<HashMap<&'static str, PresetEntry>> = Lazy::new(|| {
    HashMap::from([
        (
            "github.com",
            PresetEntry::new("GitHub", "https://github.com/favicon.ico", "repository"),
        ),
        (
            "linkedin.com",
            PresetEntry::new("LinkedIn", "https://static.licdn.com/favicon.ico", "profile"),
        ),
        (
            "youtube.com",
            PresetEntry::new("YouTube", "https://youtube.com/favicon.ico", "video"),
        ),
        (
            "vercel.app",
            PresetEntry::new("Vercel", "https://vercel.com/favicon.ico", "demo"),
        ),
        (
            "netlify.app",
            PresetEntry::new("Netlify", "https://netlify.com/favicon.ico", "demo"),
        ),
        (
            "herokuapp.com",
            PresetEntry::new("Heroku", "https://heroku.com/favicon.ico", "demo"),
        ),
        (
            "codesandbox.io",
            PresetEntry::new("CodeSandbox", "https://codesandbox.io/favicon.ico", "sandbox"),
        ),
        (
            "codepen.io",
            PresetEntry::new("CodePen", "https://codepen.io/favicon.ico", "demo"),
        ),
    ])
});

/// Exact-match lookup. Subdomains do not match their parent, so
/// `www.github.com` and `app.vercel.app` both get an empty entry.
pub fn lookup(host: &str) -> PresetEntry {
    PRESETS.get(host).copied().unwrap_or_default()
}
