use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ResumeConfigError {
    #[error("Failed to read resume config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resume config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Resume config failed validation: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

// ============================================================================
// Config Models
// ============================================================================

/// The site's `config.json`. Unknown keys (`$schema`, `theme`) are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResumeConfig {
    #[validate(nested)]
    pub site: SiteConfig,
    #[validate(nested)]
    pub personal: PersonalConfig,
    #[serde(default)]
    #[validate(nested)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    #[validate(nested)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    #[validate(nested)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub timeline: Vec<TimelineItem>,
    #[serde(default)]
    #[validate(nested)]
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SiteConfig {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(url)]
    pub linkedin: Option<String>,
    #[validate(url)]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonalConfig {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub summary: Option<String>,
    pub avatar: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    #[validate(length(min = 1))]
    pub company: String,
    #[validate(length(min = 1))]
    pub position: String,
    pub duration: String,
    pub start_from: Option<String>,
    pub end_at: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillBadge>,
    #[serde(default)]
    #[validate(nested)]
    pub links: Vec<LabeledLink>,
}

/// Skill chip shown on an experience entry; `href` makes it a link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillBadge {
    pub title: String,
    pub icon: Option<String>,
    pub icon_type: Option<String>,
    pub icon_position: Option<String>,
    pub color: Option<String>,
    pub variant: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technology {
    pub title: String,
    pub icon: Option<String>,
    pub icon_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EducationItem {
    #[validate(length(min = 1))]
    pub institution: String,
    #[validate(length(min = 1))]
    pub degree: String,
    pub duration: String,
    pub location: Option<String>,
    pub gpa: Option<String>,
    pub logo: Option<String>,
    pub description: Option<String>,
}

/// `link` and `demo` may hold the `"#"` placeholder, so they are not
/// URL-validated; [`ResumeConfig::outbound_links`] skips anything that is
/// not an absolute http(s) URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectItem {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<Technology>,
    pub link: Option<String>,
    pub demo: Option<String>,
    pub image: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineItem {
    pub id: Option<String>,
    pub date: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LabeledLink {
    pub label: String,
    #[validate(url)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SocialLink {
    pub label: String,
    #[validate(url)]
    pub url: String,
    pub icon: Option<String>,
}

// ============================================================================
// Loading
// ============================================================================

impl ResumeConfig {
    /// Read, parse and validate a resume config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResumeConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ResumeConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ResumeConfigError> {
        let config: ResumeConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Every absolute http(s) link in the config, de-duplicated, in order of
    /// appearance: site profiles, top-level links, experience links and
    /// skill badge hrefs, then project links and demos.
    pub fn outbound_links(&self) -> Vec<String> {
        let site = [&self.site.website, &self.site.linkedin, &self.site.github]
            .into_iter()
            .filter_map(|link| link.as_deref());
        let social = self.links.iter().map(|link| link.url.as_str());
        let experience = self.experience.iter().flat_map(|item| {
            let links = item.links.iter().map(|link| link.url.as_str());
            let badges = item.skills.iter().filter_map(|badge| badge.href.as_deref());
            links.chain(badges)
        });
        let projects = self.projects.iter().flat_map(|project| {
            [project.link.as_deref(), project.demo.as_deref()]
                .into_iter()
                .flatten()
        });

        let mut seen = HashSet::new();
        site.chain(social)
            .chain(experience)
            .chain(projects)
            .filter(|link| is_outbound(link))
            .filter(|link| seen.insert(*link))
            .map(str::to_string)
            .collect()
    }
}

fn is_outbound(link: &str) -> bool {
    Url::parse(link)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
