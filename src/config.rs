//! Release configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page is edited by hand on every release: bump `currentVersion`, append
//! to `knownVersions`. The configuration is built once at startup and handed
//! to the controller by value; nothing mutates it afterwards.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::version::expand_template;

/// Release document compiled into the module.
pub const BUILTIN_RELEASE_JSON: &str = include_str!("../release.json");

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid release configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A downloadable artifact format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Rpm,
    AppImage,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Rpm, ArtifactKind::AppImage];

    /// Id of the primary download link for this artifact.
    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Rpm => "download-rpm",
            Self::AppImage => "download-appimage",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rpm => "RPM",
            Self::AppImage => "AppImage",
        }
    }

    /// Feather icon name shown next to the label.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Rpm => "box",
            Self::AppImage => "layers",
        }
    }
}

/// Immutable description of the current release and its predecessors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseConfig {
    pub current_version: String,
    #[serde(default)]
    pub known_versions: Vec<String>,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub downloads: BTreeMap<ArtifactKind, String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self::new("v1.0.0", ["v1.0.0"], "yourusername/vbox")
            .with_download(
                ArtifactKind::Rpm,
                "https://github.com/yourusername/vbox/releases/download/{version}/vbox-{version}-1.x86_64.rpm",
            )
            .with_download(
                ArtifactKind::AppImage,
                "https://github.com/yourusername/vbox/releases/download/{version}/VBox-{version}-x86_64.AppImage",
            )
    }
}

impl ReleaseConfig {
    /// Build a configuration with no download templates.
    #[must_use]
    pub fn new<I, S>(current_version: &str, known_versions: I, repo: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            current_version: current_version.to_owned(),
            known_versions: known_versions.into_iter().map(Into::into).collect(),
            repo: repo.to_owned(),
            downloads: BTreeMap::new(),
        }
    }

    /// Set the URL template for `kind`, replacing any previous one.
    #[must_use]
    pub fn with_download(mut self, kind: ArtifactKind, template: &str) -> Self {
        self.downloads.insert(kind, template.to_owned());
        self
    }

    /// Parse a configuration from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Parse` if `raw` is not a valid release document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The compiled-in `release.json`, or the built-in default if it fails to parse.
    #[must_use]
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_RELEASE_JSON) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}; falling back to built-in release");
                Self::default()
            }
        }
    }

    /// Download URL for `kind` at `version`, if a template is configured.
    #[must_use]
    pub fn download_url(&self, kind: ArtifactKind, version: &str) -> Option<String> {
        self.downloads
            .get(&kind)
            .map(|template| expand_template(template, version))
    }

    /// Releases page of the configured repository.
    #[must_use]
    pub fn releases_url(&self) -> Option<String> {
        if self.repo.is_empty() {
            return None;
        }
        Some(format!("https://github.com/{}/releases", self.repo))
    }
}
