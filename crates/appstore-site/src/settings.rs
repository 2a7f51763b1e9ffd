//! Site settings
//!
//! Loaded from TOML. Every key is optional; missing keys take the values
//! the public site uses.
//!
//! ```toml
//! api_base_url = "https://api.github.com"
//! display_offset = "+02:00"
//!
//! [stars_repo]
//! owner = "skyious"
//! name = "config-repo-oneappstore"
//!
//! [index_repo]
//! owner = "skyious"
//! name = "index-repo-oneappstore"
//! path = "apps.one"
//!
//! [schedule]
//! mode = "daily"
//! at = "14:30:00"
//! ```

use crate::error::SettingsError;
use crate::schedule::IndexingSchedule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`SiteSettings::api_base_url`]
pub const API_BASE_URL_ENV: &str = "APPSTORE_API_BASE_URL";

const SETTINGS_DIR: &str = "appstore";
const SETTINGS_FILE: &str = "settings.toml";
const PREFERENCES_FILE: &str = "preferences.json";

/// A repository on the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    /// Owning user or organisation
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoRef {
    /// Create repository reference
    #[inline]
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A file inside a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    /// Owning user or organisation
    pub owner: String,
    /// Repository name
    pub name: String,
    /// Path of the file within the repository
    pub path: String,
}

impl ContentRef {
    /// Repository part of the reference
    #[must_use]
    pub fn repo(&self) -> RepoRef {
        RepoRef::new(&self.owner, &self.name)
    }
}

/// Settings for the site behaviors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Base URL of the repository-hosting JSON API
    pub api_base_url: String,
    /// User-Agent sent with API requests
    pub user_agent: String,
    /// Repository whose stargazers are shown
    pub stars_repo: RepoRef,
    /// Index file whose non-blank lines are counted as apps
    pub index_repo: ContentRef,
    /// When the index is rebuilt
    pub schedule: IndexingSchedule,
    /// Fixed `±HH:MM` offset for local times; system offset when unset
    pub display_offset: Option<String>,
    /// Where the theme preference is stored
    pub preferences_path: Option<PathBuf>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            user_agent: format!("appstore-site/{}", crate::VERSION),
            stars_repo: RepoRef::new("skyious", "config-repo-oneappstore"),
            index_repo: ContentRef {
                owner: "skyious".to_string(),
                name: "index-repo-oneappstore".to_string(),
                path: "apps.one".to_string(),
            },
            schedule: IndexingSchedule::default(),
            display_offset: None,
            preferences_path: None,
        }
    }
}

impl SiteSettings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With API base URL
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With indexing schedule
    #[inline]
    #[must_use]
    pub fn with_schedule(mut self, schedule: IndexingSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// With fixed display offset
    #[inline]
    #[must_use]
    pub fn with_display_offset(mut self, offset: impl Into<String>) -> Self {
        self.display_offset = Some(offset.into());
        self
    }

    /// With preference file location
    #[inline]
    #[must_use]
    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] tagged with `origin`
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load settings
    ///
    /// An explicit path must exist. Without one, the per-user settings file
    /// is used when present, defaults otherwise. Environment overrides are
    /// applied last.
    ///
    /// # Errors
    /// IO or parse failure on the chosen file
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.is_file()),
        };

        let settings = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading settings");
                let text = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
                    path: path.clone(),
                    source,
                })?;
                Self::from_toml(&text, &path)?
            }
            None => Self::default(),
        };

        Ok(settings.apply_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply environment-style overrides from `lookup`
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(%url, "api base url overridden from environment");
            self.api_base_url = url;
        }
        self
    }

    /// Per-user settings file location
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Where the theme preference lives
    #[must_use]
    pub fn preferences_file(&self) -> PathBuf {
        self.preferences_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .map(|dir| dir.join(SETTINGS_DIR).join(PREFERENCES_FILE))
                .unwrap_or_else(|| PathBuf::from(format!(".{SETTINGS_DIR}-{PREFERENCES_FILE}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_public_repos() {
        let settings = SiteSettings::new();
        assert_eq!(settings.api_base_url, "https://api.github.com");
        assert_eq!(settings.stars_repo.to_string(), "skyious/config-repo-oneappstore");
        assert_eq!(settings.index_repo.path, "apps.one");
        assert_eq!(
            settings.index_repo.repo().to_string(),
            "skyious/index-repo-oneappstore"
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let text = r#"
display_offset = "+02:00"

[schedule]
mode = "every-five-minutes"
"#;
        let settings = SiteSettings::from_toml(text, Path::new("settings.toml")).unwrap();
        assert_eq!(settings.display_offset.as_deref(), Some("+02:00"));
        assert_eq!(settings.schedule, IndexingSchedule::EveryFiveMinutes);
        assert_eq!(settings.api_base_url, "https://api.github.com");
    }

    #[test]
    fn daily_schedule_from_toml() {
        let text = r#"
[schedule]
mode = "daily"
at = "06:15:00"
"#;
        let settings = SiteSettings::from_toml(text, Path::new("settings.toml")).unwrap();
        assert_eq!(
            settings.schedule,
            IndexingSchedule::Daily {
                at: NaiveTime::from_hms_opt(6, 15, 0).unwrap()
            }
        );
    }

    #[test]
    fn bad_toml_reports_origin() {
        let err = SiteSettings::from_toml("stars_repo = 3", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn env_override_replaces_base_url() {
        let settings = SiteSettings::new().apply_overrides(|key| {
            (key == API_BASE_URL_ENV).then(|| "http://127.0.0.1:9999".to_string())
        });
        assert_eq!(settings.api_base_url, "http://127.0.0.1:9999");

        let untouched = SiteSettings::new().apply_overrides(|_| Some(String::new()));
        assert_eq!(untouched.api_base_url, "https://api.github.com");
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "user_agent = \"tester\"\n").unwrap();

        let settings = SiteSettings::load(Some(&path)).unwrap();
        assert_eq!(settings.user_agent, "tester");
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteSettings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn explicit_preferences_path_wins() {
        let settings = SiteSettings::new().with_preferences_path("/tmp/prefs.json");
        assert_eq!(settings.preferences_file(), PathBuf::from("/tmp/prefs.json"));
    }
}
