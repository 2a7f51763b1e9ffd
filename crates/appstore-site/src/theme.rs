//! Theme preference
//!
//! A single dark/light flag, persisted in a key-value slot and read back on
//! the next start. The icon is a pure function of the flag.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage key holding the theme
pub const THEME_KEY: &str = "theme";

/// Colour theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Icon shown on the toggle control
    #[inline]
    #[must_use]
    pub const fn icon(self) -> ThemeIcon {
        match self {
            Self::Light => ThemeIcon::Moon,
            Self::Dark => ThemeIcon::Sun,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised stored theme value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: '{0}'")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Toggle icon; the control offers the opposite of the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    /// Shown while light
    Moon,
    /// Shown while dark
    Sun,
}

impl ThemeIcon {
    /// Icon class name
    #[inline]
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Moon => "bi-moon-fill",
            Self::Sun => "bi-sun-fill",
        }
    }
}

/// Key-value slot for preferences
pub trait PreferenceStore {
    /// Read a value
    ///
    /// # Errors
    /// Storage could not be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value
    ///
    /// # Errors
    /// Storage could not be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a JSON object on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store backed by `path`; the file is created on first write
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::io_error(&self.path, e)),
        };
        serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut values = self.read_all().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding unreadable preferences");
            BTreeMap::new()
        });
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::io_error(parent, e))?;
        }
        let text = serde_json::to_string_pretty(&values).map_err(|source| {
            StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, text).map_err(|e| StorageError::io_error(&self.path, e))
    }
}

/// Active theme plus the slot it is persisted in
pub struct ThemeController {
    theme: Theme,
    store: Box<dyn PreferenceStore + Send>,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// Read the stored theme; light when missing, unknown or unreadable
    pub fn load(store: Box<dyn PreferenceStore + Send>) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::error!(error = %e, "preference storage is not available");
                Theme::default()
            }
        };
        tracing::debug!(%theme, "theme loaded");
        Self { theme, store }
    }

    /// Active theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Icon for the active theme
    #[inline]
    #[must_use]
    pub fn icon(&self) -> ThemeIcon {
        self.theme.icon()
    }

    /// Flip the theme and persist it
    ///
    /// The flip always takes effect; a storage failure is only logged.
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.theme.as_str()) {
            tracing::error!(error = %e, "could not save theme preference");
        }
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn icon_is_function_of_theme() {
        assert_eq!(Theme::Light.icon(), ThemeIcon::Moon);
        assert_eq!(Theme::Dark.icon(), ThemeIcon::Sun);
        assert_eq!(ThemeIcon::Sun.class(), "bi-sun-fill");
        assert_eq!(ThemeIcon::Moon.class(), "bi-moon-fill");
    }

    #[test]
    fn toggle_twice_is_identity() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn parse_stored_values() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("Dark".parse::<Theme>().is_err());
    }

    #[test]
    fn controller_persists_toggle() {
        let mut controller = ThemeController::load(Box::new(MemoryPreferenceStore::new()));
        assert_eq!(controller.theme(), Theme::Light);

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.icon(), ThemeIcon::Sun);
        assert_eq!(
            controller.store.get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn broken_store_never_blocks_toggle() {
        let mut controller = ThemeController::load(Box::new(BrokenStore));
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.toggle(), Theme::Light);
    }

    #[test]
    fn unknown_stored_value_falls_back_to_light() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "sepia").unwrap();
        let controller = ThemeController::load(Box::new(store));
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = FilePreferenceStore::new(&path);
        assert_eq!(store.get(THEME_KEY).unwrap(), None);

        store.set(THEME_KEY, "dark").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn corrupt_file_reports_then_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FilePreferenceStore::new(&path);
        assert!(matches!(store.get(THEME_KEY), Err(StorageError::Corrupt { .. })));

        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }
}
