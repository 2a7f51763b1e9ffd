//! Submission fields
//!
//! The fixed key set of an app entry and the record holding the values
//! read from the submission form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key of an app entry field
///
/// Variant order is the declared order and drives output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    /// Display name of the app
    Name,
    /// Author or publisher
    Author,
    /// Release version, `X.Y.Z`
    Version,
    /// Short description
    Description,
    /// Icon URL
    LogoUrl,
    /// Package download URL
    DownloadUrl,
    /// Takedown contact or notice
    Takedown,
    /// SHA-256 checksum of the package
    Sha256sum,
    /// Project homepage
    Homepage,
    /// Comma separated tags
    Tags,
}

impl FieldName {
    /// Every field, in declared order
    pub const ALL: [FieldName; 10] = [
        FieldName::Name,
        FieldName::Author,
        FieldName::Version,
        FieldName::Description,
        FieldName::LogoUrl,
        FieldName::DownloadUrl,
        FieldName::Takedown,
        FieldName::Sha256sum,
        FieldName::Homepage,
        FieldName::Tags,
    ];

    /// Fields that must be non-empty
    pub const REQUIRED: [FieldName; 6] = [
        FieldName::Name,
        FieldName::Author,
        FieldName::Version,
        FieldName::Description,
        FieldName::LogoUrl,
        FieldName::DownloadUrl,
    ];

    /// Fields holding URLs, in check order
    pub const URLS: [FieldName; 3] = [
        FieldName::LogoUrl,
        FieldName::DownloadUrl,
        FieldName::Homepage,
    ];

    /// Key as it appears in the form and in the rendered entry
    #[inline]
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Author => "author",
            Self::Version => "version",
            Self::Description => "description",
            Self::LogoUrl => "logo_url",
            Self::DownloadUrl => "download_url",
            Self::Takedown => "takedown",
            Self::Sha256sum => "sha256sum",
            Self::Homepage => "homepage",
            Self::Tags => "tags",
        }
    }

    /// Human label: the key with its first underscore turned into a space
    #[must_use]
    pub fn label(self) -> String {
        self.key().replacen('_', " ", 1)
    }

    /// Whether the field is in [`FieldName::REQUIRED`]
    #[inline]
    #[must_use]
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unknown field key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Values read from the submission form
///
/// Every field is optional. An absent value and an empty string are the
/// same thing to validation and rendering; use [`FieldSet::value`] rather
/// than the raw fields when reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSet {
    /// App name
    pub name: Option<String>,
    /// Author or publisher
    pub author: Option<String>,
    /// Release version, `X.Y.Z`
    pub version: Option<String>,
    /// Short description
    pub description: Option<String>,
    /// Logo image URL
    pub logo_url: Option<String>,
    /// Download URL
    pub download_url: Option<String>,
    /// Takedown contact
    pub takedown: Option<String>,
    /// SHA-256 checksum of the download
    pub sha256sum: Option<String>,
    /// Project homepage URL
    pub homepage: Option<String>,
    /// Comma separated tags
    pub tags: Option<String>,
}

impl FieldSet {
    /// Create an empty field set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Replace the value of a field
    pub fn set(&mut self, field: FieldName, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Non-empty value of a field
    #[must_use]
    pub fn value(&self, field: FieldName) -> Option<&str> {
        self.slot(field).as_deref().filter(|v| !v.is_empty())
    }

    /// Whether the field is absent or empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self, field: FieldName) -> bool {
        self.value(field).is_none()
    }

    /// Non-empty values in declared order
    pub fn entries(&self) -> impl Iterator<Item = (FieldName, &str)> + '_ {
        FieldName::ALL
            .into_iter()
            .filter_map(|field| self.value(field).map(|value| (field, value)))
    }

    fn slot(&self, field: FieldName) -> &Option<String> {
        match field {
            FieldName::Name => &self.name,
            FieldName::Author => &self.author,
            FieldName::Version => &self.version,
            FieldName::Description => &self.description,
            FieldName::LogoUrl => &self.logo_url,
            FieldName::DownloadUrl => &self.download_url,
            FieldName::Takedown => &self.takedown,
            FieldName::Sha256sum => &self.sha256sum,
            FieldName::Homepage => &self.homepage,
            FieldName::Tags => &self.tags,
        }
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut Option<String> {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Author => &mut self.author,
            FieldName::Version => &mut self.version,
            FieldName::Description => &mut self.description,
            FieldName::LogoUrl => &mut self.logo_url,
            FieldName::DownloadUrl => &mut self.download_url,
            FieldName::Takedown => &mut self.takedown,
            FieldName::Sha256sum => &mut self.sha256sum,
            FieldName::Homepage => &mut self.homepage,
            FieldName::Tags => &mut self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_order_matches_keys() {
        let keys: Vec<_> = FieldName::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "author",
                "version",
                "description",
                "logo_url",
                "download_url",
                "takedown",
                "sha256sum",
                "homepage",
                "tags"
            ]
        );
    }

    #[test]
    fn label_replaces_first_underscore_only() {
        assert_eq!(FieldName::LogoUrl.label(), "logo url");
        assert_eq!(FieldName::DownloadUrl.label(), "download url");
        assert_eq!(FieldName::Homepage.label(), "homepage");
    }

    #[test]
    fn key_roundtrips_through_from_str() {
        for field in FieldName::ALL {
            assert_eq!(field.key().parse::<FieldName>(), Ok(field));
        }
        assert!("logo".parse::<FieldName>().is_err());
    }

    #[test]
    fn empty_string_reads_as_absent() {
        let fields = FieldSet::new().with(FieldName::Name, "");
        assert_eq!(fields.value(FieldName::Name), None);
        assert!(fields.is_empty(FieldName::Name));
        assert!(fields.is_empty(FieldName::Author));
    }

    #[test]
    fn whitespace_is_a_value() {
        let fields = FieldSet::new().with(FieldName::Author, " ");
        assert_eq!(fields.value(FieldName::Author), Some(" "));
    }

    #[test]
    fn entries_follow_declared_order() {
        let fields = FieldSet::new()
            .with(FieldName::Tags, "a")
            .with(FieldName::Name, "App")
            .with(FieldName::Homepage, "");
        let got: Vec<_> = fields.entries().map(|(f, _)| f).collect();
        assert_eq!(got, vec![FieldName::Name, FieldName::Tags]);
    }

    #[test]
    fn required_membership() {
        assert!(FieldName::Version.is_required());
        assert!(!FieldName::Homepage.is_required());
        assert!(!FieldName::Tags.is_required());
    }
}
