//! Validation pipeline for submission fields
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. required fields present
//! 2. version shaped `X.Y.Z`
//! 3. URL fields start with `http://` or `https://`

use crate::field::{FieldName, FieldSet};
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; `\d` would accept other scripts.
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version pattern compiles"));

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://.+").expect("url pattern compiles"));

/// Prefix shared by every missing-field message
pub const MISSING_FIELDS_PREFIX: &str = "Missing required fields";

/// Prefix shared by every format message
pub const INVALID_PREFIX: &str = "Invalid";

/// A user-correctable problem with the submitted fields
///
/// The `Display` text is what the preview shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields are empty, in required order
    #[error("Missing required fields: {}", join_keys(.0))]
    MissingFields(Vec<FieldName>),

    /// Version is not `X.Y.Z`
    #[error("Invalid version format. Use X.Y.Z format (e.g., 1.0.0)")]
    InvalidVersion,

    /// URL field without an http(s) scheme
    #[error("Invalid {} URL format. Must start with http:// or https://", .0.label())]
    InvalidUrl(FieldName),
}

impl ValidationError {
    /// Field names involved in the failure
    #[must_use]
    pub fn fields(&self) -> Vec<FieldName> {
        match self {
            Self::MissingFields(fields) => fields.clone(),
            Self::InvalidVersion => vec![FieldName::Version],
            Self::InvalidUrl(field) => vec![*field],
        }
    }
}

fn join_keys(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs the ordered checks over a [`FieldSet`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run every check, short-circuiting on the first failure
    ///
    /// # Errors
    /// The first [`ValidationError`] hit, in pipeline order
    pub fn validate(&self, fields: &FieldSet) -> Result<(), ValidationError> {
        Self::check_required(fields)?;
        Self::check_version(fields)?;
        Self::check_urls(fields)?;
        Ok(())
    }

    /// Every empty required field, reported together
    ///
    /// # Errors
    /// [`ValidationError::MissingFields`] listing all of them
    pub fn check_required(fields: &FieldSet) -> Result<(), ValidationError> {
        let missing: Vec<FieldName> = FieldName::REQUIRED
            .into_iter()
            .filter(|&field| fields.is_empty(field))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            tracing::debug!(?missing, "required fields missing");
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Version must be three dot-separated digit runs
    ///
    /// # Errors
    /// [`ValidationError::InvalidVersion`], also for an empty version
    pub fn check_version(fields: &FieldSet) -> Result<(), ValidationError> {
        match fields.value(FieldName::Version) {
            Some(version) if Self::is_version(version) => Ok(()),
            _ => Err(ValidationError::InvalidVersion),
        }
    }

    /// Non-empty URL fields must carry an http(s) scheme and something after it
    ///
    /// # Errors
    /// [`ValidationError::InvalidUrl`] for the first offending field
    pub fn check_urls(fields: &FieldSet) -> Result<(), ValidationError> {
        for field in FieldName::URLS {
            if let Some(url) = fields.value(field) {
                if !Self::is_url(url) {
                    return Err(ValidationError::InvalidUrl(field));
                }
            }
        }
        Ok(())
    }

    /// Whether `value` is `X.Y.Z` with ASCII digits
    #[inline]
    #[must_use]
    pub fn is_version(value: &str) -> bool {
        VERSION_PATTERN.is_match(value)
    }

    /// Whether `value` starts with `http://` or `https://` plus at least one character
    #[inline]
    #[must_use]
    pub fn is_url(value: &str) -> bool {
        URL_PATTERN.is_match(value)
    }
}
