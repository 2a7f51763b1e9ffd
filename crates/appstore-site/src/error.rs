//! Error types for site behaviors
//!
//! Every error here is a platform or environment failure. Callers catch
//! them next to their cause and degrade to a label or a no-op; none of
//! them stop later interactions.

use std::path::PathBuf;

/// Preference storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error reading or writing the preference file
    #[error("io error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Preference file is not a JSON object of strings
    #[error("corrupt preference file {path}: {source}")]
    Corrupt {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: serde_json::Error,
    },

    /// Storage is not available at all
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Clipboard failures
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// Write to the clipboard target failed
    #[error("clipboard write failed for {path}: {source}")]
    Write {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// No clipboard on this platform
    #[error("clipboard unavailable")]
    Unavailable,
}

/// Remote counter failures
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Requested file does not exist in the repository
    #[error("file not found: {path} in {repo}")]
    NotFound {
        /// Repository as `owner/name`
        repo: String,
        /// Path inside the repository
        path: String,
    },

    /// Forbidden, usually the anonymous rate limit
    #[error("HTTP error {status} (possibly due to API rate limiting)")]
    RateLimited {
        /// HTTP status code
        status: u16,
    },

    /// Any other non-success status
    #[error("HTTP error {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Connection or protocol failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body is not the expected JSON shape
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Contents response carried no file content
    #[error("no file content in response")]
    MissingContent,

    /// File content is not valid base64
    #[error("invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl StatsError {
    /// Whether the failure came from the server rather than the transport
    #[inline]
    #[must_use]
    pub fn is_http_status(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::RateLimited { .. } | Self::Status { .. }
        )
    }
}

/// Settings loading failures
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error reading the settings file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for [`crate::SiteSettings`]
    #[error("invalid settings in {path}: {source}")]
    Parse {
        /// File involved
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: toml::de::Error,
    },
}
