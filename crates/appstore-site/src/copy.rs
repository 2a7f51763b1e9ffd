//! Copy action
//!
//! Copies the rendered entry to the clipboard and shows a short-lived
//! feedback label on the button.

use crate::error::ClipboardError;
use appstore_config::{INVALID_PREFIX, MISSING_FIELDS_PREFIX, PLACEHOLDER};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Label shown when no feedback is pending
pub const IDLE_LABEL: &str = "Copy Config";

/// How long a feedback label stays before reverting
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

/// Whether preview text is a real entry worth copying
///
/// Placeholder and validation messages are not.
#[must_use]
pub fn is_copyable(text: &str) -> bool {
    !text.is_empty()
        && text != PLACEHOLDER
        && !text.starts_with(MISSING_FIELDS_PREFIX)
        && !text.starts_with(INVALID_PREFIX)
}

/// System clipboard
pub trait Clipboard {
    /// Replace the clipboard contents
    ///
    /// # Errors
    /// The clipboard could not be written
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard stand-in that writes to a file
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    /// Clipboard writing to `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        std::fs::write(&self.path, text).map_err(|source| ClipboardError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Outcome of a copy click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyFeedback {
    /// Text reached the clipboard
    Copied,
    /// Clipboard write failed
    Failed,
    /// Preview held nothing copyable
    NothingToCopy,
}

impl CopyFeedback {
    /// Button label for this outcome
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Copied => "Copied!",
            Self::Failed => "Copy Failed",
            Self::NothingToCopy => "Nothing to Copy",
        }
    }
}

/// Copy button state
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyButton {
    pending: Option<(CopyFeedback, Instant)>,
}

impl CopyButton {
    /// Idle button
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a click at `now`
    ///
    /// The feedback replaces any label still showing from an earlier click.
    pub fn click(&mut self, text: &str, clipboard: &mut dyn Clipboard, now: Instant) -> CopyFeedback {
        let feedback = if !is_copyable(text) {
            CopyFeedback::NothingToCopy
        } else {
            match clipboard.write_text(text) {
                Ok(()) => CopyFeedback::Copied,
                Err(e) => {
                    tracing::error!(error = %e, "failed to copy entry to clipboard");
                    CopyFeedback::Failed
                }
            }
        };

        self.pending = Some((feedback, now + FEEDBACK_DURATION));
        feedback
    }

    /// Label visible at `now`
    #[must_use]
    pub fn label_at(&self, now: Instant) -> &'static str {
        match self.pending {
            Some((feedback, until)) if now < until => feedback.label(),
            _ => IDLE_LABEL,
        }
    }
}
