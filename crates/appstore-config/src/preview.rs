//! Preview sinks
//!
//! Where a generation outcome ends up. The generator never reaches for a
//! display on its own; callers hand it one.

/// Destination for rendered previews
pub trait PreviewSink {
    /// Show a rendered entry
    fn show_document(&mut self, text: &str);

    /// Show a validation message
    fn show_error(&mut self, message: &str);

    /// Show the placeholder prompt
    fn show_placeholder(&mut self, text: &str);
}

/// In-memory preview holding the last rendered text
///
/// `is_error` mirrors the error styling of the preview area.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPreview {
    text: String,
    is_error: bool,
}

impl TextPreview {
    /// Create an empty preview
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current preview text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the current text is a validation message
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

impl PreviewSink for TextPreview {
    fn show_document(&mut self, text: &str) {
        self.text = text.to_string();
        self.is_error = false;
    }

    fn show_error(&mut self, message: &str) {
        self.text = message.to_string();
        self.is_error = true;
    }

    fn show_placeholder(&mut self, text: &str) {
        self.text = text.to_string();
        self.is_error = false;
    }
}
