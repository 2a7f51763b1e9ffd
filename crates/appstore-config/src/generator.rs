//! Config form generator
//!
//! Pure mapping from a [`FieldSet`] to a [`GenerationOutcome`], plus a
//! helper that pushes the outcome into a [`PreviewSink`].

use crate::field::FieldSet;
use crate::preview::PreviewSink;
use crate::render::{render_entry, PLACEHOLDER};
use crate::validation::{FieldValidator, ValidationError};
use std::fmt;

/// Result of one generation pass
///
/// Exactly one of a document, a validation failure, or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Rendered entry, newline terminated
    Document(String),
    /// First validation failure
    Invalid(ValidationError),
    /// Validation passed but nothing rendered
    Placeholder,
}

impl GenerationOutcome {
    /// Whether a document was produced
    #[inline]
    #[must_use]
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document(_))
    }

    /// Rendered entry, if any
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::Document(text) => Some(text),
            _ => None,
        }
    }

    /// Validation failure, if any
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// Convert into a `Result`, treating the placeholder as an empty document
    ///
    /// # Errors
    /// The validation failure
    pub fn into_result(self) -> Result<String, ValidationError> {
        match self {
            Self::Document(text) => Ok(text),
            Self::Invalid(err) => Err(err),
            Self::Placeholder => Ok(String::new()),
        }
    }
}

impl fmt::Display for GenerationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(text) => f.write_str(text),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}

/// Validates submission fields and renders the app entry
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigFormGenerator {
    validator: FieldValidator,
}

impl ConfigFormGenerator {
    /// Create new generator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate then render
    #[must_use]
    pub fn generate(&self, fields: &FieldSet) -> GenerationOutcome {
        if let Err(err) = self.validator.validate(fields) {
            tracing::debug!(error = %err, "generation rejected");
            return GenerationOutcome::Invalid(err);
        }

        match render_entry(fields) {
            Some(text) => GenerationOutcome::Document(text),
            None => GenerationOutcome::Placeholder,
        }
    }

    /// Generate and show the outcome in `sink`
    pub fn refresh(&self, fields: &FieldSet, sink: &mut dyn PreviewSink) -> GenerationOutcome {
        let outcome = self.generate(fields);
        match &outcome {
            GenerationOutcome::Document(text) => sink.show_document(text),
            GenerationOutcome::Invalid(err) => sink.show_error(&err.to_string()),
            GenerationOutcome::Placeholder => sink.show_placeholder(PLACEHOLDER),
        }
        outcome
    }
}
