//! App entry generator
//!
//! Turns the values of the submission form into the text entry the config
//! repository expects.
//!
//! # Pipeline
//!
//! ```text
//! FieldSet → FieldValidator → render_entry → GenerationOutcome → PreviewSink
//!               (required, version, urls)
//! ```
//!
//! # Example
//!
//! ```rust
//! use appstore_config::{ConfigFormGenerator, FieldName, FieldSet};
//!
//! let fields = FieldSet::new()
//!     .with(FieldName::Name, "App")
//!     .with(FieldName::Author, "Jane")
//!     .with(FieldName::Version, "1.2.3")
//!     .with(FieldName::Description, "d")
//!     .with(FieldName::LogoUrl, "https://x.com/l.png")
//!     .with(FieldName::DownloadUrl, "https://x.com/a.zip");
//!
//! let outcome = ConfigFormGenerator::new().generate(&fields);
//! assert!(outcome.document().unwrap().starts_with("name: \"App\"\n"));
//! ```

#![warn(unreachable_pub)]

pub mod field;
pub mod generator;
pub mod preview;
pub mod render;
pub mod validation;

// Re-exports for convenience
pub use field::{FieldName, FieldSet, UnknownField};
pub use generator::{ConfigFormGenerator, GenerationOutcome};
pub use preview::{PreviewSink, TextPreview};
pub use render::{render_entry, split_tags, PLACEHOLDER};
pub use validation::{FieldValidator, ValidationError, INVALID_PREFIX, MISSING_FIELDS_PREFIX};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for generating entries
    pub use crate::{
        ConfigFormGenerator, FieldName, FieldSet, GenerationOutcome, PreviewSink, TextPreview,
        ValidationError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
