//! Testing utilities for the app store workspace
//!
//! Shared fixtures and in-memory stand-ins for platform pieces.

#![allow(missing_docs)]

use appstore_config::{FieldName, FieldSet, PreviewSink};
use appstore_site::{Clipboard, ClipboardError};

/// Rendered entry for [`complete_fields`]
pub const COMPLETE_ENTRY: &str = "name: \"App\"\n\
author: \"Jane\"\n\
version: \"1.2.3\"\n\
description: \"d\"\n\
logo_url: \"https://x.com/l.png\"\n\
download_url: \"https://x.com/a.zip\"\n";

/// Every required field filled with valid values, optional fields empty
pub fn complete_fields() -> FieldSet {
    FieldSet::new()
        .with(FieldName::Name, "App")
        .with(FieldName::Author, "Jane")
        .with(FieldName::Version, "1.2.3")
        .with(FieldName::Description, "d")
        .with(FieldName::LogoUrl, "https://x.com/l.png")
        .with(FieldName::DownloadUrl, "https://x.com/a.zip")
}

/// [`complete_fields`] plus every optional field
pub fn full_fields() -> FieldSet {
    complete_fields()
        .with(FieldName::Takedown, "takedown@x.com")
        .with(FieldName::Sha256sum, "e3b0c44298fc1c149afbf4c8996fb924")
        .with(FieldName::Homepage, "https://x.com")
        .with(FieldName::Tags, "tools, utilities")
}

/// What a sink was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Document(String),
    Error(String),
    Placeholder(String),
}

/// Sink that records every call
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub shown: Vec<Shown>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Shown> {
        self.shown.last()
    }
}

impl PreviewSink for RecordingSink {
    fn show_document(&mut self, text: &str) {
        self.shown.push(Shown::Document(text.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.shown.push(Shown::Error(message.to_string()));
    }

    fn show_placeholder(&mut self, text: &str) {
        self.shown.push(Shown::Placeholder(text.to_string()));
    }
}

/// Clipboard kept in memory; can be switched off to simulate failure
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub writes: usize,
    pub unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable);
        }
        self.writes += 1;
        self.contents = Some(text.to_string());
        Ok(())
    }
}
