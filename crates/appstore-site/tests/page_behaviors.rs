//! Theme, copy and generator working together

use appstore_config::{ConfigFormGenerator, FieldName, FieldSet, TextPreview};
use appstore_site::copy::IDLE_LABEL;
use appstore_site::theme::THEME_KEY;
use appstore_site::{
    CopyButton, CopyFeedback, FileClipboard, FilePreferenceStore, PreferenceStore, Theme,
    ThemeController, ThemeIcon,
};
use appstore_test_utils::{complete_fields, MemoryClipboard, COMPLETE_ENTRY};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[test]
fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut controller = ThemeController::load(Box::new(FilePreferenceStore::new(&path)));
    assert_eq!(controller.theme(), Theme::Light);
    assert_eq!(controller.icon(), ThemeIcon::Moon);

    assert_eq!(controller.toggle(), Theme::Dark);
    assert_eq!(controller.icon().class(), "bi-sun-fill");

    let reloaded = ThemeController::load(Box::new(FilePreferenceStore::new(&path)));
    assert_eq!(reloaded.theme(), Theme::Dark);

    let raw = FilePreferenceStore::new(&path).get(THEME_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some("dark"));
}

#[test]
fn test_corrupt_preferences_fall_back_to_light() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{not json").unwrap();

    let mut controller = ThemeController::load(Box::new(FilePreferenceStore::new(&path)));
    assert_eq!(controller.theme(), Theme::Light);

    controller.toggle();
    let reloaded = ThemeController::load(Box::new(FilePreferenceStore::new(&path)));
    assert_eq!(reloaded.theme(), Theme::Dark);
}

#[test]
fn test_copy_generated_entry() {
    let mut preview = TextPreview::new();
    ConfigFormGenerator::new().refresh(&complete_fields(), &mut preview);

    let mut clipboard = MemoryClipboard::new();
    let mut button = CopyButton::new();
    let now = Instant::now();

    assert_eq!(button.click(preview.text(), &mut clipboard, now), CopyFeedback::Copied);
    assert_eq!(clipboard.contents.as_deref(), Some(COMPLETE_ENTRY));
    assert_eq!(button.label_at(now + Duration::from_millis(1999)), "Copied!");
    assert_eq!(button.label_at(now + Duration::from_millis(2000)), IDLE_LABEL);
}

#[test]
fn test_validation_message_is_not_copied() {
    let mut preview = TextPreview::new();
    let fields = FieldSet::new().with(FieldName::Name, "App");
    ConfigFormGenerator::new().refresh(&fields, &mut preview);
    assert!(preview.is_error());

    let mut clipboard = MemoryClipboard::new();
    let mut button = CopyButton::new();
    let now = Instant::now();

    assert_eq!(
        button.click(preview.text(), &mut clipboard, now),
        CopyFeedback::NothingToCopy
    );
    assert_eq!(clipboard.writes, 0);
    assert_eq!(button.label_at(now), "Nothing to Copy");
}

#[test]
fn test_clipboard_failure_shows_feedback() {
    let mut clipboard = MemoryClipboard::unavailable();
    let mut button = CopyButton::new();
    let now = Instant::now();

    assert_eq!(button.click(COMPLETE_ENTRY, &mut clipboard, now), CopyFeedback::Failed);
    assert_eq!(button.label_at(now), "Copy Failed");
}

#[test]
fn test_file_clipboard_writes_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("entry.yaml");
    let mut clipboard = FileClipboard::new(&path);

    let feedback = CopyButton::new().click(COMPLETE_ENTRY, &mut clipboard, Instant::now());

    assert_eq!(feedback, CopyFeedback::Copied);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), COMPLETE_ENTRY);
}
