//! End-to-end checks of the page through its headless renderer.
//!
//! Everything here goes through `render_snapshot`, the same path as
//! `spark-folio --snapshot`.
//!
//! Run with: cargo test --test portfolio

use std::io::Write;
use std::path::Path;

use spark_folio::{Content, FolioError, Settings, render_snapshot};
use tempfile::NamedTempFile;

const EMBEDDED: &str = include_str!("../content/portfolio.toml");

fn setup() -> (Content, Settings) {
    (Content::embedded().unwrap(), Settings::default())
}

fn snapshot(content: Content, settings: Settings, at_ms: u64) -> String {
    render_snapshot(content, settings, 120, 40, at_ms).unwrap()
}

fn temp_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

// =============================================================================
// TYPEWRITER
// =============================================================================

#[test]
fn test_typewriter_reveals_one_character_per_tick() {
    let (content, settings) = setup();
    let text = snapshot(content, settings, 300);
    // Ten ticks at 30 ms, then the caret.
    assert!(text.contains("> INITIALI_"), "{text}");
    assert!(!text.contains("> INITIALIZ"));
}

#[test]
fn test_typewriter_settles_on_full_text() {
    let (content, settings) = setup();
    let full = content.hero.terminal.clone();
    let text = snapshot(content, settings, 10_000);
    for line in full.lines() {
        assert!(text.contains(line.trim_end()), "missing {line:?}");
    }
}

#[test]
fn test_typing_interval_from_config_file() {
    let file = temp_file("[motion]\ntyping_interval_ms = 60\n");
    let settings = Settings::load(Some(file.path())).unwrap();
    let text = snapshot(Content::embedded().unwrap(), settings, 300);
    assert!(text.contains("> INI_"), "{text}");
}

// =============================================================================
// PAGE
// =============================================================================

#[test]
fn test_first_screen_shows_hero() {
    let (content, settings) = setup();
    let text = snapshot(content, settings, 5_000);
    assert!(text.contains("BUILDING THE"));
    assert!(text.contains("UNSEEN."));
    // The navigation has slid in by now.
    assert!(text.contains("Amit Shah."));
}

#[test]
fn test_reduced_motion_shows_navigation_immediately() {
    let (content, mut settings) = setup();
    settings.motion.reduced = true;
    let text = snapshot(content, settings, 0);
    assert!(text.contains("Amit Shah."));
}

#[test]
fn test_content_file_replaces_copy() {
    let file = temp_file(&EMBEDDED.replace("BUILDING THE", "SHIPPING THE"));
    let content = Content::load(Some(file.path())).unwrap();
    let text = snapshot(content, Settings::default(), 5_000);
    assert!(text.contains("SHIPPING THE"));
    assert!(!text.contains("BUILDING THE"));
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn test_malformed_files_are_reported() {
    let file = temp_file("[motion\n");
    let err = Settings::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, FolioError::ConfigParse { .. }));

    let file = temp_file("[nav]\nbrand = \"x\"\n");
    let err = Content::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, FolioError::ContentParse { .. }));

    let err = Content::load(Some(Path::new("/nonexistent/portfolio.toml"))).unwrap_err();
    assert!(matches!(err, FolioError::Io(_)));
}

#[test]
fn test_bad_theme_override_fails_mount() {
    let file = temp_file("[theme.overrides]\nglow = \"not a color\"\n");
    let settings = Settings::load(Some(file.path())).unwrap();
    let err = render_snapshot(Content::embedded().unwrap(), settings, 80, 24, 0).unwrap_err();
    assert!(matches!(err, FolioError::InvalidColor { .. }));
}
