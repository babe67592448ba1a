use super::*;
use crate::grading::catalog::FilterPreset;

#[test]
fn empty_document_is_all_defaults() {
    let s = Settings::from_json("{}").unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.jpeg_quality, 92);
    assert_eq!(s.placeholder_caption, DEFAULT_PLACEHOLDER);
}

#[test]
fn partial_document_overrides_fields() {
    let s = Settings::from_json(
        r#"{ "grading": { "filter": "CINE_MOODY", "beauty_level": 25 }, "preview_size": 128 }"#,
    )
    .unwrap();
    assert_eq!(s.grading.filter, FilterPreset::CineMoody);
    assert_eq!(s.grading.beauty_level.get(), 25);
    assert_eq!(s.preview_size, 128);
    assert!(!s.captions_enabled);
}

#[test]
fn jpeg_quality_is_clamped() {
    assert_eq!(Settings::from_json(r#"{"jpeg_quality": 50}"#).unwrap().jpeg_quality, 92);
    assert_eq!(Settings::from_json(r#"{"jpeg_quality": 99}"#).unwrap().jpeg_quality, 95);
    assert_eq!(Settings::from_json(r#"{"jpeg_quality": 94}"#).unwrap().jpeg_quality, 94);
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        Settings::from_json(r#"{"preview_size": 0}"#),
        Err(FilmError::Validation(_))
    ));
    assert!(matches!(
        Settings::from_json(r#"{"grading": {"filter": "SEPIA"}}"#),
        Err(FilmError::Serde(_))
    ));
    assert!(matches!(
        Settings::from_json(r#"{"unknown": true}"#),
        Err(FilmError::Serde(_))
    ));
}

#[test]
fn json_roundtrip() {
    let mut s = Settings::default();
    s.grading = GradingConfig::new(FilterPreset::RetroInstant, 10);
    s.captions_enabled = true;
    let back = Settings::from_json(&s.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, s);
}

#[test]
fn missing_file_is_an_error() {
    assert!(Settings::from_path(Path::new("target/does-not-exist/settings.json")).is_err());
}

#[test]
fn preview_loop_uses_configured_size_and_grading() {
    let s = Settings::from_json(
        r#"{ "grading": { "filter": "RETRO_NOIR" }, "preview_size": 96 }"#,
    )
    .unwrap();
    let preview = s.preview_loop().unwrap();
    assert_eq!(preview.size(), 96);
    assert_eq!(preview.config().filter, FilterPreset::RetroNoir);
}

#[test]
fn captioning_follows_the_enabled_flag() {
    use std::cell::Cell;

    let calls = Cell::new(0u32);
    let captioner = |_: &[u8]| -> FilmResult<String> {
        calls.set(calls.get() + 1);
        Ok("Golden hour".to_string())
    };

    let mut s = Settings::from_json(r#"{ "placeholder_caption": "Untitled" }"#).unwrap();
    assert_eq!(s.caption_for(Some(&captioner), b"jpeg"), "Untitled");
    assert_eq!(calls.get(), 0);

    s.captions_enabled = true;
    assert_eq!(s.caption_for(Some(&captioner), b"jpeg"), "Golden hour");
    assert_eq!(calls.get(), 1);
    assert_eq!(s.caption_for(None, b"jpeg"), "Untitled");
}

#[test]
fn shutter_is_idle_after_construction() {
    let s = Settings::default();
    assert!(!s.shutter().is_busy());
}
