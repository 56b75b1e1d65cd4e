use std::fs;
use std::path::PathBuf;

use galaxy_retro::entities::DeviceClass;
use galaxy_retro::persistence::*;
use galaxy_retro::Settings;

/// Fresh, not-yet-existing path under the system temp dir.
fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("galaxy_retro_test_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir.join("nested").join("high_score.json")
}

// ── Memory store ──────────────────────────────────────────────────────────────

#[test]
fn memory_store_starts_absent() {
    let store = MemoryHighScoreStore::default();
    assert_eq!(store.get_high_score(), None);
    assert_eq!(store.writes(), 0);
}

#[test]
fn memory_store_keeps_last_value() {
    let mut store = MemoryHighScoreStore::with_score(3);
    store.set_high_score(8);
    assert_eq!(store.get_high_score(), Some(8));
    assert_eq!(store.writes(), 1);
}

// ── File store ────────────────────────────────────────────────────────────────

#[test]
fn file_store_missing_file_reads_absent() {
    let store = FileHighScoreStore::new(scratch_path("missing"));
    assert_eq!(store.get_high_score(), None);
}

#[test]
fn file_store_persists_across_instances() {
    let path = scratch_path("persist");
    let mut store = FileHighScoreStore::new(&path);
    store.set_high_score(57);
    assert!(path.exists(), "parent directories are created");

    let reopened = FileHighScoreStore::new(&path);
    assert_eq!(reopened.get_high_score(), Some(57));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn file_store_corrupt_file_reads_absent() {
    let path = scratch_path("corrupt");
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, "not json at all").expect("write");
    assert_eq!(FileHighScoreStore::new(&path).get_high_score(), None);
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[test]
fn settings_default_to_desktop() {
    let settings = Settings::load_from(&scratch_path("no_settings"));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.device, DeviceClass::Desktop);
    assert!(settings.high_score_path().ends_with("high_score.json"));
}

#[test]
fn settings_read_from_json() {
    let path = scratch_path("settings");
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, r#"{ "device": "mobile", "high_score_file": "/tmp/hs.json" }"#).expect("write");
    let settings = Settings::load_from(&path);
    assert_eq!(settings.device, DeviceClass::Mobile);
    assert_eq!(settings.high_score_path(), PathBuf::from("/tmp/hs.json"));
}

#[test]
fn settings_partial_json_fills_defaults() {
    let path = scratch_path("partial");
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, r#"{ "device": "mobile" }"#).expect("write");
    let settings = Settings::load_from(&path);
    assert_eq!(settings.device, DeviceClass::Mobile);
    assert_eq!(settings.high_score_file, None);
}

#[test]
fn settings_invalid_json_falls_back() {
    let path = scratch_path("invalid");
    fs::create_dir_all(path.parent().expect("has parent")).expect("create dir");
    fs::write(&path, r#"{ "device": "tablet" }"#).expect("write");
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn device_override() {
    let base = Settings::default();
    assert_eq!(base.clone().with_device_override(Some("mobile")).device, DeviceClass::Mobile);
    assert_eq!(base.clone().with_device_override(Some("bogus")).device, DeviceClass::Desktop);
    assert_eq!(base.with_device_override(None).device, DeviceClass::Desktop);
}
