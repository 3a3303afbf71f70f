//! Integration tests for the key mapping store.
//!
//! Exercises the full edit cycle against a real file: load, rebind,
//! save, reload, and render — including the legacy on-disk shape.

use std::fs;

use gb_joypad::GbButton;
use gb_keymap::{KeyMapping, KeymapEditor, KeymapStore};

#[test]
fn first_run_loads_the_default_mapping() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = KeymapStore::new(dir.path().join("keymap.json"));

    let mapping = store.load().expect("load");
    assert_eq!(mapping, KeyMapping::default());
}

#[test]
fn confirmed_edit_survives_a_reload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("keymap.json");

    let store = KeymapStore::new(&path);
    let mut editor = KeymapEditor::new(store.load().expect("load"));

    editor.select(GbButton::Select);
    editor.capture("Backspace");
    assert!(editor.confirm());
    store.save(editor.mapping()).expect("save");

    let reloaded = KeymapStore::new(&path).load().expect("reload");
    assert_eq!(reloaded.label(GbButton::Select), "Back");
    assert_eq!(reloaded.label(GbButton::Start), "Return");

    // Rendering the reloaded mapping matches the in-memory rows
    let rows = KeymapEditor::new(reloaded).rows();
    assert_eq!(rows, editor.rows());
}

#[test]
fn legacy_pair_file_loads_and_saves_canonically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("keymap.json");

    fs::write(
        &path,
        r#"[
            {"button": "UP", "key": "W"},
            {"button": "DOWN", "key": "S"},
            {"button": "LEFT", "key": "A"},
            {"button": "RIGHT", "key": "D"},
            {"button": "A", "key": "L"},
            {"button": "B", "key": "K"},
            {"button": "SELECT", "key": "Space"},
            {"button": "START", "key": "Return"}
        ]"#,
    )
    .expect("write");

    let store = KeymapStore::new(&path);
    let mapping = store.load().expect("load");
    assert_eq!(mapping.label(GbButton::Up), "W");

    // Saving rewrites the record in the canonical object shape
    store.save(&mapping).expect("save");
    let text = fs::read_to_string(&path).expect("read");
    assert!(text.trim_start().starts_with('{'));

    let reloaded = store.load().expect("reload");
    assert_eq!(reloaded, mapping);
}

#[test]
fn malformed_record_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("keymap.json");

    fs::write(&path, r#"{"UP": "E"}"#).expect("write");
    assert!(KeymapStore::new(&path).load().is_err());

    fs::write(&path, "not json").expect("write");
    assert!(KeymapStore::new(&path).load().is_err());
}
