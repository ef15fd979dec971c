use inkdraft::document::{BlockType, InlineStyle, convert_to_raw};
use inkdraft::editor::{EditorState, KeyCommand, apply_command, key_binding};
use inkdraft::storage::{
    EDITOR_CONTENT_KEY, FileStorage, Storage, clear_snapshot, load_snapshot, save_snapshot,
    serialize_snapshot,
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Type text the way the terminal delivers it: one key press per character.
fn type_keys(mut editor: EditorState, text: &str) -> EditorState {
    for c in text.chars() {
        let code = if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) };
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(command) = key_binding(&editor, key) {
            editor = apply_command(&editor, command);
        }
    }
    editor
}

fn focused() -> EditorState {
    EditorState::create_empty().with_focus(true)
}

#[test]
fn test_heading_scenario_saves_expected_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().join("local_storage.json"));

    let editor = type_keys(focused(), "# Hello");
    save_snapshot(&mut storage, editor.content()).unwrap();

    let json = storage.get_item(EDITOR_CONTENT_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let blocks = value["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["type"], "header-one");
    assert_eq!(blocks[0]["text"], "Hello");
    assert_eq!(blocks[0]["depth"], 0);
    assert_eq!(blocks[0]["inlineStyleRanges"], serde_json::json!([]));
}

#[test]
fn test_save_then_reload_is_deep_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let editor = type_keys(focused(), "# Title\n* bold text\n** red\n*** under\nplain");
    let saved = {
        let mut storage = FileStorage::new(&path);
        save_snapshot(&mut storage, editor.content()).unwrap()
    };

    // A fresh handle sees what the first one wrote.
    let storage = FileStorage::new(&path);
    let reloaded = load_snapshot(&storage).unwrap().unwrap();
    assert_eq!(serialize_snapshot(&reloaded).unwrap(), saved);
    assert_eq!(convert_to_raw(&reloaded), convert_to_raw(editor.content()));

    let types: Vec<_> = reloaded.blocks().map(|b| b.block_type().clone()).collect();
    assert_eq!(types[0], BlockType::HeaderOne);
    assert!(types[1..].iter().all(|t| *t == BlockType::Unstyled));

    let bold = reloaded.block_at(1).unwrap();
    assert_eq!(bold.text(), "bold text");
    assert!(bold.style_at(0).contains(&InlineStyle::Bold));
    assert!(reloaded.block_at(2).unwrap().style_at(0).contains(&InlineStyle::Red));
    assert!(reloaded.block_at(3).unwrap().style_at(0).contains(&InlineStyle::Underline));
    assert!(reloaded.block_at(4).unwrap().style_at(0).is_empty());
}

#[test]
fn test_clear_removes_only_editor_content() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().join("store.json"));
    storage.set_item("other", "kept").unwrap();

    let editor = type_keys(focused(), "text");
    save_snapshot(&mut storage, editor.content()).unwrap();
    clear_snapshot(&mut storage).unwrap();

    assert!(load_snapshot(&storage).unwrap().is_none());
    assert_eq!(storage.get_item("other").unwrap().as_deref(), Some("kept"));
}

#[test]
fn test_missing_storage_file_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("nested/never-written.json"));
    assert!(load_snapshot(&storage).unwrap().is_none());
}

#[test]
fn test_enter_mid_line_does_not_inherit_style_override() {
    let editor = type_keys(focused(), "* bold");
    let editor = (0..2).fold(editor, |e, _| {
        apply_command(
            &e,
            KeyCommand::Move {
                motion: inkdraft::editor::Motion::Left,
                extend: false,
            },
        )
    });
    let editor = type_keys(editor, "\nx");

    let content = editor.content();
    assert_eq!(content.block_count(), 2);
    assert_eq!(content.block_at(0).unwrap().text(), "bo");
    let second = content.block_at(1).unwrap();
    assert_eq!(second.text(), "xld");
    assert!(second.style_at(0).is_empty(), "typed char has no inherited style");
    assert!(second.style_at(1).contains(&InlineStyle::Bold), "moved text keeps its style");
}
