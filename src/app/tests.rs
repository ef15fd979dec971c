use std::io;
use std::path::PathBuf;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use serde_json::Value;

use super::*;
use crate::document::{BlockType, InlineStyle};
use crate::editor::{FormatCommand, KeyCommand};
use crate::storage::{EDITOR_CONTENT_KEY, MemoryStorage, StorageError};

fn create_test_app() -> App {
    App::new(Box::new(MemoryStorage::new()))
}

fn create_test_model(app: &App) -> Model {
    app.initial_model((80, 24)).unwrap()
}

/// Run a message through `update` and the side effects, like the event loop.
fn send(app: &mut App, model: Model, msg: Message) -> Model {
    let side_msg = msg.clone();
    let mut model = update(model, msg);
    app.handle_message_side_effects(&mut model, &side_msg);
    model
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Feed keys through the real key handling path.
fn press_keys(model: Model, keys: impl IntoIterator<Item = KeyEvent>) -> Model {
    keys.into_iter().fold(model, |model, k| {
        match App::handle_key(k, &model) {
            Some(msg) => update(model, msg),
            None => model,
        }
    })
}

fn type_str(model: Model, text: &str) -> Model {
    press_keys(model, text.chars().map(|c| key(KeyCode::Char(c))))
}

fn saved_json(app: &App) -> Option<Value> {
    app.storage()
        .get_item(EDITOR_CONTENT_KEY)
        .unwrap()
        .map(|json| serde_json::from_str(&json).unwrap())
}

#[derive(Debug)]
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            action: "write",
            path: PathBuf::from("/readonly/storage.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.set_item(key, "")
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

#[test]
fn test_initial_state_is_empty_and_focused() {
    let app = create_test_app();
    let model = create_test_model(&app);
    assert!(model.editor.has_focus());
    assert_eq!(model.focus, Focus::Editor);
    assert!(!model.editor.content().has_text());
    assert!(!model.dirty);
    assert_eq!(model.storage_label, "memory");
}

#[test]
fn test_initial_state_restores_saved_snapshot() {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            EDITOR_CONTENT_KEY,
            r#"{"blocks":[{"key":"a","text":"Saved","type":"header-one","depth":0,"inlineStyleRanges":[],"entityRanges":[],"data":{}}],"entityMap":{}}"#,
        )
        .unwrap();
    let app = App::new(Box::new(storage));
    let model = create_test_model(&app);

    assert!(model.editor.has_focus());
    assert_eq!(model.editor.content().plain_text(), "Saved");
    assert_eq!(model.editor.current_block_type(), &BlockType::HeaderOne);
}

#[test]
fn test_initial_state_rejects_malformed_snapshot() {
    let mut storage = MemoryStorage::new();
    storage.set_item(EDITOR_CONTENT_KEY, "{not json").unwrap();
    let app = App::new(Box::new(storage));
    assert!(app.initial_state().is_err());
}

#[test]
fn test_initial_state_treats_blank_snapshot_as_missing() {
    let mut storage = MemoryStorage::new();
    storage.set_item(EDITOR_CONTENT_KEY, "").unwrap();
    let app = App::new(Box::new(storage));
    let editor = app.initial_state().unwrap();
    assert!(editor.has_focus());
    assert!(!editor.content().has_text());
}

#[test]
fn test_builder_options_reach_model() {
    let app = create_test_app()
        .with_theme(true)
        .with_mouse(false)
        .with_title("Notes");
    let model = create_test_model(&app);
    assert!(model.light_background);
    assert!(!model.mouse_enabled);
    assert_eq!(model.title, "Notes");
}

#[test]
fn test_all_triggers_style_an_empty_block() {
    let cases = [
        ("#", None, BlockType::HeaderOne),
        ("*", Some(InlineStyle::Bold), BlockType::Unstyled),
        ("**", Some(InlineStyle::Red), BlockType::Unstyled),
        ("***", Some(InlineStyle::Underline), BlockType::Unstyled),
    ];
    for (trigger, style, block_type) in cases {
        let app = create_test_app();
        let model = type_str(create_test_model(&app), &format!("{trigger} "));
        let editor = &model.editor;

        assert_eq!(editor.content().plain_text(), "", "trigger {trigger}");
        assert_eq!(editor.current_block_type(), &block_type, "trigger {trigger}");
        if let Some(style) = style {
            assert!(editor.current_inline_style().contains(&style), "trigger {trigger}");
        }
    }
}

#[test]
fn test_trigger_inside_text_types_normally() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "a # b");
    assert_eq!(model.editor.content().plain_text(), "a # b");
    assert_eq!(model.editor.current_block_type(), &BlockType::Unstyled);
}

#[test]
fn test_submit_saves_heading_snapshot_and_opens_dialog() {
    let mut app = create_test_app();
    let model = type_str(create_test_model(&app), "# Hello");
    assert!(model.dirty);

    let model = send(&mut app, model, Message::Submit);

    let json = saved_json(&app).expect("snapshot saved");
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0]["type"], "header-one");
    assert_eq!(blocks[0]["text"], "Hello");
    assert_eq!(json["entityMap"], serde_json::json!({}));

    assert_eq!(
        model.dialog,
        Some(Dialog::new("Saved", "Content saved!"))
    );
    assert!(!model.dirty);
}

#[test]
fn test_submit_with_styled_text_saves_ranges() {
    let mut app = create_test_app();
    let model = type_str(create_test_model(&app), "** red");
    let model = send(&mut app, model, Message::Submit);
    drop(model);

    let json = saved_json(&app).unwrap();
    let block = &json["blocks"][0];
    assert_eq!(block["text"], "red");
    assert_eq!(
        block["inlineStyleRanges"],
        serde_json::json!([{"offset": 0, "length": 3, "style": "red"}])
    );
}

#[test]
fn test_submit_failure_shows_error_toast_without_dialog() {
    let mut app = App::new(Box::new(BrokenStorage));
    let model = type_str(create_test_model(&app), "text");
    let model = send(&mut app, model, Message::Submit);

    assert!(model.dialog.is_none());
    assert!(model.dirty, "content still unsaved");
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
    assert!(message.starts_with("Save failed"));
}

#[test]
fn test_refresh_clears_storage_and_editor() {
    let mut app = create_test_app();
    let model = type_str(create_test_model(&app), "# Title");
    let model = send(&mut app, model, Message::Submit);
    let model = send(&mut app, model, Message::DismissDialog);
    assert!(saved_json(&app).is_some());

    let model = send(&mut app, model, Message::Refresh);
    assert!(saved_json(&app).is_none());
    assert!(!model.editor.content().has_text());
    assert_eq!(model.editor.content().block_count(), 1);
    assert_eq!(model.editor.current_block_type(), &BlockType::Unstyled);
    assert!(model.editor.has_focus());
    assert!(!model.dirty);
}

#[test]
fn test_refresh_from_button_focus_returns_focus_to_editor() {
    let mut app = create_test_app();
    let model = type_str(create_test_model(&app), "abc");
    let model = press_keys(model, [key(KeyCode::Tab), key(KeyCode::Tab)]);
    assert_eq!(model.focus, Focus::Refresh);

    let msg = App::handle_key(key(KeyCode::Enter), &model).unwrap();
    assert_eq!(msg, Message::Refresh);
    let model = send(&mut app, model, msg);
    assert_eq!(model.focus, Focus::Editor);
    assert!(model.editor.has_focus());
}

#[test]
fn test_refresh_failure_still_empties_editor() {
    let mut app = App::new(Box::new(BrokenStorage));
    let model = type_str(create_test_model(&app), "abc");
    let model = send(&mut app, model, Message::Refresh);
    assert!(!model.editor.content().has_text());
    assert_eq!(model.active_toast().map(|(_, level)| level), Some(ToastLevel::Error));
}

#[test]
fn test_enter_after_bold_starts_unstyled_block() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "* bold");
    let model = press_keys(model, [key(KeyCode::Enter)]);

    let editor = &model.editor;
    assert_eq!(editor.content().block_count(), 2);
    assert_eq!(editor.current_block_type(), &BlockType::Unstyled);
    assert!(editor.current_inline_style().is_empty());

    let model = type_str(model, "x");
    let block = model.editor.current_block();
    assert_eq!(block.text(), "x");
    assert!(block.style_at(0).is_empty());
}

#[test]
fn test_enter_in_heading_creates_unstyled_block() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "# Title");
    let model = press_keys(model, [key(KeyCode::Enter)]);
    let content = model.editor.content();
    assert_eq!(content.block_at(0).unwrap().block_type(), &BlockType::HeaderOne);
    assert_eq!(content.block_at(1).unwrap().block_type(), &BlockType::Unstyled);
}

#[test]
fn test_global_shortcuts() {
    let app = create_test_app();
    let model = create_test_model(&app);
    assert_eq!(App::handle_key(ctrl('s'), &model), Some(Message::Submit));
    assert_eq!(App::handle_key(ctrl('r'), &model), Some(Message::Refresh));
    assert_eq!(App::handle_key(ctrl('q'), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(ctrl('c'), &model), Some(Message::Quit));
    assert_eq!(App::handle_key(key(KeyCode::F(1)), &model), Some(Message::ToggleHelp));
    assert_eq!(App::handle_key(key(KeyCode::Tab), &model), Some(Message::FocusNext));
    assert_eq!(App::handle_key(key(KeyCode::BackTab), &model), Some(Message::FocusPrev));
}

#[test]
fn test_key_release_is_ignored() {
    let app = create_test_app();
    let model = create_test_model(&app);
    let mut release = key(KeyCode::Char('a'));
    release.kind = KeyEventKind::Release;
    assert_eq!(App::handle_key(release, &model), None);
}

#[test]
fn test_space_after_trigger_resolves_to_format_command() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "**");
    assert_eq!(
        App::handle_key(key(KeyCode::Char(' ')), &model),
        Some(Message::Edit(KeyCommand::Format(FormatCommand::Red)))
    );
}

#[test]
fn test_focus_cycles_and_buttons_activate() {
    let app = create_test_app();
    let model = create_test_model(&app);
    let model = update(model, Message::FocusNext);
    assert_eq!(model.focus, Focus::Submit);
    assert!(!model.editor.has_focus());
    assert_eq!(App::handle_key(key(KeyCode::Char(' ')), &model), Some(Message::Submit));
    assert_eq!(App::handle_key(key(KeyCode::Char('x')), &model), None);

    let model = update(model, Message::FocusPrev);
    assert_eq!(model.focus, Focus::Editor);
    assert!(model.editor.has_focus());

    let model = update(model, Message::FocusPrev);
    assert_eq!(model.focus, Focus::Refresh);
}

#[test]
fn test_dialog_dismissed_by_any_key_or_click() {
    let mut app = create_test_app();
    let initial = create_test_model(&app);
    let model = send(&mut app, initial, Message::Submit);
    assert!(model.dialog.is_some());

    assert_eq!(
        App::handle_key(key(KeyCode::Char('z')), &model),
        Some(Message::DismissDialog)
    );
    assert_eq!(App::handle_mouse(click(0, 0), &model), Some(Message::DismissDialog));

    let model = update(model, Message::DismissDialog);
    assert!(model.dialog.is_none());
}

#[test]
fn test_typing_is_blocked_while_dialog_open() {
    let mut app = create_test_app();
    let initial = create_test_model(&app);
    let model = send(&mut app, initial, Message::Submit);
    let model = type_str(model, "ab");
    assert!(model.dialog.is_none());
    assert_eq!(model.editor.content().plain_text(), "b");
}

#[test]
fn test_help_overlay_keys() {
    let app = create_test_app();
    let model = update(create_test_model(&app), Message::ToggleHelp);
    assert!(model.help_visible);
    assert_eq!(App::handle_key(key(KeyCode::Char('a')), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Esc), &model), Some(Message::HideHelp));
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_requires_confirmation_when_dirty() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "unsaved");
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert_eq!(model.active_toast().map(|(_, level)| level), Some(ToastLevel::Warning));

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_confirmation_resets_on_other_action() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "unsaved");
    let model = update(model, Message::Quit);
    let model = update(model, Message::ScrollDown(1));
    assert!(!model.quit_confirmed);
    let model = update(model, Message::Quit);
    assert!(!model.should_quit);
}

#[test]
fn test_quit_immediately_when_clean() {
    let app = create_test_app();
    let model = update(create_test_model(&app), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_submit_completes_pending_quit() {
    let mut app = create_test_app();
    let model = type_str(create_test_model(&app), "text");
    let model = update(model, Message::Quit);
    let model = send(&mut app, model, Message::Submit);
    assert!(!model.dirty);
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_mouse_click_on_buttons() {
    let app = create_test_app();
    let model = create_test_model(&app);
    let screen = crate::ui::screen_layout(ratatui::layout::Rect::new(0, 0, 80, 24));

    let submit = screen.submit_button;
    assert_eq!(App::handle_mouse(click(submit.x, submit.y), &model), Some(Message::Submit));
    let refresh = screen.refresh_button;
    assert_eq!(
        App::handle_mouse(click(refresh.x + 3, refresh.y), &model),
        Some(Message::Refresh)
    );
    assert_eq!(App::handle_mouse(click(60, refresh.y), &model), None);
}

#[test]
fn test_click_places_caret() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "hello world");
    let model = update(model, Message::FocusNext);
    let pane = crate::ui::screen_layout(ratatui::layout::Rect::new(0, 0, 80, 24)).editor_inner;

    let msg = App::handle_mouse(click(pane.x + 4, pane.y), &model).unwrap();
    assert_eq!(
        msg,
        Message::ClickEditor {
            column: pane.x + 4,
            row: pane.y
        }
    );
    let model = update(model, msg);
    assert_eq!(model.focus, Focus::Editor);
    assert!(model.editor.has_focus());
    assert!(model.editor.selection().is_collapsed());
    assert_eq!(model.editor.selection().focus().offset, 4);
}

#[test]
fn test_click_below_text_goes_to_end() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "abc");
    let pane = crate::ui::screen_layout(ratatui::layout::Rect::new(0, 0, 80, 24)).editor_inner;
    let model = update(
        model,
        Message::ClickEditor {
            column: pane.x + 40,
            row: pane.y + 10,
        },
    );
    assert_eq!(model.editor.selection().focus().offset, 3);
}

#[test]
fn test_drag_extends_selection() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), "hello world");
    let pane = crate::ui::screen_layout(ratatui::layout::Rect::new(0, 0, 80, 24)).editor_inner;
    let model = update(
        model,
        Message::ClickEditor {
            column: pane.x,
            row: pane.y,
        },
    );
    let model = update(
        model,
        Message::DragEditor {
            column: pane.x + 5,
            row: pane.y,
        },
    );
    let (start, end) = model.editor.selection_bounds();
    assert_eq!((start.offset, end.offset), (0, 5));
}

#[test]
fn test_wheel_scrolls_editor() {
    let app = create_test_app();
    let model = create_test_model(&app);
    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 5,
        row: 5,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(App::handle_mouse(wheel, &model), Some(Message::ScrollDown(3)));
}

#[test]
fn test_paste_splits_lines_into_blocks() {
    let app = create_test_app();
    let model = update(
        create_test_model(&app),
        Message::Paste("one\r\ntwo\nthree".to_string()),
    );
    let content = model.editor.content();
    assert_eq!(content.block_count(), 3);
    assert_eq!(content.plain_text(), "one\ntwo\nthree");
    assert!(model.dirty);
}

#[test]
fn test_resize_rewraps_and_keeps_caret_visible() {
    let app = create_test_app();
    let model = type_str(create_test_model(&app), &"word ".repeat(40));
    let rows_wide = model.layout().row_count();

    let model = update(model, Message::Resize(30, 10));
    assert_eq!(model.terminal_size, (30, 10));
    assert!(model.layout().row_count() > rows_wide);
    let (caret_row, _) = model.caret_cell().unwrap();
    assert!(model.viewport.visible_range().contains(&caret_row));
}

#[test]
fn test_selection_move_does_not_mark_dirty() {
    let mut app = create_test_app();
    let model = type_str(create_test_model(&app), "abc");
    let model = send(&mut app, model, Message::Submit);
    let model = update(model, Message::DismissDialog);
    let model = press_keys(model, [key(KeyCode::Left), key(KeyCode::Home)]);
    assert!(!model.dirty);
    assert_eq!(model.editor.selection().focus().offset, 0);
}

#[test]
fn test_toast_expires() {
    let app = create_test_app();
    let mut model = create_test_model(&app);
    model.show_toast(ToastLevel::Info, "hello");
    assert!(!model.expire_toast(std::time::Instant::now()));
    assert!(model.expire_toast(std::time::Instant::now() + std::time::Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}
