use crate::app::model::{Focus, Model, ToastLevel};
use crate::editor::{self, KeyCommand};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// A key press resolved by the editor's key bindings
    Edit(KeyCommand),
    /// Bracketed paste into the editor
    Paste(String),

    // Focus
    /// Give the editor keyboard focus
    FocusEditor,
    /// Left click inside the editor container (terminal cell)
    ClickEditor { column: u16, row: u16 },
    /// Left drag inside the editor container (terminal cell)
    DragEditor { column: u16, row: u16 },
    /// Tab
    FocusNext,
    /// Shift+Tab
    FocusPrev,

    // Navigation
    /// Scroll the editor pane up by n rows
    ScrollUp(usize),
    /// Scroll the editor pane down by n rows
    ScrollDown(usize),

    // Actions
    /// Save the content to storage
    Submit,
    /// Clear storage and the editor
    Refresh,
    /// Close the acknowledgment dialog
    DismissDialog,
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Storage access happens afterwards in `App::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset quit confirmation on any action other than the confirmed one.
    // Submit preserves it so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Submit) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::Edit(command) => {
            focus_editor(&mut model);
            let next = editor::apply_command(&model.editor, command);
            model.on_change(next);
        }
        Message::Paste(text) => {
            focus_editor(&mut model);
            let next = editor::paste(&model.editor, &text);
            model.on_change(next);
        }

        Message::FocusEditor => focus_editor(&mut model),
        Message::ClickEditor { column, row } => {
            focus_editor(&mut model);
            if let Some(position) = model.position_at_cell(column, row) {
                let next = editor::place_caret(&model.editor, position);
                model.on_change(next);
            }
        }
        Message::DragEditor { column, row } => {
            if model.focus == Focus::Editor
                && let Some(position) = model.position_at_cell(column, row)
            {
                let selection = model.editor.selection().clone().extend_to(position);
                let next = model.editor.accept_selection(selection);
                model.on_change(next);
            }
        }
        Message::FocusNext => {
            let focus = model.focus.next();
            set_focus(&mut model, focus);
        }
        Message::FocusPrev => {
            let focus = model.focus.prev();
            set_focus(&mut model, focus);
        }

        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),

        // Saving happens in side effects; the dialog only opens on success.
        Message::Submit => {}
        Message::Refresh => model.reset_document(),
        Message::DismissDialog => model.dialog = None,
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}

        Message::Quit => {
            if model.dirty && !model.quit_confirmed {
                model.quit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Ctrl+S to submit, Ctrl+Q again to discard",
                );
            } else {
                model.should_quit = true;
            }
        }
    }

    model
}

fn focus_editor(model: &mut Model) {
    set_focus(model, Focus::Editor);
}

fn set_focus(model: &mut Model, focus: Focus) {
    model.focus = focus;
    model.editor = model.editor.with_focus(focus == Focus::Editor);
}
