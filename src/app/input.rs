use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Focus, Message, Model};
use crate::ui::{point_in_rect, screen_layout};

use super::event_loop::ResizeDebouncer;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: usize = 3;

impl App {
    pub(super) fn handle_event(
        &self,
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) if self.mouse_enabled => Self::handle_mouse(mouse, model),
            Event::Paste(text) => {
                (model.dialog.is_none() && !model.help_visible && model.focus == Focus::Editor)
                    .then_some(Message::Paste(text))
            }
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(w, h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && matches!(key.code, KeyCode::Char('q' | 'c')) {
            return Some(Message::Quit);
        }

        if model.dialog.is_some() {
            return Some(Message::DismissDialog);
        }

        if model.help_visible {
            return match key.code {
                KeyCode::F(1) | KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?') => {
                    Some(Message::HideHelp)
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char('s') if ctrl => return Some(Message::Submit),
            KeyCode::Char('r') if ctrl => return Some(Message::Refresh),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Tab => return Some(Message::FocusNext),
            KeyCode::BackTab => return Some(Message::FocusPrev),
            _ => {}
        }

        match model.focus {
            Focus::Submit => activates_button(key).then_some(Message::Submit),
            Focus::Refresh => activates_button(key).then_some(Message::Refresh),
            Focus::Editor => match key.code {
                KeyCode::PageUp => Some(Message::ScrollUp(page_rows(model))),
                KeyCode::PageDown => Some(Message::ScrollDown(page_rows(model))),
                KeyCode::Esc => Some(Message::FocusNext),
                _ => crate::editor::key_binding(&model.editor, key).map(Message::Edit),
            },
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.dialog.is_some() {
            return matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                .then_some(Message::DismissDialog);
        }
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
                .then_some(Message::HideHelp);
        }

        let (width, height) = model.terminal_size;
        let screen = screen_layout(Rect::new(0, 0, width, height));
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(column, row, screen.submit_button) {
                    Some(Message::Submit)
                } else if point_in_rect(column, row, screen.refresh_button) {
                    Some(Message::Refresh)
                } else if point_in_rect(column, row, screen.editor) {
                    Some(Message::ClickEditor { column, row })
                } else {
                    None
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => point_in_rect(column, row, screen.editor)
                .then_some(Message::DragEditor { column, row }),
            MouseEventKind::ScrollUp => point_in_rect(column, row, screen.editor)
                .then_some(Message::ScrollUp(WHEEL_ROWS)),
            MouseEventKind::ScrollDown => point_in_rect(column, row, screen.editor)
                .then_some(Message::ScrollDown(WHEEL_ROWS)),
            _ => None,
        }
    }
}

fn activates_button(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

fn page_rows(model: &Model) -> usize {
    usize::from(model.viewport.height().saturating_sub(1).max(1))
}
