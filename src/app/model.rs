use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::document::Position;
use crate::editor::EditorState;
use crate::ui::layout::DocumentLayout;
use crate::ui::viewport::Viewport;

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which control receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Editor,
    Submit,
    Refresh,
}

impl Focus {
    /// Tab order: editor, Submit, Refresh.
    pub const fn next(self) -> Self {
        match self {
            Self::Editor => Self::Submit,
            Self::Submit => Self::Refresh,
            Self::Refresh => Self::Editor,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Editor => Self::Refresh,
            Self::Submit => Self::Editor,
            Self::Refresh => Self::Submit,
        }
    }
}

/// A modal acknowledgment box, closed by any key or click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The editor widget state
    pub editor: EditorState,
    /// Control with keyboard focus
    pub focus: Focus,
    /// Scroll position of the editor pane, in wrapped rows
    pub viewport: Viewport,
    /// Wrapped rows of the current content
    layout: DocumentLayout,
    /// Full terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Acknowledgment dialog, if one is open
    pub dialog: Option<Dialog>,
    toast: Option<Toast>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Content changed since the last successful Submit
    pub dirty: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Heading shown above the editor
    pub title: String,
    /// Use the light palette
    pub light_background: bool,
    /// Where snapshots are stored, shown in the status bar
    pub storage_label: String,
    /// Whether mouse capture is on
    pub mouse_enabled: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("focus", &self.focus)
            .field("blocks", &self.editor.content().block_count())
            .field("terminal_size", &self.terminal_size)
            .field("dirty", &self.dirty)
            .field("dialog", &self.dialog)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for an editor state and a terminal of the given size.
    pub fn new(editor: EditorState, terminal_size: (u16, u16)) -> Self {
        let pane = editor_pane(terminal_size);
        let layout = DocumentLayout::new(editor.content(), pane.width);
        let viewport = Viewport::new(pane.width, pane.height, layout.row_count());
        let mut model = Self {
            editor,
            viewport,
            layout,
            terminal_size,
            ..Self::default()
        };
        model.ensure_caret_visible();
        model
    }

    /// Accept a new editor state from the widget (the change handler).
    pub fn on_change(&mut self, editor: EditorState) {
        if editor.content() != self.editor.content() {
            self.dirty = true;
            self.editor = editor;
            self.relayout();
        } else {
            self.editor = editor;
        }
        self.ensure_caret_visible();
    }

    /// Replace the document with an empty, focused one.
    pub fn reset_document(&mut self) {
        self.editor = EditorState::create_empty().with_focus(true);
        self.focus = Focus::Editor;
        self.dirty = false;
        self.relayout();
        self.viewport.scroll_up(usize::MAX);
    }

    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// Re-wrap the content after it or the pane width changed.
    pub(super) fn relayout(&mut self) {
        self.layout = DocumentLayout::new(self.editor.content(), self.viewport.width());
        self.viewport.set_total_rows(self.layout.row_count());
    }

    pub(super) fn ensure_caret_visible(&mut self) {
        if let Some((row, _)) = self.caret_cell() {
            self.viewport.ensure_visible(row);
        }
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        let pane = editor_pane(self.terminal_size);
        self.viewport.resize(pane.width, pane.height);
        self.relayout();
        self.ensure_caret_visible();
    }

    /// Layout row and pane column of the caret.
    pub fn caret_cell(&self) -> Option<(usize, u16)> {
        self.layout
            .caret_cell(self.editor.content(), self.editor.selection().focus())
    }

    /// The document position under a terminal cell, if the cell is inside
    /// the editor pane.
    pub fn position_at_cell(&self, column: u16, row: u16) -> Option<Position> {
        let pane = editor_pane(self.terminal_size);
        if !crate::ui::point_in_rect(column, row, pane) {
            return None;
        }
        let layout_row = self.viewport.offset() + usize::from(row - pane.y);
        self.layout
            .position_at(self.editor.content(), layout_row, column - pane.x)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

fn editor_pane((width, height): (u16, u16)) -> Rect {
    crate::ui::screen_layout(Rect::new(0, 0, width, height)).editor_inner
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        let terminal_size = (80, 24);
        let pane = editor_pane(terminal_size);
        let editor = EditorState::default();
        let layout = DocumentLayout::new(editor.content(), pane.width);
        Self {
            editor,
            focus: Focus::Editor,
            viewport: Viewport::new(pane.width, pane.height, layout.row_count()),
            layout,
            terminal_size,
            dialog: None,
            toast: None,
            help_visible: false,
            dirty: false,
            should_quit: false,
            quit_confirmed: false,
            title: String::from("Rich Text Editor"),
            light_background: false,
            storage_label: String::from("memory"),
            mouse_enabled: true,
        }
    }
}
