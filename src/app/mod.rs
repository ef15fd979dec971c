//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Dialog, Focus, Model, ToastLevel};
pub use update::{Message, update};

use crate::editor::EditorState;
use crate::storage::{SnapshotError, Storage, load_snapshot};

/// Main application struct that owns the storage and runs the event loop.
pub struct App {
    storage: Box<dyn Storage>,
    light_background: bool,
    mouse_enabled: bool,
    title: String,
}

impl App {
    /// Create a new application backed by `storage`.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            light_background: false,
            mouse_enabled: true,
            title: String::from("Rich Text Editor"),
        }
    }

    /// Use the light palette.
    pub const fn with_theme(mut self, light_background: bool) -> Self {
        self.light_background = light_background;
        self
    }

    /// Enable or disable mouse capture.
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Set the heading shown above the editor.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// The editor as it appears on start: the saved snapshot if there is
    /// one, otherwise an empty document, with input focus.
    ///
    /// # Errors
    ///
    /// Fails when storage cannot be read or the saved snapshot is malformed.
    pub fn initial_state(&self) -> Result<EditorState, SnapshotError> {
        let editor = match load_snapshot(self.storage.as_ref())? {
            Some(content) => {
                tracing::info!(blocks = content.block_count(), "restored saved content");
                EditorState::create_with_content(content)
            }
            None => EditorState::create_empty(),
        };
        Ok(editor.with_focus(true))
    }

    /// Build the starting model for a terminal of the given size.
    ///
    /// # Errors
    ///
    /// Same as [`App::initial_state`].
    pub fn initial_model(&self, terminal_size: (u16, u16)) -> Result<Model, SnapshotError> {
        Ok(self.model_for(self.initial_state()?, terminal_size))
    }

    fn model_for(&self, editor: EditorState, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(editor, terminal_size);
        model.title.clone_from(&self.title);
        model.light_background = self.light_background;
        model.mouse_enabled = self.mouse_enabled;
        model.storage_label = self.storage.describe();
        model
    }
}

#[cfg(test)]
mod tests;
