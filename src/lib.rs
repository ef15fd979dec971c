// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. storage::StorageError)
    clippy::module_name_repetitions
)]

//! # inkdraft
//!
//! A terminal rich-text editor with markdown-style formatting shortcuts.
//!
//! Typing one of these on an empty line, followed by a space, toggles a
//! style instead of inserting the characters:
//! - `#` heading
//! - `*` bold
//! - `**` red
//! - `***` underline
//!
//! Submit saves the document as a JSON snapshot under the `editorContent`
//! key of a small key/value store; Refresh clears both the store and the
//! editor.
//!
//! ## Architecture
//!
//! inkdraft uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Immutable rich-text content and the raw snapshot format
//! - [`editor`]: Editor state, key bindings and editing commands
//! - [`storage`]: Key/value storage and snapshot persistence
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod document;
pub mod editor;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{ContentState, convert_from_raw, convert_to_raw};
    pub use crate::editor::EditorState;
    pub use crate::storage::{FileStorage, MemoryStorage, Storage};
    pub use crate::ui::viewport::Viewport;
}
