//! The rich-text editor widget logic.
//!
//! Everything here is a pure function over an immutable [`EditorState`]:
//! key resolution, the formatting shortcuts, Enter handling, and ordinary
//! editing and caret motion. The app layer feeds key events in and stores
//! whatever state comes back.

mod commands;
mod keys;
mod motion;
mod rich;
mod state;

pub use commands::{
    HandleResult, apply_command, backspace, delete, handle_key_command, handle_return,
    insert_text, move_selection, paste, place_caret, select_all,
};
pub use keys::{FormatCommand, KeyCommand, Motion, default_key_binding, key_binding, trigger_command};
pub use motion::move_position;
pub use rich::{toggle_block_type, toggle_inline_style};
pub use state::{ChangeType, EditorState};
