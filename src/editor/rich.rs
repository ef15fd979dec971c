//! Block and inline style toggles.

use crate::document::{BlockType, InlineStyle};

use super::state::{ChangeType, EditorState};

/// Set the selected blocks to `block_type`, or back to unstyled when the
/// block at the selection start already has it.
pub fn toggle_block_type(state: &EditorState, block_type: &BlockType) -> EditorState {
    let target = if state.current_block_type() == block_type {
        BlockType::Unstyled
    } else {
        block_type.clone()
    };
    let content = state.content().set_block_type(state.selection(), &target);
    state.push(content, ChangeType::ChangeBlockType)
}

/// Flip `style`.
///
/// With a caret this only changes the style override for the next typed
/// characters. With a range, the style is removed from the whole range if
/// the range currently carries it, and applied otherwise.
pub fn toggle_inline_style(state: &EditorState, style: &InlineStyle) -> EditorState {
    let current = state.current_inline_style();

    if state.selection().is_collapsed() {
        let mut next = current;
        if !next.remove(style) {
            next.insert(style.clone());
        }
        return state.set_inline_style_override(next);
    }

    let content = if current.contains(style) {
        state.content().remove_inline_style(state.selection(), style)
    } else {
        state.content().apply_inline_style(state.selection(), style)
    };
    state.push(content, ChangeType::ChangeInlineStyle)
}
