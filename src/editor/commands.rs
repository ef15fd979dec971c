//! Editor commands: formatting shortcuts, Enter, and ordinary editing.

use crate::document::{BlockType, InlineStyle, Position, SelectionState, StyleSet};

use super::keys::{FormatCommand, KeyCommand, Motion};
use super::motion::move_position;
use super::rich::{toggle_block_type, toggle_inline_style};
use super::state::{ChangeType, EditorState};

/// Outcome of a command handler.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleResult {
    Handled(EditorState),
    NotHandled,
}

/// Run a formatting shortcut.
///
/// The trigger characters right before the caret are removed (pushed as a
/// `remove-range` change), then the matching style is toggled on the now
/// empty block. An inline style is flipped relative to the style the trigger
/// characters carried, so `* ` after a bold line still turns bold on. Returns [`HandleResult::NotHandled`] when the text before the
/// caret is not the command's trigger.
pub fn handle_key_command(state: &EditorState, command: FormatCommand) -> HandleResult {
    let (_, end) = state.selection_bounds();
    let Some(block) = state.content().block_for_key(&end.key) else {
        return HandleResult::NotHandled;
    };
    let Some(start) = end.offset.checked_sub(command.trigger_len()) else {
        return HandleResult::NotHandled;
    };
    if block.slice(start..end.offset) != command.trigger() {
        return HandleResult::NotHandled;
    }

    let typed_style = block.style_at(start).clone();
    let trigger = SelectionState::range(Position::new(end.key.clone(), start), end);
    let content = state
        .content()
        .replace_text(&trigger, "", &StyleSet::new());
    let removed = state.push(content, ChangeType::RemoveRange);

    // Inline toggles start from the style the trigger was typed with.
    let next = match command.inline_style() {
        Some(style) => {
            let typed = removed.set_inline_style_override(typed_style);
            toggle_inline_style(&typed, &style)
        }
        None => toggle_block_type(&removed, &BlockType::HeaderOne),
    };
    tracing::debug!(command = command.name(), "formatting shortcut");
    HandleResult::Handled(next)
}

/// Handle Enter: split the block, make the new block unstyled, and start it
/// with no inline styles.
pub fn handle_return(state: &EditorState) -> HandleResult {
    let split = state.content().split_block(state.selection());
    let below = split.selection_after().clone();
    let content = split.set_block_type(&below, &BlockType::Unstyled);
    let next = state
        .push(content, ChangeType::SplitBlock)
        .set_inline_style_override(StyleSet::new());
    HandleResult::Handled(next)
}

/// Apply a resolved key command.
pub fn apply_command(state: &EditorState, command: KeyCommand) -> EditorState {
    match command {
        KeyCommand::Format(format) => match handle_key_command(state, format) {
            HandleResult::Handled(next) => next,
            HandleResult::NotHandled => insert_text(state, " "),
        },
        KeyCommand::InsertChar(c) => insert_text(state, c.encode_utf8(&mut [0; 4])),
        KeyCommand::SplitBlock => match handle_return(state) {
            HandleResult::Handled(next) => next,
            HandleResult::NotHandled => {
                let content = state.content().split_block(state.selection());
                state.push(content, ChangeType::SplitBlock)
            }
        },
        KeyCommand::Backspace => backspace(state),
        KeyCommand::Delete => delete(state),
        KeyCommand::Move { motion, extend } => move_selection(state, motion, extend),
        KeyCommand::SelectAll => select_all(state),
    }
}

/// Type single-line text over the selection with the current inline style.
pub fn insert_text(state: &EditorState, text: &str) -> EditorState {
    let style = state.current_inline_style();
    let content = state
        .content()
        .replace_text(state.selection(), text, &style);
    state.push(content, ChangeType::InsertCharacters)
}

/// Paste text; every line break splits a block.
pub fn paste(state: &EditorState, text: &str) -> EditorState {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    if text.is_empty() {
        return state.clone();
    }
    let style = state.current_inline_style();
    let mut lines = text.split('\n');
    let first = lines.next().unwrap_or_default();
    let mut content = state
        .content()
        .replace_text(state.selection(), first, &style);
    for line in lines {
        let split = content.split_block(content.selection_after());
        let at = split.selection_after().focus().clone();
        content = split.insert_text(&at, line, &style);
    }
    state.push(content, ChangeType::InsertFragment)
}

/// Delete the selection, the character before the caret, or the break
/// before the block.
///
/// At the start of a styled block the block type is reset first.
pub fn backspace(state: &EditorState) -> EditorState {
    if !state.selection().is_collapsed() {
        let content = state.content().remove_range(state.selection());
        return state.push(content, ChangeType::RemoveRange);
    }

    let (caret, _) = state.selection_bounds();
    if caret.offset > 0 {
        let range = SelectionState::range(
            Position::new(caret.key.clone(), caret.offset - 1),
            caret,
        );
        let content = state.content().remove_range(&range);
        return state.push(content, ChangeType::BackspaceCharacter);
    }

    if state.current_block_type() != &BlockType::Unstyled {
        let content = state
            .content()
            .set_block_type(state.selection(), &BlockType::Unstyled);
        return state.push(content, ChangeType::ChangeBlockType);
    }

    let content = state.content();
    let Some(index) = content.block_index(&caret.key).filter(|&i| i > 0) else {
        return state.clone();
    };
    let Some(above) = content.block_at(index - 1) else {
        return state.clone();
    };
    let range = SelectionState::range(Position::new(above.key().clone(), above.len()), caret);
    let next = content.remove_range(&range);
    state.push(next, ChangeType::BackspaceCharacter)
}

/// Delete the selection, the character after the caret, or the break after
/// the block.
pub fn delete(state: &EditorState) -> EditorState {
    if !state.selection().is_collapsed() {
        let content = state.content().remove_range(state.selection());
        return state.push(content, ChangeType::RemoveRange);
    }

    let (caret, _) = state.selection_bounds();
    let content = state.content();
    let Some(index) = content.block_index(&caret.key) else {
        return state.clone();
    };
    let len = content.block_at(index).map_or(0, |b| b.len());
    let target = if caret.offset < len {
        Position::new(caret.key.clone(), caret.offset + 1)
    } else if let Some(below) = content.block_at(index + 1) {
        Position::new(below.key().clone(), 0)
    } else {
        return state.clone();
    };
    let next = content.remove_range(&SelectionState::range(caret, target));
    state.push(next, ChangeType::DeleteCharacter)
}

/// Move the caret, or extend the selection when `extend` is set.
///
/// Left/Right without `extend` on a range collapse it to the matching end.
pub fn move_selection(state: &EditorState, motion: Motion, extend: bool) -> EditorState {
    let selection = state.selection();
    let focus = selection.has_focus();

    if extend {
        let target = move_position(state.content(), selection.focus(), motion);
        return state.accept_selection(selection.clone().extend_to(target));
    }

    let (start, end) = state.selection_bounds();
    let target = match motion {
        Motion::Left if !selection.is_collapsed() => start,
        Motion::Right if !selection.is_collapsed() => end,
        _ => move_position(state.content(), selection.focus(), motion),
    };
    state.accept_selection(SelectionState::collapsed(target).with_focus(focus))
}

pub fn select_all(state: &EditorState) -> EditorState {
    let content = state.content();
    let selection = SelectionState::range(content.start_position(), content.end_position())
        .with_focus(state.has_focus());
    state.accept_selection(selection)
}

/// Place the caret at `position` (a click).
pub fn place_caret(state: &EditorState, position: Position) -> EditorState {
    state.accept_selection(SelectionState::collapsed(position).with_focus(true))
}
