//! Key binding resolution.
//!
//! A key press inside the editor resolves to a [`KeyCommand`]. The four
//! markdown-style shortcuts take priority over ordinary typing: a space typed
//! right after a block consisting only of `#`, `*`, `**` or `***` becomes a
//! [`FormatCommand`] instead of a space character.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::EditorState;
use crate::document::InlineStyle;

/// A formatting shortcut triggered by a markdown-like prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    /// `#` toggles the `header-one` block type.
    HeadingOne,
    /// `*` toggles `BOLD`.
    Bold,
    /// `**` toggles the `red` color style.
    Red,
    /// `***` toggles `UNDERLINE`.
    Underline,
}

impl FormatCommand {
    pub const ALL: [Self; 4] = [Self::HeadingOne, Self::Bold, Self::Red, Self::Underline];

    /// The block text that triggers this command.
    pub const fn trigger(self) -> &'static str {
        match self {
            Self::HeadingOne => "#",
            Self::Bold => "*",
            Self::Red => "**",
            Self::Underline => "***",
        }
    }

    /// Number of characters removed when the command runs.
    pub const fn trigger_len(self) -> usize {
        self.trigger().len()
    }

    pub fn from_trigger(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.trigger() == text)
    }

    /// The inline style this command toggles; `None` for the heading.
    pub const fn inline_style(self) -> Option<InlineStyle> {
        match self {
            Self::HeadingOne => None,
            Self::Bold => Some(InlineStyle::Bold),
            Self::Red => Some(InlineStyle::Red),
            Self::Underline => Some(InlineStyle::Underline),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::HeadingOne => "heading-one",
            Self::Bold => "bold",
            Self::Red => "red",
            Self::Underline => "underline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Everything a key press can ask the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Format(FormatCommand),
    InsertChar(char),
    Backspace,
    Delete,
    SplitBlock,
    Move { motion: Motion, extend: bool },
    SelectAll,
}

/// Resolve a key press against the current state.
pub fn key_binding(state: &EditorState, key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if let Some(command) = trigger_command(state, &key) {
        return Some(KeyCommand::Format(command));
    }
    default_key_binding(key)
}

/// The shortcut a space press would fire, if any.
///
/// Fires only for a caret at the end of a block whose entire text is one of
/// the triggers.
pub fn trigger_command(state: &EditorState, key: &KeyEvent) -> Option<FormatCommand> {
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    if key.code != KeyCode::Char(' ') || !plain || !state.selection().is_collapsed() {
        return None;
    }
    let block = state.current_block();
    if state.selection().focus().offset != block.len() {
        return None;
    }
    FormatCommand::from_trigger(block.text())
}

/// Bindings that do not depend on the editor state.
pub fn default_key_binding(key: KeyEvent) -> Option<KeyCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    let mv = |motion| Some(KeyCommand::Move { motion, extend });

    match key.code {
        KeyCode::Char('a') if ctrl => Some(KeyCommand::SelectAll),
        KeyCode::Char(c) if !ctrl && !alt => Some(KeyCommand::InsertChar(c)),
        KeyCode::Enter => Some(KeyCommand::SplitBlock),
        KeyCode::Backspace => Some(KeyCommand::Backspace),
        KeyCode::Delete => Some(KeyCommand::Delete),

        KeyCode::Left if ctrl || alt => mv(Motion::WordLeft),
        KeyCode::Right if ctrl || alt => mv(Motion::WordRight),
        KeyCode::Left => mv(Motion::Left),
        KeyCode::Right => mv(Motion::Right),
        KeyCode::Up => mv(Motion::Up),
        KeyCode::Down => mv(Motion::Down),
        KeyCode::Home if ctrl => mv(Motion::DocumentStart),
        KeyCode::End if ctrl => mv(Motion::DocumentEnd),
        KeyCode::Home => mv(Motion::LineStart),
        KeyCode::End => mv(Motion::LineEnd),
        _ => None,
    }
}
