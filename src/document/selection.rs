//! Caret and selection positions.

use super::types::BlockKey;

/// A caret position: a block and a character offset inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub key: BlockKey,
    pub offset: usize,
}

impl Position {
    pub const fn new(key: BlockKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

/// A selection between an anchor (where it started) and a focus (where the
/// caret is). Ordering of the two ends depends on block order, so start/end
/// are resolved through [`crate::document::ContentState::selection_bounds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    anchor: Position,
    focus: Position,
    has_focus: bool,
}

impl SelectionState {
    /// A collapsed selection (caret) at `position`.
    pub fn collapsed(position: Position) -> Self {
        Self {
            anchor: position.clone(),
            focus: position,
            has_focus: false,
        }
    }

    pub const fn range(anchor: Position, focus: Position) -> Self {
        Self {
            anchor,
            focus,
            has_focus: false,
        }
    }

    pub const fn anchor(&self) -> &Position {
        &self.anchor
    }

    pub const fn focus(&self) -> &Position {
        &self.focus
    }

    /// Whether the editor surface owning this selection has input focus.
    pub const fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    #[must_use]
    pub fn with_focus(mut self, has_focus: bool) -> Self {
        self.has_focus = has_focus;
        self
    }

    /// Move the focus end, keeping the anchor (Shift+motion).
    #[must_use]
    pub fn extend_to(mut self, focus: Position) -> Self {
        self.focus = focus;
        self
    }
}
