//! Immutable editor state.

use crate::document::{BlockType, ContentBlock, ContentState, Position, SelectionState, StyleSet};

/// The kind of edit recorded by [`EditorState::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    InsertCharacters,
    InsertFragment,
    RemoveRange,
    BackspaceCharacter,
    DeleteCharacter,
    SplitBlock,
    ChangeBlockType,
    ChangeInlineStyle,
}

impl ChangeType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InsertCharacters => "insert-characters",
            Self::InsertFragment => "insert-fragment",
            Self::RemoveRange => "remove-range",
            Self::BackspaceCharacter => "backspace-character",
            Self::DeleteCharacter => "delete-character",
            Self::SplitBlock => "split-block",
            Self::ChangeBlockType => "change-block-type",
            Self::ChangeInlineStyle => "change-inline-style",
        }
    }

    /// Changes that keep a pending inline style override alive.
    const fn keeps_style_override(self) -> bool {
        matches!(self, Self::ChangeBlockType | Self::SplitBlock)
    }
}

/// Document content plus everything the editor needs around it: the
/// selection and the style that the next typed characters will get.
///
/// Every transition returns a new value; the previous state is untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    content: ContentState,
    selection: SelectionState,
    inline_style_override: Option<StyleSet>,
    last_change_type: Option<ChangeType>,
}

impl EditorState {
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::empty())
    }

    /// Wrap existing content, caret at the start of the document.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.start_position());
        Self {
            content,
            selection,
            inline_style_override: None,
            last_change_type: None,
        }
    }

    pub const fn content(&self) -> &ContentState {
        &self.content
    }

    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub const fn inline_style_override(&self) -> Option<&StyleSet> {
        self.inline_style_override.as_ref()
    }

    pub const fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    pub const fn has_focus(&self) -> bool {
        self.selection.has_focus()
    }

    /// Start and end of the selection in document order.
    pub fn selection_bounds(&self) -> (Position, Position) {
        self.content.selection_bounds(&self.selection)
    }

    /// Record an edit. The selection moves to the content's
    /// `selection_after`.
    #[must_use]
    pub fn push(&self, content: ContentState, change: ChangeType) -> Self {
        let selection = content
            .selection_after()
            .clone()
            .with_focus(self.selection.has_focus());
        let inline_style_override = if change.keeps_style_override() {
            self.inline_style_override.clone()
        } else {
            None
        };
        tracing::trace!(change = change.as_str(), blocks = content.block_count(), "push");
        Self {
            content,
            selection,
            inline_style_override,
            last_change_type: Some(change),
        }
    }

    #[must_use]
    pub fn set_inline_style_override(&self, style: StyleSet) -> Self {
        Self {
            inline_style_override: Some(style),
            ..self.clone()
        }
    }

    /// Move the selection without editing. A selection that actually changes
    /// drops the inline style override.
    #[must_use]
    pub fn accept_selection(&self, selection: SelectionState) -> Self {
        let anchor = self.content.clamp_position(selection.anchor());
        let focus = self.content.clamp_position(selection.focus());
        let selection = SelectionState::range(anchor, focus).with_focus(selection.has_focus());
        let inline_style_override = if selection == self.selection {
            self.inline_style_override.clone()
        } else {
            None
        };
        Self {
            selection,
            inline_style_override,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_focus(&self, has_focus: bool) -> Self {
        Self {
            selection: self.selection.clone().with_focus(has_focus),
            ..self.clone()
        }
    }

    /// The style the next typed character will carry.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(style) = &self.inline_style_override {
            return style.clone();
        }
        let (start, _) = self.selection_bounds();
        let Some(index) = self.content.block_index(&start.key) else {
            return StyleSet::new();
        };
        let Some(block) = self.content.block_at(index) else {
            return StyleSet::new();
        };

        if self.selection.is_collapsed() {
            if start.offset > 0 {
                return block.style_at(start.offset - 1).clone();
            }
            if !block.is_empty() {
                return block.style_at(0).clone();
            }
        } else {
            if start.offset < block.len() {
                return block.style_at(start.offset).clone();
            }
            if start.offset > 0 {
                return block.style_at(start.offset - 1).clone();
            }
        }
        self.look_upward_for_style(index)
    }

    /// The block holding the caret.
    pub fn current_block(&self) -> &ContentBlock {
        self.content
            .block_for_key(&self.selection.focus().key)
            .unwrap_or_else(|| self.content.first_block())
    }

    /// Type of the block where the selection starts.
    pub fn current_block_type(&self) -> &BlockType {
        let (start, _) = self.selection_bounds();
        self.content
            .block_for_key(&start.key)
            .unwrap_or_else(|| self.content.first_block())
            .block_type()
    }

    fn look_upward_for_style(&self, index: usize) -> StyleSet {
        (0..index)
            .rev()
            .filter_map(|i| self.content.block_at(i))
            .find(|block| !block.is_empty())
            .map(|block| block.style_at(block.len() - 1).clone())
            .unwrap_or_default()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}
