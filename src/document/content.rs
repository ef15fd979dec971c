//! Immutable document content.
//!
//! Every editing operation returns a new [`ContentState`]. Blocks are shared
//! between states through `Arc`, so an edit only copies the blocks it touches.

use std::ops::RangeInclusive;
use std::sync::Arc;

use super::selection::{Position, SelectionState};
use super::types::{BlockKey, BlockType, ContentBlock, InlineStyle, StyleSet};

const KEY_LEN: usize = 5;
const KEY_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// The ordered blocks of a document, plus the selections recorded around the
/// edit that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    blocks: Vec<Arc<ContentBlock>>,
    selection_before: SelectionState,
    selection_after: SelectionState,
}

impl ContentState {
    /// A document with a single empty unstyled block.
    pub fn empty() -> Self {
        Self::from_blocks(Vec::new())
    }

    /// Build content from blocks. An empty list yields one empty block, so a
    /// content state always has somewhere to put the caret.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        let mut blocks: Vec<Arc<ContentBlock>> = blocks.into_iter().map(Arc::new).collect();
        if blocks.is_empty() {
            let key = generate_key(0, |_| false);
            blocks.push(Arc::new(ContentBlock::new(key, BlockType::Unstyled)));
        }
        let selection = SelectionState::collapsed(Position::new(blocks[0].key().clone(), 0));
        Self {
            blocks,
            selection_before: selection.clone(),
            selection_after: selection,
        }
    }

    /// One unstyled block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut blocks: Vec<ContentBlock> = Vec::new();
        for line in text.split('\n') {
            let key = generate_key(blocks.len(), |k| blocks.iter().any(|b| b.key() == k));
            blocks.push(ContentBlock::with_text(
                key,
                BlockType::Unstyled,
                line.trim_end_matches('\r'),
                &StyleSet::new(),
            ));
        }
        Self::from_blocks(blocks)
    }

    pub fn blocks(&self) -> impl ExactSizeIterator<Item = &ContentBlock> + '_ {
        self.blocks.iter().map(AsRef::as_ref)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn block_at(&self, index: usize) -> Option<&ContentBlock> {
        self.blocks.get(index).map(AsRef::as_ref)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.key() == key).map(AsRef::as_ref)
    }

    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    pub const fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    /// Where the caret belongs once this content is pushed into an editor.
    pub const fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    /// Offset 0 of the first block.
    pub fn start_position(&self) -> Position {
        Position::new(self.first_block().key().clone(), 0)
    }

    /// End of the last block.
    pub fn end_position(&self) -> Position {
        let last = self.last_block();
        Position::new(last.key().clone(), last.len())
    }

    /// Block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// False only for a single empty block.
    pub fn has_text(&self) -> bool {
        self.blocks.len() > 1 || !self.first_block().is_empty()
    }

    /// A key not used by any block of this content.
    pub fn fresh_key(&self) -> BlockKey {
        generate_key(self.blocks.len(), |k| self.block_index(k).is_some())
    }

    /// Snap a position to an existing block and a valid offset.
    pub fn clamp_position(&self, position: &Position) -> Position {
        self.block_index(&position.key).map_or_else(
            || self.start_position(),
            |idx| Position::new(position.key.clone(), position.offset.min(self.blocks[idx].len())),
        )
    }

    /// The (start, end) positions of a selection in document order.
    pub fn selection_bounds(&self, selection: &SelectionState) -> (Position, Position) {
        let anchor = self.clamp_position(selection.anchor());
        let focus = self.clamp_position(selection.focus());
        if self.order(&anchor) <= self.order(&focus) {
            (anchor, focus)
        } else {
            (focus, anchor)
        }
    }

    /// Delete the selected text, joining the first and last touched blocks.
    #[must_use]
    pub fn remove_range(&self, selection: &SelectionState) -> Self {
        let (start, end) = self.selection_bounds(selection);
        let mut next = self.clone();
        next.selection_before = selection.clone();
        next.selection_after = SelectionState::collapsed(start.clone());
        if start == end {
            return next;
        }
        let (Some(si), Some(ei)) = (self.block_index(&start.key), self.block_index(&end.key))
        else {
            return next;
        };

        if si == ei {
            Arc::make_mut(&mut next.blocks[si]).splice(
                start.offset..end.offset,
                "",
                &StyleSet::new(),
            );
        } else {
            let end_block = &self.blocks[ei];
            let tail_text = end_block.slice(end.offset..end_block.len()).to_string();
            let tail_styles = end_block.styles()[end.offset..].to_vec();
            let first = Arc::make_mut(&mut next.blocks[si]);
            let first_len = first.len();
            first.splice(start.offset..first_len, "", &StyleSet::new());
            first.append(&tail_text, tail_styles);
            next.blocks.drain(si + 1..=ei);
        }
        next
    }

    /// Insert single-line text at a position, every character styled `style`.
    #[must_use]
    pub fn insert_text(&self, at: &Position, text: &str, style: &StyleSet) -> Self {
        debug_assert!(!text.contains('\n'), "block text cannot contain newlines");
        let at = self.clamp_position(at);
        let mut next = self.clone();
        next.selection_before = SelectionState::collapsed(at.clone());
        next.selection_after = SelectionState::collapsed(at.clone());
        let Some(idx) = self.block_index(&at.key) else {
            return next;
        };
        Arc::make_mut(&mut next.blocks[idx]).splice(at.offset..at.offset, text, style);
        next.selection_after =
            SelectionState::collapsed(Position::new(at.key, at.offset + text.chars().count()));
        next
    }

    /// Remove the selection, then insert `text` where it started.
    #[must_use]
    pub fn replace_text(&self, selection: &SelectionState, text: &str, style: &StyleSet) -> Self {
        let removed = self.remove_range(selection);
        let at = removed.selection_after.focus().clone();
        let mut next = removed.insert_text(&at, text, style);
        next.selection_before = selection.clone();
        next
    }

    /// Split the block at the selection (removing any selected text first).
    ///
    /// The block below gets a fresh key, the same type and depth, and empty
    /// data; the caret moves to its start.
    #[must_use]
    pub fn split_block(&self, selection: &SelectionState) -> Self {
        let mut next = self.remove_range(selection);
        let at = next.selection_after.focus().clone();
        let Some(idx) = next.block_index(&at.key) else {
            return next;
        };
        let key = next.fresh_key();
        let block = Arc::make_mut(&mut next.blocks[idx]);
        let (text, styles) = block.split_off(at.offset);
        let below = block.sibling(key.clone(), text, styles);
        next.blocks.insert(idx + 1, Arc::new(below));
        next.selection_after = SelectionState::collapsed(Position::new(key, 0));
        next
    }

    /// Set the type of every block the selection touches.
    #[must_use]
    pub fn set_block_type(&self, selection: &SelectionState, block_type: &BlockType) -> Self {
        let mut next = self.clone();
        next.selection_before = selection.clone();
        next.selection_after = selection.clone();
        if let Some(span) = self.block_span(selection) {
            for idx in span {
                if self.blocks[idx].block_type() != block_type {
                    Arc::make_mut(&mut next.blocks[idx]).set_block_type(block_type.clone());
                }
            }
        }
        next
    }

    /// Add `style` to every selected character.
    #[must_use]
    pub fn apply_inline_style(&self, selection: &SelectionState, style: &InlineStyle) -> Self {
        self.modify_inline_style(selection, |set| {
            set.insert(style.clone());
        })
    }

    /// Remove `style` from every selected character.
    #[must_use]
    pub fn remove_inline_style(&self, selection: &SelectionState, style: &InlineStyle) -> Self {
        self.modify_inline_style(selection, |set| {
            set.remove(style);
        })
    }

    fn modify_inline_style(
        &self,
        selection: &SelectionState,
        mut f: impl FnMut(&mut StyleSet),
    ) -> Self {
        let (start, end) = self.selection_bounds(selection);
        let mut next = self.clone();
        next.selection_before = selection.clone();
        next.selection_after = selection.clone();
        let (Some(si), Some(ei)) = (self.block_index(&start.key), self.block_index(&end.key))
        else {
            return next;
        };
        for idx in si..=ei {
            let from = if idx == si { start.offset } else { 0 };
            let to = if idx == ei {
                end.offset
            } else {
                self.blocks[idx].len()
            };
            if from < to {
                Arc::make_mut(&mut next.blocks[idx]).update_styles(from..to, &mut f);
            }
        }
        next
    }

    fn block_span(&self, selection: &SelectionState) -> Option<RangeInclusive<usize>> {
        let (start, end) = self.selection_bounds(selection);
        Some(self.block_index(&start.key)?..=self.block_index(&end.key)?)
    }

    fn order(&self, position: &Position) -> (usize, usize) {
        (
            self.block_index(&position.key).unwrap_or(0),
            position.offset,
        )
    }
}

impl Default for ContentState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Derive a short base-36 key from `seed`, skipping keys already `taken`.
pub(crate) fn generate_key(seed: usize, taken: impl Fn(&BlockKey) -> bool) -> BlockKey {
    let mut seed = seed as u64;
    loop {
        let key = BlockKey::new(encode_key(splitmix64(seed)));
        if !taken(&key) {
            return key;
        }
        seed = seed.wrapping_add(1);
    }
}

const fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn encode_key(mut n: u64) -> String {
    (0..KEY_LEN)
        .map(|_| {
            #[allow(clippy::cast_possible_truncation)]
            // n % 36 always fits in usize.
            let digit = KEY_DIGITS[(n % 36) as usize];
            n /= 36;
            char::from(digit)
        })
        .collect()
}
