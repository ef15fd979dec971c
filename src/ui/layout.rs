//! Wrapping blocks into screen rows.
//!
//! The same [`DocumentLayout`] is used to draw the editor, to find the
//! caret's screen cell, and to turn a mouse click back into a document
//! position.

use unicode_width::UnicodeWidthChar;

use crate::document::{ContentState, Position};

/// One screen row: a character range of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    pub block: usize,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    rows: Vec<VisualRow>,
}

impl DocumentLayout {
    /// Wrap every block to `width` columns.
    ///
    /// One column is kept free so a caret after the last character of a
    /// full row still fits on that row.
    pub fn new(content: &ContentState, width: u16) -> Self {
        let wrap = usize::from(width.saturating_sub(1).max(1));
        let mut rows = Vec::new();
        for (block_idx, block) in content.blocks().enumerate() {
            let mut start = 0;
            let mut used = 0;
            for (offset, ch) in block.text().chars().enumerate() {
                let w = char_width(ch);
                if used + w > wrap && offset > start {
                    rows.push(VisualRow {
                        block: block_idx,
                        start,
                        end: offset,
                    });
                    start = offset;
                    used = 0;
                }
                used += w;
            }
            rows.push(VisualRow {
                block: block_idx,
                start,
                end: block.len(),
            });
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[VisualRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Screen row and column of a caret position.
    pub fn caret_cell(&self, content: &ContentState, position: &Position) -> Option<(usize, u16)> {
        let block_idx = content.block_index(&position.key)?;
        let block = content.block_at(block_idx)?;
        let row_idx = self.rows.iter().enumerate().position(|(i, row)| {
            let last_of_block = self.rows.get(i + 1).is_none_or(|next| next.block != block_idx);
            row.block == block_idx
                && row.start <= position.offset
                && (position.offset < row.end || (last_of_block && position.offset == row.end))
        })?;
        let row = self.rows[row_idx];
        let col: usize = block
            .text()
            .chars()
            .skip(row.start)
            .take(position.offset.saturating_sub(row.start))
            .map(char_width)
            .sum();
        Some((row_idx, u16::try_from(col).unwrap_or(u16::MAX)))
    }

    /// The document position under a screen cell (row index into the layout,
    /// column inside the pane). Rows past the end map to the last row.
    pub fn position_at(&self, content: &ContentState, row: usize, col: u16) -> Option<Position> {
        let row = *self.rows.get(row).or_else(|| self.rows.last())?;
        let block = content.block_at(row.block)?;
        let col = usize::from(col);
        let mut used = 0;
        let mut offset = row.start;
        for ch in block.text().chars().skip(row.start).take(row.end - row.start) {
            let w = char_width(ch);
            if used + w > col {
                break;
            }
            used += w;
            offset += 1;
        }
        Some(Position::new(block.key().clone(), offset))
    }
}

pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}
