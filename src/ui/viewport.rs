//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible rows of the editor pane and
//! keeps the caret row on screen.

use std::ops::Range;

/// Manages the visible portion of the laid-out document.
///
/// The viewport tracks:
/// - Pane dimensions inside the editor border (width, height)
/// - Current scroll offset (in visual rows)
/// - Total number of visual rows
///
/// # Example
///
/// ```
/// use inkdraft::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(40, 10, 30);
/// assert_eq!(vp.visible_range(), 0..10);
///
/// vp.ensure_visible(15);
/// assert_eq!(vp.visible_range(), 6..16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_rows: usize,
}

impl Viewport {
    /// Create a new viewport scrolled to the top.
    pub const fn new(width: u16, height: u16, total_rows: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_rows,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Range of visible rows, clamped to the document.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_rows);
        let end = (self.offset + self.height as usize).min(self.total_rows);
        start..end
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    /// Scroll the minimum amount that brings `row` on screen.
    pub fn ensure_visible(&mut self, row: usize) {
        let height = (self.height as usize).max(1);
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + height {
            self.offset = row + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the row count after the document or the width changed.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height as usize)
    }
}
