//! Rich-text document model.
//!
//! This module handles:
//! - Blocks with a block type and per-character inline styles
//! - Immutable content states with structurally shared blocks
//! - Conversion to and from the raw snapshot format

mod content;
mod raw;
mod selection;
mod types;

pub use content::ContentState;
pub use raw::{
    ConvertError, RawDraftContentBlock, RawDraftContentState, RawEntityRange,
    RawInlineStyleRange, convert_from_raw, convert_to_raw,
};
pub use selection::{Position, SelectionState};
pub use types::{BlockKey, BlockType, ContentBlock, InlineStyle, StyleSet};
