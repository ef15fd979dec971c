//! The raw (serializable) form of a document.
//!
//! This is the snapshot format persisted under the `editorContent` storage
//! key. Character styles are stored as ranges instead of per character:
//!
//! ```json
//! {"blocks":[{"key":"a1b2c","text":"Hello","type":"header-one","depth":0,
//!   "inlineStyleRanges":[{"offset":0,"length":5,"style":"BOLD"}],
//!   "entityRanges":[],"data":{}}],"entityMap":{}}
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::content::{ContentState, generate_key};
use super::types::{BlockKey, BlockType, ContentBlock, InlineStyle, StyleSet};

/// Errors turning a raw snapshot back into content.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error(
        "style range {offset}+{length} exceeds the {len} characters of block `{key}`"
    )]
    RangeOutOfBounds {
        key: String,
        offset: usize,
        length: usize,
        len: usize,
    },

    #[error("block key `{0}` is used more than once")]
    DuplicateKey(String),

    #[error("block `{0}` contains a line break")]
    MultilineText(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentState {
    pub blocks: Vec<RawDraftContentBlock>,
    #[serde(default)]
    pub entity_map: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDraftContentBlock {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawInlineStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInlineStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

/// Entity references are accepted on input and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: serde_json::Value,
}

/// Convert content to its raw form.
///
/// Each style yields maximal runs; styles appear in [`InlineStyle`] order,
/// runs in offset order.
pub fn convert_to_raw(content: &ContentState) -> RawDraftContentState {
    let blocks = content
        .blocks()
        .map(|block| RawDraftContentBlock {
            key: block.key().to_string(),
            text: block.text().to_string(),
            block_type: block.block_type().clone(),
            depth: block.depth(),
            inline_style_ranges: encode_style_ranges(block),
            entity_ranges: Vec::new(),
            data: block.data().clone(),
        })
        .collect();
    RawDraftContentState {
        blocks,
        entity_map: serde_json::Map::new(),
    }
}

/// Rebuild content from its raw form.
///
/// # Errors
///
/// Fails on a style range past the end of its block, a block key used
/// twice, or block text containing a line break.
pub fn convert_from_raw(raw: &RawDraftContentState) -> Result<ContentState, ConvertError> {
    let mut taken: HashSet<BlockKey> = HashSet::new();
    for block in raw.blocks.iter().filter(|b| !b.key.is_empty()) {
        if !taken.insert(BlockKey::new(block.key.as_str())) {
            return Err(ConvertError::DuplicateKey(block.key.clone()));
        }
    }

    let mut blocks = Vec::with_capacity(raw.blocks.len());
    for (index, raw_block) in raw.blocks.iter().enumerate() {
        let key = if raw_block.key.is_empty() {
            let key = generate_key(index, |k| taken.contains(k));
            taken.insert(key.clone());
            key
        } else {
            BlockKey::new(raw_block.key.as_str())
        };
        if raw_block.text.contains('\n') {
            return Err(ConvertError::MultilineText(key.to_string()));
        }

        let len = raw_block.text.chars().count();
        let mut styles = vec![StyleSet::new(); len];
        for range in &raw_block.inline_style_ranges {
            let end = range
                .offset
                .checked_add(range.length)
                .filter(|&end| end <= len)
                .ok_or_else(|| ConvertError::RangeOutOfBounds {
                    key: key.to_string(),
                    offset: range.offset,
                    length: range.length,
                    len,
                })?;
            for style in &mut styles[range.offset..end] {
                style.insert(range.style.clone());
            }
        }
        if !raw_block.entity_ranges.is_empty() {
            tracing::debug!(
                block = %key,
                count = raw_block.entity_ranges.len(),
                "dropping entity ranges"
            );
        }

        blocks.push(ContentBlock::from_parts(
            key,
            raw_block.block_type.clone(),
            raw_block.text.clone(),
            styles,
            raw_block.depth,
            raw_block.data.clone(),
        ));
    }
    Ok(ContentState::from_blocks(blocks))
}

fn encode_style_ranges(block: &ContentBlock) -> Vec<RawInlineStyleRange> {
    let present: StyleSet = block.styles().iter().flatten().cloned().collect();
    let mut ranges = Vec::new();
    for style in present {
        let mut run_start: Option<usize> = None;
        for (offset, set) in block.styles().iter().enumerate() {
            match (set.contains(&style), run_start) {
                (true, None) => run_start = Some(offset),
                (false, Some(start)) => {
                    ranges.push(RawInlineStyleRange {
                        offset: start,
                        length: offset - start,
                        style: style.clone(),
                    });
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            ranges.push(RawInlineStyleRange {
                offset: start,
                length: block.len() - start,
                style,
            });
        }
    }
    ranges
}
