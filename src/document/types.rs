//! Core document types.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A character-level style.
///
/// Names match the persisted snapshot format; unknown names survive a
/// load/save cycle as [`InlineStyle::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    /// Red foreground, the one entry of the custom color style map.
    Red,
    Custom(String),
}

impl InlineStyle {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Underline => "UNDERLINE",
            Self::Strikethrough => "STRIKETHROUGH",
            Self::Code => "CODE",
            Self::Red => "red",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for InlineStyle {
    fn from(name: &str) -> Self {
        match name {
            "BOLD" => Self::Bold,
            "ITALIC" => Self::Italic,
            "UNDERLINE" => Self::Underline,
            "STRIKETHROUGH" => Self::Strikethrough,
            "CODE" => Self::Code,
            "red" => Self::Red,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for InlineStyle {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Custom(_) => Self::Custom(name),
            known => known,
        }
    }
}

impl From<InlineStyle> for String {
    fn from(style: InlineStyle) -> Self {
        match style {
            InlineStyle::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of inline styles carried by one character.
pub type StyleSet = BTreeSet<InlineStyle>;

static EMPTY_STYLE: StyleSet = BTreeSet::new();

/// Block-level type of a [`ContentBlock`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    #[default]
    Unstyled,
    Paragraph,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    HeaderFour,
    HeaderFive,
    HeaderSix,
    UnorderedListItem,
    OrderedListItem,
    Blockquote,
    CodeBlock,
    Atomic,
    Custom(String),
}

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unstyled => "unstyled",
            Self::Paragraph => "paragraph",
            Self::HeaderOne => "header-one",
            Self::HeaderTwo => "header-two",
            Self::HeaderThree => "header-three",
            Self::HeaderFour => "header-four",
            Self::HeaderFive => "header-five",
            Self::HeaderSix => "header-six",
            Self::UnorderedListItem => "unordered-list-item",
            Self::OrderedListItem => "ordered-list-item",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "code-block",
            Self::Atomic => "atomic",
            Self::Custom(name) => name,
        }
    }

}

impl From<&str> for BlockType {
    fn from(name: &str) -> Self {
        match name {
            "unstyled" => Self::Unstyled,
            "paragraph" => Self::Paragraph,
            "header-one" => Self::HeaderOne,
            "header-two" => Self::HeaderTwo,
            "header-three" => Self::HeaderThree,
            "header-four" => Self::HeaderFour,
            "header-five" => Self::HeaderFive,
            "header-six" => Self::HeaderSix,
            "unordered-list-item" => Self::UnorderedListItem,
            "ordered-list-item" => Self::OrderedListItem,
            "blockquote" => Self::Blockquote,
            "code-block" => Self::CodeBlock,
            "atomic" => Self::Atomic,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for BlockType {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Custom(_) => Self::Custom(name),
            known => known,
        }
    }
}

impl From<BlockType> for String {
    fn from(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a block, unique within one content state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One paragraph-like unit of text.
///
/// `styles` holds exactly one entry per character of `text`; all offsets
/// are counted in characters (Unicode scalar values), never bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    styles: Vec<StyleSet>,
    depth: u8,
    data: serde_json::Map<String, serde_json::Value>,
}

impl ContentBlock {
    /// Create an empty block.
    pub fn new(key: BlockKey, block_type: BlockType) -> Self {
        Self {
            key,
            block_type,
            text: String::new(),
            styles: Vec::new(),
            depth: 0,
            data: serde_json::Map::new(),
        }
    }

    /// Create a block whose characters all carry `style`.
    pub fn with_text(key: BlockKey, block_type: BlockType, text: &str, style: &StyleSet) -> Self {
        let styles = text.chars().map(|_| style.clone()).collect();
        Self {
            key,
            block_type,
            text: text.to_string(),
            styles,
            depth: 0,
            data: serde_json::Map::new(),
        }
    }

    pub(crate) fn from_parts(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        styles: Vec<StyleSet>,
        depth: u8,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        debug_assert_eq!(text.chars().count(), styles.len());
        Self {
            key,
            block_type,
            text,
            styles,
            depth,
            data,
        }
    }

    pub const fn key(&self) -> &BlockKey {
        &self.key
    }

    pub const fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub const fn depth(&self) -> u8 {
        self.depth
    }

    pub const fn data(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.data
    }

    /// Per-character styles.
    pub fn styles(&self) -> &[StyleSet] {
        &self.styles
    }

    /// Style of the character at `offset` (empty when out of range).
    pub fn style_at(&self, offset: usize) -> &StyleSet {
        self.styles.get(offset).unwrap_or(&EMPTY_STYLE)
    }

    /// Text between two character offsets.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end.max(range.start));
        &self.text[start..end]
    }

    /// Byte index of a character offset, clamped to the end of the text.
    pub fn byte_index(&self, offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(offset)
            .map_or(self.text.len(), |(idx, _)| idx)
    }

    pub(crate) fn set_block_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    /// Replace the characters in `range` with `insert`, styled with `style`.
    pub(crate) fn splice(&mut self, range: Range<usize>, insert: &str, style: &StyleSet) {
        let start = range.start.min(self.len());
        let end = range.end.clamp(start, self.len());
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.text.replace_range(byte_start..byte_end, insert);
        self.styles
            .splice(start..end, insert.chars().map(|_| style.clone()));
    }

    /// Split off everything from `offset` on, returning the tail.
    pub(crate) fn split_off(&mut self, offset: usize) -> (String, Vec<StyleSet>) {
        let offset = offset.min(self.len());
        let byte = self.byte_index(offset);
        let text = self.text.split_off(byte);
        let styles = self.styles.split_off(offset);
        (text, styles)
    }

    pub(crate) fn append(&mut self, text: &str, styles: Vec<StyleSet>) {
        self.text.push_str(text);
        self.styles.extend(styles);
    }

    /// Build a block below this one from a split-off tail.
    pub(crate) fn sibling(&self, key: BlockKey, text: String, styles: Vec<StyleSet>) -> Self {
        Self {
            key,
            block_type: self.block_type.clone(),
            text,
            styles,
            depth: self.depth,
            data: serde_json::Map::new(),
        }
    }

    pub(crate) fn update_styles(&mut self, range: Range<usize>, mut f: impl FnMut(&mut StyleSet)) {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        for style in &mut self.styles[start..end] {
            f(style);
        }
    }
}
