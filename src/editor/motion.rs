//! Caret motion over blocks.
//!
//! Up and Down move between logical blocks, keeping the character offset
//! where the target block is long enough.

use crate::document::{ContentState, Position};

use super::keys::Motion;

/// Where `motion` takes a caret starting at `from`.
pub fn move_position(content: &ContentState, from: &Position, motion: Motion) -> Position {
    let from = content.clamp_position(from);
    let Some(index) = content.block_index(&from.key) else {
        return content.start_position();
    };
    let len = content.block_at(index).map_or(0, |b| b.len());

    match motion {
        Motion::Left if from.offset > 0 => Position::new(from.key, from.offset - 1),
        Motion::Left => block_end(content, index.checked_sub(1)).unwrap_or(from),
        Motion::Right if from.offset < len => Position::new(from.key, from.offset + 1),
        Motion::Right => block_start(content, index + 1).unwrap_or(from),
        Motion::Up => index
            .checked_sub(1)
            .and_then(|i| at_offset(content, i, from.offset))
            .unwrap_or_else(|| Position::new(from.key, 0)),
        Motion::Down => at_offset(content, index + 1, from.offset)
            .unwrap_or_else(|| Position::new(from.key, len)),
        Motion::WordLeft if from.offset == 0 => {
            block_end(content, index.checked_sub(1)).unwrap_or(from)
        }
        Motion::WordLeft => {
            let chars = block_chars(content, index);
            Position::new(from.key, word_left(&chars, from.offset))
        }
        Motion::WordRight if from.offset >= len => block_start(content, index + 1).unwrap_or(from),
        Motion::WordRight => {
            let chars = block_chars(content, index);
            Position::new(from.key, word_right(&chars, from.offset))
        }
        Motion::LineStart => Position::new(from.key, 0),
        Motion::LineEnd => Position::new(from.key, len),
        Motion::DocumentStart => content.start_position(),
        Motion::DocumentEnd => content.end_position(),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `offset`: skip whitespace, then the word (or a
/// single punctuation character).
fn word_left(chars: &[char], offset: usize) -> usize {
    let mut pos = offset.min(chars.len());
    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    if pos == 0 {
        return 0;
    }
    if is_word_char(chars[pos - 1]) {
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
    } else {
        pos -= 1;
    }
    pos
}

/// Start of the next word: skip the current word, then everything up to the
/// next word character.
fn word_right(chars: &[char], offset: usize) -> usize {
    let mut pos = offset.min(chars.len());
    while pos < chars.len() && is_word_char(chars[pos]) {
        pos += 1;
    }
    while pos < chars.len() && !is_word_char(chars[pos]) {
        pos += 1;
    }
    pos
}

fn block_chars(content: &ContentState, index: usize) -> Vec<char> {
    content
        .block_at(index)
        .map(|b| b.text().chars().collect())
        .unwrap_or_default()
}

fn block_start(content: &ContentState, index: usize) -> Option<Position> {
    content
        .block_at(index)
        .map(|b| Position::new(b.key().clone(), 0))
}

fn block_end(content: &ContentState, index: Option<usize>) -> Option<Position> {
    content
        .block_at(index?)
        .map(|b| Position::new(b.key().clone(), b.len()))
}

fn at_offset(content: &ContentState, index: usize, offset: usize) -> Option<Position> {
    content
        .block_at(index)
        .map(|b| Position::new(b.key().clone(), offset.min(b.len())))
}
