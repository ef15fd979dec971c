//! Theming and color definitions.
//!
//! Maps block types and inline styles to terminal styles. Uses ANSI colors
//! that adapt to the terminal's palette, with darker variants on light
//! backgrounds.

use ratatui::style::{Color, Modifier, Style};

use crate::document::{BlockType, InlineStyle, StyleSet};

/// Foreground of the `red` inline style (`rgba(255, 0, 0, 1)`).
pub const RED: Color = Color::Rgb(255, 0, 0);

/// Base style of every character in a block of the given type.
pub fn style_for_block(block_type: &BlockType, light_bg: bool) -> Style {
    match block_type {
        BlockType::HeaderOne => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Cyan
            })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        BlockType::HeaderTwo => Style::default()
            .fg(if light_bg {
                Color::Indexed(22)
            } else {
                Color::Green
            })
            .add_modifier(Modifier::BOLD),
        BlockType::HeaderThree
        | BlockType::HeaderFour
        | BlockType::HeaderFive
        | BlockType::HeaderSix => Style::default().add_modifier(Modifier::BOLD),

        BlockType::Blockquote => Style::default()
            .fg(if light_bg {
                Color::Indexed(24)
            } else {
                Color::Blue
            })
            .add_modifier(Modifier::ITALIC),

        BlockType::CodeBlock => Style::default()
            .fg(if light_bg {
                Color::Indexed(238)
            } else {
                Color::Indexed(245)
            })
            .add_modifier(Modifier::DIM),

        BlockType::Unstyled
        | BlockType::Paragraph
        | BlockType::UnorderedListItem
        | BlockType::OrderedListItem
        | BlockType::Atomic
        | BlockType::Custom(_) => Style::default(),
    }
}

/// Layer a character's inline styles over its block style.
pub fn style_for_inline(base: Style, styles: &StyleSet) -> Style {
    styles.iter().fold(base, |style, inline| match inline {
        InlineStyle::Bold => style.add_modifier(Modifier::BOLD),
        InlineStyle::Italic => style.add_modifier(Modifier::ITALIC),
        InlineStyle::Underline => style.add_modifier(Modifier::UNDERLINED),
        InlineStyle::Strikethrough => style.add_modifier(Modifier::CROSSED_OUT),
        InlineStyle::Code => style.add_modifier(Modifier::DIM),
        InlineStyle::Red => style.fg(RED).remove_modifier(Modifier::DIM),
        InlineStyle::Custom(_) => style,
    })
}

/// Styles for everything around the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub border: Style,
    pub border_focused: Style,
    pub placeholder: Style,
    pub caret: Style,
    pub selection_bg: Color,
    pub button: Style,
    pub button_focused: Style,
    pub status: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Indexed(240)),
            border_focused: Style::default().fg(Color::Yellow),
            placeholder: Style::default()
                .fg(Color::Indexed(243))
                .add_modifier(Modifier::ITALIC),
            caret: Style::default().bg(Color::White).fg(Color::Black),
            selection_bg: Color::Indexed(238),
            button: Style::default().fg(Color::White).bg(Color::Indexed(236)),
            button_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            status: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self::default()
    }

    pub fn light() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Indexed(245)),
            border_focused: Style::default().fg(Color::Indexed(136)),
            placeholder: Style::default()
                .fg(Color::Indexed(246))
                .add_modifier(Modifier::ITALIC),
            caret: Style::default().bg(Color::Black).fg(Color::White),
            selection_bg: Color::Indexed(252),
            button: Style::default().fg(Color::Black).bg(Color::Indexed(252)),
            button_focused: Style::default()
                .fg(Color::White)
                .bg(Color::Indexed(136))
                .add_modifier(Modifier::BOLD),
            status: Style::default().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
        }
    }

    pub fn for_background(light_bg: bool) -> Self {
        if light_bg { Self::light() } else { Self::dark() }
    }
}
