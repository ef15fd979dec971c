use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::{Dialog, Model};

const DIALOG_HINT: &str = "Press any key";

/// Rectangle of the acknowledgment dialog for a message.
pub fn dialog_rect(area: Rect, dialog: &Dialog) -> Rect {
    let text_width = dialog.message.width().max(DIALOG_HINT.len());
    let popup_width = u16::try_from(text_width + 8).unwrap_or(u16::MAX).max(30);
    centered_popup_rect(popup_width, 7, area)
}

pub fn render_dialog(dialog: &Dialog, frame: &mut Frame, area: Rect) {
    let popup = dialog_rect(area, dialog);
    let lines = vec![
        Line::styled(
            dialog.message.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(DIALOG_HINT, Style::default().fg(Color::Indexed(245))),
    ];
    let block = Block::default()
        .title(dialog.title.as_str())
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 0))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        popup,
    );
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    // Formatting
    all_lines.push(Line::styled(
        "Formatting (type on an empty line, then Space)",
        section_style,
    ));
    all_lines.push(Line::raw("  #                   Heading"));
    all_lines.push(Line::raw("  *                   Bold"));
    all_lines.push(Line::raw("  **                  Red"));
    all_lines.push(Line::raw("  ***                 Underline"));
    all_lines.push(Line::raw(""));

    // Editing
    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Move caret"));
    all_lines.push(Line::raw("  Shift+motion        Extend selection"));
    all_lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Document start / end"));
    all_lines.push(Line::raw("  Ctrl-a              Select all"));
    all_lines.push(Line::raw("  PageUp/PageDown     Scroll editor"));
    all_lines.push(Line::raw(""));

    // Actions
    all_lines.push(Line::styled("Actions", section_style));
    all_lines.push(Line::raw("  Ctrl-s              Submit (save)"));
    all_lines.push(Line::raw("  Ctrl-r              Refresh (clear)"));
    all_lines.push(Line::raw("  Tab / Shift-Tab     Cycle focus"));
    all_lines.push(Line::raw("  Enter / Space       Press focused button"));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(""));

    // Storage
    all_lines.push(Line::styled("Storage", section_style));
    all_lines.push(Line::raw(format!("  {}", model.storage_label)));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let visible: Vec<Line> = all_lines
        .into_iter()
        .take(usize::from(content_height))
        .collect();
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled("Esc or F1 closes", dim_style)),
        footer_area,
    );
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
