use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style::Theme;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let editor = &model.editor;
    let content = editor.content();
    let focus = editor.selection().focus();
    let block_number = content.block_index(&focus.key).map_or(1, |i| i + 1);

    let dirty_indicator = if model.dirty { " [modified]" } else { "" };
    let styles = editor
        .current_inline_style()
        .iter()
        .map(|style| style.as_str().to_string())
        .collect::<Vec<_>>()
        .join("+");
    let style_info = if styles.is_empty() {
        String::new()
    } else {
        format!(" {styles}")
    };

    let status = format!(
        " {}{dirty_indicator}  Blk {block_number}/{}, Col {}  {}{style_info}  F1:help",
        model.storage_label,
        content.block_count(),
        focus.offset + 1,
        editor.current_block_type().as_str(),
    );

    frame.render_widget(Paragraph::new(status).style(theme.status), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
