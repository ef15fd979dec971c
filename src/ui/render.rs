use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::app::{Focus, Model};

use super::style::{Theme, style_for_block, style_for_inline};
use super::{overlays, status};

pub const SUBMIT_LABEL: &str = "[ Submit ]";
pub const REFRESH_LABEL: &str = "[ Refresh ]";
pub const PLACEHOLDER: &str = "Type Here";

const BUTTON_GAP: u16 = 2;

/// Where every part of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    /// The bordered editor container.
    pub editor: Rect,
    /// Text area inside the border.
    pub editor_inner: Rect,
    pub submit_button: Rect,
    pub refresh_button: Rect,
    pub toast: Rect,
    pub status: Rect,
}

/// Split the terminal into title, editor, button row, toast row and status
/// bar. Input handling uses the same rectangles for hit testing.
pub fn screen_layout(area: Rect) -> ScreenLayout {
    let [title, editor, buttons, toast, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let submit_width = label_width(SUBMIT_LABEL);
    let submit_button = Rect::new(buttons.x + 1, buttons.y, submit_width, buttons.height)
        .intersection(buttons);
    let refresh_button = Rect::new(
        submit_button.right() + BUTTON_GAP,
        buttons.y,
        label_width(REFRESH_LABEL),
        buttons.height,
    )
    .intersection(buttons);

    ScreenLayout {
        title,
        editor,
        editor_inner: Block::bordered().inner(editor),
        submit_button,
        refresh_button,
        toast,
        status,
    }
}

pub const fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn label_width(label: &str) -> u16 {
    u16::try_from(label.chars().count()).unwrap_or(u16::MAX)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let screen = screen_layout(area);
    let theme = Theme::for_background(model.light_background);

    frame.render_widget(
        Paragraph::new(model.title.as_str()).style(theme.title),
        screen.title,
    );

    let border = if model.focus == Focus::Editor {
        theme.border_focused
    } else {
        theme.border
    };
    frame.render_widget(Block::bordered().border_style(border), screen.editor);
    render_document(model, frame, screen.editor_inner, &theme);

    render_buttons(model, frame, &screen, &theme);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, screen.toast);
    }
    status::render_status_bar(model, frame, screen.status, &theme);

    if let Some(dialog) = &model.dialog {
        overlays::render_dialog(dialog, frame, area);
    } else if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let content = model.editor.content();

    if content.has_text() {
        let selected = selected_span(model);
        let range = model.viewport.visible_range();
        let lines: Vec<Line> = model
            .layout()
            .rows()
            .get(range)
            .unwrap_or_default()
            .iter()
            .filter_map(|row| {
                let block = content.block_at(row.block)?;
                let base = style_for_block(block.block_type(), model.light_background);
                let mut spans: Vec<Span> = Vec::new();
                let mut run = String::new();
                let mut run_style = base;
                for (offset, ch) in block
                    .text()
                    .chars()
                    .enumerate()
                    .skip(row.start)
                    .take(row.end - row.start)
                {
                    let mut style = style_for_inline(base, block.style_at(offset));
                    if selected.is_some_and(|(start, end)| {
                        (start..end).contains(&(row.block, offset))
                    }) {
                        style = style.bg(theme.selection_bg);
                    }
                    if style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    run_style = style;
                    run.push(ch);
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, run_style));
                }
                Some(Line::from(spans))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    } else {
        frame.render_widget(
            Paragraph::new(Line::styled(PLACEHOLDER, theme.placeholder)),
            area,
        );
    }

    if model.focus == Focus::Editor
        && model.editor.has_focus()
        && model.editor.selection().is_collapsed()
    {
        render_caret(model, frame, area, theme);
    }
}

/// Selected characters as `(block index, offset)` bounds, end exclusive.
fn selected_span(model: &Model) -> Option<((usize, usize), (usize, usize))> {
    if model.editor.selection().is_collapsed() {
        return None;
    }
    let content = model.editor.content();
    let (start, end) = model.editor.selection_bounds();
    let start_block = content.block_index(&start.key)?;
    let end_block = content.block_index(&end.key)?;
    Some(((start_block, start.offset), (end_block, end.offset)))
}

fn render_caret(model: &Model, frame: &mut Frame, area: Rect, theme: &Theme) {
    let Some((row, col)) = model.caret_cell() else {
        return;
    };
    if !model.viewport.visible_range().contains(&row) {
        return;
    }
    let Some(screen_row) = row
        .checked_sub(model.viewport.offset())
        .and_then(|r| u16::try_from(r).ok())
    else {
        return;
    };
    let (x, y) = (area.x.saturating_add(col), area.y.saturating_add(screen_row));
    if point_in_rect(x, y, area)
        && let Some(cell) = frame.buffer_mut().cell_mut((x, y))
    {
        cell.set_style(theme.caret);
    }
}

fn render_buttons(model: &Model, frame: &mut Frame, screen: &ScreenLayout, theme: &Theme) {
    let style = |focus| {
        if model.focus == focus {
            theme.button_focused
        } else {
            theme.button
        }
    };
    frame.render_widget(
        Paragraph::new(SUBMIT_LABEL).style(style(Focus::Submit)),
        screen.submit_button,
    );
    frame.render_widget(
        Paragraph::new(REFRESH_LABEL).style(style(Focus::Refresh)),
        screen.refresh_button,
    );
}
