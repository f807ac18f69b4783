use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::Model;
use crate::editor::EditBuffer;
use crate::tree::{preview_text, row_label};

use super::{PREVIEW_WIDTH_PERCENT, TREE_WIDTH_PERCENT, follow, overlays, status};

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(TREE_WIDTH_PERCENT),
            Constraint::Percentage(PREVIEW_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let chunks = split_main_columns(main_area);
    render_tree(model, frame, chunks[0]);
    match model.inline_buffer() {
        Some(buf) => render_editor(model, buf, frame, chunks[1]),
        None => render_preview(model, frame, chunks[1]),
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_tree(model: &Model, frame: &mut Frame, area: Rect) {
    let visible_rows = area.height.saturating_sub(2) as usize;
    let selected = model.selection.index();
    let start = follow(model.tree_scroll_offset, selected, visible_rows);
    let focused = model.session.is_read_only();

    let items: Vec<Line> = model
        .rows
        .iter()
        .enumerate()
        .skip(start)
        .take(visible_rows)
        .map(|(i, row)| {
            let is_selected = i == selected;
            let marker = if is_selected { ">" } else { " " };
            let base_style = if row.is_collection() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let style = if is_selected {
                base_style.reversed()
            } else {
                base_style
            };
            Line::styled(format!("{marker} {}", row_label(&model.store, *row)), style)
        })
        .collect();

    let block = Block::default()
        .title("Databases")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });
    frame.render_widget(Paragraph::new(items).block(block), area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let text = preview_text(&model.store, model.selected_row());
    let block = Block::default().title("Preview").borders(Borders::ALL);
    let preview = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, area);
    frame.render_widget(preview, area);
}

fn render_editor(model: &Model, buf: &EditBuffer, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title("Preview [editing]")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);

    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let visible_height = inner.height as usize;
    let cursor = buf.cursor();
    let start = follow(model.editor_scroll_offset, cursor.line, visible_height);
    let end = (start + visible_height).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if line_idx == cursor.line {
            // Columns are chars, so split on char boundaries.
            let mut chars = line_text.chars();
            let before: String = chars.by_ref().take(cursor.col).collect();
            let cursor_char = chars.next().map_or_else(|| " ".to_string(), String::from);
            let after: String = chars.collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(
                cursor_char,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(line_text));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
