use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthChar;

use crate::app::{Model, ToastLevel};
use crate::tree::Row;

/// Display columns given to the page name in the status bar.
const NAME_WIDTH: usize = 32;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let name = truncate_to_width(&selected_name(model), NAME_WIDTH);
    let status = match model.inline_buffer() {
        Some(buf) => {
            let dirty_indicator = if buf.is_dirty() { " [modified]" } else { "" };
            let c = buf.cursor();
            format!(
                " EDIT  {name}{dirty_indicator}  Ln {}, Col {}  Esc:discard  Ctrl+S:save",
                c.line + 1,
                c.col + 1
            )
        }
        None => {
            let position = if model.rows.is_empty() {
                "0/0".to_string()
            } else {
                format!("{}/{}", model.selection.index() + 1, model.rows.len())
            };
            let source = if model.source_label.is_empty() {
                String::new()
            } else {
                format!("  [{}]", model.source_label)
            };
            format!(" VIEW  {name}  {position}{source}  i:edit  e:editor  ?:help")
        }
    };

    let bg = if model.inline_buffer().is_some() {
        Color::Magenta
    } else {
        Color::DarkGray
    };
    let status_bar = Paragraph::new(status).style(Style::default().bg(bg).fg(Color::White));
    frame.render_widget(status_bar, area);
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

fn selected_name(model: &Model) -> String {
    // While editing, name the target even if the selection moved.
    let row = model
        .session
        .target()
        .map(|at| Row::Item {
            collection: at.collection,
            item: at.item,
        })
        .or_else(|| model.selected_row());
    match row {
        Some(Row::Collection { collection }) => model
            .store
            .collection(collection)
            .map_or_else(String::new, |c| c.name.clone()),
        Some(Row::Item { .. }) => row
            .and_then(Row::item_ref)
            .and_then(|at| model.store.item(at))
            .map_or_else(String::new, |item| item.name.clone()),
        None => "(empty)".to_string(),
    }
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
