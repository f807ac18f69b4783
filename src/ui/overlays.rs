use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::Model;

/// Key column width in the help table.
const KEY_COLUMN: usize = 20;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / k, Up / Down", "Move selection"),
            ("g / G, Home / End", "First / last row"),
            ("Enter / Space", "Expand or collapse database"),
        ],
    ),
    (
        "Editing",
        &[
            ("i", "Edit page in preview"),
            ("e", "Edit page in $EDITOR"),
            ("Ctrl+S", "Save edit"),
            ("Esc", "Discard edit (twice if modified)"),
            ("Ctrl+Home / End", "Page start / end"),
            ("Tab", "Insert four spaces"),
        ],
    ),
    (
        "Other",
        &[
            ("q / Ctrl+C", "Quit"),
            ("Ctrl+Q", "Quit while editing"),
            ("? / F1", "Toggle help"),
        ],
    ),
];

fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan);

    let mut lines = Vec::new();
    for (section, rows) in BINDINGS {
        lines.push(Line::styled(*section, heading));
        for (keys, action) in *rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN$}"), key_style),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::default());
    }

    let show = |path: Option<&std::path::PathBuf>, missing: &str| {
        path.map_or_else(|| missing.to_string(), |p| p.display().to_string())
    };
    lines.push(Line::styled("Config", heading));
    lines.push(Line::raw(format!(
        "  Global: {}",
        show(model.config_global_path.as_ref(), "<unknown>")
    )));
    lines.push(Line::raw(format!(
        "  Local override: {}",
        show(model.config_local_path.as_ref(), "<none>")
    )));
    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let lines = help_lines(model);
    let wanted_height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(3);
    let popup = centered_popup_rect(60, wanted_height, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Last inner row holds the footer.
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    frame.render_widget(Paragraph::new(lines), body);
    frame.render_widget(
        Paragraph::new("any key closes")
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    popup
}
