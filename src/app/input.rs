use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Message, Model};
use crate::editor::Direction;
use crate::session::EditMode;

/// Map a terminal event to a message for the current model.
pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
        _ => None,
    }
}

pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if model.help_visible {
        return Some(Message::HideHelp);
    }

    match model.mode() {
        EditMode::InlineEdit => handle_editor_key(key),
        EditMode::ReadOnly => handle_tree_key(key),
        // Input is not polled while the external editor owns the terminal.
        EditMode::ExternalEdit => None,
    }
}

fn handle_tree_key(key: KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Message::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Message::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Message::MoveUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Message::SelectFirst),
        KeyCode::Char('G') | KeyCode::End => Some(Message::SelectLast),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Activate),
        KeyCode::Char('i') => Some(Message::BeginInlineEdit),
        KeyCode::Char('e') => Some(Message::BeginExternalEdit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
        KeyCode::Char('q') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_editor_key(key: KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => Some(Message::Discard),
        KeyCode::Char('s') if ctrl => Some(Message::Commit),
        KeyCode::Char('q') if ctrl => Some(Message::Quit),
        KeyCode::Home if ctrl => Some(Message::EditorMoveToStart),
        KeyCode::End if ctrl => Some(Message::EditorMoveToEnd),
        KeyCode::Home => Some(Message::EditorMoveHome),
        KeyCode::End => Some(Message::EditorMoveEnd),
        KeyCode::Up => Some(Message::EditorMoveCursor(Direction::Up)),
        KeyCode::Down => Some(Message::EditorMoveCursor(Direction::Down)),
        KeyCode::Left => Some(Message::EditorMoveCursor(Direction::Left)),
        KeyCode::Right => Some(Message::EditorMoveCursor(Direction::Right)),
        KeyCode::Enter => Some(Message::EditorSplitLine),
        KeyCode::Backspace => Some(Message::EditorDeleteBack),
        KeyCode::Delete => Some(Message::EditorDeleteForward),
        KeyCode::Tab => Some(Message::EditorInsertTab),
        KeyCode::Char(c) if !ctrl && !alt => Some(Message::EditorInsertChar(c)),
        _ => None,
    }
}
