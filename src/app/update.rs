use crate::app::{Model, ToastLevel};
use crate::editor::{Direction, EditBuffer};
use crate::selection::Activation;
use crate::session::EditMode;

/// Spaces inserted by Tab in the inline editor.
const TAB_WIDTH: usize = 4;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Tree navigation
    /// Move selection down one row
    MoveDown,
    /// Move selection up one row
    MoveUp,
    /// Select the first row
    SelectFirst,
    /// Select the last row
    SelectLast,
    /// Toggle the selected collection, or open the selected item
    Activate,

    // Editing
    /// Edit the selected item in the preview pane
    BeginInlineEdit,
    /// Edit the selected item in the external editor (side effect)
    BeginExternalEdit,
    /// Write the inline buffer back to the item
    Commit,
    /// Drop the inline buffer
    Discard,
    /// Insert a character at the cursor
    EditorInsertChar(char),
    /// Insert spaces up to the tab width
    EditorInsertTab,
    /// Delete character before cursor (Backspace)
    EditorDeleteBack,
    /// Delete character at cursor (Delete)
    EditorDeleteForward,
    /// Split line at cursor (Enter)
    EditorSplitLine,
    /// Move cursor in a direction
    EditorMoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    EditorMoveHome,
    /// Move cursor to end of line (End)
    EditorMoveEnd,
    /// Move cursor to start of buffer (Ctrl+Home)
    EditorMoveToStart,
    /// Move cursor to end of buffer (Ctrl+End)
    EditorMoveToEnd,

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// The external edit needs the terminal and is run from the effects
/// handler instead.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::Discard) {
        model.exit_confirmed = false;
    }

    match msg {
        // Tree navigation
        Message::MoveDown => {
            model.selection.move_down(model.rows.len());
            model.follow_selection();
        }
        Message::MoveUp => {
            model.selection.move_up();
            model.follow_selection();
        }
        Message::SelectFirst => {
            model.selection.first();
            model.follow_selection();
        }
        Message::SelectLast => {
            model.selection.last(model.rows.len());
            model.follow_selection();
        }
        Message::Activate => {
            if model.session.is_read_only() {
                activate(&mut model);
            }
        }

        // Editing
        Message::BeginInlineEdit => {
            let row = model.selected_row();
            match model.session.begin_inline_edit(&model.store, row) {
                Ok(true) => model.editor_scroll_offset = 0,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(%err, "inline edit not started");
                    model.show_toast(ToastLevel::Error, format!("Cannot edit: {err}"));
                }
            }
        }
        Message::Commit => match model.session.commit(&mut model.store) {
            Ok(Some(target)) => {
                let name = model
                    .store
                    .item(target)
                    .map_or_else(String::new, |item| item.name.clone());
                model.show_toast(ToastLevel::Info, format!("Saved {name}"));
                model.reproject();
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "commit failed");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
                model.reproject();
            }
        },
        Message::Discard => {
            if model.mode() == EditMode::InlineEdit {
                if model.editor_is_dirty() && !model.exit_confirmed {
                    model.show_toast(
                        ToastLevel::Warning,
                        "Unsaved changes! Press Esc again to discard, or Ctrl+S to save",
                    );
                    model.exit_confirmed = true;
                    return model;
                }
                model.session.discard();
                model.exit_confirmed = false;
                model.editor_scroll_offset = 0;
            }
        }
        Message::EditorInsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::EditorInsertTab => edit(&mut model, |buf| buf.insert_str(&" ".repeat(TAB_WIDTH))),
        Message::EditorDeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::EditorDeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::EditorSplitLine => edit(&mut model, EditBuffer::split_line),
        Message::EditorMoveCursor(dir) => edit(&mut model, |buf| buf.move_cursor(dir)),
        Message::EditorMoveHome => edit(&mut model, EditBuffer::move_home),
        Message::EditorMoveEnd => edit(&mut model, EditBuffer::move_end),
        Message::EditorMoveToStart => edit(&mut model, EditBuffer::move_to_start),
        Message::EditorMoveToEnd => edit(&mut model, EditBuffer::move_to_end),

        // Overlays
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.size = (width, height);
            model.follow_selection();
            model.follow_editor_cursor();
        }
        // BeginExternalEdit: handled in effects (needs the terminal)
        // Redraw: no state change needed
        Message::BeginExternalEdit | Message::Redraw => {}

        // Application
        Message::Quit => {
            if model.editor_is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn activate(model: &mut Model) {
    match model.selection.activate(&mut model.store, &mut model.rows) {
        Ok(Activation::Toggled { .. }) => model.follow_selection(),
        Ok(Activation::Item(at)) => tracing::debug!(?at, "opened item"),
        Ok(Activation::Nothing) => {}
        Err(err) => {
            tracing::warn!(%err, "activation failed");
            model.show_toast(ToastLevel::Error, format!("Cannot open: {err}"));
            model.reproject();
        }
    }
}

/// Apply a buffer operation and keep the cursor line on screen.
fn edit(model: &mut Model, op: impl FnOnce(&mut EditBuffer)) {
    if let Some(buf) = model.session.buffer_mut() {
        op(buf);
        model.follow_editor_cursor();
    }
}
