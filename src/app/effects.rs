use std::io::{self, stdout};
use std::path::Path;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel};
use crate::session::{EditorLauncher, TerminalHandoff, run_external_edit};
use crate::store::ItemRef;

/// Hands the real terminal to a child process and takes it back.
pub(super) struct CrosstermHandoff<'a> {
    terminal: &'a mut DefaultTerminal,
}

impl<'a> CrosstermHandoff<'a> {
    pub(super) const fn new(terminal: &'a mut DefaultTerminal) -> Self {
        Self { terminal }
    }
}

impl TerminalHandoff for CrosstermHandoff<'_> {
    fn suspend(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(stdout(), LeaveAlternateScreen, Show)
    }

    fn resume(&mut self) -> io::Result<()> {
        execute!(stdout(), EnterAlternateScreen)?;
        enable_raw_mode()?;
        // Whatever the editor left on screen is garbage to ratatui's diff.
        self.terminal.clear()
    }
}

impl App {
    pub(super) fn handle_message_side_effects(
        &self,
        model: &mut Model,
        terminal: &mut DefaultTerminal,
        msg: &Message,
    ) {
        if matches!(msg, Message::BeginExternalEdit) {
            let mut handoff = CrosstermHandoff::new(terminal);
            external_edit(model, self.scratch_dir.as_deref(), &mut handoff, &self.editor);
        }
    }
}

/// Run an external edit of the selected item and report the outcome.
///
/// Blocks until the editor exits. The selection index is kept and
/// re-clamped against the re-projected rows.
pub(super) fn external_edit(
    model: &mut Model,
    scratch_dir: Option<&Path>,
    terminal: &mut impl TerminalHandoff,
    launcher: &impl EditorLauncher,
) {
    let row = model.selected_row();
    let result = run_external_edit(
        &mut model.session,
        &mut model.store,
        row,
        scratch_dir,
        terminal,
        launcher,
    );
    match result {
        Ok(Some(target)) => {
            let name = item_name(model, target);
            model.show_toast(ToastLevel::Info, format!("Updated {name}"));
        }
        Ok(None) => {}
        Err(err) if err.committed().is_some() => {
            let name = err
                .committed()
                .map_or_else(String::new, |target| item_name(model, target));
            model.show_toast(ToastLevel::Warning, format!("Updated {name}, but {err}"));
        }
        Err(err) if err.edit_lost() => {
            model.show_toast(ToastLevel::Warning, format!("Edit discarded: {err}"));
        }
        Err(err) => {
            model.show_toast(ToastLevel::Error, format!("External edit failed: {err}"));
        }
    }
    model.reproject();
}

fn item_name(model: &Model, target: ItemRef) -> String {
    model
        .store
        .item(target)
        .map_or_else(String::new, |item| item.name.clone())
}
