use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

use super::input::handle_event;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - pagetree requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(std::mem::take(&mut self.store), (size.width, size.height));
        model.source_label.clone_from(&self.source_label);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        tracing::debug!(
            source = %model.source_label,
            rows = model.rows.len(),
            editor = %self.editor,
            "starting"
        );

        let result = self.event_loop(&mut terminal, &mut model);

        ratatui::restore();
        self.store = std::mem::take(&mut model.store);
        result
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = handle_event(&event::read()?, model) {
                    self.dispatch(terminal, model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while !model.should_quit && event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = handle_event(&event::read()?, model) {
                        self.dispatch(terminal, model, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&self, terminal: &mut DefaultTerminal, model: &mut Model, msg: Message) {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model, terminal, &side_msg);
    }
}
