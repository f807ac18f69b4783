//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::session::EditorCommand;
use crate::store::Store;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    store: Store,
    source_label: String,
    editor: EditorCommand,
    scratch_dir: Option<PathBuf>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application browsing the given store.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            source_label: String::new(),
            editor: EditorCommand::resolve(None),
            scratch_dir: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Label for where the listing came from.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = label.into();
        self
    }

    /// Editor used for external edits.
    pub fn with_editor(mut self, editor: EditorCommand) -> Self {
        self.editor = editor;
        self
    }

    /// Directory for scratch files; the system temp dir when unset.
    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }

    /// The store, including edits once [`App::run`] has returned.
    pub const fn store(&self) -> &Store {
        &self.store
    }
}
