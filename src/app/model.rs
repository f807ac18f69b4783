use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::EditBuffer;
use crate::selection::Selection;
use crate::session::{EditMode, SessionManager};
use crate::store::{Item, Store};
use crate::tree::{Row, project};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// Collections and their items
    pub store: Store,
    /// Visible tree rows, recomputed after structural changes
    pub rows: Vec<Row>,
    /// Cursor into `rows`
    pub selection: Selection,
    /// Edit mode state machine
    pub session: SessionManager,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// First visible tree row
    pub tree_scroll_offset: usize,
    /// First visible line of the inline editor
    pub editor_scroll_offset: usize,
    /// Where the listing came from, shown in the status bar
    pub source_label: String,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved inline changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Set after first Esc press with unsaved inline changes; allows second Esc to discard
    pub exit_confirmed: bool,
    toast: Option<Toast>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Store::default(), (80, 24))
    }
}

impl Model {
    pub fn new(store: Store, terminal_size: (u16, u16)) -> Self {
        let rows = project(&store);
        Self {
            store,
            rows,
            selection: Selection::new(),
            session: SessionManager::new(),
            size: terminal_size,
            tree_scroll_offset: 0,
            editor_scroll_offset: 0,
            source_label: String::new(),
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            should_quit: false,
            quit_confirmed: false,
            exit_confirmed: false,
            toast: None,
        }
    }

    /// Recompute rows from the store, keeping the selection index and
    /// clamping it to the new length.
    pub fn reproject(&mut self) {
        self.rows = project(&self.store);
        self.selection.clamp(self.rows.len());
        self.follow_selection();
    }

    pub fn selected_row(&self) -> Option<Row> {
        self.selection.selected_row(&self.rows)
    }

    /// Item under the selection, if the selected row is an item.
    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_row()
            .and_then(Row::item_ref)
            .and_then(|at| self.store.item(at))
    }

    pub const fn mode(&self) -> EditMode {
        self.session.mode()
    }

    pub const fn inline_buffer(&self) -> Option<&EditBuffer> {
        self.session.buffer()
    }

    /// Whether the inline editor has uncommitted changes.
    pub fn editor_is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// Tree rows that fit in the left pane at the current size.
    pub fn tree_visible_rows(&self) -> usize {
        crate::ui::pane_inner_height(self.size.1)
    }

    pub(super) fn follow_selection(&mut self) {
        self.tree_scroll_offset = crate::ui::follow(
            self.tree_scroll_offset,
            self.selection.index(),
            self.tree_visible_rows(),
        );
    }

    pub(super) fn follow_editor_cursor(&mut self) {
        let Some(line) = self.session.buffer().map(|buf| buf.cursor().line) else {
            return;
        };
        self.editor_scroll_offset = crate::ui::follow(
            self.editor_scroll_offset,
            line,
            crate::ui::pane_inner_height(self.size.1),
        );
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
