//! Edit session manager.
//!
//! Owns the edit-mode state machine:
//!
//! ```text
//!            begin_inline_edit              begin_external_edit
//! InlineEdit <---------------- ReadOnly ----------------------> ExternalEdit
//!     |  commit / discard         ^     finish / cancel              |
//!     +---------------------------+----------------------------------+
//! ```
//!
//! The store is only written by [`SessionManager::commit`] and
//! [`SessionManager::finish_external_edit`]. An inline session edits a
//! working copy, so the item is untouched until commit. An external session
//! owns a scratch file that is removed on every way out of `ExternalEdit`.

mod external;
mod scratch;

pub use external::{DEFAULT_EDITOR, EditorCommand, EditorExit, EditorLauncher, TerminalHandoff};
pub use scratch::ScratchFile;

use std::path::Path;

use crate::editor::EditBuffer;
use crate::error::NavError;
use crate::store::{ItemRef, Store};
use crate::tree::Row;

/// Current edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    ReadOnly,
    InlineEdit,
    ExternalEdit,
}

#[derive(Debug)]
enum SessionState {
    ReadOnly,
    Inline { target: ItemRef, buffer: EditBuffer },
    External { target: ItemRef, scratch: ScratchFile },
}

/// Drives transitions between read-only preview, inline editing and
/// external editing.
#[derive(Debug)]
pub struct SessionManager {
    state: SessionState,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    pub const fn new() -> Self {
        Self {
            state: SessionState::ReadOnly,
        }
    }

    pub const fn mode(&self) -> EditMode {
        match self.state {
            SessionState::ReadOnly => EditMode::ReadOnly,
            SessionState::Inline { .. } => EditMode::InlineEdit,
            SessionState::External { .. } => EditMode::ExternalEdit,
        }
    }

    pub const fn is_read_only(&self) -> bool {
        matches!(self.state, SessionState::ReadOnly)
    }

    /// Item being edited, if any.
    pub const fn target(&self) -> Option<ItemRef> {
        match &self.state {
            SessionState::ReadOnly => None,
            SessionState::Inline { target, .. } | SessionState::External { target, .. } => {
                Some(*target)
            }
        }
    }

    /// Inline working copy.
    pub const fn buffer(&self) -> Option<&EditBuffer> {
        match &self.state {
            SessionState::Inline { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        match &mut self.state {
            SessionState::Inline { buffer, .. } => Some(buffer),
            _ => None,
        }
    }

    /// Whether the inline buffer differs from what it was seeded with.
    pub fn is_dirty(&self) -> bool {
        self.buffer().is_some_and(EditBuffer::is_dirty)
    }

    /// Scratch file of the running external edit.
    pub fn scratch_path(&self) -> Option<&Path> {
        match &self.state {
            SessionState::External { scratch, .. } => Some(scratch.path()),
            _ => None,
        }
    }

    /// `ReadOnly -> InlineEdit` on an item row, seeding the buffer from the
    /// item.
    ///
    /// Returns `Ok(false)` without changing state when there is no row, the
    /// row is a collection, or a session is already running.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] if the row points outside the store.
    pub fn begin_inline_edit(&mut self, store: &Store, row: Option<Row>) -> Result<bool, NavError> {
        let Some(target) = self.editable_target(row) else {
            return Ok(false);
        };
        let item = store.validate(target)?;
        let buffer = EditBuffer::from_text(&item.content);
        tracing::debug!(?target, "begin inline edit");
        self.state = SessionState::Inline { target, buffer };
        Ok(true)
    }

    /// `InlineEdit -> ReadOnly`, writing the buffer into the store.
    ///
    /// A no-op returning `Ok(None)` outside inline editing.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] if the target vanished; the session
    /// ends and the store is unchanged.
    pub fn commit(&mut self, store: &mut Store) -> Result<Option<ItemRef>, NavError> {
        if !matches!(self.state, SessionState::Inline { .. }) {
            return Ok(None);
        }
        let SessionState::Inline { target, buffer } =
            std::mem::replace(&mut self.state, SessionState::ReadOnly)
        else {
            return Ok(None);
        };
        store.set_item_content(target, buffer.into_text())?;
        tracing::info!(?target, "committed inline edit");
        Ok(Some(target))
    }

    /// `InlineEdit -> ReadOnly`, dropping the buffer.
    pub fn discard(&mut self) -> Option<ItemRef> {
        if !matches!(self.state, SessionState::Inline { .. }) {
            return None;
        }
        let target = self.target();
        self.state = SessionState::ReadOnly;
        tracing::debug!(?target, "discarded inline edit");
        target
    }

    /// `ReadOnly -> ExternalEdit` on an item row: writes the content to a
    /// fresh scratch file in `scratch_dir` (or the system temp dir).
    ///
    /// Returns `Ok(false)` without changing state when the row is not an
    /// editable item or a session is already running.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OutOfRange`] for a bad row and
    /// [`NavError::ScratchFile`] if the file cannot be prepared. The mode
    /// stays `ReadOnly` in both cases.
    pub fn begin_external_edit(
        &mut self,
        store: &Store,
        row: Option<Row>,
        scratch_dir: Option<&Path>,
    ) -> Result<bool, NavError> {
        let Some(target) = self.editable_target(row) else {
            return Ok(false);
        };
        let item = store.validate(target)?;
        let scratch = ScratchFile::create(&item.content, scratch_dir)?;
        tracing::debug!(?target, path = %scratch.path().display(), "begin external edit");
        self.state = SessionState::External { target, scratch };
        Ok(true)
    }

    /// `ExternalEdit -> ReadOnly` once the editor has exited.
    ///
    /// Commits the scratch file's contents only after a successful exit.
    /// The scratch file is removed before returning on every path.
    ///
    /// # Errors
    ///
    /// - [`NavError::EditorLaunch`] if the editor never started
    /// - [`NavError::EditorExit`] on a failure status
    /// - [`NavError::ScratchFile`] if the file cannot be read back
    /// - [`NavError::OutOfRange`] if the target vanished
    ///
    /// The item keeps its pre-edit content in all of these cases. Calling
    /// this outside `ExternalEdit` returns [`NavError::OutOfRange`] for the
    /// nonexistent target without touching anything.
    pub fn finish_external_edit(&mut self, store: &mut Store, exit: EditorExit) -> Result<ItemRef, NavError> {
        if !matches!(self.state, SessionState::External { .. }) {
            return Err(NavError::out_of_range(usize::MAX, None));
        }
        let SessionState::External { target, scratch } =
            std::mem::replace(&mut self.state, SessionState::ReadOnly)
        else {
            return Err(NavError::out_of_range(usize::MAX, None));
        };

        let outcome = match exit {
            EditorExit::Exited { success: true, .. } => scratch
                .read_back()
                .and_then(|content| store.set_item_content(target, content)),
            EditorExit::Exited { code, .. } => Err(NavError::EditorExit { code }),
            EditorExit::LaunchFailed { program, error } => Err(NavError::EditorLaunch {
                program,
                source: error,
            }),
        };
        scratch.remove();

        match outcome {
            Ok(()) => {
                tracing::info!(?target, "committed external edit");
                Ok(target)
            }
            Err(err) => {
                tracing::warn!(?target, %err, "external edit not committed");
                Err(err)
            }
        }
    }

    /// Abandon an external edit without committing, removing the scratch
    /// file.
    pub fn cancel_external_edit(&mut self) -> Option<ItemRef> {
        if !matches!(self.state, SessionState::External { .. }) {
            return None;
        }
        let SessionState::External { target, scratch } =
            std::mem::replace(&mut self.state, SessionState::ReadOnly)
        else {
            return None;
        };
        scratch.remove();
        tracing::debug!(?target, "cancelled external edit");
        Some(target)
    }

    fn editable_target(&self, row: Option<Row>) -> Option<ItemRef> {
        if !self.is_read_only() {
            return None;
        }
        row?.item_ref()
    }
}

/// Run a complete external edit of the item at `row`.
///
/// Creates the scratch file, suspends the terminal, blocks on the editor,
/// resumes the terminal and reconciles the result. Scratch file failures
/// abort before the terminal is touched; once suspended, the terminal is
/// always resumed. Returns `Ok(None)` when the row is not an editable item.
///
/// # Errors
///
/// Any [`NavError`] from the transitions, or [`NavError::Terminal`] if the
/// terminal could not be handed over or taken back. The store is only
/// changed on full success.
pub fn run_external_edit(
    manager: &mut SessionManager,
    store: &mut Store,
    row: Option<Row>,
    scratch_dir: Option<&Path>,
    terminal: &mut impl TerminalHandoff,
    launcher: &impl EditorLauncher,
) -> Result<Option<ItemRef>, NavError> {
    if !manager.begin_external_edit(store, row, scratch_dir)? {
        return Ok(None);
    }
    let Some(path) = manager.scratch_path().map(Path::to_path_buf) else {
        return Ok(None);
    };

    if let Err(err) = terminal.suspend() {
        // Partially released terminals still need restoring.
        if let Err(resume_err) = terminal.resume() {
            tracing::warn!(error = %resume_err, "failed to restore terminal after suspend failure");
        }
        manager.cancel_external_edit();
        return Err(NavError::terminal(None, err));
    }
    let exit = launcher.launch(&path);
    let resumed = terminal.resume();

    let committed = manager.finish_external_edit(store, exit)?;
    resumed.map_err(|err| NavError::terminal(Some(committed), err))?;
    Ok(Some(committed))
}
