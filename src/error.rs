//! Error taxonomy for the navigation and editing core.

use std::fmt;
use std::io;

use crate::store::ItemRef;

/// The scratch file step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchAction {
    Create,
    Write,
    Read,
}

impl fmt::Display for ScratchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Write => "write",
            Self::Read => "read",
        })
    }
}

/// Failures raised by the store and the edit session manager.
///
/// None of these end the navigator; the app layer turns them into toasts.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// A collection or item index did not resolve. Indicates a projection
    /// or selection bug rather than a user error.
    #[error("no item at collection {collection}, index {item:?}")]
    OutOfRange {
        collection: usize,
        item: Option<usize>,
    },

    #[error("scratch file {action} failed: {source}")]
    ScratchFile {
        action: ScratchAction,
        #[source]
        source: io::Error,
    },

    #[error("could not launch editor `{program}`: {source}")]
    EditorLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("editor exited with {}", exit_code_label(.code))]
    EditorExit { code: Option<i32> },

    /// The terminal could not be released or reacquired. `committed` is set
    /// when the edit itself was saved before the failure.
    #[error("terminal handoff failed: {source}")]
    Terminal {
        committed: Option<ItemRef>,
        #[source]
        source: io::Error,
    },
}

impl NavError {
    pub(crate) const fn out_of_range(collection: usize, item: Option<usize>) -> Self {
        Self::OutOfRange { collection, item }
    }

    pub(crate) fn scratch(action: ScratchAction, source: io::Error) -> Self {
        Self::ScratchFile { action, source }
    }

    pub(crate) const fn terminal(committed: Option<ItemRef>, source: io::Error) -> Self {
        Self::Terminal { committed, source }
    }

    /// The item that was saved despite the failure, if any.
    pub const fn committed(&self) -> Option<ItemRef> {
        match self {
            Self::Terminal { committed, .. } => *committed,
            _ => None,
        }
    }

    /// Whether the failure means an external edit was thrown away.
    pub const fn edit_lost(&self) -> bool {
        matches!(
            self,
            Self::EditorExit { .. }
                | Self::EditorLaunch { .. }
                | Self::ScratchFile {
                    action: ScratchAction::Read,
                    ..
                }
        )
    }
}

#[allow(clippy::ref_option)]
fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_exit_message_includes_status() {
        let err = NavError::EditorExit { code: Some(2) };
        assert_eq!(err.to_string(), "editor exited with status 2");
    }

    #[test]
    fn test_editor_exit_without_code_mentions_signal() {
        let err = NavError::EditorExit { code: None };
        assert_eq!(err.to_string(), "editor exited with a signal");
    }

    #[test]
    fn test_scratch_error_names_action() {
        let err = NavError::scratch(ScratchAction::Read, io::Error::other("gone"));
        assert_eq!(err.to_string(), "scratch file read failed: gone");
        assert!(err.edit_lost());
    }

    #[test]
    fn test_out_of_range_is_not_an_edit_loss() {
        assert!(!NavError::out_of_range(3, Some(1)).edit_lost());
    }
}
