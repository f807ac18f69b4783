use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Editor used when nothing else is configured.
pub const DEFAULT_EDITOR: &str = "nvim";

/// How the external editor process ended.
#[derive(Debug)]
pub enum EditorExit {
    /// The process ran and exited; `code` is `None` when killed by a signal.
    Exited { success: bool, code: Option<i32> },
    /// The process could not be started.
    LaunchFailed { program: String, error: io::Error },
}

impl EditorExit {
    pub const fn success() -> Self {
        Self::Exited {
            success: true,
            code: Some(0),
        }
    }

    pub const fn failure(code: Option<i32>) -> Self {
        Self::Exited {
            success: false,
            code,
        }
    }

    pub fn from_status(status: ExitStatus) -> Self {
        Self::Exited {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Gives up and takes back the terminal around an external edit.
pub trait TerminalHandoff {
    /// Release the terminal to a child process.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal mode cannot be restored.
    fn suspend(&mut self) -> io::Result<()>;

    /// Take the terminal back after the child exits.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be
    /// re-entered.
    fn resume(&mut self) -> io::Result<()>;
}

/// Runs an editor against a file and blocks until it exits.
pub trait EditorLauncher {
    fn launch(&self, path: &Path) -> EditorExit;
}

/// A configured editor command line, e.g. `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Split a command line with shell quoting rules.
    ///
    /// Returns `None` for a blank line or one with unbalanced quotes.
    pub fn parse(command_line: &str) -> Option<Self> {
        let parts = match shell_words::split(command_line) {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(command = command_line, error = %err, "ignoring editor command");
                return None;
            }
        };
        let mut parts = parts.into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Pick the editor: explicit setting, then `$VISUAL`, then `$EDITOR`,
    /// then [`DEFAULT_EDITOR`].
    pub fn resolve(configured: Option<&str>) -> Self {
        Self::resolve_with(configured, |key| std::env::var(key).ok())
    }

    fn resolve_with(configured: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        configured
            .and_then(Self::parse)
            .or_else(|| env("VISUAL").as_deref().and_then(Self::parse))
            .or_else(|| env("EDITOR").as_deref().and_then(Self::parse))
            .unwrap_or_else(|| Self {
                program: DEFAULT_EDITOR.to_string(),
                args: Vec::new(),
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl std::fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let words = std::iter::once(&self.program).chain(&self.args);
        f.write_str(&shell_words::join(words))
    }
}

impl EditorLauncher for EditorCommand {
    fn launch(&self, path: &Path) -> EditorExit {
        tracing::debug!(editor = %self, path = %path.display(), "launching editor");
        // Standard streams are inherited so the editor owns the terminal.
        match Command::new(&self.program).args(&self.args).arg(path).status() {
            Ok(status) => EditorExit::from_status(status),
            Err(error) => EditorExit::LaunchFailed {
                program: self.program.clone(),
                error,
            },
        }
    }
}
