//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while running, so detailed events go to a
//! file when a debug log is requested. Otherwise only warnings reach
//! stderr, which is visible once the terminal is restored.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a debug log file.
pub const DEBUG_LOG_ENV: &str = "PAGETREE_DEBUG_LOG";

/// Debug log path from the flag, falling back to [`DEBUG_LOG_ENV`].
pub fn debug_log_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| std::env::var_os(DEBUG_LOG_ENV).map(PathBuf::from))
}

/// Install the global subscriber. `RUST_LOG` directives are always honored.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init(debug_log: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_target(false);
    let installed = match debug_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            builder
                .with_env_filter(env_filter(Level::DEBUG))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder
            .with_env_filter(env_filter(Level::WARN))
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|err| anyhow::anyhow!("Failed to install logger: {err}"))?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(())
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(level.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_environment() {
        let path = debug_log_path(Some(Path::new("flag.log")));
        assert_eq!(path, Some(PathBuf::from("flag.log")));
    }

    #[test]
    fn test_env_filter_includes_default_level() {
        let filter = env_filter(Level::WARN);
        assert!(filter.to_string().contains("warn"));
    }
}
