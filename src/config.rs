use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Flags that can be persisted as defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub editor: Option<String>,
    pub collapsed: bool,
    pub debug_log: Option<PathBuf>,
    pub scratch_dir: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are OR-ed, options from `other`
    /// win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            editor: other.editor.clone().or_else(|| self.editor.clone()),
            collapsed: self.collapsed || other.collapsed,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            scratch_dir: other
                .scratch_dir
                .clone()
                .or_else(|| self.scratch_dir.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("pagetree").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("pagetree")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("pagetree").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("pagetree")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".pagetreerc")
}

/// Read flags from an rc file. A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

// Lines follow shell quoting, so `--editor "code --wait"` stays one value.
fn line_tokens(line: &str) -> Vec<String> {
    shell_words::split(line).unwrap_or_else(|err| {
        tracing::warn!(line, error = %err, "skipping malformed config line");
        Vec::new()
    })
}

/// Write flags to an rc file, creating its directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# pagetree defaults (saved with --save)".to_string()];
    let quote = |value: &str| shell_words::quote(value).into_owned();
    if let Some(editor) = &flags.editor {
        lines.push(format!("--editor {}", quote(editor)));
    }
    if flags.collapsed {
        lines.push("--collapsed".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", quote(&path.to_string_lossy())));
    }
    if let Some(dir) = &flags.scratch_dir {
        lines.push(format!("--scratch-dir {}", quote(&dir.to_string_lossy())));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove an rc file if present.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list, ignoring everything else.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        match token {
            "--collapsed" => flags.collapsed = true,
            "--editor" | "--debug-log" | "--scratch-dir" => {
                if let Some(next) = tokens.get(i + 1) {
                    set_value(&mut flags, token, next);
                    i += 1;
                }
            }
            _ => {
                if let Some((name, value)) = token.split_once('=') {
                    set_value(&mut flags, name, value);
                }
            }
        }
        i += 1;
    }
    flags
}

fn set_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--editor" => flags.editor = Some(value.to_string()),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        "--scratch-dir" => flags.scratch_dir = Some(PathBuf::from(value)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "pagetree",
            "--collapsed",
            "--editor",
            "hx",
            "--debug-log=debug.log",
            "--scratch-dir",
            "/tmp/scratch",
            "pages.json",
        ]));
        assert!(flags.collapsed);
        assert_eq!(flags.editor.as_deref(), Some("hx"));
        assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
        assert_eq!(flags.scratch_dir, Some(PathBuf::from("/tmp/scratch")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_unknown_flags() {
        let flags = parse_flag_tokens(&tokens(&["--watch", "--theme=dark"]));
        assert_eq!(flags, ConfigFlags::default());
    }

    #[test]
    fn test_trailing_value_flag_without_value_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--editor"]));
        assert!(flags.editor.is_none());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            collapsed: true,
            editor: Some("vim".to_string()),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            editor: Some("hx".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.collapsed);
        assert_eq!(merged.editor.as_deref(), Some("hx"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".pagetreerc");
        let flags = ConfigFlags {
            editor: Some("code --wait".to_string()),
            collapsed: true,
            debug_log: Some(PathBuf::from("debug.log")),
            scratch_dir: Some(PathBuf::from("scratch")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert!(loaded.collapsed);
        assert_eq!(loaded.debug_log, Some(PathBuf::from("debug.log")));
        assert_eq!(loaded.scratch_dir, Some(PathBuf::from("scratch")));
        assert_eq!(loaded.editor.as_deref(), Some("code --wait"));

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_save_quotes_values_with_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".pagetreerc");
        let flags = ConfigFlags {
            editor: Some(r#""/opt/My Editor/ed" -w"#.to_string()),
            scratch_dir: Some(PathBuf::from("/tmp/my scratch")),
            ..ConfigFlags::default()
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".pagetreerc");
        std::fs::write(&path, "--editor 'hx\n--collapsed\n").unwrap();
        let flags = load_config_flags(&path).unwrap();
        assert!(flags.editor.is_none());
        assert!(flags.collapsed);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let flags = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(flags, ConfigFlags::default());
    }
}
