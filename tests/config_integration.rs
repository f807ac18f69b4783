use std::path::PathBuf;

use pagetree::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".pagetreerc");
    let content = r#"
# comment
--collapsed

--editor="code --wait"
   
--debug-log=debug.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.collapsed);
    assert_eq!(flags.editor.as_deref(), Some("code --wait"));
    assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".pagetreerc");
    let content = "--collapsed\n--editor vim\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "pagetree".to_string(),
        "--editor".to_string(),
        "hx".to_string(),
        "--scratch-dir".to_string(),
        "/tmp/pages".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.collapsed, "file flags should remain enabled");
    assert_eq!(effective.editor.as_deref(), Some("hx"), "cli should override editor");
    assert_eq!(effective.scratch_dir, Some(PathBuf::from("/tmp/pages")));
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "pagetree".to_string(),
        "--editor=nano".to_string(),
        "--scratch-dir=scratch".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.editor.as_deref(), Some("nano"));
    assert_eq!(flags.scratch_dir, Some(PathBuf::from("scratch")));
}

#[test]
fn test_local_overrides_global() {
    let global = ConfigFlags {
        editor: Some("vim".to_string()),
        collapsed: true,
        ..ConfigFlags::default()
    };
    let local = ConfigFlags {
        editor: Some("emacs".to_string()),
        ..ConfigFlags::default()
    };
    let merged = global.union(&local);
    assert!(merged.collapsed);
    assert_eq!(merged.editor.as_deref(), Some("emacs"));
}
