//! Pagetree - A terminal browser and editor for databases of text pages.
//!
//! # Usage
//!
//! ```bash
//! pagetree                      # built-in sample data
//! pagetree notes.json
//! pagetree --editor "code --wait" --collapsed notes.json5
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pagetree::app::App;
use pagetree::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use pagetree::logging;
use pagetree::session::EditorCommand;
use pagetree::source::{ContentSource, FileSource, SampleSource};

/// A terminal browser and editor for databases of text pages
#[derive(Parser, Debug)]
#[command(name = "pagetree", version, about, long_about = None)]
struct Cli {
    /// JSON or JSON5 listing to browse (sample data when omitted)
    #[arg(value_name = "DATA")]
    data: Option<PathBuf>,

    /// Editor command for external edits (default: $VISUAL, $EDITOR, nvim)
    #[arg(long, value_name = "CMD")]
    editor: Option<String>,

    /// Start with every database collapsed
    #[arg(long)]
    collapsed: bool,

    /// Write debug events to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Directory for scratch files during external edits
    #[arg(long, value_name = "DIR")]
    scratch_dir: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let debug_log = logging::debug_log_path(effective.debug_log.as_deref());
    logging::init(debug_log.as_deref())?;

    let source: Box<dyn ContentSource> = match &cli.data {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Box::new(FileSource::new(path))
        }
        None => Box::new(SampleSource),
    };
    let mut store = source.load()?;
    if effective.collapsed {
        store.set_all_collapsed(true);
    }
    tracing::info!(
        source = %source.label(),
        collections = store.len(),
        items = store.item_count(),
        "loaded store"
    );

    let mut app = App::new(store)
        .with_source_label(source.label())
        .with_editor(EditorCommand::resolve(effective.editor.as_deref()))
        .with_scratch_dir(effective.scratch_dir.clone())
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
