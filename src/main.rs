//! Jotpad - A minimal plain-text editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! jotpad
//! jotpad notes.txt
//! jotpad --strict-exit --start-dir ~/notes
//! jotpad --log-file jotpad.log notes.txt
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jotpad::app::App;
use jotpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A minimal plain-text editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "jotpad", version, about, long_about = None)]
struct Cli {
    /// Text file to open at startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Stay open when you chose to save on exit but the save did not finish
    #[arg(long)]
    strict_exit: bool,

    /// List every file in the Open/Save picker, not just .txt
    #[arg(long)]
    all_files: bool,

    /// Write diagnostic logs to a file (also read from JOTPAD_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Directory the Open/Save picker starts in
    #[arg(long, value_name = "DIR")]
    start_dir: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Send tracing output to `path`. The terminal belongs to the editor, so
/// nothing is logged unless a log file is configured.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
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

    let log_path = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("JOTPAD_LOG").map(PathBuf::from));
    if let Some(path) = log_path.as_deref() {
        init_logging(path)?;
    }
    tracing::info!(?effective, file = ?cli.file, "starting jotpad");

    let start_dir = effective
        .start_dir
        .clone()
        .or_else(|| {
            cli.file
                .as_deref()
                .and_then(Path::parent)
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let mut app = App::new(cli.file)
        .with_exit_policy(effective.exit_policy())
        .with_start_dir(start_dir)
        .with_show_all_files(effective.all_files)
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
