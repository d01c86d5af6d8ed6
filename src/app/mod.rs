//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Menu commands are the exception to "pure": they open modal dialogs,
//! touch the file system, and use the clipboard, so they run as side
//! effects after `update`.

mod dialogs;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use dialogs::TerminalUi;
pub use model::{Model, ToastLevel, line_number_width};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::session::ExitPolicy;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    exit_policy: ExitPolicy,
    start_dir: PathBuf,
    show_all_files: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application, optionally opening a file at startup.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            exit_policy: ExitPolicy::default(),
            start_dir: PathBuf::from("."),
            show_all_files: false,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// What Exit does when the user's save did not complete.
    pub const fn with_exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// Directory the Open and Save pickers start in.
    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.start_dir = dir;
        self
    }

    /// List every file in the pickers, not just `.txt`.
    pub const fn with_show_all_files(mut self, enabled: bool) -> Self {
        self.show_all_files = enabled;
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
}
