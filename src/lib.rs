// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. session::SessionUi)
    clippy::module_name_repetitions
)]

//! # Jotpad
//!
//! A minimal plain-text editor for the terminal.
//!
//! Jotpad edits one document at a time with:
//! - New, Open, Save, and Exit, guarded by a "save changes?" prompt
//! - Cut, Copy, and Paste through the system clipboard
//! - A clickable menu bar and modal file picker
//!
//! ## Architecture
//!
//! Jotpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`session`]: The document, its file path, and the unsaved-changes flow
//! - [`command`]: The menu commands and their dispatch table
//! - [`editor`]: Rope-backed text buffer with cursor and selection
//! - [`clipboard`]: System clipboard with an in-process fallback
//! - [`config`]: Saved default flags
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod clipboard;
pub mod command;
pub mod config;
pub mod editor;
pub mod session;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::command::{Command, CommandContext, dispatch};
    pub use crate::session::{Confirm, ExitPolicy, Flow, Session, SessionError, SessionUi};
}
