//! The editor session: one text buffer, one optional file path, and the
//! unsaved-changes flow that guards New and Exit.
//!
//! The session never talks to the terminal directly. Everything the user
//! sees (prompts, errors, pickers, the title) goes through [`SessionUi`],
//! so the flow can be driven by the real shell or by a scripted double.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::editor::EditorBuffer;

/// Application name shown in the title.
pub const APP_NAME: &str = "Jotpad";
/// Display name of a document that has never been opened or saved.
pub const UNTITLED: &str = "Untitled";

pub const SAVE_CHANGES_TITLE: &str = "Save Changes?";
pub const NEW_PROMPT: &str = "Do you want to save changes to the current file?";
pub const EXIT_PROMPT: &str = "Do you want to save changes before exiting?";

/// Answer to the three-way "save changes?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Save, then proceed.
    Affirm,
    /// Discard, then proceed.
    Decline,
    /// Stay where we are.
    Cancel,
}

/// Whether the program keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What Exit does when the user chose to save but the save did not
/// complete (picker cancelled or write failed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPolicy {
    /// Exit anyway. The error has already been shown.
    #[default]
    Lenient,
    /// Stay running so the buffer is not lost.
    Strict,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Error reading file: {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Error saving file: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Presentation services the session needs from its host.
pub trait SessionUi {
    /// Modal three-way question.
    fn confirm(&mut self, title: &str, message: &str) -> Confirm;

    /// Modal error notification.
    fn notify_error(&mut self, message: &str);

    /// Ask for a file to open. `None` means the user backed out.
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Ask for a file to save to, starting from `suggested` when known.
    fn pick_save_path(&mut self, suggested: Option<&Path>) -> Option<PathBuf>;

    fn set_title(&mut self, title: &str);
}

/// Outcome of the shared unsaved-changes check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unsaved {
    /// Nothing to keep, or the user chose to discard it.
    Clear,
    /// The user chose to save; carries whether the save succeeded.
    Saved(bool),
    Cancelled,
}

/// The single open document.
#[derive(Debug, Default)]
pub struct Session {
    buffer: EditorBuffer,
    current_path: Option<PathBuf>,
}

impl Session {
    /// An empty, untitled session.
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// Whether the buffer holds no text. This is the only "unsaved
    /// changes" signal: any text at all counts as worth asking about.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// `Untitled` or the base name of the current path.
    pub fn display_name(&self) -> String {
        self.current_path
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(
                || UNTITLED.to_string(),
                |name| name.to_string_lossy().into_owned(),
            )
    }

    pub fn title(&self) -> String {
        format!("{APP_NAME} - {}", self.display_name())
    }

    /// Replace the buffer with the contents of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Read`] if the file cannot be read as text.
    /// The session is left untouched in that case.
    pub fn open_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let contents = fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.buffer.set_text(&contents);
        self.current_path = Some(path.to_path_buf());
        info!(path = %path.display(), bytes = contents.len(), "opened file");
        Ok(())
    }

    /// Write the whole buffer to `path`, adding `.txt` when the name lacks
    /// it. Returns the path actually written.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Write`] if the file cannot be written.
    /// The current path is left untouched in that case.
    pub fn save_to(&mut self, path: &Path) -> Result<PathBuf, SessionError> {
        let target = ensure_txt_extension(path);
        let text = self.buffer.text();
        fs::write(&target, &text).map_err(|source| SessionError::Write {
            path: target.clone(),
            source,
        })?;
        info!(path = %target.display(), bytes = text.len(), "saved file");
        self.current_path = Some(target.clone());
        Ok(target)
    }

    /// Drop the buffer and forget the path.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.current_path = None;
    }

    /// Pick a file and open it, reporting failures to the user.
    pub fn open(&mut self, ui: &mut dyn SessionUi) {
        let Some(path) = ui.pick_open_path() else {
            debug!("open cancelled");
            return;
        };
        match self.open_path(&path) {
            Ok(()) => ui.set_title(&self.title()),
            Err(err) => {
                warn!(error = %err, "open failed");
                ui.notify_error(&err.to_string());
            }
        }
    }

    /// Pick a destination and save to it. Returns `true` only when the
    /// file was written.
    pub fn save(&mut self, ui: &mut dyn SessionUi) -> bool {
        let suggested = self.current_path.clone();
        let Some(path) = ui.pick_save_path(suggested.as_deref()) else {
            debug!("save cancelled");
            return false;
        };
        match self.save_to(&path) {
            Ok(_) => {
                ui.set_title(&self.title());
                true
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                ui.notify_error(&err.to_string());
                false
            }
        }
    }

    /// Start a fresh document, asking first if there is text to lose.
    /// Returns `true` if the session was cleared.
    pub fn new_document(&mut self, ui: &mut dyn SessionUi) -> bool {
        match self.resolve_unsaved(ui, NEW_PROMPT) {
            Unsaved::Clear | Unsaved::Saved(true) => {
                self.reset();
                ui.set_title(&self.title());
                debug!("started new document");
                true
            }
            Unsaved::Saved(false) => {
                debug!("new document abandoned, save did not complete");
                false
            }
            Unsaved::Cancelled => false,
        }
    }

    /// Decide whether the program may terminate, asking first if there is
    /// text to lose.
    pub fn exit(&mut self, ui: &mut dyn SessionUi, policy: ExitPolicy) -> Flow {
        match self.resolve_unsaved(ui, EXIT_PROMPT) {
            Unsaved::Clear | Unsaved::Saved(true) => Flow::Exit,
            Unsaved::Saved(false) => match policy {
                ExitPolicy::Lenient => {
                    warn!("exiting although the save did not complete");
                    Flow::Exit
                }
                ExitPolicy::Strict => {
                    info!("exit aborted, save did not complete");
                    Flow::Continue
                }
            },
            Unsaved::Cancelled => Flow::Continue,
        }
    }

    fn resolve_unsaved(&mut self, ui: &mut dyn SessionUi, message: &str) -> Unsaved {
        if self.is_empty() {
            return Unsaved::Clear;
        }
        let answer = ui.confirm(SAVE_CHANGES_TITLE, message);
        debug!(?answer, "unsaved changes prompt answered");
        match answer {
            Confirm::Affirm => Unsaved::Saved(self.save(ui)),
            Confirm::Decline => Unsaved::Clear,
            Confirm::Cancel => Unsaved::Cancelled,
        }
    }
}

/// Append `.txt` unless the file name already ends with it (any case).
pub fn ensure_txt_extension(path: &Path) -> PathBuf {
    let has_txt = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(".txt"));
    if has_txt {
        return path.to_path_buf();
    }
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".txt");
    PathBuf::from(raw)
}
