//! Modal dialogs drawn over the editor.
//!
//! Each dialog runs its own draw/read loop on the terminal until it has an
//! answer. The editor screen from the last completed frame is repainted
//! underneath so the dialog appears on top of it.

use std::io::stdout;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, warn};

use crate::session::{Confirm, SessionUi};
use crate::ui::dialog::{ConfirmDialog, ErrorDialog};
use crate::ui::picker::{FilePicker, PickerMode, PickerStep};
use crate::ui::{render_confirm_dialog, render_error_dialog, render_file_picker};

/// A dialog that can be driven by [`TerminalUi::run_modal`].
trait Modal {
    type Output;

    fn render(&self, frame: &mut Frame, area: Rect);

    fn on_key(&mut self, key: KeyEvent) -> Option<Self::Output>;
}

impl Modal for ConfirmDialog {
    type Output = Confirm;

    fn render(&self, frame: &mut Frame, area: Rect) {
        render_confirm_dialog(self, frame, area);
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Confirm> {
        self.handle_key(key)
    }
}

impl Modal for ErrorDialog {
    type Output = ();

    fn render(&self, frame: &mut Frame, area: Rect) {
        render_error_dialog(self, frame, area);
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<()> {
        self.handle_key(key)
    }
}

impl Modal for FilePicker {
    /// `None` when the user backed out.
    type Output = Option<PathBuf>;

    fn render(&self, frame: &mut Frame, area: Rect) {
        render_file_picker(self, frame, area);
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Option<PathBuf>> {
        match self.handle_key(key) {
            PickerStep::Pending => None,
            PickerStep::Picked(path) => Some(Some(path)),
            PickerStep::Cancelled => Some(None),
        }
    }
}

/// [`SessionUi`] backed by the real terminal.
pub struct TerminalUi<'t> {
    terminal: &'t mut DefaultTerminal,
    backdrop: &'t Buffer,
    start_dir: &'t Path,
    show_all_files: bool,
}

impl<'t> TerminalUi<'t> {
    pub fn new(
        terminal: &'t mut DefaultTerminal,
        backdrop: &'t Buffer,
        start_dir: &'t Path,
        show_all_files: bool,
    ) -> Self {
        Self {
            terminal,
            backdrop,
            start_dir,
            show_all_files,
        }
    }

    fn run_modal<M: Modal>(&mut self, modal: &mut M) -> std::io::Result<M::Output> {
        let backdrop = self.backdrop;
        loop {
            self.terminal.draw(|frame| {
                let area = frame.area();
                if backdrop.area == area {
                    frame.buffer_mut().clone_from(backdrop);
                }
                modal.render(frame, area);
            })?;
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(output) = modal.on_key(key)
            {
                return Ok(output);
            }
        }
    }

    fn pick_path(&mut self, mut picker: FilePicker) -> Option<PathBuf> {
        match self.run_modal(&mut picker) {
            Ok(path) => {
                debug!(mode = ?picker.mode, ?path, "file picker closed");
                path
            }
            Err(err) => {
                warn!(error = %err, "file picker failed");
                None
            }
        }
    }
}

impl SessionUi for TerminalUi<'_> {
    fn confirm(&mut self, title: &str, message: &str) -> Confirm {
        let mut dialog = ConfirmDialog::new(title, message);
        self.run_modal(&mut dialog).unwrap_or_else(|err| {
            warn!(error = %err, "confirm dialog failed, treating as cancel");
            Confirm::Cancel
        })
    }

    fn notify_error(&mut self, message: &str) {
        let mut dialog = ErrorDialog::new(message);
        if let Err(err) = self.run_modal(&mut dialog) {
            warn!(error = %err, message, "error dialog failed");
        }
    }

    fn pick_open_path(&mut self) -> Option<PathBuf> {
        let picker = FilePicker::new(PickerMode::Open, self.start_dir, self.show_all_files);
        self.pick_path(picker)
    }

    fn pick_save_path(&mut self, suggested: Option<&Path>) -> Option<PathBuf> {
        let dir = suggested
            .and_then(Path::parent)
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or(self.start_dir);
        let mut picker = FilePicker::new(PickerMode::Save, dir, self.show_all_files);
        if let Some(name) = suggested.and_then(Path::file_name) {
            picker = picker.with_name(name.to_string_lossy());
        }
        self.pick_path(picker)
    }

    fn set_title(&mut self, title: &str) {
        if let Err(err) = execute!(stdout(), SetTitle(title)) {
            warn!(error = %err, "failed to set terminal title");
        }
    }
}
