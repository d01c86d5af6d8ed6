use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::session::{ExitPolicy, Session};
use crate::ui::text::display_col;

/// Rows taken by the menu bar and the status bar.
const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document being edited
    pub session: Session,
    /// First buffer line shown in the editor pane
    pub scroll_offset: usize,
    /// First display column shown in the editor pane
    pub h_scroll: usize,
    /// Terminal width
    pub width: u16,
    /// Terminal height
    pub height: u16,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    pub exit_policy: ExitPolicy,
    /// Config file paths shown in help
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("title", &self.session.title())
            .field("cursor", &self.session.buffer().cursor())
            .field("scroll_offset", &self.scroll_offset)
            .field("size", &(self.width, self.height))
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model around a session.
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            width: terminal_size.0,
            height: terminal_size.1,
            ..Self::default()
        }
    }

    /// Rows available for text between the menu bar and the status bar.
    pub fn text_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(CHROME_ROWS))
    }

    /// Width of the line-number gutter, including its trailing space.
    pub fn gutter_width(&self) -> usize {
        line_number_width(self.session.buffer().line_count()) + 1
    }

    /// Columns available for text to the right of the gutter.
    pub fn text_cols(&self) -> usize {
        usize::from(self.width).saturating_sub(self.gutter_width())
    }

    /// Scroll so the cursor is inside the editor pane.
    pub fn ensure_cursor_visible(&mut self) {
        let buffer = self.session.buffer();
        let cursor = buffer.cursor();
        let rows = self.text_rows().max(1);
        if cursor.line < self.scroll_offset {
            self.scroll_offset = cursor.line;
        } else if cursor.line >= self.scroll_offset + rows {
            self.scroll_offset = cursor.line + 1 - rows;
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        let cols = self.text_cols().max(1);
        let line = buffer.line_at(cursor.line).unwrap_or_default();
        let col = display_col(&line, cursor.col);
        if col < self.h_scroll {
            self.h_scroll = col;
        } else if col >= self.h_scroll + cols {
            self.h_scroll = col + 1 - cols;
        }
    }

    /// Largest useful scroll offset: the last line at the top of the pane.
    pub fn max_scroll(&self) -> usize {
        self.session.buffer().line_count().saturating_sub(1)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(3),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// Digits needed to number `line_count` lines.
pub fn line_number_width(line_count: usize) -> usize {
    let mut width = 1;
    let mut n = line_count.max(1);
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width.max(3)
}

impl Default for Model {
    fn default() -> Self {
        Self {
            session: Session::new(),
            scroll_offset: 0,
            h_scroll: 0,
            width: 80,
            height: 24,
            help_visible: false,
            should_quit: false,
            exit_policy: ExitPolicy::default(),
            config_global_path: None,
            config_local_path: None,
            toast: None,
        }
    }
}
