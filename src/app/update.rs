use crate::app::Model;
use crate::command::Command;
use crate::editor::Motion;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Type a character, replacing any selection
    InsertChar(char),
    /// Insert pasted text (bracketed paste)
    InsertText(String),
    /// Backspace
    DeleteBack,
    /// Delete
    DeleteForward,
    /// Enter
    SplitLine,

    // Cursor and selection
    /// Move the cursor, dropping any selection
    Move(Motion),
    /// Move the cursor, extending the selection
    Select(Motion),
    SelectAll,
    /// Place the cursor at (line, byte column)
    MoveTo(usize, usize),
    /// Extend the selection to (line, byte column)
    SelectTo(usize, usize),

    // Viewport
    /// Scroll up by n lines without moving the cursor
    ScrollUp(usize),
    /// Scroll down by n lines without moving the cursor
    ScrollDown(usize),

    /// Run a menu command (handled as a side effect)
    Command(Command),

    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // System
    /// Terminal resized
    Resize(u16, u16),
    /// Force redraw
    Redraw,
}

/// Pure state transition.
///
/// Commands only touch the model through side effects, because they may
/// need dialogs, the file system, or the clipboard.
pub fn update(mut model: Model, msg: Message) -> Model {
    let follow_cursor = match msg {
        Message::InsertChar(c) => {
            model.session.buffer_mut().insert_char(c);
            true
        }
        Message::InsertText(text) => {
            model.session.buffer_mut().insert_str(&normalize_paste(&text));
            true
        }
        Message::DeleteBack => {
            model.session.buffer_mut().delete_back();
            true
        }
        Message::DeleteForward => {
            model.session.buffer_mut().delete_forward();
            true
        }
        Message::SplitLine => {
            model.session.buffer_mut().split_line();
            true
        }
        Message::Move(motion) => {
            model.session.buffer_mut().apply_motion(motion, false);
            true
        }
        Message::Select(motion) => {
            model.session.buffer_mut().apply_motion(motion, true);
            true
        }
        Message::SelectAll => {
            model.session.buffer_mut().select_all();
            true
        }
        Message::MoveTo(line, col) => {
            model.session.buffer_mut().move_to(line, col);
            true
        }
        Message::SelectTo(line, col) => {
            model.session.buffer_mut().select_to(line, col);
            true
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
            false
        }
        Message::ScrollDown(n) => {
            model.scroll_offset = model
                .scroll_offset
                .saturating_add(n)
                .min(model.max_scroll());
            false
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            false
        }
        Message::HideHelp => {
            model.help_visible = false;
            false
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            true
        }
        Message::Command(_) | Message::Redraw => false,
    };

    if follow_cursor {
        model.ensure_cursor_visible();
    }
    model
}

/// Terminals deliver pasted line breaks as `\r`; store them as `\n`.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
