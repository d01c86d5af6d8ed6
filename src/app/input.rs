use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::command::Command;
use crate::editor::Motion;
use crate::ui::menu::command_at_column;
use crate::ui::text::byte_col_at_display;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::InsertText(text.clone())),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        if ctrl && let KeyCode::Char(c) = key.code {
            return match c.to_ascii_lowercase() {
                'n' => Some(Message::Command(Command::New)),
                'o' => Some(Message::Command(Command::Open)),
                's' => Some(Message::Command(Command::Save)),
                'q' => Some(Message::Command(Command::Exit)),
                'x' => Some(Message::Command(Command::Cut)),
                'c' => Some(Message::Command(Command::Copy)),
                'v' => Some(Message::Command(Command::Paste)),
                'a' => Some(Message::SelectAll),
                'l' => Some(Message::Redraw),
                _ => None,
            };
        }

        let page = model.text_rows().max(1);
        let motion = match key.code {
            KeyCode::Left if ctrl => Some(Motion::WordLeft),
            KeyCode::Right if ctrl => Some(Motion::WordRight),
            KeyCode::Home if ctrl => Some(Motion::BufferStart),
            KeyCode::End if ctrl => Some(Motion::BufferEnd),
            KeyCode::Left => Some(Motion::Left),
            KeyCode::Right => Some(Motion::Right),
            KeyCode::Up => Some(Motion::Up),
            KeyCode::Down => Some(Motion::Down),
            KeyCode::Home => Some(Motion::Home),
            KeyCode::End => Some(Motion::End),
            KeyCode::PageUp => Some(Motion::PageUp(page)),
            KeyCode::PageDown => Some(Motion::PageDown(page)),
            _ => None,
        };
        if let Some(motion) = motion {
            return Some(if shift {
                Message::Select(motion)
            } else {
                Message::Move(motion)
            });
        }

        match key.code {
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Char(c) if !alt => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Down(_)).then_some(Message::HideHelp);
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if mouse.row == 0 => {
                command_at_column(mouse.column).map(Message::Command)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let (line, col) = text_position(model, mouse.column, mouse.row)?;
                Some(if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                    Message::SelectTo(line, col)
                } else {
                    Message::MoveTo(line, col)
                })
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (line, col) = text_position(model, mouse.column, mouse.row)?;
                Some(Message::SelectTo(line, col))
            }
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_LINES)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_LINES)),
            _ => None,
        }
    }
}

/// Map a screen cell in the editor pane to a buffer (line, byte column).
/// Rows past the last line land on the last line; the gutter maps to
/// the first visible column.
fn text_position(model: &Model, column: u16, row: u16) -> Option<(usize, usize)> {
    let row = usize::from(row);
    if row == 0 || row > model.text_rows() {
        return None;
    }
    let buffer = model.session.buffer();
    let last_line = buffer.line_count().saturating_sub(1);
    let line = (model.scroll_offset + row - 1).min(last_line);
    let text = buffer.line_at(line).unwrap_or_default();
    let target = usize::from(column)
        .checked_sub(model.gutter_width())
        .map_or(model.h_scroll, |col| col + model.h_scroll);
    Some((line, byte_col_at_display(&text, target)))
}
