//! Key handling for the modal confirm and error dialogs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::Confirm;

const BUTTONS: [Confirm; 3] = [Confirm::Affirm, Confirm::Decline, Confirm::Cancel];

/// Three-way "save changes?" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    selected: usize,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            selected: 0,
        }
    }

    /// The button Enter would press.
    pub const fn selected(&self) -> Confirm {
        BUTTONS[self.selected]
    }

    pub const fn buttons() -> [(Confirm, &'static str); 3] {
        [
            (Confirm::Affirm, "Yes"),
            (Confirm::Decline, "No"),
            (Confirm::Cancel, "Cancel"),
        ]
    }

    /// Feed a key press. Returns the answer once the user has made one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Confirm> {
        match key.code {
            KeyCode::Char('y' | 'Y') => Some(Confirm::Affirm),
            KeyCode::Char('n' | 'N') => Some(Confirm::Decline),
            KeyCode::Char('c' | 'C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Confirm::Cancel)
            }
            KeyCode::Esc => Some(Confirm::Cancel),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.selected()),
            KeyCode::Left | KeyCode::BackTab => {
                self.selected = (self.selected + BUTTONS.len() - 1) % BUTTONS.len();
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.selected = (self.selected + 1) % BUTTONS.len();
                None
            }
            _ => None,
        }
    }
}

/// Modal error notification. Any key dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub message: String,
}

impl ErrorDialog {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn handle_key(&mut self, _key: KeyEvent) -> Option<()> {
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letter_shortcuts_answer_immediately() {
        let mut dialog = ConfirmDialog::new("Save Changes?", "Save?");
        assert_eq!(dialog.handle_key(press(KeyCode::Char('y'))), Some(Confirm::Affirm));
        assert_eq!(dialog.handle_key(press(KeyCode::Char('N'))), Some(Confirm::Decline));
        assert_eq!(dialog.handle_key(press(KeyCode::Char('c'))), Some(Confirm::Cancel));
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = ConfirmDialog::new("t", "m");
        assert_eq!(dialog.handle_key(press(KeyCode::Esc)), Some(Confirm::Cancel));
    }

    #[test]
    fn test_enter_presses_selected_button() {
        let mut dialog = ConfirmDialog::new("t", "m");
        assert_eq!(dialog.selected(), Confirm::Affirm);
        assert_eq!(dialog.handle_key(press(KeyCode::Right)), None);
        assert_eq!(dialog.selected(), Confirm::Decline);
        assert_eq!(dialog.handle_key(press(KeyCode::Enter)), Some(Confirm::Decline));
    }

    #[test]
    fn test_selection_wraps_left() {
        let mut dialog = ConfirmDialog::new("t", "m");
        dialog.handle_key(press(KeyCode::Left));
        assert_eq!(dialog.selected(), Confirm::Cancel);
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let mut dialog = ConfirmDialog::new("t", "m");
        assert_eq!(dialog.handle_key(press(KeyCode::Char('x'))), None);
        assert_eq!(dialog.selected(), Confirm::Affirm);
    }

    #[test]
    fn test_error_dialog_closes_on_any_key() {
        let mut dialog = ErrorDialog::new("Error reading file: nope");
        for code in [KeyCode::Char('q'), KeyCode::Enter, KeyCode::Esc] {
            assert_eq!(dialog.handle_key(press(code)), Some(()));
        }
    }
}
