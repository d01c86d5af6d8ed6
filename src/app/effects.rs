use tracing::debug;

use crate::app::{App, Message, Model, ToastLevel};
use crate::clipboard::Clipboard;
use crate::command::{CommandContext, Notice, dispatch};
use crate::session::{Flow, SessionUi};

impl App {
    /// Perform the effects of a message after `update` has run.
    ///
    /// Menu commands are dispatched here, with `ui` providing the modal
    /// dialogs and `clipboard` backing Cut/Copy/Paste.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        ui: &mut dyn SessionUi,
        clipboard: &mut dyn Clipboard,
        msg: &Message,
    ) {
        let Message::Command(command) = msg else {
            return;
        };
        let command = *command;

        let mut ctx = CommandContext::new(&mut model.session, ui, clipboard, model.exit_policy);
        let flow = dispatch(command, &mut ctx);
        let notice = ctx.notice;
        debug!(?command, ?flow, ?notice, "command finished");

        match notice {
            Some(Notice::NothingSelected) => model.show_toast(ToastLevel::Warning, "Nothing selected"),
            Some(Notice::ClipboardEmpty) => model.show_toast(ToastLevel::Info, "Clipboard is empty"),
            Some(Notice::Copied(chars)) => {
                model.show_toast(ToastLevel::Info, format!("Copied {chars} chars"));
            }
            Some(Notice::Cut(chars)) => model.show_toast(ToastLevel::Info, format!("Cut {chars} chars")),
            Some(Notice::Pasted(_)) | None => {}
        }
        if flow == Flow::Exit {
            model.should_quit = true;
        }
        model.ensure_cursor_visible();
    }
}
