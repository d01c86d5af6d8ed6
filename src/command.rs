//! Menu commands and their dispatch table.

use tracing::debug;

use crate::clipboard::Clipboard;
use crate::session::{ExitPolicy, Flow, Session, SessionUi};

/// Every action reachable from the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    Exit,
    Cut,
    Copy,
    Paste,
}

/// What a clipboard command did, for the shell to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NothingSelected,
    ClipboardEmpty,
    Copied(usize),
    Cut(usize),
    Pasted(usize),
}

/// Everything a command handler may touch.
pub struct CommandContext<'a> {
    pub session: &'a mut Session,
    pub ui: &'a mut dyn SessionUi,
    pub clipboard: &'a mut dyn Clipboard,
    pub exit_policy: ExitPolicy,
    /// Set by Cut, Copy and Paste.
    pub notice: Option<Notice>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        session: &'a mut Session,
        ui: &'a mut dyn SessionUi,
        clipboard: &'a mut dyn Clipboard,
        exit_policy: ExitPolicy,
    ) -> Self {
        Self {
            session,
            ui,
            clipboard,
            exit_policy,
            notice: None,
        }
    }
}

pub type Handler = fn(&mut CommandContext<'_>) -> Flow;

impl Command {
    pub const ALL: [Self; 7] = [
        Self::New,
        Self::Open,
        Self::Save,
        Self::Exit,
        Self::Cut,
        Self::Copy,
        Self::Paste,
    ];
    pub const FILE_MENU: [Self; 4] = [Self::New, Self::Open, Self::Save, Self::Exit];
    pub const EDIT_MENU: [Self; 3] = [Self::Cut, Self::Copy, Self::Paste];

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Open => "Open",
            Self::Save => "Save",
            Self::Exit => "Exit",
            Self::Cut => "Cut",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
        }
    }

    /// Key shown next to the label in the menu bar.
    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::New => "^N",
            Self::Open => "^O",
            Self::Save => "^S",
            Self::Exit => "^Q",
            Self::Cut => "^X",
            Self::Copy => "^C",
            Self::Paste => "^V",
        }
    }

    pub fn handler(self) -> Handler {
        match self {
            Self::New => new_document,
            Self::Open => open,
            Self::Save => save,
            Self::Exit => exit,
            Self::Cut => cut,
            Self::Copy => copy,
            Self::Paste => paste,
        }
    }
}

/// Run a command against the session.
pub fn dispatch(command: Command, ctx: &mut CommandContext<'_>) -> Flow {
    debug!(?command, "dispatching command");
    (command.handler())(ctx)
}

fn new_document(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.session.new_document(ctx.ui);
    Flow::Continue
}

fn open(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.session.open(ctx.ui);
    Flow::Continue
}

fn save(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.session.save(ctx.ui);
    Flow::Continue
}

fn exit(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.session.exit(ctx.ui, ctx.exit_policy)
}

fn cut(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.notice = Some(match ctx.session.buffer_mut().delete_selection() {
        Some(text) => {
            ctx.clipboard.set_text(&text);
            Notice::Cut(text.chars().count())
        }
        None => Notice::NothingSelected,
    });
    Flow::Continue
}

fn copy(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.notice = Some(match ctx.session.buffer().selected_text() {
        Some(text) => {
            ctx.clipboard.set_text(&text);
            Notice::Copied(text.chars().count())
        }
        None => Notice::NothingSelected,
    });
    Flow::Continue
}

/// Insert the clipboard at the cursor. An empty clipboard leaves the
/// buffer and any selection alone.
fn paste(ctx: &mut CommandContext<'_>) -> Flow {
    ctx.notice = Some(match ctx.clipboard.get_text().filter(|text| !text.is_empty()) {
        Some(text) => {
            ctx.session.buffer_mut().insert_str(&text);
            Notice::Pasted(text.chars().count())
        }
        None => Notice::ClipboardEmpty,
    });
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::editor::Motion;
    use crate::session::Confirm;

    /// Declines every prompt and backs out of every picker.
    struct DecliningUi;

    impl SessionUi for DecliningUi {
        fn confirm(&mut self, _title: &str, _message: &str) -> Confirm {
            Confirm::Decline
        }
        fn notify_error(&mut self, _message: &str) {}
        fn pick_open_path(&mut self) -> Option<PathBuf> {
            None
        }
        fn pick_save_path(&mut self, _suggested: Option<&Path>) -> Option<PathBuf> {
            None
        }
        fn set_title(&mut self, _title: &str) {}
    }

    fn run(command: Command, session: &mut Session, clipboard: &mut MemoryClipboard) -> Flow {
        run_noting(command, session, clipboard).0
    }

    fn run_noting(
        command: Command,
        session: &mut Session,
        clipboard: &mut MemoryClipboard,
    ) -> (Flow, Option<Notice>) {
        let mut ui = DecliningUi;
        let mut ctx = CommandContext::new(session, &mut ui, clipboard, ExitPolicy::Lenient);
        let flow = dispatch(command, &mut ctx);
        (flow, ctx.notice)
    }

    #[test]
    fn test_every_command_has_a_label_and_shortcut() {
        for command in Command::ALL {
            assert!(!command.label().is_empty());
            assert!(command.shortcut().starts_with('^'));
        }
        assert_eq!(
            Command::FILE_MENU.len() + Command::EDIT_MENU.len(),
            Command::ALL.len()
        );
    }

    #[test]
    fn test_copy_then_paste_duplicates_selection() {
        let mut session = Session::new();
        session.buffer_mut().set_text("ab");
        session.buffer_mut().select_all();
        let mut clipboard = MemoryClipboard::default();

        run(Command::Copy, &mut session, &mut clipboard);
        session.buffer_mut().apply_motion(Motion::BufferEnd, false);
        run(Command::Paste, &mut session, &mut clipboard);

        assert_eq!(session.buffer().text(), "abab");
    }

    #[test]
    fn test_cut_moves_selection_to_clipboard() {
        let mut session = Session::new();
        session.buffer_mut().set_text("hello world");
        session.buffer_mut().apply_motion(Motion::WordRight, true);
        let mut clipboard = MemoryClipboard::default();

        run(Command::Cut, &mut session, &mut clipboard);

        assert_eq!(session.buffer().text(), "world");
        assert_eq!(clipboard.get_text(), Some("hello ".to_string()));
    }

    #[test]
    fn test_cut_without_selection_leaves_clipboard_alone() {
        let mut session = Session::new();
        session.buffer_mut().set_text("hello");
        let mut clipboard = MemoryClipboard::default();
        clipboard.set_text("keep");

        run(Command::Cut, &mut session, &mut clipboard);

        assert_eq!(session.buffer().text(), "hello");
        assert_eq!(clipboard.get_text(), Some("keep".to_string()));
    }

    #[test]
    fn test_exit_decline_terminates() {
        let mut session = Session::new();
        session.buffer_mut().set_text("unsaved");
        let mut clipboard = MemoryClipboard::default();
        assert_eq!(run(Command::Exit, &mut session, &mut clipboard), Flow::Exit);
    }

    #[test]
    fn test_file_commands_continue_running() {
        let mut session = Session::new();
        let mut clipboard = MemoryClipboard::default();
        for command in [Command::New, Command::Open, Command::Save] {
            assert_eq!(run(command, &mut session, &mut clipboard), Flow::Continue);
        }
    }

    /// Counts the clipboard reads so a paste can be checked to read once.
    #[derive(Default)]
    struct CountingClipboard {
        inner: MemoryClipboard,
        reads: usize,
    }

    impl Clipboard for CountingClipboard {
        fn get_text(&mut self) -> Option<String> {
            self.reads += 1;
            self.inner.get_text()
        }

        fn set_text(&mut self, text: &str) {
            self.inner.set_text(text);
        }
    }

    #[test]
    fn test_paste_reads_clipboard_once_and_reports_length() {
        let mut session = Session::new();
        let mut clipboard = CountingClipboard::default();
        clipboard.set_text("héllo");
        let mut ui = DecliningUi;
        let mut ctx = CommandContext::new(&mut session, &mut ui, &mut clipboard, ExitPolicy::Lenient);

        dispatch(Command::Paste, &mut ctx);

        assert_eq!(ctx.notice, Some(Notice::Pasted(5)));
        assert_eq!(session.buffer().text(), "héllo");
        assert_eq!(clipboard.reads, 1);
    }

    #[test]
    fn test_empty_paste_keeps_selection() {
        let mut session = Session::new();
        session.buffer_mut().set_text("keep");
        session.buffer_mut().select_all();
        let mut clipboard = MemoryClipboard::default();
        clipboard.set_text("");

        let (_, notice) = run_noting(Command::Paste, &mut session, &mut clipboard);

        assert_eq!(notice, Some(Notice::ClipboardEmpty));
        assert_eq!(session.buffer().selected_text(), Some("keep".to_string()));
    }

    #[test]
    fn test_copy_and_cut_report_what_they_did() {
        let mut session = Session::new();
        session.buffer_mut().set_text("abc");
        let mut clipboard = MemoryClipboard::default();

        let (_, notice) = run_noting(Command::Copy, &mut session, &mut clipboard);
        assert_eq!(notice, Some(Notice::NothingSelected));

        session.buffer_mut().select_all();
        let (_, notice) = run_noting(Command::Copy, &mut session, &mut clipboard);
        assert_eq!(notice, Some(Notice::Copied(3)));
        let (_, notice) = run_noting(Command::Cut, &mut session, &mut clipboard);
        assert_eq!(notice, Some(Notice::Cut(3)));
        assert!(session.is_empty());
    }
}
