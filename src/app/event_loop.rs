use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use tracing::{debug, info, warn};

use crate::app::{App, Message, Model, TerminalUi, update};
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::session::{Session, SessionUi};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails or the event loop
    /// hits an I/O failure while drawing or reading input.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - jotpad requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(Session::new(), (size.width, size.height));
        model.exit_policy = self.exit_policy;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        let mut clipboard = SystemClipboard::new();

        let result = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)
            .context("Failed to enable mouse capture")
            .and_then(|()| self.event_loop(&mut terminal, &mut model, &mut clipboard));

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        info!(quit = model.should_quit, "event loop finished");
        result
    }

    fn event_loop(
        &self,
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        clipboard: &mut dyn Clipboard,
    ) -> Result<()> {
        let startup_error = self
            .file_path
            .as_deref()
            .and_then(|path| model.session.open_path(path).err());

        let mut backdrop: Buffer = terminal
            .draw(|frame| crate::ui::render(model, frame))?
            .buffer
            .clone();
        {
            let mut ui = self.terminal_ui(terminal, &backdrop);
            ui.set_title(&model.session.title());
            if let Some(err) = startup_error {
                warn!(error = %err, "startup open failed");
                ui.notify_error(&err.to_string());
            }
        }
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                backdrop = terminal
                    .draw(|frame| crate::ui::render(model, frame))?
                    .buffer
                    .clone();
                needs_render = false;
            }

            let poll_ms = if model.active_toast().is_some() { 100 } else { 250 };
            if !event::poll(Duration::from_millis(poll_ms))? {
                continue;
            }

            let Some(msg) = Self::handle_event(&event::read()?, model) else {
                continue;
            };
            debug!(?msg, "message");
            let side_msg = msg.clone();
            *model = update(std::mem::take(model), msg);
            {
                let mut ui = self.terminal_ui(terminal, &backdrop);
                Self::handle_message_side_effects(model, &mut ui, clipboard, &side_msg);
            }
            if side_msg == Message::Redraw {
                terminal.clear()?;
            }
            needs_render = true;

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    fn terminal_ui<'t>(
        &'t self,
        terminal: &'t mut DefaultTerminal,
        backdrop: &'t Buffer,
    ) -> TerminalUi<'t> {
        TerminalUi::new(terminal, backdrop, &self.start_dir, self.show_all_files)
    }
}
