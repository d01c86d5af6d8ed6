//! Clipboard access for Cut/Copy/Paste.

use std::io::{Write, stdout};

use base64::Engine;
use tracing::{debug, warn};

/// Where cut and copied text goes, and where pasted text comes from.
pub trait Clipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// In-process clipboard. Used in tests and as a last resort.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.contents = Some(text.to_string());
    }
}

/// The platform clipboard, with an internal register as fallback.
///
/// Every copy is also sent to the terminal as an OSC 52 sequence, so a
/// terminal on the far side of SSH receives it too. Paste prefers the
/// system clipboard and falls back to the register.
pub struct SystemClipboard {
    system: Option<arboard::Clipboard>,
    register: MemoryClipboard,
    terminal: Box<dyn Write>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                debug!(error = %err, "system clipboard unavailable, using register");
                None
            }
        };
        Self::with_parts(system, Box::new(stdout()))
    }

    fn with_parts(system: Option<arboard::Clipboard>, terminal: Box<dyn Write>) -> Self {
        Self {
            system,
            register: MemoryClipboard::default(),
            terminal,
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("system", &self.system.is_some())
            .field("register", &self.register)
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        let from_system = self
            .system
            .as_mut()
            .and_then(|clipboard| clipboard.get_text().ok())
            .filter(|text| !text.is_empty());
        from_system.or_else(|| self.register.get_text())
    }

    fn set_text(&mut self, text: &str) {
        self.register.set_text(text);
        if let Some(clipboard) = self.system.as_mut()
            && let Err(err) = clipboard.set_text(text.to_owned())
        {
            warn!(error = %err, "system clipboard write failed");
        }
        if let Err(err) = copy_to_clipboard_osc52(&mut self.terminal, text) {
            debug!(error = %err, "osc52 copy failed");
        }
    }
}

fn copy_to_clipboard_osc52(out: &mut dyn Write, text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
