use super::{IconState, TrayShell};
use crate::ui::messages;
use ansi_term::Colour;
use std::io::{self, Write};

/// Terminal stand-in for a system tray: one status line redrawn in place.
///
/// The red dot is the clocked-in icon, the white ring the clocked-out one.
pub struct TerminalTray {
    icon: IconState,
    label: String,
    out: io::Stdout,
}

impl TerminalTray {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            icon: IconState::ClockedOut,
            label: label.into(),
            out: io::stdout(),
        }
    }

    fn glyph(&self) -> String {
        match self.icon {
            IconState::ClockedIn => Colour::Red.bold().paint("●").to_string(),
            IconState::ClockedOut => Colour::White.paint("○").to_string(),
        }
    }

    /// Finish the status line so a message can be printed below it.
    fn break_line(&mut self) {
        let _ = writeln!(self.out);
    }
}

impl TrayShell for TerminalTray {
    fn set_title(&mut self, display: &str) {
        let line = format!("\r\x1b[2K{} {} {}", self.glyph(), self.label, display);
        let _ = self.out.write_all(line.as_bytes());
        let _ = self.out.flush();
    }

    fn set_icon(&mut self, icon: IconState) {
        tracing::debug!(icon = icon.as_str(), "tray icon changed");
        self.icon = icon;
    }

    fn notify_info(&mut self, msg: &str) {
        self.break_line();
        messages::info(msg);
    }

    fn notify_error(&mut self, msg: &str) {
        self.break_line();
        messages::error(msg);
    }
}
