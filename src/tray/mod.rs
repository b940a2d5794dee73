//! Tray host surface for the attendance tracker.
//!
//! The tray talks to the control loop through channels:
//! - [`TrayEvent`]: user requests from the tray (clock in, clock out, quit…)
//! - [`TrayUpdate`]: what the tray should show (ticks, notices)
//!
//! Rendering goes through the [`TrayShell`] trait; [`TerminalTray`] draws a
//! status line on the terminal.

mod terminal;

pub use terminal::TerminalTray;

use crate::core::ticker::Tick;
use crate::models::ClockState;
use tokio::sync::mpsc;

/// The two icons the tray switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    ClockedIn,
    ClockedOut,
}

impl IconState {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconState::ClockedIn => "clocked-in",
            IconState::ClockedOut => "clocked-out",
        }
    }
}

impl From<ClockState> for IconState {
    fn from(state: ClockState) -> Self {
        if state.is_in() {
            IconState::ClockedIn
        } else {
            IconState::ClockedOut
        }
    }
}

/// Requests from the tray to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    ClockIn,
    ClockOut,
    Toggle,
    Refresh,
    Quit,
}

impl TrayEvent {
    /// Parse a line typed into the terminal tray.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "in" | "i" => Some(Self::ClockIn),
            "out" | "o" => Some(Self::ClockOut),
            "toggle" | "t" | "" => Some(Self::Toggle),
            "refresh" | "r" => Some(Self::Refresh),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Updates from the control loop (and the ticker) to the tray.
#[derive(Debug, Clone, PartialEq)]
pub enum TrayUpdate {
    Tick(Tick),
    Info(String),
    Error(String),
}

/// What a tray implementation must be able to show.
pub trait TrayShell {
    fn set_title(&mut self, display: &str);
    fn set_icon(&mut self, icon: IconState);
    fn notify_info(&mut self, msg: &str);
    fn notify_error(&mut self, msg: &str);
}

/// Drain updates into `shell` until every sender is gone, then hand the shell
/// back. The title follows every tick; the icon only changes on transitions.
pub async fn render<S: TrayShell>(mut updates: mpsc::UnboundedReceiver<TrayUpdate>, mut shell: S) -> S {
    let mut icon: Option<IconState> = None;

    while let Some(update) = updates.recv().await {
        match update {
            TrayUpdate::Tick(tick) => {
                if icon != Some(tick.icon) {
                    shell.set_icon(tick.icon);
                    icon = Some(tick.icon);
                }
                shell.set_title(&tick.display);
            }
            TrayUpdate::Info(msg) => shell.notify_info(&msg),
            TrayUpdate::Error(msg) => shell.notify_error(&msg),
        }
    }

    shell
}

/// Records everything it is asked to show.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingShell {
    pub titles: Vec<String>,
    pub icons: Vec<IconState>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
}

#[cfg(test)]
impl TrayShell for RecordingShell {
    fn set_title(&mut self, display: &str) {
        self.titles.push(display.to_string());
    }
    fn set_icon(&mut self, icon: IconState) {
        self.icons.push(icon);
    }
    fn notify_info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }
    fn notify_error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }
}
