use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// No successful fetch yet.
    #[default]
    Unknown,
    ClockedOut,
    ClockedIn,
}

impl ClockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::Unknown => "unknown",
            ClockState::ClockedOut => "clocked out",
            ClockState::ClockedIn => "clocked in",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, ClockState::ClockedIn)
    }
}

impl std::fmt::Display for ClockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
