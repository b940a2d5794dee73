use super::{clock_state::ClockState, shift::Shift};
use crate::utils::time::{format_hm, localize};
use chrono::DateTime;
use chrono_tz::Tz;
use tracing::warn;

/// Local, derived view of today's attendance.
///
/// Rebuilt from the shift list on every fetch and updated in place by
/// successful clock-in / clock-out commands. Never persisted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub state: ClockState,
    /// Sum of `minutes` over the closed shifts of the last fetch.
    pub minutes_before_open_shift: i64,
    /// Start of the open shift, set only while clocked in.
    pub open_shift_started_at: Option<DateTime<Tz>>,
}

impl Session {
    /// Seed a session from a fetched shift list.
    ///
    /// Shift times are wall-clock times in `tz`. Any shift without a
    /// clock-out means clocked in; if none of the open shifts carries a
    /// clock-in the start stays unknown and only the closed total is shown.
    /// If more than one shift is open (the service should prevent this) the
    /// most recent start wins.
    pub fn from_shifts(shifts: &[Shift], tz: Tz) -> Self {
        let minutes_before_open_shift = shifts
            .iter()
            .filter(|s| !s.is_open())
            .map(|s| s.minutes)
            .sum();

        let open: Vec<&Shift> = shifts.iter().filter(|s| s.is_open()).collect();

        if open.len() > 1 {
            warn!(count = open.len(), "more than one open shift returned, using the latest");
        }

        if open.is_empty() {
            return Self {
                state: ClockState::ClockedOut,
                minutes_before_open_shift,
                open_shift_started_at: None,
            };
        }

        let start = open.iter().filter_map(|s| s.started_at()).max();
        if start.is_none() {
            warn!("open shift has no clock_in, running time unknown");
        }

        Self {
            state: ClockState::ClockedIn,
            minutes_before_open_shift,
            open_shift_started_at: start.map(|naive| localize(naive, tz)),
        }
    }

    pub fn is_clocked_in(&self) -> bool {
        self.state.is_in()
    }

    /// Whole minutes worked today as of `now`.
    ///
    /// While clocked in this is the floor of the open shift's running time
    /// plus the closed-shift total; otherwise just the closed-shift total.
    /// A start in the future counts as zero running time.
    pub fn elapsed_minutes(&self, now: DateTime<Tz>) -> i64 {
        match (self.state, self.open_shift_started_at) {
            (ClockState::ClockedIn, Some(start)) => {
                (now - start).num_minutes().max(0) + self.minutes_before_open_shift
            }
            _ => self.minutes_before_open_shift,
        }
    }

    /// `H:MM` rendering of [`Session::elapsed_minutes`].
    pub fn display(&self, now: DateTime<Tz>) -> String {
        format_hm(self.elapsed_minutes(now))
    }
}
