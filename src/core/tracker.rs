//! Attendance session tracker.
//!
//! Owns the local [`Session`] and keeps it in step with the remote
//! attendance service. Every operation is all-or-nothing: the session only
//! changes after the request succeeded, and a failed request leaves it as it
//! was. Snapshots are published on a `watch` channel so the ticker can read
//! them without sharing the tracker.

use crate::api::AttendanceApi;
use crate::errors::{AppError, AppResult};
use crate::models::{ClockState, Session, Shift};
use crate::utils::clock::Clock;
use crate::utils::time::localize;
use chrono::DateTime;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

pub struct Tracker<A: AttendanceApi> {
    api: A,
    clock: Arc<dyn Clock>,
    employee_id: u64,
    tz: Tz,
    session: Session,
    publisher: watch::Sender<Session>,
}

impl<A: AttendanceApi> Tracker<A> {
    pub fn new(api: A, clock: Arc<dyn Clock>, employee_id: u64, tz: Tz) -> Self {
        let session = Session::default();
        let (publisher, _) = watch::channel(session.clone());
        Self {
            api,
            clock,
            employee_id,
            tz,
            session,
            publisher,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> ClockState {
        self.session.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Receiver that always holds the latest session snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.publisher.subscribe()
    }

    /// Display string for the current session at the clock's "now".
    pub fn display(&self) -> String {
        self.session.display(self.clock.now())
    }

    // ---------------------------
    // Remote operations
    // ---------------------------

    /// Re-seed the session from today's shifts.
    pub async fn refresh(&mut self) -> AppResult<Session> {
        let today = self.clock.today();
        let shifts = self.api.list_shifts(self.employee_id, today).await?;
        let next = Session::from_shifts(&shifts, self.tz);

        if next.state != self.session.state {
            info!(from = %self.session.state, to = %next.state, "attendance state refreshed");
        }
        self.publish(next);
        Ok(self.session.clone())
    }

    /// Today's shifts without touching the session.
    pub async fn shifts_on(&self, date: chrono::NaiveDate) -> AppResult<Vec<Shift>> {
        self.api.list_shifts(self.employee_id, date).await
    }

    pub async fn clock_in(&mut self) -> AppResult<Session> {
        if self.session.is_clocked_in() {
            return Err(AppError::AlreadyClockedIn);
        }

        let now = self.clock.now();
        let echoed = self.api.clock_in(self.employee_id, now).await?;
        let started_at = self.echoed_start(&echoed, now);

        info!(started_at = %started_at, "clocked in");
        self.publish(Session {
            state: ClockState::ClockedIn,
            minutes_before_open_shift: self.session.minutes_before_open_shift,
            open_shift_started_at: Some(started_at),
        });
        Ok(self.session.clone())
    }

    /// Closes the open shift. The closed-shift total is left for the next
    /// refresh to correct.
    pub async fn clock_out(&mut self) -> AppResult<Session> {
        if !self.session.is_clocked_in() {
            return Err(AppError::NotClockedIn);
        }

        let now = self.clock.now();
        self.api.clock_out(self.employee_id, now).await?;

        info!(at = %now, "clocked out");
        self.publish(Session {
            state: ClockState::ClockedOut,
            minutes_before_open_shift: self.session.minutes_before_open_shift,
            open_shift_started_at: None,
        });
        Ok(self.session.clone())
    }

    pub async fn toggle(&mut self) -> AppResult<Session> {
        if self.session.is_clocked_in() {
            self.clock_out().await
        } else {
            self.clock_in().await
        }
    }

    /// Best-effort clock-out on quit.
    ///
    /// Does nothing unless clocked in. Failures and timeouts are logged and
    /// swallowed; returns whether the clock-out went through.
    pub async fn shutdown_clock_out(&mut self, timeout: Duration) -> bool {
        if !self.session.is_clocked_in() {
            return false;
        }

        match tokio::time::timeout(timeout, self.clock_out()).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "clock-out on quit failed, shift left open");
                false
            }
            Err(_) => {
                let e = AppError::Timeout(timeout.as_secs());
                warn!(error = %e, "clock-out on quit did not finish, shift may be left open");
                false
            }
        }
    }

    // ---------------------------
    // Internals
    // ---------------------------

    fn echoed_start(&self, shift: &Shift, sent: DateTime<Tz>) -> DateTime<Tz> {
        match shift.started_at() {
            Some(naive) => localize(naive, self.tz),
            None => {
                warn!("clock-in response carried no clock_in, using the request time");
                sent
            }
        }
    }

    fn publish(&mut self, next: Session) {
        self.session = next;
        self.publisher.send_replace(self.session.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::utils::clock::FixedClock;
    use chrono::{Duration as ChronoDuration, NaiveDate, NaiveTime, TimeZone};
    use chrono_tz::Europe::Madrid;

    const EMPLOYEE: u64 = 7;

    fn closed(date: &str, inn: &str, out: &str, minutes: i64) -> Shift {
        Shift {
            id: None,
            employee_id: Some(EMPLOYEE as i64),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            clock_in: Some(NaiveTime::parse_from_str(inn, "%H:%M:%S").unwrap()),
            clock_out: Some(NaiveTime::parse_from_str(out, "%H:%M:%S").unwrap()),
            minutes,
        }
    }

    fn open(date: &str, inn: &str) -> Shift {
        Shift {
            clock_out: None,
            minutes: 0,
            ..closed(date, inn, "00:00:00", 0)
        }
    }

    fn tracker(shifts: Vec<Shift>) -> (Tracker<FakeApi>, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(
            Madrid.with_ymd_and_hms(2024, 1, 1, 14, 30, 0).unwrap(),
        ));
        let t = Tracker::new(
            FakeApi::with_shifts(shifts),
            clock.clone(),
            EMPLOYEE,
            Madrid,
        );
        (t, clock)
    }

    #[tokio::test]
    async fn starts_unknown() {
        let (t, _) = tracker(vec![]);
        assert_eq!(t.state(), ClockState::Unknown);
        assert_eq!(t.display(), "0:00");
        assert_eq!(t.api().calls(), (0, 0, 0));
    }

    #[tokio::test]
    async fn refresh_closed_day() {
        let (mut t, _) = tracker(vec![closed("2024-01-01", "09:00:00", "13:00:00", 240)]);

        let s = t.refresh().await.unwrap();

        assert_eq!(s.state, ClockState::ClockedOut);
        assert!(!s.is_clocked_in());
        assert_eq!(s.minutes_before_open_shift, 240);
        assert_eq!(t.display(), "4:00");
    }

    #[tokio::test]
    async fn refresh_with_open_shift() {
        let (mut t, _) = tracker(vec![
            closed("2024-01-01", "08:00:00", "09:00:00", 60),
            open("2024-01-01", "13:00:00"),
        ]);

        let s = t.refresh().await.unwrap();

        assert!(s.is_clocked_in());
        assert_eq!(
            s.open_shift_started_at,
            Some(Madrid.with_ymd_and_hms(2024, 1, 1, 13, 0, 0).unwrap())
        );
        // 90 running + 60 closed
        assert_eq!(t.display(), "2:30");
    }

    #[tokio::test]
    async fn refresh_twice_is_idempotent() {
        let (mut t, _) = tracker(vec![
            closed("2024-01-01", "08:00:00", "09:00:00", 60),
            open("2024-01-01", "13:00:00"),
        ]);

        let first = t.refresh().await.unwrap();
        let second = t.refresh().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn failed_first_refresh_stays_unknown() {
        let (mut t, _) = tracker(vec![]);
        t.api().set_failing(true);

        let err = t.refresh().await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(t.state(), ClockState::Unknown);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_stale_session() {
        let (mut t, _) = tracker(vec![open("2024-01-01", "13:00:00")]);
        let before = t.refresh().await.unwrap();

        t.api().set_failing(true);
        assert!(t.refresh().await.is_err());
        assert_eq!(t.session(), &before);
    }

    #[tokio::test]
    async fn clock_in_uses_echoed_start() {
        let (mut t, _) = tracker(vec![closed("2024-01-01", "09:00:00", "13:00:00", 240)]);
        t.refresh().await.unwrap();

        let s = t.clock_in().await.unwrap();

        assert!(s.is_clocked_in());
        assert_eq!(s.minutes_before_open_shift, 240);
        assert_eq!(
            s.open_shift_started_at,
            Some(Madrid.with_ymd_and_hms(2024, 1, 1, 14, 30, 0).unwrap())
        );
        assert_eq!(t.api().calls(), (1, 1, 0));
    }

    #[tokio::test]
    async fn clock_in_from_unknown_is_allowed() {
        let (mut t, _) = tracker(vec![]);
        assert!(t.clock_in().await.unwrap().is_clocked_in());
    }

    #[tokio::test]
    async fn second_clock_in_is_rejected_locally() {
        let (mut t, _) = tracker(vec![]);
        t.refresh().await.unwrap();
        t.clock_in().await.unwrap();

        let err = t.clock_in().await.unwrap_err();

        assert!(matches!(err, AppError::AlreadyClockedIn));
        assert!(err.is_misuse());
        assert_eq!(t.api().calls(), (1, 1, 0));
    }

    #[tokio::test]
    async fn clock_out_requires_clock_in() {
        let (mut t, _) = tracker(vec![]);

        // unknown
        assert!(matches!(t.clock_out().await, Err(AppError::NotClockedIn)));

        // clocked out
        t.refresh().await.unwrap();
        assert!(matches!(t.clock_out().await, Err(AppError::NotClockedIn)));
        assert_eq!(t.api().calls(), (1, 0, 0));
    }

    #[tokio::test]
    async fn failed_clock_in_is_not_optimistic() {
        let (mut t, _) = tracker(vec![]);
        t.refresh().await.unwrap();
        t.api().set_failing(true);

        let err = t.clock_in().await.unwrap_err();

        assert!(err.is_transport());
        assert!(!t.session().is_clocked_in());
        assert_eq!(t.state(), ClockState::ClockedOut);
    }

    #[tokio::test]
    async fn failed_clock_out_stays_in() {
        let (mut t, _) = tracker(vec![open("2024-01-01", "13:00:00")]);
        let before = t.refresh().await.unwrap();
        t.api().set_failing(true);

        assert!(t.clock_out().await.is_err());
        assert_eq!(t.session(), &before);
    }

    #[tokio::test]
    async fn clock_in_then_out_returns_to_clocked_out() {
        let (mut t, clock) = tracker(vec![]);
        t.refresh().await.unwrap();

        t.clock_in().await.unwrap();
        clock.advance(ChronoDuration::hours(9));
        let s = t.clock_out().await.unwrap();

        assert_eq!(s.state, ClockState::ClockedOut);
        assert!(!s.is_clocked_in());
        assert_eq!(s.open_shift_started_at, None);
        // not recomputed locally
        assert_eq!(s.minutes_before_open_shift, 0);

        // the next refresh picks up the authoritative total
        let s = t.refresh().await.unwrap();
        assert_eq!(s.minutes_before_open_shift, 540);
    }

    #[tokio::test]
    async fn toggle_flips_state() {
        let (mut t, _) = tracker(vec![]);
        t.refresh().await.unwrap();

        assert!(t.toggle().await.unwrap().is_clocked_in());
        assert!(!t.toggle().await.unwrap().is_clocked_in());
        assert_eq!(t.api().calls(), (1, 1, 1));
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let (mut t, _) = tracker(vec![]);
        let rx = t.subscribe();
        assert_eq!(rx.borrow().state, ClockState::Unknown);

        t.refresh().await.unwrap();
        assert_eq!(rx.borrow().state, ClockState::ClockedOut);

        t.clock_in().await.unwrap();
        assert_eq!(rx.borrow().state, ClockState::ClockedIn);
    }

    #[tokio::test]
    async fn shutdown_clock_out_swallows_failure() {
        let (mut t, _) = tracker(vec![open("2024-01-01", "13:00:00")]);
        t.refresh().await.unwrap();
        t.api().set_failing(true);

        assert!(!t.shutdown_clock_out(Duration::from_secs(1)).await);
        assert!(t.session().is_clocked_in());
        assert_eq!(t.api().calls().2, 1);
    }

    #[tokio::test]
    async fn shutdown_clock_out_skips_when_out() {
        let (mut t, _) = tracker(vec![]);
        t.refresh().await.unwrap();

        assert!(!t.shutdown_clock_out(Duration::from_secs(1)).await);
        assert_eq!(t.api().calls().2, 0);
    }

    #[tokio::test]
    async fn shutdown_clock_out_closes_open_shift() {
        let (mut t, _) = tracker(vec![open("2024-01-01", "13:00:00")]);
        t.refresh().await.unwrap();

        assert!(t.shutdown_clock_out(Duration::from_secs(1)).await);
        assert_eq!(t.state(), ClockState::ClockedOut);
    }
}
