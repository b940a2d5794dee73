//! Periodic elapsed-time push.
//!
//! The ticker only reads session snapshots; it never mutates the session, so
//! it can keep firing while a command is waiting on the network.

use crate::models::Session;
use crate::tray::{IconState, TrayUpdate};
use crate::utils::clock::Clock;
use chrono::DateTime;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub display: String,
    pub elapsed_minutes: i64,
    pub icon: IconState,
}

impl Tick {
    pub fn from_session(session: &Session, now: DateTime<Tz>) -> Self {
        let elapsed_minutes = session.elapsed_minutes(now);
        Self {
            display: crate::utils::format_hm(elapsed_minutes),
            elapsed_minutes,
            icon: IconState::from(session.state),
        }
    }
}

pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking every `period`, pushing to `observer`. The first tick
    /// is sent before this returns. Stops by itself once the observer is
    /// dropped.
    pub fn spawn(
        session: watch::Receiver<Session>,
        clock: Arc<dyn Clock>,
        period: Duration,
        observer: mpsc::UnboundedSender<TrayUpdate>,
    ) -> Self {
        let first = Tick::from_session(&session.borrow(), clock.now());
        let _ = observer.send(TrayUpdate::Tick(first));

        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let tick = Tick::from_session(&session.borrow(), clock.now());
                if observer.send(TrayUpdate::Tick(tick)).is_err() {
                    debug!("tick observer gone, stopping ticker");
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClockState;
    use crate::utils::clock::FixedClock;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use chrono_tz::Europe::Madrid;

    fn expect_tick(update: Option<TrayUpdate>) -> Tick {
        match update {
            Some(TrayUpdate::Tick(t)) => t,
            other => panic!("expected a tick, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_follow_clock_and_session() {
        let start = Madrid.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let (tx_session, rx_session) = watch::channel(Session {
            state: ClockState::ClockedOut,
            minutes_before_open_shift: 50,
            open_shift_started_at: None,
        });
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticker = Ticker::spawn(rx_session, clock.clone(), Duration::from_secs(1), tx);

        let first = expect_tick(rx.recv().await);
        assert_eq!(first.display, "0:50");
        assert_eq!(first.icon, IconState::ClockedOut);

        tx_session.send_replace(Session {
            state: ClockState::ClockedIn,
            minutes_before_open_shift: 50,
            open_shift_started_at: Some(start),
        });
        clock.advance(ChronoDuration::minutes(125));

        let second = expect_tick(rx.recv().await);
        assert_eq!(second.display, "2:55");
        assert_eq!(second.elapsed_minutes, 175);
        assert_eq!(second.icon, IconState::ClockedIn);

        ticker.stop();
        while rx.recv().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_observer_dropped() {
        let clock = Arc::new(FixedClock::new(
            Madrid.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        ));
        let (_tx_session, rx_session) = watch::channel(Session::default());
        let (tx, rx) = mpsc::unbounded_channel();

        let ticker = Ticker::spawn(rx_session, clock, Duration::from_secs(1), tx);
        drop(rx);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_queued_on_spawn() {
        let clock = Arc::new(FixedClock::new(
            Madrid.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        ));
        let (_tx_session, rx_session) = watch::channel(Session::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticker = Ticker::spawn(rx_session, clock, Duration::from_secs(1), tx);

        assert!(matches!(rx.try_recv(), Ok(TrayUpdate::Tick(_))));
        assert!(rx.try_recv().is_err());
        ticker.stop();
    }

    #[test]
    fn tick_for_unknown_session() {
        let now = Madrid.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let tick = Tick::from_session(&Session::default(), now);
        assert_eq!(tick.display, "0:00");
        assert_eq!(tick.icon, IconState::ClockedOut);
    }
}
