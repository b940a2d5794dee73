//! Control loop between the tray and the tracker.
//!
//! Translates [`TrayEvent`]s into tracker calls, owns the ticker's lifetime
//! and runs the optional background resync. The tracker is only touched from
//! this loop, so the session needs no lock.

use super::ticker::{Tick, Ticker};
use super::tracker::Tracker;
use crate::api::AttendanceApi;
use crate::errors::{AppError, AppResult};
use crate::tray::{self, TrayEvent, TrayShell, TrayUpdate};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct HostOptions {
    pub tick_interval: Duration,
    pub resync_interval: Option<Duration>,
    pub clock_out_on_quit: bool,
    pub shutdown_timeout: Duration,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            resync_interval: None,
            clock_out_on_quit: false,
            shutdown_timeout: Duration::from_secs(3),
        }
    }
}

impl From<&crate::config::Config> for HostOptions {
    fn from(cfg: &crate::config::Config) -> Self {
        Self {
            tick_interval: cfg.tick_interval(),
            resync_interval: cfg.resync_interval(),
            clock_out_on_quit: cfg.clock_out_on_quit,
            shutdown_timeout: cfg.shutdown_timeout(),
        }
    }
}

/// Run until the tray sends [`TrayEvent::Quit`] or closes its channel.
/// Returns the shell once its last update has been rendered.
pub async fn run<A, S>(
    tracker: &mut Tracker<A>,
    mut events: mpsc::Receiver<TrayEvent>,
    shell: S,
    opts: HostOptions,
) -> AppResult<S>
where
    A: AttendanceApi,
    S: TrayShell + Send + 'static,
{
    let (updates, updates_rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(tray::render(updates_rx, shell));

    // ---------------------------
    // Startup
    // ---------------------------
    if let Err(e) = tracker.refresh().await {
        warn!(error = %e, "initial refresh failed");
        let _ = updates.send(TrayUpdate::Error(format!("Could not load today's shifts: {e}")));
    }

    let ticker = Ticker::spawn(
        tracker.subscribe(),
        tracker.clock(),
        opts.tick_interval,
        updates.clone(),
    );

    let mut resync = opts.resync_interval.map(|period| {
        let mut i = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        i.set_missed_tick_behavior(MissedTickBehavior::Delay);
        i
    });

    // ---------------------------
    // Event loop
    // ---------------------------
    loop {
        tokio::select! {
            event = events.recv() => match event {
                None | Some(TrayEvent::Quit) => break,
                Some(event) => handle_event(tracker, event, &updates).await,
            },
            _ = next_resync(&mut resync) => {
                if let Err(e) = tracker.refresh().await {
                    warn!(error = %e, "background refresh failed");
                }
            }
        }
    }

    // ---------------------------
    // Teardown
    // ---------------------------
    ticker.stop();

    if opts.clock_out_on_quit && tracker.shutdown_clock_out(opts.shutdown_timeout).await {
        info!("clocked out on quit");
    }

    drop(updates);
    renderer
        .await
        .map_err(|e| AppError::Other(format!("tray renderer failed: {e}")))
}

async fn next_resync(resync: &mut Option<Interval>) {
    match resync {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn handle_event<A: AttendanceApi>(
    tracker: &mut Tracker<A>,
    event: TrayEvent,
    updates: &mpsc::UnboundedSender<TrayUpdate>,
) {
    debug!(?event, "tray event");

    let result = match event {
        TrayEvent::ClockIn => tracker.clock_in().await,
        TrayEvent::ClockOut => tracker.clock_out().await,
        TrayEvent::Toggle => tracker.toggle().await,
        TrayEvent::Refresh => tracker.refresh().await,
        TrayEvent::Quit => return,
    };

    match result {
        Ok(session) => {
            let now = tracker.clock().now();
            if event != TrayEvent::Refresh {
                let verb = if session.is_clocked_in() { "Clocked in" } else { "Clocked out" };
                let _ = updates.send(TrayUpdate::Info(format!("{verb} at {}", now.format("%H:%M"))));

                // re-seed from the service; a failure here only costs accuracy
                if let Err(e) = tracker.refresh().await {
                    warn!(error = %e, "refresh after command failed");
                }
            }
            let _ = updates.send(TrayUpdate::Tick(Tick::from_session(tracker.session(), now)));
        }
        Err(e) if e.is_misuse() => {
            let _ = updates.send(TrayUpdate::Info(e.to_string()));
        }
        Err(e) => {
            warn!(error = %e, ?event, "tray command failed");
            let _ = updates.send(TrayUpdate::Error(e.to_string()));
        }
    }
}
