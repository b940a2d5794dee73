use super::build_tracker;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `in` command: refresh first so the guard sees the service's
/// view, then clock in.
pub async fn handle_in(cfg: &Config) -> AppResult<()> {
    let mut tracker = build_tracker(cfg)?;
    tracker.refresh().await?;

    let session = tracker.clock_in().await?;
    let since = session
        .open_shift_started_at
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default();

    success(format!("Clocked in at {since} (today so far: {})", tracker.display()));
    Ok(())
}

/// Handle the `out` command
pub async fn handle_out(cfg: &Config) -> AppResult<()> {
    let mut tracker = build_tracker(cfg)?;
    tracker.refresh().await?;
    tracker.clock_out().await?;

    // the closed-shift total only comes back with a fresh list
    if let Err(e) = tracker.refresh().await {
        tracing::warn!(error = %e, "refresh after clock-out failed");
    }

    success(format!("Clocked out (today: {})", tracker.display()));
    Ok(())
}
