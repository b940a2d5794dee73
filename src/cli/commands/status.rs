use super::build_tracker;
use crate::config::Config;
use crate::errors::AppResult;
use crate::utils::colors::{GREEN, RESET, WHITE};
use crate::utils::formatting::{bold, mins2readable};

/// Handle the `status` command: one refresh, then print the session.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let mut tracker = build_tracker(cfg)?;
    let session = tracker.refresh().await?;
    let now = tracker.clock().now();

    let state_color = if session.is_clocked_in() { GREEN } else { WHITE };
    println!("State  : {state_color}{}{RESET}", session.state);

    if let Some(start) = session.open_shift_started_at {
        println!("Since  : {}", start.format("%H:%M"));
    }

    println!(
        "Today  : {} ({})",
        bold(&session.display(now)),
        mins2readable(session.elapsed_minutes(now))
    );
    Ok(())
}
