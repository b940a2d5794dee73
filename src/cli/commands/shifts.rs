use super::build_tracker;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Shift;
use crate::utils::colors::colorize_in_out;
use crate::utils::date::resolve_date;
use crate::utils::formatting::{pad_left, pad_right};
use crate::utils::format_hm;

/// Handle the `shifts` command
pub async fn handle(date: Option<&str>, cfg: &Config) -> AppResult<()> {
    let tracker = build_tracker(cfg)?;
    let day = resolve_date(date, tracker.clock().today())?;

    let shifts: Vec<Shift> = tracker
        .shifts_on(day)
        .await?
        .into_iter()
        .filter(|s| s.date == day)
        .collect();

    if shifts.is_empty() {
        println!("No shifts for {}", day);
        return Ok(());
    }

    println!("\n=== {} ===", day);
    println!("{}  {}  {}", pad_right("IN", 5), pad_right("OUT", 5), pad_left("TIME", 6));

    for s in &shifts {
        let time = if s.is_open() {
            "open".to_string()
        } else {
            format_hm(s.minutes)
        };
        println!(
            "{}  {}  {}",
            colorize_in_out(&s.clock_in_str(), true),
            colorize_in_out(&s.clock_out_str(), false),
            pad_left(&time, 6)
        );
    }

    let closed: i64 = shifts.iter().filter(|s| !s.is_open()).map(|s| s.minutes).sum();
    println!("Closed shifts: {} ({} min)", format_hm(closed), closed);
    Ok(())
}
