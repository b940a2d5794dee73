pub mod clock;
pub mod config;
pub mod init;
pub mod shifts;
pub mod status;
pub mod watch;

use crate::api::HttpAttendanceApi;
use crate::config::Config;
use crate::core::Tracker;
use crate::errors::AppResult;
use crate::utils::clock::SystemClock;
use std::sync::Arc;

/// Tracker wired to the real attendance service and the wall clock.
pub fn build_tracker(cfg: &Config) -> AppResult<Tracker<HttpAttendanceApi>> {
    let tz = cfg.time_zone()?;
    let employee_id = cfg.employee_id()?;
    let api = HttpAttendanceApi::from_config(cfg)?;
    tracing::debug!(base_url = api.base_url(), employee_id, %tz, "attendance client ready");

    Ok(Tracker::new(api, Arc::new(SystemClock::new(tz)), employee_id, tz))
}
