//! Remote attendance API: the three shift endpoints the tracker depends on.

pub mod client;
#[cfg(test)]
pub(crate) mod fake;

pub use client::HttpAttendanceApi;

use crate::errors::AppResult;
use crate::models::Shift;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

/// Transport seam between the tracker and the attendance service.
///
/// Each call is exactly one request; implementations never retry.
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    /// Shifts of `employee_id` starting on `date`.
    async fn list_shifts(&self, employee_id: u64, date: NaiveDate) -> AppResult<Vec<Shift>>;

    /// Opens a shift at `now`; returns the shift as recorded by the service.
    async fn clock_in(&self, employee_id: u64, now: DateTime<Tz>) -> AppResult<Shift>;

    /// Closes the open shift at `now`; returns the closed shift.
    async fn clock_out(&self, employee_id: u64, now: DateTime<Tz>) -> AppResult<Shift>;
}
