//! In-memory attendance service used by unit tests.

use super::AttendanceApi;
use crate::errors::{AppError, AppResult};
use crate::models::Shift;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Keeps a shift list and answers like the real service would.
/// `fail` makes every request return a 503 without touching the list;
/// `fail_clock_out` does the same for clock-out only.
#[derive(Default)]
pub struct FakeApi {
    pub shifts: Mutex<Vec<Shift>>,
    pub fail: AtomicBool,
    pub fail_clock_out: AtomicBool,
    pub list_calls: AtomicUsize,
    pub clock_in_calls: AtomicUsize,
    pub clock_out_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_shifts(shifts: Vec<Shift>) -> Self {
        Self {
            shifts: Mutex::new(shifts),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.clock_in_calls.load(Ordering::SeqCst),
            self.clock_out_calls.load(Ordering::SeqCst),
        )
    }

    fn check(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceApi for FakeApi {
    async fn list_shifts(&self, _employee_id: u64, date: NaiveDate) -> AppResult<Vec<Shift>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let shifts = self.shifts.lock().unwrap();
        Ok(shifts.iter().filter(|s| s.date >= date).cloned().collect())
    }

    async fn clock_in(&self, employee_id: u64, now: DateTime<Tz>) -> AppResult<Shift> {
        self.clock_in_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut shifts = self.shifts.lock().unwrap();
        if shifts.iter().any(Shift::is_open) {
            return Err(AppError::Api {
                status: 422,
                body: "already clocked in".into(),
            });
        }
        let shift = Shift {
            id: Some(shifts.len() as i64 + 1),
            employee_id: Some(employee_id as i64),
            date: now.date_naive(),
            clock_in: Some(now.time()),
            clock_out: None,
            minutes: 0,
        };
        shifts.push(shift.clone());
        Ok(shift)
    }

    async fn clock_out(&self, _employee_id: u64, now: DateTime<Tz>) -> AppResult<Shift> {
        self.clock_out_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.fail_clock_out.load(Ordering::SeqCst) {
            return Err(AppError::Api {
                status: 500,
                body: "clock-out rejected".into(),
            });
        }
        let mut shifts = self.shifts.lock().unwrap();
        let open = shifts
            .iter_mut()
            .find(|s| s.is_open())
            .ok_or_else(|| AppError::Api {
                status: 422,
                body: "no open shift".into(),
            })?;
        let started = open.started_at().unwrap_or_else(|| now.naive_local());
        open.clock_out = Some(now.time());
        open.minutes = (now.naive_local() - started).num_minutes().max(0);
        Ok(open.clone())
    }
}
