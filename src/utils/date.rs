use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `--date` argument: `today`, `yesterday` or `YYYY-MM-DD`.
pub fn resolve_date(arg: Option<&str>, today: NaiveDate) -> AppResult<NaiveDate> {
    match arg.map(str::trim) {
        None | Some("today") => Ok(today),
        Some("yesterday") => today
            .pred_opt()
            .ok_or_else(|| AppError::InvalidDate("yesterday".into())),
        Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())),
    }
}
