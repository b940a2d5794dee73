//! Time utilities: parsing wall-clock times, zone handling, formatting minutes.

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Timestamp layout expected by the clock-in / clock-out endpoints.
pub const REMOTE_TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepts both `HH:MM:SS` and `HH:MM`.
pub fn parse_wall_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .ok()
}

/// `H:MM`, hours unpadded. Negative input renders as `0:00`.
pub fn format_hm(mins: i64) -> String {
    let m = mins.max(0);
    format!("{}:{:02}", m / 60, m % 60)
}

pub fn format_remote_timestamp(dt: &DateTime<Tz>) -> String {
    dt.format(REMOTE_TIMESTAMP_FMT).to_string()
}

/// Attach `tz` to a wall-clock datetime.
///
/// Ambiguous times (DST fold) take the earlier instant; nonexistent times
/// (DST gap) are read as UTC and converted.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::Europe::Madrid;

    #[test]
    fn format_hm_pads_minutes_only() {
        assert_eq!(format_hm(0), "0:00");
        assert_eq!(format_hm(5), "0:05");
        assert_eq!(format_hm(175), "2:55");
        assert_eq!(format_hm(600), "10:00");
        assert_eq!(format_hm(-3), "0:00");
    }

    #[test]
    fn parses_both_time_layouts() {
        assert_eq!(parse_wall_time("09:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_wall_time("09:05:30"), NaiveTime::from_hms_opt(9, 5, 30));
        assert_eq!(parse_wall_time("9h05"), None);
    }

    #[test]
    fn remote_timestamp_is_wall_time_in_zone() {
        let naive = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let dt = localize(naive, Madrid);
        assert_eq!(format_remote_timestamp(&dt), "2024-07-01 08:30:00");
        // CEST
        assert_eq!(dt.naive_utc().to_string(), "2024-07-01 06:30:00");
    }

    #[test]
    fn localize_survives_dst_gap() {
        // 2024-03-31 02:30 does not exist in Madrid
        let naive = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let dt = localize(naive, Madrid);
        assert_eq!(dt.naive_utc(), naive);
    }
}
