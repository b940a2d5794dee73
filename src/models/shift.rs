use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A shift as recorded by the remote attendance service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub date: NaiveDate, // "YYYY-MM-DD"
    #[serde(default, with = "wall_time")]
    pub clock_in: Option<NaiveTime>, // "HH:MM" or "HH:MM:SS"
    #[serde(default, with = "wall_time")]
    pub clock_out: Option<NaiveTime>, // null while the shift is open
    #[serde(default, deserialize_with = "null_as_zero")]
    pub minutes: i64,
}

impl Shift {
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Naive start of the shift (date + clock-in), if known.
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.clock_in.map(|t| self.date.and_time(t))
    }

    pub fn clock_in_str(&self) -> String {
        fmt_opt(self.clock_in)
    }

    pub fn clock_out_str(&self) -> String {
        fmt_opt(self.clock_out)
    }
}

fn fmt_opt(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Shift list payload: the service wraps collections in `{"data": [...]}`,
/// but a bare array is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShiftList {
    Envelope { data: Vec<Shift> },
    Bare(Vec<Shift>),
}

impl ShiftList {
    pub fn into_vec(self) -> Vec<Shift> {
        match self {
            ShiftList::Envelope { data } => data,
            ShiftList::Bare(v) => v,
        }
    }
}

/// Single shift echoed back by clock-in / clock-out.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShiftEcho {
    Envelope { data: Shift },
    Bare(Shift),
}

impl ShiftEcho {
    pub fn into_shift(self) -> Shift {
        match self {
            ShiftEcho::Envelope { data } => data,
            ShiftEcho::Bare(s) => s,
        }
    }
}

fn null_as_zero<'de, D>(d: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(d)?.unwrap_or(0))
}

mod wall_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match t {
            Some(t) => s.serialize_str(&t.format("%H:%M:%S").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => crate::utils::time::parse_wall_time(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {s}"))),
        }
    }
}
