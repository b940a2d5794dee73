//! Attendance API client.
//!
//! Async HTTP client using `reqwest` with a static `x-api-key` header.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::AttendanceApi;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::Shift;
use crate::models::shift::{ShiftEcho, ShiftList};
use crate::utils::time::format_remote_timestamp;

const API_KEY_HEADER: &str = "x-api-key";

const SHIFTS_PATH: &str = "/attendance/shifts";
const CLOCK_IN_PATH: &str = "/attendance/shifts/clock_in";
const CLOCK_OUT_PATH: &str = "/attendance/shifts/clock_out";

#[derive(Debug, Serialize)]
struct ClockRequest {
    employee_id: u64,
    now: String,
}

/// Attendance API client.
pub struct HttpAttendanceApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAttendanceApi {
    /// Creates a client for `base_url` authenticating with `api_key`.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).map_err(|_| AppError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        if cfg.api_key.trim().is_empty() {
            return Err(AppError::MissingSetting("api_key"));
        }
        Self::new(&cfg.base_url, &cfg.api_key, cfg.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, String)]) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");
        let resp = self.http.get(&url).query(params).send().await?;
        Self::decode(resp).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, endpoint: &str, body: &B) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "POST");
        let resp = self.http.post(&url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> AppResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl AttendanceApi for HttpAttendanceApi {
    async fn list_shifts(&self, employee_id: u64, date: NaiveDate) -> AppResult<Vec<Shift>> {
        let params = [
            ("employee_ids[]", employee_id.to_string()),
            ("start_on", date.format("%Y-%m-%d").to_string()),
        ];
        let list: ShiftList = self.get(SHIFTS_PATH, &params).await?;
        Ok(list.into_vec())
    }

    async fn clock_in(&self, employee_id: u64, now: DateTime<Tz>) -> AppResult<Shift> {
        let body = ClockRequest {
            employee_id,
            now: format_remote_timestamp(&now),
        };
        let echo: ShiftEcho = self.post(CLOCK_IN_PATH, &body).await?;
        Ok(echo.into_shift())
    }

    async fn clock_out(&self, employee_id: u64, now: DateTime<Tz>) -> AppResult<Shift> {
        let body = ClockRequest {
            employee_id,
            now: format_remote_timestamp(&now),
        };
        let echo: ShiftEcho = self.post(CLOCK_OUT_PATH, &body).await?;
        Ok(echo.into_shift())
    }
}
