//! Unified application error type.
//! All modules (api, core, tray, cli) return AppError so the host can tell
//! transport failures apart from caller mistakes with a single match.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Transport (remote attendance API)
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    // ---------------------------
    // Caller misuse (rejected before any request)
    // ---------------------------
    #[error("Already clocked in")]
    AlreadyClockedIn,

    #[error("Not clocked in")]
    NotClockedIn,

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Invalid API key (not a valid header value)")]
    InvalidApiKey,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Network failure, non-2xx status, timeout or undecodable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::Api { .. } | AppError::Json(_) | AppError::Timeout(_)
        )
    }

    /// Clocking in while already in, or out while already out.
    pub fn is_misuse(&self) -> bool {
        matches!(self, AppError::AlreadyClockedIn | AppError::NotClockedIn)
    }
}

pub type AppResult<T> = Result<T, AppError>;
