use crate::errors::{AppError, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_API_KEY: &str = "RCLOCKTRAY_API_KEY";
pub const ENV_EMPLOYEE_ID: &str = "RCLOCKTRAY_EMPLOYEE_ID";
pub const ENV_BASE_URL: &str = "RCLOCKTRAY_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub employee_id: Option<u64>,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Periodic background refresh while watching; 0 disables it.
    #[serde(default = "default_resync_interval_secs")]
    pub resync_interval_secs: u64,
    #[serde(default = "default_clock_out_on_quit")]
    pub clock_out_on_quit: bool,
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.factorialhr.com/api/2024-10-01/resources".to_string()
}
fn default_time_zone() -> String {
    "Europe/Madrid".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_resync_interval_secs() -> u64 {
    300
}
fn default_clock_out_on_quit() -> bool {
    true
}
fn default_shutdown_timeout_secs() -> u64 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            employee_id: None,
            time_zone: default_time_zone(),
            timeout_secs: default_timeout_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            resync_interval_secs: default_resync_interval_secs(),
            clock_out_on_quit: default_clock_out_on_quit(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rclocktray")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rclocktray")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rclocktray.conf")
    }

    /// Load configuration from `path` (or the default location), falling back
    /// to defaults when the file does not exist, then apply env overrides.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Config::default()
        };

        cfg.apply_env_with(|k| env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        // An empty file deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override credentials and endpoint from the environment.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(id) = lookup(ENV_EMPLOYEE_ID).filter(|v| !v.is_empty()) {
            let id = id
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("{ENV_EMPLOYEE_ID} is not a number: {id}")))?;
            self.employee_id = Some(id);
        }
        Ok(())
    }

    pub fn time_zone(&self) -> AppResult<Tz> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| AppError::InvalidTimeZone(self.time_zone.clone()))
    }

    pub fn employee_id(&self) -> AppResult<u64> {
        self.employee_id.ok_or(AppError::MissingSetting("employee_id"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(100))
    }

    pub fn resync_interval(&self) -> Option<Duration> {
        (self.resync_interval_secs > 0).then(|| Duration::from_secs(self.resync_interval_secs))
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs.max(1))
    }

    /// Problems that prevent talking to the attendance service.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.api_key.trim().is_empty() {
            problems.push(format!("api_key is empty (set it or export {ENV_API_KEY})"));
        }
        if self.employee_id.is_none() {
            problems.push(format!(
                "employee_id is missing (set it or export {ENV_EMPLOYEE_ID})"
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            problems.push(format!("base_url is not an http(s) URL: {}", self.base_url));
        }
        if self.time_zone().is_err() {
            problems.push(format!("time_zone is not an IANA zone name: {}", self.time_zone));
        }

        problems
    }

    /// Write a default configuration file (unless `is_test`) and return its path.
    pub fn init_all(path: Option<&Path>, is_test: bool) -> AppResult<PathBuf> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        if is_test {
            return Ok(path);
        }

        if path.exists() {
            return Err(AppError::Config(format!(
                "configuration file already exists: {}",
                path.display()
            )));
        }

        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(&Config::default())?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;

        Ok(path)
    }
}
