#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const API_KEY: &str = "test-key";
pub const EMPLOYEE_ID: u64 = 7;

/// Binary under test, isolated from the caller's environment overrides.
pub fn rct() -> Command {
    let mut cmd = cargo_bin_cmd!("rclocktray");
    cmd.env_remove("RCLOCKTRAY_API_KEY")
        .env_remove("RCLOCKTRAY_EMPLOYEE_ID")
        .env_remove("RCLOCKTRAY_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Unique config path inside the system temp dir, removed if present
pub fn temp_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rclocktray.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write a complete configuration pointing at `base_url`
pub fn write_config(name: &str, base_url: &str) -> String {
    let path = temp_config(name);
    let yaml = format!(
        "base_url: {base_url}\napi_key: {API_KEY}\nemployee_id: {EMPLOYEE_ID}\ntime_zone: Europe/Madrid\ntimeout_secs: 5\nclock_out_on_quit: false\n"
    );
    fs::write(&path, yaml).expect("write config");
    path
}
