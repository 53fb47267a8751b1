use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_MS: u64 = 500;
const DEFAULT_OUT_DIR: &str = "stats";
const DEFAULT_SUMMARY_PATH: &str = "summary.csv";

/// Everything a run needs, resolved once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub group_id: String,
    pub player_name: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
    pub out_dir: PathBuf,
    pub summary_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = required_env("BC_TOKEN")?;
        let group_id = required_env("BC_GROUP_ID")?;
        // Display names are matched exactly, so the raw value is kept as-is
        // (a name may legitimately begin or end with whitespace).
        let player_name = env::var("BC_PLAYER_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("BC_PLAYER_NAME env var is missing"))?;

        let timeout_secs = env::var("BC_TIMEOUT_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(5, 180);
        let max_attempts = env::var("BC_MAX_ATTEMPTS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS)
            .clamp(1, 10);
        let retry_base_ms = env::var("BC_RETRY_BASE_MS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_BASE_MS)
            .clamp(100, 10_000);
        let out_dir = env::var("BC_OUT_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_OUT_DIR.to_string());
        let summary_path = env::var("BC_SUMMARY_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SUMMARY_PATH.to_string());

        Ok(Self {
            token,
            group_id,
            player_name,
            timeout: Duration::from_secs(timeout_secs),
            max_attempts,
            retry_base_delay: Duration::from_millis(retry_base_ms),
            out_dir: PathBuf::from(out_dir),
            summary_path: PathBuf::from(summary_path),
        })
    }
}

fn required_env(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("{key} env var is missing"))
}
