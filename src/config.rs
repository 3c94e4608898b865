// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration management for accessmonitor.
//!
//! Loaded from an optional TOML file overlaid with
//! `ACCESSMONITOR__`-prefixed environment variables; every field has a
//! default so the engine runs with no configuration at all.

use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Page fetcher limits
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Scan store and persistence
    #[serde(default)]
    pub store: StoreConfig,

    /// Monitor scheduler timing
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Load configuration from a file (missing file falls back to
    /// defaults) with environment overrides applied on top.
    pub fn load(path: &Path) -> Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("ACCESSMONITOR").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetcherConfig {
    /// Whole-request deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Redirects followed before giving up
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Response body ceiling in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Identifying client label sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            max_body_bytes: default_max_body_bytes(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_body_bytes() -> usize {
    5 * 1024 * 1024
}

fn default_user_agent() -> String {
    format!("accessmonitor/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory scan history and monitors are persisted under
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum retained scan records; oldest are evicted first
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_cap: default_history_cap(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".accessmonitor")
}

fn default_history_cap() -> usize {
    100
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Seconds between monitor ticks
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,

    /// Seconds to wait before the first tick after startup
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            startup_delay_secs: default_startup_delay_secs(),
        }
    }
}

fn default_tick_interval_secs() -> u64 {
    3600
}

fn default_startup_delay_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.fetcher.timeout_ms, 15_000);
        assert_eq!(config.fetcher.max_redirects, 5);
        assert_eq!(config.fetcher.max_body_bytes, 5 * 1024 * 1024);
        assert!(config.fetcher.user_agent.starts_with("accessmonitor/"));
        assert_eq!(config.store.history_cap, 100);
        assert_eq!(config.scheduler.tick_interval_secs, 3600);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/accessmonitor.toml")).unwrap();
        assert_eq!(config.fetcher.max_redirects, 5);
    }
}
