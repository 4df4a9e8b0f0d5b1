//! TOML configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::filtering::{FilterError, FilterRuleSet};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub broker: BrokerConfig,
    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_channel")]
    pub channel: String,
    pub queue_manager: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Feature gates. Everything optional defaults to off.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub event_messages: bool,
    #[serde(default)]
    pub additional_queue_status: bool,
    #[serde(default)]
    pub topic_status: bool,
    #[serde(default)]
    pub additional_topic_status: bool,
    #[serde(default)]
    pub maintenance_errors: bool,
    #[serde(default)]
    pub monitor_error_logs: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    #[serde(default)]
    pub global: FilterLists,
    #[serde(default)]
    pub queue: FilterLists,
    #[serde(default)]
    pub topic: FilterLists,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterLists {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsConfig {
    /// Directory holding the broker error logs.
    #[serde(default)]
    pub error_log_path: Option<PathBuf>,
    /// Directory holding the date-stamped maintenance logs.
    #[serde(default)]
    pub maintenance_log_path: Option<PathBuf>,
    /// Directory for the persisted tail offset, current directory if unset.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    /// Local wall-clock time of the daily maintenance sweep, `HH:MM`.
    #[serde(default)]
    pub daily_maintenance_scan_time: Option<String>,
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Cross-field rules that serde defaults can't express.
    pub fn validate(&self) -> Result<()> {
        if self.broker.queue_manager.trim().is_empty() {
            bail!("broker.queue_manager must not be empty");
        }
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be at least 1");
        }
        if self.report.additional_topic_status && !self.report.topic_status {
            bail!("report.additional_topic_status requires report.topic_status");
        }
        if self.report.monitor_error_logs && self.logs.error_log_path.is_none() {
            bail!("report.monitor_error_logs requires logs.error_log_path");
        }
        if self.report.maintenance_errors {
            if self.logs.maintenance_log_path.is_none() {
                bail!("report.maintenance_errors requires logs.maintenance_log_path");
            }
            if self.logs.daily_maintenance_scan_time.is_none() {
                bail!("report.maintenance_errors requires logs.daily_maintenance_scan_time");
            }
        }
        Ok(())
    }

    /// Queue filter, global rules layered under queue-specific ones.
    pub fn queue_filter(&self) -> Result<FilterRuleSet, FilterError> {
        FilterRuleSet::layered(
            &self.filters.global.includes,
            &self.filters.global.ignores,
            &self.filters.queue.includes,
            &self.filters.queue.ignores,
        )
    }

    /// Topic filter, global rules layered under topic-specific ones.
    pub fn topic_filter(&self) -> Result<FilterRuleSet, FilterError> {
        FilterRuleSet::layered(
            &self.filters.global.includes,
            &self.filters.global.ignores,
            &self.filters.topic.includes,
            &self.filters.topic.ignores,
        )
    }

    /// Directory for scanner state files.
    pub fn state_dir(&self) -> PathBuf {
        self.logs
            .state_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_poll_interval() -> u64 {
    30
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    1414
}

fn default_channel() -> String {
    "SYSTEM.DEF.SVRCONN".to_string()
}
