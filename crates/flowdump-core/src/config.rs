//! Tool configuration
//!
//! Every field has a built-in default matching a stock SONiC DPU image; a
//! TOML file only needs the values it overrides.

use crate::errors::{FlowDumpError, Result};
use flowdump_core_types::schema::{REQUEST_TABLE, STATE_TABLE};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the optional configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/sonic/flowdump.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowDumpConfig {
    /// Where the request descriptor is written
    pub request_path: PathBuf,
    /// Program and leading arguments; the request path is appended
    pub apply_command: Vec<String>,
    pub request_table: String,
    pub state_table: String,
    pub state_db_url: String,
    /// Database index of STATE_DB, used to build the keyspace channel
    pub state_db_index: u32,
    pub config_db_url: String,
    pub expected_switch_type: String,
    /// Extra wait after the session timeout before giving up
    pub grace_period_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for FlowDumpConfig {
    fn default() -> Self {
        Self {
            request_path: PathBuf::from("/tmp/flowdump/flow_dump_request.json"),
            apply_command: vec!["swssconfig".to_string()],
            request_table: REQUEST_TABLE.to_string(),
            state_table: STATE_TABLE.to_string(),
            state_db_url: "redis://127.0.0.1:6379/6".to_string(),
            state_db_index: 6,
            config_db_url: "redis://127.0.0.1:6379/4".to_string(),
            expected_switch_type: "dpu".to_string(),
            grace_period_secs: 5,
            poll_interval_ms: 1000,
        }
    }
}

impl FlowDumpConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: FlowDumpConfig = toml::from_str(raw).map_err(|e| FlowDumpError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`
    ///
    /// When `required` is false a missing file yields the defaults; any other
    /// read or parse failure is an error.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(e) => Err(FlowDumpError::Config {
                message: format!("cannot read {}: {}", path.display(), e),
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.apply_command.first().map_or(true, |p| p.is_empty()) {
            return Err(FlowDumpError::Config {
                message: "apply_command must name a program".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(FlowDumpError::Config {
                message: "poll_interval_ms must be positive".to_string(),
            });
        }
        if self.request_table.is_empty() || self.state_table.is_empty() {
            return Err(FlowDumpError::Config {
                message: "table names must not be empty".to_string(),
            });
        }
        for table in [&self.request_table, &self.state_table] {
            if let Some(c) = table.chars().find(|c| TABLE_NAME_RESERVED.contains(c)) {
                return Err(FlowDumpError::Config {
                    message: format!("table name '{}' must not contain '{}'", table, c),
                });
            }
        }
        Ok(())
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Key separators plus the glob metacharacters of a keyspace subscription
const TABLE_NAME_RESERVED: &[char] = &['|', ':', '*', '?', '[', ']', '\\'];
