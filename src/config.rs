//! Guard configuration loading from environment variables.
//!
//! All configuration values are loaded from `INV_GUARD_*` environment
//! variables with sensible defaults. Invalid values fall back to defaults
//! without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `INV_GUARD_SESSION_TIMEOUT_MS` | 60000 | Inactivity window before logout (ms) |
//! | `INV_GUARD_BACKUP_GRACE_MS` | 1000 | Extra margin for the backup timer (ms) |
//! | `INV_GUARD_LOG_LEVEL` | info | Log level filter |
//! | `INV_GUARD_LOG_FORMAT` | json | Log format (`json` or `pretty`) |

use std::time::Duration;

use crate::session::SessionConfig;
use crate::telemetry::{LogConfig, LogFormat};

/// All guard configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub session: SessionConfig,
    pub log: LogConfig,
}

/// Parse a `u64` env var, returning `default` on missing or invalid.
fn parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(val) => val.parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Parse a string env var, returning `default` on missing.
fn parse_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load configuration from the environment.
pub fn load_config() -> EnvConfig {
    let defaults = SessionConfig::default();

    let session = SessionConfig {
        timeout: Duration::from_millis(parse_u64(
            "INV_GUARD_SESSION_TIMEOUT_MS",
            defaults.timeout.as_millis() as u64,
        )),
        backup_grace: Duration::from_millis(parse_u64(
            "INV_GUARD_BACKUP_GRACE_MS",
            defaults.backup_grace.as_millis() as u64,
        )),
    };

    let format = match parse_string("INV_GUARD_LOG_FORMAT", "json").as_str() {
        "pretty" => LogFormat::Pretty,
        _ => LogFormat::Json,
    };
    let log = LogConfig {
        format,
        level: parse_string("INV_GUARD_LOG_LEVEL", "info"),
    };

    EnvConfig { session, log }
}
