//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` and map one-to-one onto TOML.
//! Every field has a sensible default so the application works out of the box.

use crate::countdown::{CountdownConfig, Direction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ConfigError;

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub countdown: CountdownSettings,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The countdown as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownSettings {
    #[serde(default = "default_count_start")]
    pub count_start: i64,
    #[serde(default)]
    pub count_stop: i64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub is_increment: bool,
    #[serde(default = "default_true")]
    pub initial_is_running: bool,
    /// RFC 3339 deadline. When set, the start value is the number of whole
    /// seconds from now until then and `count_start` is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<String>,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            count_start: default_count_start(),
            count_stop: 0,
            interval_ms: default_interval_ms(),
            is_increment: false,
            initial_is_running: true,
            until: None,
        }
    }
}

impl CountdownSettings {
    /// Resolve into a controller config, measuring any deadline from `now`.
    /// Deadlines already past start at zero.
    pub fn to_countdown_config(&self, now: DateTime<Utc>) -> Result<CountdownConfig, ConfigError> {
        let start = match &self.until {
            Some(until) => {
                let deadline = DateTime::parse_from_rfc3339(until)
                    .map_err(|source| ConfigError::InvalidDeadline {
                        value: until.clone(),
                        source,
                    })?
                    .with_timezone(&Utc);
                (deadline - now).num_seconds().max(0)
            }
            None => self.count_start,
        };
        let direction = if self.is_increment {
            Direction::Increment
        } else {
            Direction::Decrement
        };
        Ok(CountdownConfig::new(start)
            .stop(self.count_stop)
            .interval(Duration::from_millis(self.interval_ms))
            .direction(direction)
            .running_initially(self.initial_is_running))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Length of one digit flip.
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    /// Redraw cadence while a flip is in progress.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Labels for days, hours, minutes, seconds.
    #[serde(default = "default_labels")]
    pub labels: [String; 4],
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_ms: default_animation_ms(),
            frame_ms: default_frame_ms(),
            labels: default_labels(),
        }
    }
}

impl UiConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// `tracing` filter directive, e.g. `info` or `crabclock=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_count_start() -> i64 {
    500_000
}
fn default_interval_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_animation_ms() -> u64 {
    400
}
fn default_frame_ms() -> u64 {
    50
}
fn default_labels() -> [String; 4] {
    ["d".into(), "h".into(), "m".into(), "s".into()]
}
fn default_level() -> String {
    "info".into()
}
fn default_log_dir() -> String {
    "~/.local/share/crabclock/logs".into()
}
