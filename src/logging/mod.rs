//! Diagnostic logging to disk.
//!
//! The terminal belongs to the clock, so `tracing` output goes to a daily file
//! named `crabclock_<date>.log` in the configured log directory (default:
//! `~/.local/share/crabclock/logs/`).

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Expand `~` or a leading `~/` to the home directory. Other users' homes
/// (`~name`) are left as written.
pub fn resolve_log_dir(log_dir: &str) -> PathBuf {
    let rest = if log_dir == "~" {
        Some("")
    } else {
        log_dir
            .strip_prefix("~/")
            .or_else(|| log_dir.strip_prefix("~\\"))
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(log_dir),
    }
}

pub fn log_file_name(date: chrono::NaiveDate) -> String {
    format!("crabclock_{}.log", date.format("%Y-%m-%d"))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let dir = resolve_log_dir(&config.log_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = dir.join(log_file_name(chrono::Local::now().date_naive()));
    let file = open_append(&path)?;

    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level {:?}", config.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(Some(path))
}

fn open_append(path: &Path) -> Result<fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
