// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! ```text
//! Config: GlobalConfig, StoreConfig, UiConfig
//! ```

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::{LogFormat, LogLevel};

/// Commits drained per history batch.
pub const DEFAULT_CHUNK_SIZE: usize = 9;

/// Clone progress refresh period in milliseconds.
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 33;

/// Maximum characters of a commit title in history rows.
pub const DEFAULT_TITLE_LIMIT: usize = 80;

/// Remote pre-filled in the clone form.
pub const DEFAULT_REMOTE: &str = "git://github.com/creationix/conquest.git";

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to log file; no file logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Line format of the log file.
    pub log_format: LogFormat,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::WARN,
            file_log_level: LogLevel::DEBUG,
            log_file: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Repository store options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding one bare repository per entry.
    pub root: PathBuf,
    /// Name or path of the git executable.
    pub git: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("repos"),
            git: "git".to_string(),
        }
    }
}

/// Page behaviour options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Commits per history batch.
    pub chunk_size: usize,
    /// Clone progress refresh period.
    pub progress_interval_ms: u64,
    /// Commit title truncation limit.
    pub title_limit: usize,
    /// Url pre-filled in the clone form.
    pub default_remote: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL_MS,
            title_limit: DEFAULT_TITLE_LIMIT,
            default_remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

impl UiConfig {
    /// Checks the numeric limits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            section: "ui".to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size", "must be at least 1"));
        }
        if self.progress_interval_ms == 0 {
            return Err(invalid("progress_interval_ms", "must be at least 1"));
        }
        if self.title_limit < 4 {
            return Err(invalid("title_limit", "must be at least 4"));
        }
        Ok(())
    }

    /// Batch size as a non-zero count, falling back to the default.
    #[must_use]
    pub fn chunk_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.chunk_size)
            .or_else(|| NonZeroUsize::new(DEFAULT_CHUNK_SIZE))
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Progress refresh period.
    #[must_use]
    pub const fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}
