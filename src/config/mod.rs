// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitb.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GITB_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITB_STORE__ROOT=/srv/repos  → store.root = "/srv/repos"
//! GITB_UI__CHUNK_SIZE=20       → ui.chunk_size = 20
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, StoreConfig, UiConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Logging options.
    pub global: GlobalConfig,
    /// Repository store options.
    pub store: StoreConfig,
    /// Page behaviour options.
    pub ui: UiConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use git_browser::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("gitb.toml")
    ///     .with_env_prefix("GITB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates value ranges across sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for the first invalid value.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.store.git.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                section: "store".to_string(),
                key: "git".to_string(),
            });
        }
        self.ui.validate()
    }

    /// Format configuration options for display, ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file",
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert("store.root", self.store.root.display().to_string());
        options.insert("store.git", self.store.git.clone());
        options.insert("ui.chunk_size", self.ui.chunk_size.to_string());
        options.insert(
            "ui.progress_interval_ms",
            self.ui.progress_interval_ms.to_string(),
        );
        options.insert("ui.title_limit", self.ui.title_limit.to_string());
        options.insert("ui.default_remote", self.ui.default_remote.clone());

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
