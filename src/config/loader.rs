// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration for `gitb`.
//!
//! ```text
//! defaults            (serde, Config::default)
//!   < gitb.toml       (optional, working directory)
//!   < --config FILE   (required, in command-line order)
//!   < GITB_SECTION__KEY
//!   < CLI overrides   (set)
//!        |
//!        v
//!    build() --> Config (validated)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::Result;

/// A TOML layer that contributed to the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layer {
    /// File named with `--config`.
    File(PathBuf),
    /// Optional file that was present on disk.
    Optional(PathBuf),
    /// TOML text given directly.
    Inline,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "[file] {}", path.display()),
            Self::Optional(path) => write!(f, "[optional] {}", path.display()),
            Self::Inline => f.write_str("[string] <string>"),
        }
    }
}

/// Collects configuration layers, lowest precedence first.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    layers: Vec<Layer>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            layers: Vec::new(),
        }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Adds a TOML file; [`build`](Self::build) fails if it is missing.
    #[must_use]
    pub fn add_toml_file(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut loader = self.add_file(path, true);
        loader.layers.push(Layer::File(path.to_path_buf()));
        loader
    }

    /// Adds a TOML file that is skipped when absent, like `gitb.toml`.
    #[must_use]
    pub fn add_toml_file_optional(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let present = path.is_file();
        let mut loader = self.add_file(path, false);
        if present {
            loader.layers.push(Layer::Optional(path.to_path_buf()));
        }
        loader
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.layers.push(Layer::Inline);
        self
    }

    /// Reads `<PREFIX>_<SECTION>__<KEY>` variables, e.g. `GITB_UI__CHUNK_SIZE`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Overrides a dotted key; overrides beat every other layer.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a valid path expression.
    pub fn set(mut self, key: &str, value: impl Into<config::Value>) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .with_context(|| format!("invalid override for '{key}'"))?;
        Ok(self)
    }

    /// Merges the layers into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error for a missing required file, malformed TOML or env
    /// values, unknown keys, or a value that fails [`Config::validate`].
    pub fn build(self) -> Result<Config> {
        let mut builder = self.builder;
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        let config: Config = builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Layers recorded so far, lowest precedence first.
    #[must_use]
    pub fn loaded_files(&self) -> &[Layer] {
        &self.layers
    }

    /// Numbered lines for `gitb options`.
    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| format!("{}. {layer}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
