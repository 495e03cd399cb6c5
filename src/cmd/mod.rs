// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers --> GitCliBackend (store.root)
//!   options, repos, clone, log, show, tree, browse
//! ```

pub mod browse;
pub mod clone;
pub mod log;
pub mod options;
pub mod repos;
pub mod show;

use anyhow::Context;

use crate::backend::git_cli::GitCliBackend;
use crate::config::Config;
use crate::error::Result;

/// Opens the configured repository store.
///
/// # Errors
///
/// Returns an error if the `git` executable cannot be located.
pub fn open_store(config: &Config) -> Result<GitCliBackend> {
    GitCliBackend::new(&config.store.root, &config.store.git).with_context(|| {
        format!(
            "failed to open repository store {}",
            config.store.root.display()
        )
    })
}
