// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone command implementation for gitb.

use anyhow::bail;
use tracing::info;

use crate::backend::{Backend, Repository};
use crate::cli::clone::CloneArgs;
use crate::clone::{CloneOutcome, ClonePipeline};
use crate::config::types::UiConfig;
use crate::error::Result;
use crate::progress::GitProgressParser;
use crate::ui::terminal::TerminalScreen;

/// Main handler for clone command.
///
/// # Errors
///
/// Returns an error if the url is rejected, the repository cannot be
/// created, or the fetch fails. A failed fetch leaves the created
/// repository in the store.
pub async fn run_clone_command<B: Backend>(args: &CloneArgs, backend: &B, ui: &UiConfig) -> Result<()> {
    let pipeline = ClonePipeline::new(ui.progress_interval());
    let mut screen = TerminalScreen::stdout();

    match pipeline
        .submit(backend, &args.to_fields(), GitProgressParser, &mut screen)
        .await?
    {
        CloneOutcome::Cloned(repo) => {
            let summary = repo.summary();
            info!(name = %summary.name, "clone finished");
            println!("Cloned {} into {}", summary.url, summary.name);
            Ok(())
        }
        CloneOutcome::Ignored => bail!("a clone is already running"),
    }
}
