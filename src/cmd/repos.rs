// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repos command implementation for gitb.

use crate::backend::{Backend, RepoSummary, Repository};
use crate::cli::repo::ReposArgs;
use crate::error::Result;

/// Main handler for repos command.
///
/// # Errors
///
/// Returns an error if the store cannot be listed.
pub async fn run_repos_command<B: Backend>(args: &ReposArgs, backend: &B) -> Result<()> {
    let repos = backend.list_repos().await?;
    let summaries: Vec<&RepoSummary> = repos.iter().map(Repository::summary).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No repositories found");
    } else {
        for line in format_repo_lines(&summaries) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One aligned `name  description` line per repository.
#[must_use]
pub fn format_repo_lines(summaries: &[&RepoSummary]) -> Vec<String> {
    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    summaries
        .iter()
        .map(|s| {
            let line = format!("{:<width$}  {}", s.name, s.description);
            line.trim_end().to_string()
        })
        .collect()
}
