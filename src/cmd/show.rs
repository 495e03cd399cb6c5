// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Show and tree command implementations for gitb.

use crate::backend::Repository;
use crate::backend::git_cli::GitCliBackend;
use crate::cli::repo::ObjectArgs;
use crate::error::Result;
use crate::page::{CommitDetailPage, FileTreePage, Page};
use crate::ui::Screen;
use crate::ui::terminal::TerminalScreen;

/// Main handler for show command.
///
/// # Errors
///
/// Returns an error if the repository does not exist or the hash does not
/// name a commit.
pub async fn run_show_command(args: &ObjectArgs, backend: &GitCliBackend) -> Result<()> {
    let repo = backend.open(&args.repo).await?;
    let commit = repo.load_commit(&args.hash).await?;
    TerminalScreen::stdout().show(&Page::CommitDetail(CommitDetailPage { repo, commit }));
    Ok(())
}

/// Main handler for tree command.
///
/// # Errors
///
/// Returns an error if the repository does not exist or the hash does not
/// name a tree.
pub async fn run_tree_command(args: &ObjectArgs, backend: &GitCliBackend) -> Result<()> {
    let repo = backend.open(&args.repo).await?;
    let entries = repo.load_tree(&args.hash).await?;
    TerminalScreen::stdout().show(&Page::FileTree(FileTreePage {
        repo,
        hash: args.hash.clone(),
        entries,
    }));
    Ok(())
}
