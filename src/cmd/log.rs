// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Log command implementation for gitb.
//!
//! ```text
//! batch 1 -> [m] Load More... -> prompt -> batch 2 -> ... -> (end of history)
//! --all / --json: no prompt, batches drained back to back
//! ```

use std::io::Write;
use std::num::NonZeroUsize;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::backend::git_cli::GitCliBackend;
use crate::backend::{CommitStream, Repository};
use crate::cli::repo::LogArgs;
use crate::config::types::UiConfig;
use crate::error::Result;
use crate::history::{CommitList, CommitPaginator};
use crate::ui::terminal::TerminalScreen;

/// Main handler for log command.
///
/// # Errors
///
/// Returns an error if the repository does not exist, has no history, or
/// the history stream fails.
pub async fn run_log_command(args: &LogArgs, backend: &GitCliBackend, ui: &UiConfig) -> Result<()> {
    let repo = backend.open(&args.repo).await?;
    let stream = repo.log_walk("HEAD").await?;
    let chunk_size = args
        .chunk_size
        .and_then(|n| NonZeroUsize::new(usize::from(n)))
        .unwrap_or_else(|| ui.chunk_size());
    let mut paginator = CommitPaginator::new(stream, chunk_size, ui.title_limit);

    if args.json {
        return print_json(&mut paginator).await;
    }

    let mut screen = TerminalScreen::stdout();
    println!("== {} ==", repo.summary().name);
    let mut input = BufReader::new(tokio::io::stdin());
    loop {
        let batch = paginator.load_batch(&mut screen).await?;
        if !batch.more {
            break;
        }
        if !args.unattended() && !confirm_more(&mut input).await? {
            debug!(rendered = paginator.rendered(), "log stopped by user");
            break;
        }
    }
    Ok(())
}

/// Drains the whole history, printing one JSON object per commit.
async fn print_json<S: CommitStream>(paginator: &mut CommitPaginator<S>) -> Result<()> {
    let mut list = CommitList::default();
    let mut printed = 0;
    loop {
        let batch = paginator.load_batch(&mut list).await?;
        let mut stdout = std::io::stdout().lock();
        for row in &list.rows()[printed..] {
            writeln!(stdout, "{}", serde_json::to_string(&row.commit)?)?;
        }
        printed = list.rows().len();
        if !batch.more {
            return Ok(());
        }
    }
}

/// Asks whether to load the next batch. End of input answers no.
///
/// # Errors
///
/// Returns an error if reading the answer fails.
pub async fn confirm_more<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<bool> {
    print!("Load more? [Y/n] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer).await? == 0 {
        return Ok(false);
    }
    Ok(parse_answer(&answer))
}

pub(crate) fn parse_answer(answer: &str) -> bool {
    !matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "n" | "no" | "q" | "quit"
    )
}
