// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Browse command: interactive page-stack session.
//!
//! ```text
//! stdin thread --flume--> session loop --> Browser --> TerminalScreen
//!                              ^
//! Ctrl-C --CancellationToken---+  (also interrupts a running action)
//! ```
//!
//! Input, one command per line:
//!
//! ```text
//! <n>          open row n (repository, commit, tree entry)
//! m            load more history
//! +            clone form
//! c [url] [n]  submit the clone form (url defaults to the pre-filled one)
//! t            enter the commit's tree
//! p<n>         ascend to parent n
//! o <hash>     open a commit of the current repository
//! b            back
//! ?            help
//! q            quit
//! ```

use std::io::Write;
use std::ops::ControlFlow;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::browser::Browser;
use crate::clone::CloneFields;
use crate::config::Config;
use crate::error::{BrowserResult, Result};
use crate::page::Page;
use crate::ui::Screen;
use crate::ui::terminal::TerminalScreen;

use super::open_store;

const HELP: &str = "\
  <n> open row   m more   + clone form   c [url] [name] clone
  t tree   p<n> parent   o <hash> commit   b back   ? help   q quit";

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseInput {
    Select(usize),
    LoadMore,
    NewClone,
    Submit {
        url: Option<String>,
        name: Option<String>,
    },
    EnterTree,
    Ascend(usize),
    OpenCommit(String),
    Back,
    Help,
    Quit,
}

impl BrowseInput {
    /// Parses one input line; `None` for blank or unknown input.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let head = words.next()?;
        let input = match head {
            "q" | "quit" => Self::Quit,
            "?" | "h" | "help" => Self::Help,
            "b" | "back" => Self::Back,
            "m" | "more" => Self::LoadMore,
            "+" => Self::NewClone,
            "t" | "tree" => Self::EnterTree,
            "c" | "clone" => Self::Submit {
                url: words.next().map(str::to_string),
                name: words.next().map(str::to_string),
            },
            "o" | "open" => Self::OpenCommit(words.next()?.to_string()),
            _ => {
                if let Some(index) = head.strip_prefix('p') {
                    Self::Ascend(index.parse().ok()?)
                } else {
                    Self::Select(head.parse().ok()?)
                }
            }
        };
        match words.next() {
            Some(_) => None,
            None => Some(input),
        }
    }
}

/// Main handler for browse command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or listed.
pub async fn run_browse_command(config: &Config) -> Result<()> {
    let backend = open_store(config)?;
    let browser = Browser::new(backend, TerminalScreen::stdout(), config.ui.clone());

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, ending session...");
            token.cancel();
        }
    });

    run_session(browser, spawn_stdin_reader(), cancel).await?;
    Ok(())
}

/// Forwards stdin lines from a blocking thread.
fn spawn_stdin_reader() -> flume::Receiver<String> {
    let (tx, rx) = flume::bounded(1);
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else {
                break;
            };
            // Receiver dropped: session over
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Drives `browser` from `lines` until quit, end of input or `cancel`.
///
/// Returns the browser so callers can inspect the final state.
///
/// # Errors
///
/// Returns an error if the initial repository listing fails.
pub async fn run_session<B: Backend, S: Screen>(
    mut browser: Browser<B, S>,
    lines: flume::Receiver<String>,
    cancel: CancellationToken,
) -> BrowserResult<Browser<B, S>> {
    browser.start().await?;
    println!("{HELP}");

    loop {
        prompt();
        let line = tokio::select! {
            () = cancel.cancelled() => break,
            line = lines.recv_async() => match line {
                Ok(line) => line,
                Err(_) => break,
            },
        };
        if line.trim().is_empty() {
            continue;
        }
        let Some(input) = BrowseInput::parse(&line) else {
            println!("-- unknown input '{}', ? for help", line.trim());
            continue;
        };
        debug!(?input, "session input");

        let flow = tokio::select! {
            biased;
            () = cancel.cancelled() => ControlFlow::Break(()),
            flow = apply(&mut browser, input) => flow,
        };
        if flow.is_break() {
            break;
        }
    }

    info!(depth = browser.depth(), "session ended");
    Ok(browser)
}

fn prompt() {
    print!("> ");
    if let Err(e) = std::io::stdout().flush() {
        debug!(error = %e, "prompt flush failed");
    }
}

async fn apply<B: Backend, S: Screen>(
    browser: &mut Browser<B, S>,
    input: BrowseInput,
) -> ControlFlow<()> {
    let result: BrowserResult<()> = match input {
        BrowseInput::Quit => return ControlFlow::Break(()),
        BrowseInput::Help => {
            println!("{HELP}");
            Ok(())
        }
        BrowseInput::Back => {
            browser.back();
            Ok(())
        }
        BrowseInput::Select(index) => browser.select(index).await,
        BrowseInput::LoadMore => browser.load_more().await.map(drop),
        BrowseInput::NewClone => browser.open_clone_form(),
        BrowseInput::Submit { url, name } => {
            let url = match (url, browser.current()) {
                (Some(url), _) => url,
                (None, Page::CloneForm(form)) => form.default_remote().to_string(),
                (None, _) => String::new(),
            };
            let fields = CloneFields::builder().url(url).maybe_name(name).build();
            browser.submit_clone(&fields).await.map(drop)
        }
        BrowseInput::EnterTree => browser.enter_tree().await,
        BrowseInput::Ascend(index) => browser.ascend(index).await,
        BrowseInput::OpenCommit(hash) => browser.open_commit(&hash).await,
    };
    // Failures were already alerted on the screen
    if result.is_err() {
        debug!("action did not complete");
    }
    ControlFlow::Continue(())
}
