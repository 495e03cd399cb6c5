// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for interactive browsing.
//!
//! Drives whole sessions through the in-memory backend.

use std::time::Duration;

use git_browser::backend::Repository;
use git_browser::backend::memory::{MemoryBackend, Objects};
use git_browser::browser::Browser;
use git_browser::cmd::browse::run_session;
use git_browser::config::types::UiConfig;
use git_browser::history::Footer;
use git_browser::page::Page;
use git_browser::ui::terminal::TerminalScreen;
use tokio_util::sync::CancellationToken;

type TestBrowser = Browser<MemoryBackend, TerminalScreen<Vec<u8>>>;

fn conquest(commits: usize) -> MemoryBackend {
    MemoryBackend::new().with_repo(
        "conquest",
        "git://github.com/creationix/conquest.git",
        Objects::linear(commits),
    )
}

fn browser(backend: MemoryBackend) -> TestBrowser {
    Browser::new(
        backend,
        TerminalScreen::new(Vec::new(), false),
        UiConfig::default(),
    )
}

fn feed(lines: &[&str]) -> (flume::Sender<String>, flume::Receiver<String>) {
    let (tx, rx) = flume::unbounded();
    for line in lines {
        tx.send((*line).to_string()).unwrap();
    }
    (tx, rx)
}

fn screen_text(browser: TestBrowser) -> String {
    String::from_utf8(browser.into_screen().into_inner()).unwrap()
}

fn repo_names(browser: &TestBrowser) -> Vec<String> {
    match browser.current() {
        Page::RepoList(list) => list
            .repos()
            .iter()
            .map(|r| r.summary().name.clone())
            .collect(),
        other => panic!("expected the repository list, got {other:?}"),
    }
}

// =============================================================================
// Full session
// =============================================================================

#[tokio::test]
async fn browse_history_commits_and_clone() {
    let (_tx, rx) = feed(&[
        "0",
        "m",
        "m",
        "0",
        "p0",
        "b",
        "b",
        "+",
        "c",
        "c git://example.com/foo/bar.git",
        "q",
    ]);

    let browser = run_session(browser(conquest(20)), rx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(browser.depth(), 2);
    assert_eq!(repo_names(&browser), ["conquest", "bar"]);

    let text = screen_text(browser);
    assert!(text.contains("  [19] Commit number 0"));
    assert!(text.contains("  (end of history)"));
    assert_eq!(text.matches("  [m] Load More...").count(), 2);
    assert!(text.contains("!! backend error: repository already exists: conquest"));
    assert!(text.contains("-- cloned bar"));
}

#[tokio::test]
async fn browse_ends_with_input() {
    let (tx, rx) = feed(&["0", "0"]);
    drop(tx);

    let browser = run_session(browser(conquest(3)), rx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(browser.depth(), 4);
    assert!(matches!(browser.current(), Page::CommitDetail(_)));
}

#[tokio::test]
async fn browse_unknown_and_invalid_input_keeps_page() {
    let (_tx, rx) = feed(&["frobnicate", "7", "t", "q"]);

    let browser = run_session(browser(conquest(3)), rx, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(browser.depth(), 2);
    let text = screen_text(browser);
    assert!(text.contains("!! input error: no repository at position 7 (page has 1)"));
    assert!(text.contains("!! input error: 'enter tree' is not available on the repository list page"));
}

#[tokio::test]
async fn browse_fails_when_listing_fails() {
    let (_tx, rx) = feed(&[]);
    let backend = conquest(3).fail_listing("store unavailable");

    let result = run_session(browser(backend), rx, CancellationToken::new()).await;
    assert!(result.is_err());
}

// =============================================================================
// Cancellation
// =============================================================================

#[tokio::test]
async fn browse_cancelled_before_input() {
    let (_tx, rx) = feed(&[]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let browser = run_session(browser(conquest(3)), rx, cancel).await.unwrap();
    assert_eq!(browser.depth(), 2);
}

#[tokio::test(start_paused = true)]
async fn browse_cancel_interrupts_history_read() {
    let backend = conquest(20).read_delay(Duration::from_secs(1));
    let (_tx, rx) = feed(&["0"]);
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        token.cancel();
    });

    let mut browser = run_session(browser(backend), rx, cancel).await.unwrap();

    // Two reads finished before the interruption; the batch was abandoned.
    assert_eq!(browser.depth(), 3);
    let Page::History(history) = browser.current() else {
        panic!("expected the history page");
    };
    assert_eq!(history.list.rows().len(), 2);
    assert_eq!(history.list.footer(), Footer::Loading);

    assert!(browser.load_more().await.is_err());
}
