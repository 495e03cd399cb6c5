// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the git CLI backend.
//!
//! Tests the store with real temporary repositories. Skipped when `git` is
//! not installed.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use git_browser::backend::git_cli::{GitCliBackend, GitCliRepo};
use git_browser::backend::{Backend, Repository};
use git_browser::clone::{CloneFields, CloneOutcome, ClonePipeline};
use git_browser::error::BrowserResult;
use git_browser::history::{CommitList, CommitPaginator, Footer};
use git_browser::progress::GitProgressParser;
use git_browser::ui::terminal::TerminalScreen;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Source repository with `count` commits "Commit 0".."Commit N-1".
///
/// Every commit rewrites `log.txt`; the first one also adds `src/main.rs`.
fn source_repo(dir: &Path, count: usize) {
    assert!(run_git(&["init", "-q"], dir));
    fs::create_dir(dir.join("src")).unwrap();
    fs::write(dir.join("src/main.rs"), "fn main() {}\n").unwrap();
    for n in 0..count {
        fs::write(dir.join("log.txt"), format!("{n}\n")).unwrap();
        assert!(run_git(&["add", "."], dir));
        assert!(run_git(&["commit", "-q", "-m", &format!("Commit {n}")], dir));
    }
}

async fn clone_into(store: &GitCliBackend, url: &str) -> BrowserResult<CloneOutcome<GitCliRepo>> {
    let pipeline = ClonePipeline::new(Duration::from_millis(33));
    let mut view = TerminalScreen::new(Vec::new(), false);
    let fields = CloneFields::builder().url(url).build();
    pipeline
        .submit(store, &fields, GitProgressParser, &mut view)
        .await
}

struct Fixture {
    _source: TempDir,
    _store: TempDir,
    backend: GitCliBackend,
    url: String,
}

async fn cloned(count: usize) -> Fixture {
    let source = temp_dir();
    let store = temp_dir();
    let work = source.path().join("work");
    fs::create_dir(&work).unwrap();
    source_repo(&work, count);

    let backend = GitCliBackend::new(store.path().join("repos"), "git").unwrap();
    let url = work.display().to_string();
    let outcome = clone_into(&backend, &url).await.unwrap();
    assert!(matches!(outcome, CloneOutcome::Cloned(_)));
    Fixture {
        _source: source,
        _store: store,
        backend,
        url,
    }
}

// =============================================================================
// Store
// =============================================================================

#[tokio::test]
async fn git_missing_store_lists_nothing() {
    if !git_available() {
        return;
    }
    let store = temp_dir();
    let backend = GitCliBackend::new(store.path().join("absent"), "git").unwrap();
    assert!(backend.list_repos().await.unwrap().is_empty());
}

#[tokio::test]
async fn git_clone_is_listed_with_description_and_url() {
    if !git_available() {
        return;
    }
    let fixture = cloned(2).await;

    let repos = fixture.backend.list_repos().await.unwrap();
    assert_eq!(repos.len(), 1);
    let summary = repos[0].summary();
    assert_eq!(summary.name, "work");
    assert_eq!(summary.description, fixture.url);
    assert_eq!(summary.url, fixture.url);
}

#[tokio::test]
async fn git_duplicate_clone_is_rejected() {
    if !git_available() {
        return;
    }
    let fixture = cloned(1).await;

    let err = clone_into(&fixture.backend, &fixture.url).await.unwrap_err();
    assert!(err.to_string().contains("repository already exists: work"));
}

#[tokio::test]
async fn git_failed_fetch_keeps_empty_repository() {
    if !git_available() {
        return;
    }
    let store = temp_dir();
    let backend = GitCliBackend::new(store.path(), "git").unwrap();
    let missing = store.path().join("nowhere").join("gone.git");

    let err = clone_into(&backend, &missing.display().to_string()).await;
    assert!(err.is_err());

    let repo = backend.open("gone").await.unwrap();
    assert!(repo.log_walk("HEAD").await.is_err());
}

#[tokio::test]
async fn git_open_unknown_repository() {
    if !git_available() {
        return;
    }
    let store = temp_dir();
    let backend = GitCliBackend::new(store.path(), "git").unwrap();
    let err = backend.open("nope").await.unwrap_err();
    assert!(err.is_input());
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn git_history_paginates_in_chunks() {
    if !git_available() {
        return;
    }
    let fixture = cloned(20).await;
    let repo = fixture.backend.open("work").await.unwrap();

    let stream = repo.log_walk("HEAD").await.unwrap();
    let mut paginator = CommitPaginator::new(stream, NonZeroUsize::new(9).unwrap(), 80);
    let mut list = CommitList::default();

    let mut totals = Vec::new();
    loop {
        let batch = paginator.load_batch(&mut list).await.unwrap();
        totals.push(list.rows().len());
        if !batch.more {
            break;
        }
    }

    assert_eq!(totals, [9, 18, 20]);
    assert_eq!(list.footer(), Footer::Hidden);
    assert_eq!(list.rows()[0].title, "Commit 19");
    assert_eq!(list.rows()[19].title, "Commit 0");
    assert!(list.rows()[19].commit.parents.is_empty());
    assert_eq!(list.rows()[0].commit.parents, [list.rows()[1].commit.hash.clone()]);
    assert_eq!(list.rows()[0].commit.author, "Test <test@test.com>");
}

#[tokio::test]
async fn git_history_from_hash() {
    if !git_available() {
        return;
    }
    let fixture = cloned(5).await;
    let repo = fixture.backend.open("work").await.unwrap();

    let mut list = CommitList::default();
    let head = repo.log_walk("HEAD").await.unwrap();
    CommitPaginator::new(head, NonZeroUsize::new(9).unwrap(), 80)
        .load_batch(&mut list)
        .await
        .unwrap();
    let third = list.rows()[2].commit.hash.clone();

    let mut from_third = CommitList::default();
    let stream = repo.log_walk(&third).await.unwrap();
    CommitPaginator::new(stream, NonZeroUsize::new(9).unwrap(), 80)
        .load_batch(&mut from_third)
        .await
        .unwrap();
    assert_eq!(from_third.rows().len(), 3);
    assert_eq!(from_third.rows()[0].title, "Commit 2");
}

#[tokio::test]
async fn git_dropping_a_stream_mid_walk_is_clean() {
    if !git_available() {
        return;
    }
    let fixture = cloned(12).await;
    let repo = fixture.backend.open("work").await.unwrap();

    let stream = repo.log_walk("HEAD").await.unwrap();
    let mut paginator = CommitPaginator::new(stream, NonZeroUsize::new(3).unwrap(), 80);
    let mut list = CommitList::default();
    paginator.load_batch(&mut list).await.unwrap();
    drop(paginator);

    // The store stays usable for a new walk.
    assert!(repo.log_walk("HEAD").await.is_ok());
}

// =============================================================================
// Objects
// =============================================================================

#[tokio::test]
async fn git_commit_and_tree_objects() {
    if !git_available() {
        return;
    }
    let fixture = cloned(2).await;
    let repo = fixture.backend.open("work").await.unwrap();

    let mut list = CommitList::default();
    let stream = repo.log_walk("HEAD").await.unwrap();
    CommitPaginator::new(stream, NonZeroUsize::new(9).unwrap(), 80)
        .load_batch(&mut list)
        .await
        .unwrap();
    let head = &list.rows()[0].commit;

    let commit = repo.load_commit(&head.hash).await.unwrap();
    assert_eq!(&commit, head);
    assert_eq!(commit.message.trim_end(), "Commit 1");

    let entries = repo.load_tree(&commit.tree).await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["log.txt", "src"]);
    assert!(!entries[0].is_dir());
    assert!(entries[1].is_dir());

    let sub = repo.load_tree(&entries[1].hash).await.unwrap();
    assert_eq!(sub.len(), 1);
    assert_eq!(sub[0].name, "main.rs");

    // Kind mismatches are rejected.
    assert!(repo.load_commit(&commit.tree).await.is_err());
    assert!(repo.load_tree(&commit.hash).await.is_err());
}
