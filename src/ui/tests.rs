// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Screen;
use super::terminal::TerminalScreen;
use crate::backend::memory::{MemoryBackend, MemoryRepo, Objects};
use crate::backend::{Backend, CommitRecord};
use crate::clone::CloneView;
use crate::error::{BrowserError, InputError};
use crate::history::{Footer, HistoryView};
use crate::page::{CommitDetailPage, Page, RepoListPage};
use crate::progress::ProgressTriple;

fn screen() -> TerminalScreen<Vec<u8>> {
    TerminalScreen::new(Vec::new(), false)
}

fn output(screen: TerminalScreen<Vec<u8>>) -> String {
    let text = String::from_utf8(screen.into_inner()).unwrap();
    // Pages open with a blank separator line; row indentation is kept.
    text.trim_start_matches('\n').trim_end().to_string()
}

fn commit(hash: char, message: &str) -> CommitRecord {
    CommitRecord {
        hash: hash.to_string().repeat(40),
        message: message.to_string(),
        parents: vec!["3".repeat(40)],
        author: "Ada <ada@example.com>".to_string(),
        committer: "Ada <ada@example.com>".to_string(),
        tree: "2".repeat(40),
    }
}

fn conquest() -> MemoryRepo {
    MemoryBackend::new()
        .with_repo("conquest", "git://example.com/c.git", Objects::linear(1))
        .repo("conquest")
        .unwrap()
}

#[test]
fn test_history_rows_and_footers() {
    let mut screen = screen();
    screen.set_footer(Footer::Loading);
    screen.append_commit("Fix the renderer", &commit('a', "Fix the renderer\n"));
    screen.append_commit("Add level loader", &commit('b', "Add level loader\n"));
    screen.set_footer(Footer::LoadMore);
    screen.append_commit("Initial commit", &commit('c', "Initial commit\n"));
    screen.set_footer(Footer::Hidden);

    let text = output(screen);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("  [0] Fix the renderer "));
    assert!(lines[0].ends_with(" aaaaaaa"));
    assert!(lines[1].starts_with("  [1] Add level loader "));
    assert_eq!(lines[2], "  [m] Load More...");
    assert!(lines[3].starts_with("  [2] Initial commit "));
    assert!(lines[3].ends_with(" ccccccc"));
    assert_eq!(lines[4], "  (end of history)");
}

#[tokio::test]
async fn test_repo_list_page() {
    let backend =
        MemoryBackend::new().with_repo("conquest", "git://example.com/c.git", Objects::linear(1));
    let repos = backend.list_repos().await.unwrap();
    let mut screen = screen();
    screen.show(&Page::RepoList(RepoListPage::new(repos)));

    insta::assert_snapshot!(output(screen), @r"
    == Git Repositories ==
      [0] conquest
          git://example.com/c.git
      [+] Clone a repository
    ");
}

#[test]
fn test_commit_detail_page() {
    let mut screen = screen();
    let page = Page::CommitDetail(CommitDetailPage {
        repo: conquest(),
        commit: commit('1', "Fix the thing\n"),
    });
    screen.show(&page);

    insta::assert_snapshot!(output(screen), @r"
    == conquest ==
      Message:
        Fix the thing
      Tree:
        2222222222222222222222222222222222222222
      Parent:
        3333333333333333333333333333333333333333
      Author:
        Ada <ada@example.com>
      Hash:
        1111111111111111111111111111111111111111
      [p0] ascend to 3333333
      [t] Enter tree
    ");
}

#[test]
fn test_home_page() {
    let mut screen = screen();
    screen.show(&Page::<MemoryRepo>::Home);
    insta::assert_snapshot!(output(screen), @r"
    == Git Browser ==
      (no repositories listed)
    ");
}

#[test]
fn test_alert_and_notice() {
    let mut screen = screen();
    screen.alert(&BrowserError::from(InputError::EmptyUrl));
    screen.notice("cloned conquest");
    insta::assert_snapshot!(output(screen), @r"
    !! input error: remote url is required
    -- cloned conquest
    ");
}

#[test]
fn test_hidden_progress_writes_nothing() {
    let mut screen = screen();
    screen.show_progress();
    screen.render_progress(&ProgressTriple::new("Receiving objects", 3, Some(10)));
    screen.render_progress(&ProgressTriple::new("Counting objects", 7, None));
    screen.hide_progress();
    assert_eq!(output(screen), "");
}
