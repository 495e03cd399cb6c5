// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Browser controller: user actions over the page stack.
//!
//! ```text
//! action            page          effect
//! start             Home          list repos, push RepoList
//! open_repo(i)      RepoList      log_walk(HEAD), push History, drain batch
//! open_clone_form   RepoList      push CloneForm
//! submit_clone      CloneForm     ClonePipeline, pop 2, push fresh RepoList
//! load_more         History       drain next batch
//! select_commit(i)  History       push CommitDetail
//! open_commit(h)    any repo page load commit, push CommitDetail
//! enter_tree        CommitDetail  load tree, push FileTree
//! ascend(i)         CommitDetail  load parent, peer CommitDetail
//! open_entry(i)     FileTree      dir: load tree, push FileTree
//! back              any           pop (no-op at root)
//! ```
//!
//! Every failure is alerted on the screen and logged where it happens, then
//! returned to the caller.

use tracing::{debug, error, info, warn};

use crate::backend::{Backend, Repository};
use crate::clone::{self, CloneFields, CloneOutcome, ClonePipeline};
use crate::config::types::UiConfig;
use crate::error::{BrowserError, BrowserResult, InputError};
use crate::history::{Batch, CommitList, CommitPaginator, Footer, HistoryView};
use crate::nav::NavigationStack;
use crate::page::{
    CloneFormPage, CommitDetailPage, FileTreePage, HistoryPage, Page, RepoListPage,
};
use crate::progress::GitProgressParser;
use crate::ui::Screen;

/// Writes history rows into the page model and onto the screen.
struct LiveHistory<'a, S> {
    list: &'a mut CommitList,
    screen: &'a mut S,
}

impl<S: HistoryView> HistoryView for LiveHistory<'_, S> {
    fn append_commit(&mut self, title: &str, commit: &crate::backend::CommitRecord) {
        self.list.append_commit(title, commit);
        self.screen.append_commit(title, commit);
    }

    fn set_footer(&mut self, footer: Footer) {
        self.list.set_footer(footer);
        self.screen.set_footer(footer);
    }

    fn scroll_to_end(&mut self) {
        self.list.scroll_to_end();
        self.screen.scroll_to_end();
    }
}

fn selection(what: &'static str, index: usize, len: usize) -> BrowserError {
    InputError::Selection { what, index, len }.into()
}

/// Page-stack browser over a backend, drawing on a screen.
pub struct Browser<B: Backend, S: Screen> {
    backend: B,
    screen: S,
    nav: NavigationStack<Page<B::Repo>>,
    ui: UiConfig,
}

impl<B: Backend, S: Screen> Browser<B, S> {
    /// Creates a browser showing the root page.
    pub fn new(backend: B, screen: S, ui: UiConfig) -> Self {
        let mut browser = Self {
            backend,
            screen,
            nav: NavigationStack::new(Page::Home),
            ui,
        };
        browser.screen.show(browser.nav.current());
        browser
    }

    #[must_use]
    pub fn current(&self) -> &Page<B::Repo> {
        self.nav.current()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.nav.depth()
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn screen(&self) -> &S {
        &self.screen
    }

    /// Consumes the browser, returning its screen.
    pub fn into_screen(self) -> S {
        self.screen
    }

    fn surface<T>(&mut self, action: &'static str, result: BrowserResult<T>) -> BrowserResult<T> {
        if let Err(e) = &result {
            if e.is_input() {
                warn!(action, error = %e, "action rejected");
            } else {
                error!(action, error = %e, "action failed");
            }
            self.screen.alert(e);
        }
        result
    }

    fn wrong_page(&self, action: &'static str) -> BrowserError {
        InputError::WrongPage {
            action,
            page: self.nav.current().kind(),
        }
        .into()
    }

    fn push(&mut self, page: Page<B::Repo>) {
        self.nav.push(page);
        self.screen.show(self.nav.current());
    }

    fn peer(&mut self, page: Page<B::Repo>) {
        let replaced = self.nav.peer(page);
        debug!(replaced = replaced.kind(), "page replaced");
        drop(replaced);
        self.screen.show(self.nav.current());
    }

    /// Lists the stored repositories and shows them.
    ///
    /// # Errors
    ///
    /// Returns the listing error.
    pub async fn start(&mut self) -> BrowserResult<()> {
        let result = self.backend.list_repos().await;
        let repos = self.surface("start", result)?;
        info!(count = repos.len(), "repositories listed");
        self.push(Page::RepoList(RepoListPage::new(repos)));
        Ok(())
    }

    /// Opens the history of repository `index` and drains its first batch.
    ///
    /// # Errors
    ///
    /// Returns a selection error, the walk error, or the first read error.
    /// On a read error the history page stays with the rows read so far.
    pub async fn open_repo(&mut self, index: usize) -> BrowserResult<Batch> {
        let result = self.open_repo_inner(index).await;
        self.surface("open repository", result)
    }

    async fn open_repo_inner(&mut self, index: usize) -> BrowserResult<Batch> {
        let Page::RepoList(list) = self.nav.current() else {
            return Err(self.wrong_page("open repository"));
        };
        let repo = list
            .repos()
            .get(index)
            .cloned()
            .ok_or_else(|| selection("repository", index, list.repos().len()))?;

        let stream = repo.log_walk("HEAD").await?;
        info!(repo = %repo.summary().name, "history opened");
        let paginator = CommitPaginator::new(stream, self.ui.chunk_size(), self.ui.title_limit);
        self.push(Page::History(HistoryPage::new(repo, paginator)));
        self.drain_batch().await
    }

    async fn drain_batch(&mut self) -> BrowserResult<Batch> {
        let Page::History(history) = self.nav.current_mut() else {
            return Err(self.wrong_page("load more"));
        };
        let mut view = LiveHistory {
            list: &mut history.list,
            screen: &mut self.screen,
        };
        history.paginator.load_batch(&mut view).await
    }

    /// Drains the next history batch.
    ///
    /// # Errors
    ///
    /// Returns the stream's read error.
    pub async fn load_more(&mut self) -> BrowserResult<Batch> {
        let result = self.drain_batch().await;
        self.surface("load more", result)
    }

    /// Shows the clone form.
    ///
    /// # Errors
    ///
    /// Returns `InputError::WrongPage` outside the repository list.
    pub fn open_clone_form(&mut self) -> BrowserResult<()> {
        if !matches!(self.nav.current(), Page::RepoList(_)) {
            let err = self.wrong_page("clone");
            return self.surface("clone", Err(err));
        }
        let pipeline = ClonePipeline::new(self.ui.progress_interval());
        self.push(Page::CloneForm(CloneFormPage::new(
            self.ui.default_remote.clone(),
            pipeline,
        )));
        Ok(())
    }

    /// Submits the clone form.
    ///
    /// Returns `true` once the repository was cloned and the refreshed
    /// repository list is showing, `false` when the submission was ignored.
    ///
    /// # Errors
    ///
    /// Returns the failing clone stage's error, or the listing error after a
    /// successful clone.
    pub async fn submit_clone(&mut self, fields: &CloneFields) -> BrowserResult<bool> {
        let result = self.submit_clone_inner(fields).await;
        self.surface("clone", result)
    }

    async fn submit_clone_inner(&mut self, fields: &CloneFields) -> BrowserResult<bool> {
        let Page::CloneForm(form) = self.nav.current() else {
            return Err(self.wrong_page("clone"));
        };
        let pipeline = form.pipeline();
        let outcome = pipeline
            .submit(&self.backend, fields, GitProgressParser, &mut self.screen)
            .await?;
        drop(pipeline);

        match outcome {
            CloneOutcome::Ignored => Ok(false),
            CloneOutcome::Cloned(repo) => {
                let name = repo.summary().name.clone();
                let listed = clone::return_to_repo_list(&mut self.nav, &self.backend).await;
                self.screen.show(self.nav.current());
                listed?;
                self.screen.notice(&format!("cloned {name}"));
                Ok(true)
            }
        }
    }

    /// Shows rendered history row `index`.
    ///
    /// # Errors
    ///
    /// Returns a selection error.
    pub fn select_commit(&mut self, index: usize) -> BrowserResult<()> {
        let result = self.select_commit_inner(index);
        self.surface("select commit", result)
    }

    fn select_commit_inner(&mut self, index: usize) -> BrowserResult<()> {
        let Page::History(history) = self.nav.current() else {
            return Err(self.wrong_page("select commit"));
        };
        let rows = history.list.rows();
        let commit = rows
            .get(index)
            .map(|row| row.commit.clone())
            .ok_or_else(|| selection("commit", index, rows.len()))?;
        let repo = history.repo.clone();
        self.push(Page::CommitDetail(CommitDetailPage { repo, commit }));
        Ok(())
    }

    /// Loads commit `hash` of the current repository and shows it.
    ///
    /// # Errors
    ///
    /// Returns the load error, or `InputError::WrongPage` outside a
    /// repository.
    pub async fn open_commit(&mut self, hash: &str) -> BrowserResult<()> {
        let result = self.open_commit_inner(hash).await;
        self.surface("open commit", result)
    }

    async fn open_commit_inner(&mut self, hash: &str) -> BrowserResult<()> {
        let Some(repo) = self.nav.current().repo().cloned() else {
            return Err(self.wrong_page("open commit"));
        };
        let commit = repo.load_commit(hash).await?;
        self.push(Page::CommitDetail(CommitDetailPage { repo, commit }));
        Ok(())
    }

    /// Shows the tree of the current commit.
    ///
    /// # Errors
    ///
    /// Returns the tree load error.
    pub async fn enter_tree(&mut self) -> BrowserResult<()> {
        let result = self.enter_tree_inner().await;
        self.surface("enter tree", result)
    }

    async fn enter_tree_inner(&mut self) -> BrowserResult<()> {
        let Page::CommitDetail(detail) = self.nav.current() else {
            return Err(self.wrong_page("enter tree"));
        };
        let repo = detail.repo.clone();
        let hash = detail.commit.tree.clone();
        let entries = repo.load_tree(&hash).await?;
        self.push(Page::FileTree(FileTreePage {
            repo,
            hash,
            entries,
        }));
        Ok(())
    }

    /// Replaces the current commit with its parent `index`.
    ///
    /// Back from the parent lands on the page below the replaced commit.
    ///
    /// # Errors
    ///
    /// Returns a selection error or the commit load error.
    pub async fn ascend(&mut self, index: usize) -> BrowserResult<()> {
        let result = self.ascend_inner(index).await;
        self.surface("ascend", result)
    }

    async fn ascend_inner(&mut self, index: usize) -> BrowserResult<()> {
        let Page::CommitDetail(detail) = self.nav.current() else {
            return Err(self.wrong_page("ascend"));
        };
        let parents = &detail.commit.parents;
        let parent = parents
            .get(index)
            .cloned()
            .ok_or_else(|| selection("parent", index, parents.len()))?;
        let repo = detail.repo.clone();
        let commit = repo.load_commit(&parent).await?;
        self.peer(Page::CommitDetail(CommitDetailPage { repo, commit }));
        Ok(())
    }

    /// Opens tree entry `index`.
    ///
    /// Returns `true` when a directory was opened. Files are not viewable;
    /// selecting one shows a notice and stays on the page.
    ///
    /// # Errors
    ///
    /// Returns a selection error or the tree load error.
    pub async fn open_entry(&mut self, index: usize) -> BrowserResult<bool> {
        let result = self.open_entry_inner(index).await;
        self.surface("open entry", result)
    }

    async fn open_entry_inner(&mut self, index: usize) -> BrowserResult<bool> {
        let Page::FileTree(tree) = self.nav.current() else {
            return Err(self.wrong_page("open entry"));
        };
        let entry = tree
            .entries
            .get(index)
            .cloned()
            .ok_or_else(|| selection("entry", index, tree.entries.len()))?;
        if !entry.is_dir() {
            debug!(name = %entry.name, "file selected");
            self.screen.notice("file viewing is not implemented");
            return Ok(false);
        }
        let repo = tree.repo.clone();
        let entries = repo.load_tree(&entry.hash).await?;
        self.push(Page::FileTree(FileTreePage {
            repo,
            hash: entry.hash,
            entries,
        }));
        Ok(true)
    }

    /// Activates row `index` of the current list page.
    ///
    /// # Errors
    ///
    /// Returns the error of the action the row maps to, or
    /// `InputError::WrongPage` on pages without rows.
    pub async fn select(&mut self, index: usize) -> BrowserResult<()> {
        match self.nav.current() {
            Page::RepoList(_) => self.open_repo(index).await.map(drop),
            Page::History(_) => self.select_commit(index),
            Page::FileTree(_) => self.open_entry(index).await.map(drop),
            Page::Home | Page::CloneForm(_) | Page::CommitDetail(_) => {
                let err = self.wrong_page("select");
                self.surface("select", Err(err))
            }
        }
    }

    /// Goes back one page. Returns `false` at the root.
    pub fn back(&mut self) -> bool {
        let Some(page) = self.nav.pop() else {
            return false;
        };
        debug!(closed = page.kind(), "page closed");
        drop(page);
        self.screen.show(self.nav.current());
        true
    }
}
