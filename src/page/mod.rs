// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Page descriptors held by the navigation stack.
//!
//! ```text
//! Home
//!  └─ RepoList ──┬─ CloneForm
//!                └─ History ── CommitDetail ──┬─ CommitDetail (peer: parent)
//!                                             └─ FileTree ── FileTree
//! ```
//!
//! Each variant owns the state its page needs. Dropping a page releases
//! that state, including an open commit stream.

use std::sync::Arc;

use crate::backend::{CommitRecord, Repository, TreeEntry};
use crate::clone::ClonePipeline;
use crate::history::{CommitList, CommitPaginator};

/// A visible page.
pub enum Page<R: Repository> {
    /// Root placeholder, never popped.
    Home,
    RepoList(RepoListPage<R>),
    CloneForm(CloneFormPage),
    History(HistoryPage<R>),
    CommitDetail(CommitDetailPage<R>),
    FileTree(FileTreePage<R>),
}

impl<R: Repository> Page<R> {
    /// Short lower-case name of the page kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::RepoList(_) => "repository list",
            Self::CloneForm(_) => "clone form",
            Self::History(_) => "history",
            Self::CommitDetail(_) => "commit",
            Self::FileTree(_) => "file tree",
        }
    }

    /// Repository the page belongs to, if any.
    #[must_use]
    pub const fn repo(&self) -> Option<&R> {
        match self {
            Self::History(page) => Some(&page.repo),
            Self::CommitDetail(page) => Some(&page.repo),
            Self::FileTree(page) => Some(&page.repo),
            Self::Home | Self::RepoList(_) | Self::CloneForm(_) => None,
        }
    }

    /// Header text; repository pages show the repository name.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Home => "Git Browser".to_string(),
            Self::RepoList(_) => "Git Repositories".to_string(),
            Self::CloneForm(_) => "Clone Repository".to_string(),
            _ => self
                .repo()
                .map(|repo| repo.summary().name.clone())
                .unwrap_or_default(),
        }
    }
}

impl<R: Repository> std::fmt::Debug for Page<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Page").field(&self.kind()).finish()
    }
}

/// First seven characters of a hash.
#[must_use]
pub fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Stored repositories.
#[derive(Debug)]
pub struct RepoListPage<R> {
    repos: Vec<R>,
}

impl<R: Repository> RepoListPage<R> {
    #[must_use]
    pub const fn new(repos: Vec<R>) -> Self {
        Self { repos }
    }

    #[must_use]
    pub fn repos(&self) -> &[R] {
        &self.repos
    }
}

/// Clone form; owns the pipeline so resubmissions hit the same guard.
#[derive(Debug)]
pub struct CloneFormPage {
    default_remote: String,
    pipeline: Arc<ClonePipeline>,
}

impl CloneFormPage {
    #[must_use]
    pub fn new(default_remote: impl Into<String>, pipeline: ClonePipeline) -> Self {
        Self {
            default_remote: default_remote.into(),
            pipeline: Arc::new(pipeline),
        }
    }

    /// Url pre-filled in the form.
    #[must_use]
    pub fn default_remote(&self) -> &str {
        &self.default_remote
    }

    /// Shared handle on the form's pipeline.
    #[must_use]
    pub fn pipeline(&self) -> Arc<ClonePipeline> {
        Arc::clone(&self.pipeline)
    }
}

/// Paginated history of one repository.
pub struct HistoryPage<R: Repository> {
    pub repo: R,
    pub paginator: CommitPaginator<R::Stream>,
    pub list: CommitList,
}

impl<R: Repository> HistoryPage<R> {
    #[must_use]
    pub fn new(repo: R, paginator: CommitPaginator<R::Stream>) -> Self {
        Self {
            repo,
            paginator,
            list: CommitList::default(),
        }
    }
}

/// One commit with its metadata.
#[derive(Debug)]
pub struct CommitDetailPage<R> {
    pub repo: R,
    pub commit: CommitRecord,
}

impl<R> CommitDetailPage<R> {
    /// Labelled rows in display order.
    ///
    /// Parents are labelled by count and the committer only appears when it
    /// differs from the author.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let commit = &self.commit;
        let mut fields = vec![
            ("Message", commit.message.trim_end().to_string()),
            ("Tree", commit.tree.clone()),
        ];
        match commit.parents.len() {
            0 => {}
            1 => fields.push(("Parent", commit.parents[0].clone())),
            _ => fields.push(("Parents", commit.parents.join(" "))),
        }
        fields.push(("Author", commit.author.clone()));
        if commit.committer != commit.author {
            fields.push(("Committer", commit.committer.clone()));
        }
        fields.push(("Hash", commit.hash.clone()));
        fields
    }
}

/// Entries of one tree object.
#[derive(Debug)]
pub struct FileTreePage<R> {
    pub repo: R,
    pub hash: String,
    pub entries: Vec<TreeEntry>,
}
