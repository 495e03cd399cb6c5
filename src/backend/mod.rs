// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version-control backend abstraction layer.
//!
//! ```text
//!            Backend
//!   list_repos  remote  create_repo
//!        |                  |
//!        v                  v
//!          Repository (handle)
//!   log_walk   load_as   fetch(on_progress)
//!        |
//!        v
//!   CommitStream::read(self) --> Record(commit, renewed) | End
//!
//!   GitCliBackend   bare repos on disk, git CLI + gix detection
//!   MemoryBackend   scripted, in-process (tests, demos)
//! ```
//!
//! Every async operation returns a `BoxFuture`; these calls are the only
//! suspension points of the controller.

pub mod git_cli;
pub mod memory;

use futures_util::future::BoxFuture;
use serde::Serialize;

use crate::clone::CloneRequest;
use crate::error::{BackendError, BrowserResult, InputError};

/// Git mode of a subdirectory entry.
pub const TREE_MODE: u32 = 0o40000;

/// A commit as produced by a history walk. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub parents: Vec<String>,
    pub author: String,
    pub committer: String,
    pub tree: String,
}

impl CommitRecord {
    /// First line of the message.
    #[must_use]
    pub fn title(&self) -> &str {
        self.message.split(['\r', '\n']).next().unwrap_or_default()
    }
}

/// One entry of a tree object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub mode: u32,
    pub name: String,
    pub hash: String,
}

impl TreeEntry {
    /// True for subdirectories, which can be descended into.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.mode == TREE_MODE
    }
}

/// Object kinds that [`Repository::load_as`] can dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Tree,
    Commit,
}

impl ObjectKind {
    /// Lower-case git name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

/// A dereferenced object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedObject {
    Tree(Vec<TreeEntry>),
    Commit(CommitRecord),
}

/// Result of a single stream read.
///
/// A record hands back the renewed stream; the end marker consumes it.
pub enum StreamRead<S> {
    Record(CommitRecord, S),
    End,
}

/// Validated remote, built synchronously from a url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteHandle {
    url: String,
    scheme: String,
}

impl RemoteHandle {
    /// Parses `url` with the git url grammar.
    ///
    /// # Errors
    ///
    /// Returns `InputError::EmptyUrl` for blank input and
    /// `InputError::InvalidRemote` when the url cannot be parsed.
    pub fn parse(url: &str) -> BrowserResult<Self> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyUrl.into());
        }
        let parsed = gix::url::parse(trimmed.as_bytes().into()).map_err(|e| {
            InputError::InvalidRemote {
                url: trimmed.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            url: trimmed.to_string(),
            scheme: parsed.scheme.as_str().to_string(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Transport scheme, e.g. `git`, `https`, `ssh` or `file`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

/// Summary of a stored repository, as shown in the repository list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub description: String,
    pub url: String,
}

/// Sequential, pull-based source of commit records.
///
/// `read` consumes the handle, so a second read can only be issued once the
/// first has resolved and handed the stream back.
pub trait CommitStream: Send + Sized + 'static {
    /// Reads the next record.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::StreamRead` if the producer fails; the stream is
    /// consumed and no further reads are possible.
    fn read(self) -> BoxFuture<'static, BrowserResult<StreamRead<Self>>>;
}

/// Handle on one repository.
pub trait Repository: Clone + Send + Sync + 'static {
    /// Stream type produced by [`Repository::log_walk`].
    type Stream: CommitStream;

    /// Repository name and description.
    fn summary(&self) -> &RepoSummary;

    /// Starts a history walk from `reference`.
    fn log_walk<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, BrowserResult<Self::Stream>>;

    /// Dereferences `hash` as an object of the given kind.
    fn load_as<'a>(
        &'a self,
        kind: ObjectKind,
        hash: &'a str,
    ) -> BoxFuture<'a, BrowserResult<LoadedObject>>;

    /// Fetches from `remote`, reporting one raw progress line per call.
    fn fetch<'a>(
        &'a self,
        remote: &'a RemoteHandle,
        on_progress: &'a mut (dyn FnMut(&str) + Send),
    ) -> BoxFuture<'a, BrowserResult<()>>;

    /// Loads a tree, rejecting other kinds.
    fn load_tree<'a>(&'a self, hash: &'a str) -> BoxFuture<'a, BrowserResult<Vec<TreeEntry>>> {
        Box::pin(async move {
            match self.load_as(ObjectKind::Tree, hash).await? {
                LoadedObject::Tree(entries) => Ok(entries),
                LoadedObject::Commit(_) => Err(BackendError::UnexpectedObject {
                    expected: "tree",
                    hash: hash.to_string(),
                }
                .into()),
            }
        })
    }

    /// Loads a commit, rejecting other kinds.
    fn load_commit<'a>(&'a self, hash: &'a str) -> BoxFuture<'a, BrowserResult<CommitRecord>> {
        Box::pin(async move {
            match self.load_as(ObjectKind::Commit, hash).await? {
                LoadedObject::Commit(commit) => Ok(commit),
                LoadedObject::Tree(_) => Err(BackendError::UnexpectedObject {
                    expected: "commit",
                    hash: hash.to_string(),
                }
                .into()),
            }
        })
    }
}

/// Store of repositories.
pub trait Backend: Send + Sync {
    /// Repository handle type.
    type Repo: Repository;

    /// Lists all stored repositories.
    fn list_repos(&self) -> BoxFuture<'_, BrowserResult<Vec<Self::Repo>>>;

    /// Builds a remote handle from `url`. Synchronous and side-effect free.
    ///
    /// # Errors
    ///
    /// Returns an input error when `url` is empty or malformed.
    fn remote(&self, url: &str) -> BrowserResult<RemoteHandle>;

    /// Creates an empty repository for `request`.
    fn create_repo<'a>(&'a self, request: &'a CloneRequest)
    -> BoxFuture<'a, BrowserResult<Self::Repo>>;
}
