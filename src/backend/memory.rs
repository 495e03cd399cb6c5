// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process backend with scripted behaviour.
//!
//! ```text
//! MemoryBackend
//!   repos        Vec<MemoryRepo>
//!   knobs        fail_listing | reject_remote | fail_create | fail_stream_at
//!   fetch        FetchScript: Progress(line) | Delay(d) ... then outcome
//!   counters     create_calls, ReadProbe (reads, in flight, max in flight)
//! ```
//!
//! Used by the test suites and for exercising the controller without a
//! `git` executable.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tracing::{debug, trace};

use super::{
    Backend, CommitRecord, CommitStream, LoadedObject, ObjectKind, RemoteHandle, RepoSummary,
    Repository, StreamRead, TREE_MODE, TreeEntry,
};
use crate::clone::CloneRequest;
use crate::error::{BackendError, BrowserResult, InputError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One step of a scripted fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStep {
    /// Reports a raw progress line.
    Progress(String),
    /// Suspends the fetch.
    Delay(Duration),
}

/// Objects a scripted fetch installs.
#[derive(Debug, Clone, Default)]
pub struct Objects {
    /// History in walk order, newest first.
    pub commits: Vec<CommitRecord>,
    pub trees: HashMap<String, Vec<TreeEntry>>,
}

impl Objects {
    /// Linear history of `count` commits, each with a one-file tree.
    #[must_use]
    pub fn linear(count: usize) -> Self {
        let mut objects = Self::default();
        for n in (0..count).rev() {
            let hash = format!("{:040x}", n + 1);
            let tree = format!("{:040x}", n + 1 + 0x1_0000);
            let parents = if n == 0 {
                Vec::new()
            } else {
                vec![format!("{n:040x}")]
            };
            objects.trees.insert(
                tree.clone(),
                vec![TreeEntry {
                    mode: 0o100_644,
                    name: format!("file-{n}.txt"),
                    hash: format!("{:040x}", n + 1 + 0x2_0000),
                }],
            );
            objects.commits.push(CommitRecord {
                hash,
                message: format!("Commit number {n}\n"),
                parents,
                author: "Ada <ada@example.com>".to_string(),
                committer: "Ada <ada@example.com>".to_string(),
                tree,
            });
        }
        objects
    }

    /// Adds a directory `name` to the tree `parent`, holding `entries`.
    #[must_use]
    pub fn with_subtree(
        mut self,
        parent: &str,
        name: &str,
        hash: &str,
        entries: Vec<TreeEntry>,
    ) -> Self {
        if let Some(list) = self.trees.get_mut(parent) {
            list.push(TreeEntry {
                mode: TREE_MODE,
                name: name.to_string(),
                hash: hash.to_string(),
            });
        }
        self.trees.insert(hash.to_string(), entries);
        self
    }
}

/// Scripted fetch behaviour.
#[derive(Debug, Clone, Default)]
pub struct FetchScript {
    pub steps: Vec<FetchStep>,
    /// Error message reported after the steps ran.
    pub failure: Option<String>,
    /// Installed on success.
    pub objects: Objects,
}

/// Counters over commit stream reads.
#[derive(Debug, Default)]
pub struct ReadProbe {
    reads: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ReadProbe {
    /// Reads issued so far.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Highest number of reads outstanding at once.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Default)]
struct Knobs {
    fail_listing: Option<String>,
    reject_remote: Option<String>,
    fail_create: Option<String>,
    fail_stream_at: Option<usize>,
    read_delay: Option<Duration>,
    fetch: FetchScript,
}

#[derive(Debug)]
struct Shared {
    knobs: Arc<Mutex<Knobs>>,
    repos: Mutex<Vec<MemoryRepo>>,
    create_calls: AtomicUsize,
    probe: Arc<ReadProbe>,
}

/// Scripted in-memory store.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    shared: Arc<Shared>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                knobs: Arc::new(Mutex::new(Knobs::default())),
                repos: Mutex::new(Vec::new()),
                create_calls: AtomicUsize::new(0),
                probe: Arc::new(ReadProbe::default()),
            }),
        }
    }

    /// Adds a repository holding `objects`.
    #[must_use]
    pub fn with_repo(self, name: &str, url: &str, objects: Objects) -> Self {
        let summary = RepoSummary {
            name: name.to_string(),
            description: url.to_string(),
            url: url.to_string(),
        };
        let repo = MemoryRepo::new(summary, FetchScript::default(), &self.shared);
        *lock(&repo.objects) = objects;
        lock(&self.shared.repos).push(repo);
        self
    }

    /// Makes `list_repos` fail.
    #[must_use]
    pub fn fail_listing(self, message: &str) -> Self {
        lock(&self.shared.knobs).fail_listing = Some(message.to_string());
        self
    }

    /// Makes `remote` reject every url.
    #[must_use]
    pub fn reject_remote(self, message: &str) -> Self {
        lock(&self.shared.knobs).reject_remote = Some(message.to_string());
        self
    }

    /// Makes `create_repo` fail after counting the call.
    #[must_use]
    pub fn fail_create(self, message: &str) -> Self {
        lock(&self.shared.knobs).fail_create = Some(message.to_string());
        self
    }

    /// Makes every stream fail on its read at `position`.
    #[must_use]
    pub fn fail_stream_at(self, position: usize) -> Self {
        lock(&self.shared.knobs).fail_stream_at = Some(position);
        self
    }

    /// Suspends every stream read for `delay`.
    #[must_use]
    pub fn read_delay(self, delay: Duration) -> Self {
        lock(&self.shared.knobs).read_delay = Some(delay);
        self
    }

    /// Fetch script given to repositories created from now on.
    #[must_use]
    pub fn fetch_script(self, script: FetchScript) -> Self {
        lock(&self.shared.knobs).fetch = script;
        self
    }

    /// Number of `create_repo` calls, failed ones included.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.shared.create_calls.load(Ordering::SeqCst)
    }

    /// Counters shared by every stream of this backend.
    #[must_use]
    pub fn read_probe(&self) -> Arc<ReadProbe> {
        Arc::clone(&self.shared.probe)
    }

    /// Looks up a stored repository by name.
    #[must_use]
    pub fn repo(&self, name: &str) -> Option<MemoryRepo> {
        lock(&self.shared.repos)
            .iter()
            .find(|repo| repo.summary.name == name)
            .cloned()
    }
}

impl Backend for MemoryBackend {
    type Repo = MemoryRepo;

    fn list_repos(&self) -> BoxFuture<'_, BrowserResult<Vec<MemoryRepo>>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            if let Some(message) = lock(&self.shared.knobs).fail_listing.clone() {
                return Err(BackendError::List(message).into());
            }
            Ok(lock(&self.shared.repos).clone())
        })
    }

    fn remote(&self, url: &str) -> BrowserResult<RemoteHandle> {
        if let Some(message) = lock(&self.shared.knobs).reject_remote.clone() {
            return Err(InputError::InvalidRemote {
                url: url.to_string(),
                message,
            }
            .into());
        }
        RemoteHandle::parse(url)
    }

    fn create_repo<'a>(
        &'a self,
        request: &'a CloneRequest,
    ) -> BoxFuture<'a, BrowserResult<MemoryRepo>> {
        Box::pin(async move {
            self.shared.create_calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;

            let (failure, script) = {
                let knobs = lock(&self.shared.knobs);
                (knobs.fail_create.clone(), knobs.fetch.clone())
            };
            if let Some(message) = failure {
                return Err(BackendError::Create {
                    name: request.name.clone(),
                    message,
                }
                .into());
            }

            let mut repos = lock(&self.shared.repos);
            if repos.iter().any(|repo| repo.summary.name == request.name) {
                return Err(BackendError::AlreadyExists(request.name.clone()).into());
            }
            let summary = RepoSummary {
                name: request.name.clone(),
                description: request.description.clone(),
                url: request.url.clone(),
            };
            let repo = MemoryRepo::new(summary, script, &self.shared);
            repos.push(repo.clone());
            debug!(name = %request.name, "memory repository created");
            Ok(repo)
        })
    }
}

/// Handle on an in-memory repository.
#[derive(Debug, Clone)]
pub struct MemoryRepo {
    summary: RepoSummary,
    objects: Arc<Mutex<Objects>>,
    script: Arc<FetchScript>,
    knobs: Arc<Mutex<Knobs>>,
    probe: Arc<ReadProbe>,
}

impl MemoryRepo {
    fn new(summary: RepoSummary, script: FetchScript, shared: &Shared) -> Self {
        Self {
            summary,
            objects: Arc::new(Mutex::new(Objects::default())),
            script: Arc::new(script),
            knobs: Arc::clone(&shared.knobs),
            probe: Arc::clone(&shared.probe),
        }
    }

    /// Number of commits currently stored.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        lock(&self.objects).commits.len()
    }
}

impl Repository for MemoryRepo {
    type Stream = MemoryStream;

    fn summary(&self) -> &RepoSummary {
        &self.summary
    }

    fn log_walk<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, BrowserResult<MemoryStream>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let commits = lock(&self.objects).commits.clone();
            let start = if reference == "HEAD" && !commits.is_empty() {
                Some(0)
            } else {
                commits.iter().position(|c| c.hash == reference)
            };
            let Some(start) = start else {
                return Err(BackendError::LogWalk {
                    reference: reference.to_string(),
                    message: "reference does not resolve to a commit".to_string(),
                }
                .into());
            };

            let knobs = lock(&self.knobs);
            Ok(MemoryStream {
                commits: Arc::new(commits.into_iter().skip(start).collect()),
                pos: 0,
                fail_at: knobs.fail_stream_at,
                delay: knobs.read_delay,
                probe: Arc::clone(&self.probe),
            })
        })
    }

    fn load_as<'a>(
        &'a self,
        kind: ObjectKind,
        hash: &'a str,
    ) -> BoxFuture<'a, BrowserResult<LoadedObject>> {
        Box::pin(async move {
            tokio::task::yield_now().await;
            let objects = lock(&self.objects);
            let commit = objects.commits.iter().find(|c| c.hash == hash);
            let tree = objects.trees.get(hash);
            match (kind, commit, tree) {
                (ObjectKind::Commit, Some(commit), _) => Ok(LoadedObject::Commit(commit.clone())),
                (ObjectKind::Tree, _, Some(entries)) => Ok(LoadedObject::Tree(entries.clone())),
                (_, None, None) => Err(BackendError::Load {
                    kind: kind.as_str(),
                    hash: hash.to_string(),
                    message: "object not found".to_string(),
                }
                .into()),
                _ => Err(BackendError::UnexpectedObject {
                    expected: kind.as_str(),
                    hash: hash.to_string(),
                }
                .into()),
            }
        })
    }

    fn fetch<'a>(
        &'a self,
        remote: &'a RemoteHandle,
        on_progress: &'a mut (dyn FnMut(&str) + Send),
    ) -> BoxFuture<'a, BrowserResult<()>> {
        Box::pin(async move {
            debug!(url = %remote.url(), steps = self.script.steps.len(), "scripted fetch");
            for step in &self.script.steps {
                match step {
                    FetchStep::Progress(line) => on_progress(line),
                    FetchStep::Delay(delay) => tokio::time::sleep(*delay).await,
                }
            }
            if let Some(message) = &self.script.failure {
                return Err(BackendError::Fetch {
                    url: remote.url().to_string(),
                    message: message.clone(),
                }
                .into());
            }
            *lock(&self.objects) = self.script.objects.clone();
            Ok(())
        })
    }
}

/// Stream over a snapshot of a repository's history.
#[derive(Debug)]
pub struct MemoryStream {
    commits: Arc<Vec<CommitRecord>>,
    pos: usize,
    fail_at: Option<usize>,
    delay: Option<Duration>,
    probe: Arc<ReadProbe>,
}

impl CommitStream for MemoryStream {
    fn read(mut self) -> BoxFuture<'static, BrowserResult<StreamRead<Self>>> {
        Box::pin(async move {
            self.probe.enter();
            match self.delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => tokio::task::yield_now().await,
            }
            self.probe.leave();

            if self.fail_at == Some(self.pos) {
                return Err(BackendError::StreamRead(format!(
                    "scripted failure at record {}",
                    self.pos
                ))
                .into());
            }
            match self.commits.get(self.pos).cloned() {
                Some(commit) => {
                    trace!(pos = self.pos, "memory stream record");
                    self.pos += 1;
                    Ok(StreamRead::Record(commit, self))
                }
                None => Ok(StreamRead::End),
            }
        })
    }
}
