// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Store of bare repositories driven by the git CLI.
//!
//! ```text
//! <root>/
//!   conquest.git/     bare repository
//!     description     repository description
//!     config          remote.origin.url
//!
//! detection   gix::open            (no subprocess)
//! everything  git -C <repo> ...    (GIT_TERMINAL_PROMPT=0)
//! log_walk    git log, one record per read, killed on drop
//! ```

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, ChildStderr, ChildStdout, Command};
use tracing::{debug, info, trace, warn};

use super::{
    Backend, CommitRecord, CommitStream, LoadedObject, ObjectKind, RemoteHandle, RepoSummary,
    Repository, StreamRead, TreeEntry,
};
use crate::clone::CloneRequest;
use crate::error::{BackendError, BrowserResult, InputError};

/// Record separator between `git log` entries.
const RECORD_SEPARATOR: u8 = 0x1e;

/// hash, tree, parents, author, committer, raw body; NUL separated.
const COMMIT_FORMAT: &str = "%H%x00%T%x00%P%x00%an <%ae>%x00%cn <%ce>%x00%B";

/// Text git writes into a fresh `description` file.
const DEFAULT_DESCRIPTION_PREFIX: &str = "Unnamed repository";

/// Located git executable.
#[derive(Debug, Clone)]
struct Git {
    program: Arc<Path>,
}

impl Git {
    fn locate(program: &str) -> BrowserResult<Self> {
        let path = which::which(program)
            .map_err(|e| BackendError::GitNotFound(format!("{program}: {e}")))?;
        debug!(git = %path.display(), "git executable located");
        Ok(Self {
            program: Arc::from(path),
        })
    }

    /// Command running in `dir`. Never prompts and dies with its handle.
    fn command(&self, dir: &Path) -> Command {
        let mut command = Command::new(self.program.as_ref());
        command
            .arg("-C")
            .arg(dir)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        command
    }

    /// Runs to completion and returns stdout.
    async fn run(&self, dir: &Path, args: &[&str]) -> BrowserResult<String> {
        trace!(dir = %dir.display(), args = ?args, "git");
        let output = self.command(dir).args(args).output().await?;
        if !output.status.success() {
            return Err(BackendError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: failure_message(output.status, &output.stderr),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Like [`Git::run`], but a non-zero exit is `None`.
    async fn query(&self, dir: &Path, args: &[&str]) -> BrowserResult<Option<String>> {
        let output = self.command(dir).args(args).output().await?;
        Ok(output
            .status
            .success()
            .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string()))
    }
}

fn failure_message(status: ExitStatus, stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.is_empty() {
        format!("exited with {status}")
    } else {
        text.to_string()
    }
}

/// Production backend: one bare repository per store entry.
#[derive(Debug, Clone)]
pub struct GitCliBackend {
    root: PathBuf,
    git: Git,
}

impl GitCliBackend {
    /// Opens the store at `root`, locating the `git` executable.
    ///
    /// The directory is created on the first clone.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::GitNotFound` if `git` cannot be located.
    pub fn new(root: impl Into<PathBuf>, git: &str) -> BrowserResult<Self> {
        Ok(Self {
            root: root.into(),
            git: Git::locate(git)?,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn repo_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.git"))
    }

    /// Opens the repository called `name`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::UnknownRepo` if no such repository exists.
    pub async fn open(&self, name: &str) -> BrowserResult<GitCliRepo> {
        let path = self.repo_path(name);
        if gix::open(&path).is_err() {
            return Err(InputError::UnknownRepo(name.to_string()).into());
        }
        self.load_repo(name, path).await
    }

    async fn load_repo(&self, name: &str, path: PathBuf) -> BrowserResult<GitCliRepo> {
        let description = match tokio::fs::read_to_string(path.join("description")).await {
            Ok(text) if !text.starts_with(DEFAULT_DESCRIPTION_PREFIX) => text.trim().to_string(),
            _ => String::new(),
        };
        let url = self
            .git
            .query(&path, &["config", "--get", "remote.origin.url"])
            .await?
            .unwrap_or_default();
        Ok(GitCliRepo {
            summary: RepoSummary {
                name: name.to_string(),
                description,
                url,
            },
            path: Arc::from(path),
            git: self.git.clone(),
        })
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.starts_with('.') || name.contains(['/', '\\']) || name.chars().any(char::is_control) {
        return Err("name must be a plain directory name".to_string());
    }
    Ok(())
}

impl Backend for GitCliBackend {
    type Repo = GitCliRepo;

    fn list_repos(&self) -> BoxFuture<'_, BrowserResult<Vec<GitCliRepo>>> {
        Box::pin(async move {
            let mut entries = match tokio::fs::read_dir(&self.root).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(root = %self.root.display(), "store does not exist yet");
                    return Ok(Vec::new());
                }
                Err(e) => {
                    return Err(BackendError::List(format!("{}: {e}", self.root.display())).into());
                }
            };

            let mut repos = Vec::new();
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| BackendError::List(e.to_string()))?
            {
                let path = entry.path();
                let Some(name) = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(".git"))
                    .map(str::to_string)
                else {
                    continue;
                };
                if gix::open(&path).is_err() {
                    trace!(path = %path.display(), "skipping non-repository");
                    continue;
                }
                repos.push(self.load_repo(&name, path).await?);
            }
            repos.sort_by(|a, b| a.summary.name.cmp(&b.summary.name));
            debug!(count = repos.len(), "repositories listed");
            Ok(repos)
        })
    }

    fn remote(&self, url: &str) -> BrowserResult<RemoteHandle> {
        RemoteHandle::parse(url)
    }

    fn create_repo<'a>(
        &'a self,
        request: &'a CloneRequest,
    ) -> BoxFuture<'a, BrowserResult<GitCliRepo>> {
        Box::pin(async move {
            let create_error = |message: String| BackendError::Create {
                name: request.name.clone(),
                message,
            };
            validate_name(&request.name).map_err(create_error)?;

            let path = self.repo_path(&request.name);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Err(BackendError::AlreadyExists(request.name.clone()).into());
            }
            tokio::fs::create_dir_all(&self.root)
                .await
                .map_err(|e| create_error(format!("{}: {e}", self.root.display())))?;

            let path_arg = path.to_string_lossy();
            self.git
                .run(&self.root, &["init", "--bare", "--quiet", &path_arg])
                .await?;
            tokio::fs::write(path.join("description"), format!("{}\n", request.description))
                .await
                .map_err(|e| create_error(e.to_string()))?;
            self.git
                .run(&path, &["remote", "add", "origin", &request.url])
                .await?;

            info!(name = %request.name, path = %path.display(), "bare repository created");
            Ok(GitCliRepo {
                summary: RepoSummary {
                    name: request.name.clone(),
                    description: request.description.clone(),
                    url: request.url.clone(),
                },
                path: Arc::from(path),
                git: self.git.clone(),
            })
        })
    }
}

/// Handle on one bare repository of the store.
#[derive(Debug, Clone)]
pub struct GitCliRepo {
    summary: RepoSummary,
    path: Arc<Path>,
    git: Git,
}

impl GitCliRepo {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Points HEAD at a fetched branch when it does not resolve.
    async fn repair_head(&self) -> BrowserResult<()> {
        let resolves = self
            .git
            .query(&self.path, &["rev-parse", "--verify", "-q", "HEAD^{commit}"])
            .await?
            .is_some();
        if resolves {
            return Ok(());
        }
        let heads = self
            .git
            .run(&self.path, &["for-each-ref", "--format=%(refname)", "refs/heads"])
            .await?;
        let heads: Vec<&str> = heads.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let preferred = ["refs/heads/main", "refs/heads/master"]
            .into_iter()
            .find(|r| heads.contains(r))
            .or_else(|| heads.first().copied());
        if let Some(head) = preferred {
            debug!(head, "pointing HEAD at fetched branch");
            self.git
                .run(&self.path, &["symbolic-ref", "HEAD", head])
                .await?;
        }
        Ok(())
    }
}

/// Splits `git fetch` stderr into `\r` or `\n` terminated lines.
async fn pump_progress(
    stderr: ChildStderr,
    on_progress: &mut (dyn FnMut(&str) + Send),
) -> std::io::Result<Vec<String>> {
    let mut reader = BufReader::new(stderr);
    let mut line = Vec::new();
    let mut diagnostics = Vec::new();
    let mut emit = |line: &mut Vec<u8>, diagnostics: &mut Vec<String>| {
        let text = String::from_utf8_lossy(line);
        let text = text.trim();
        if !text.is_empty() {
            if text.starts_with("fatal:") || text.starts_with("error:") {
                diagnostics.push(text.to_string());
            }
            on_progress(text);
        }
        line.clear();
    };
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            emit(&mut line, &mut diagnostics);
            return Ok(diagnostics);
        }
        let len = buf.len();
        for &byte in buf {
            if byte == b'\r' || byte == b'\n' {
                emit(&mut line, &mut diagnostics);
            } else {
                line.push(byte);
            }
        }
        reader.consume(len);
    }
}

impl Repository for GitCliRepo {
    type Stream = GitLogStream;

    fn summary(&self) -> &RepoSummary {
        &self.summary
    }

    fn log_walk<'a>(&'a self, reference: &'a str) -> BoxFuture<'a, BrowserResult<GitLogStream>> {
        Box::pin(async move {
            let walk_error = |message: String| BackendError::LogWalk {
                reference: reference.to_string(),
                message,
            };
            let spec = format!("{reference}^{{commit}}");
            let start = self
                .git
                .query(&self.path, &["rev-parse", "--verify", "-q", &spec])
                .await?
                .ok_or_else(|| walk_error("reference does not resolve to a commit".to_string()))?;

            let format = format!("--format={COMMIT_FORMAT}%x1e");
            let mut child = self
                .git
                .command(&self.path)
                .args(["log", &format, &start])
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| walk_error(e.to_string()))?;
            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| walk_error("stdout not captured".to_string()))?;
            debug!(repo = %self.summary.name, start = %start, "history walk started");
            Ok(GitLogStream {
                reader: BufReader::new(stdout),
                child,
                buf: Vec::new(),
            })
        })
    }

    fn load_as<'a>(
        &'a self,
        kind: ObjectKind,
        hash: &'a str,
    ) -> BoxFuture<'a, BrowserResult<LoadedObject>> {
        Box::pin(async move {
            let load_error = |message: String| BackendError::Load {
                kind: kind.as_str(),
                hash: hash.to_string(),
                message,
            };
            let actual = self
                .git
                .query(&self.path, &["cat-file", "-t", hash])
                .await?
                .ok_or_else(|| load_error("object not found".to_string()))?;
            if actual != kind.as_str() {
                return Err(BackendError::UnexpectedObject {
                    expected: kind.as_str(),
                    hash: hash.to_string(),
                }
                .into());
            }

            match kind {
                ObjectKind::Tree => {
                    let listing = self.git.run(&self.path, &["ls-tree", "-z", hash]).await?;
                    let entries = parse_tree(&listing).map_err(load_error)?;
                    Ok(LoadedObject::Tree(entries))
                }
                ObjectKind::Commit => {
                    let format = format!("--format={COMMIT_FORMAT}");
                    let shown = self
                        .git
                        .run(&self.path, &["show", "-s", &format, hash])
                        .await?;
                    let commit = parse_commit(shown.trim_end_matches('\n'))
                        .ok_or_else(|| load_error("malformed commit".to_string()))?;
                    Ok(LoadedObject::Commit(commit))
                }
            }
        })
    }

    fn fetch<'a>(
        &'a self,
        remote: &'a RemoteHandle,
        on_progress: &'a mut (dyn FnMut(&str) + Send),
    ) -> BoxFuture<'a, BrowserResult<()>> {
        Box::pin(async move {
            let fetch_error = |message: String| BackendError::Fetch {
                url: remote.url().to_string(),
                message,
            };
            info!(repo = %self.summary.name, url = %remote.url(), "fetch started");
            let mut child = self
                .git
                .command(&self.path)
                .args([
                    "fetch",
                    "--progress",
                    remote.url(),
                    "+refs/heads/*:refs/heads/*",
                    "+refs/tags/*:refs/tags/*",
                ])
                .stdout(Stdio::null())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| fetch_error(e.to_string()))?;

            let diagnostics = match child.stderr.take() {
                Some(stderr) => pump_progress(stderr, on_progress)
                    .await
                    .map_err(|e| fetch_error(e.to_string()))?,
                None => Vec::new(),
            };
            let status = child.wait().await?;
            if !status.success() {
                let message = if diagnostics.is_empty() {
                    format!("git fetch exited with {status}")
                } else {
                    diagnostics.join("; ")
                };
                return Err(fetch_error(message).into());
            }

            self.repair_head().await?;
            info!(repo = %self.summary.name, "fetch finished");
            Ok(())
        })
    }
}

/// Lazy `git log` reader. Dropping it kills the child process.
#[derive(Debug)]
pub struct GitLogStream {
    reader: BufReader<ChildStdout>,
    child: Child,
    buf: Vec<u8>,
}

impl GitLogStream {
    async fn finish(mut self) -> BrowserResult<StreamRead<Self>> {
        let status = self.child.wait().await?;
        if status.success() {
            trace!("git log finished");
            return Ok(StreamRead::End);
        }
        let mut stderr = Vec::new();
        if let Some(mut pipe) = self.child.stderr.take() {
            pipe.read_to_end(&mut stderr).await.ok();
        }
        warn!(%status, "git log failed");
        Err(BackendError::StreamRead(failure_message(status, &stderr)).into())
    }
}

impl CommitStream for GitLogStream {
    fn read(mut self) -> BoxFuture<'static, BrowserResult<StreamRead<Self>>> {
        Box::pin(async move {
            loop {
                self.buf.clear();
                let n = self
                    .reader
                    .read_until(RECORD_SEPARATOR, &mut self.buf)
                    .await
                    .map_err(|e| BackendError::StreamRead(e.to_string()))?;
                if n == 0 {
                    return self.finish().await;
                }

                let raw = self.buf.strip_suffix(&[RECORD_SEPARATOR]).unwrap_or(&self.buf);
                let text = String::from_utf8_lossy(raw).into_owned();
                let text = text.trim_start_matches('\n');
                if text.trim().is_empty() {
                    continue;
                }
                let commit = parse_commit(text.trim_end_matches('\n')).ok_or_else(|| {
                    BackendError::StreamRead("malformed git log record".to_string())
                })?;
                trace!(hash = %commit.hash, "git log record");
                return Ok(StreamRead::Record(commit, self));
            }
        })
    }
}

/// Parses one [`COMMIT_FORMAT`] record.
pub(crate) fn parse_commit(record: &str) -> Option<CommitRecord> {
    let mut fields = record.splitn(6, '\0');
    let hash = fields.next()?.trim().to_string();
    let tree = fields.next()?.to_string();
    let parents = fields
        .next()?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let author = fields.next()?.to_string();
    let committer = fields.next()?.to_string();
    let message = fields.next()?.to_string();
    if hash.is_empty() {
        return None;
    }
    Some(CommitRecord {
        hash,
        message,
        parents,
        author,
        committer,
        tree,
    })
}

/// Parses `git ls-tree -z` output.
pub(crate) fn parse_tree(listing: &str) -> Result<Vec<TreeEntry>, String> {
    listing
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (meta, name) = entry
                .split_once('\t')
                .ok_or_else(|| format!("malformed tree entry '{entry}'"))?;
            let mut meta = meta.split(' ');
            let (Some(mode), Some(_kind), Some(hash)) = (meta.next(), meta.next(), meta.next())
            else {
                return Err(format!("malformed tree entry '{entry}'"));
            };
            let mode = u32::from_str_radix(mode, 8).map_err(|e| format!("mode '{mode}': {e}"))?;
            Ok(TreeEntry {
                mode,
                name: name.to_string(),
                hash: hash.to_string(),
            })
        })
        .collect()
}
