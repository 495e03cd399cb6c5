// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Clone pipeline.
//!
//! ```text
//! submit(fields)
//!   1. guard        working? -> Ignored
//!   2. derive       name <- last url segment minus ".git", description <- url
//!   3. remote       Backend::remote(url)        (sync, input error)
//!   4. create       Backend::create_repo(req)   (async)
//!   5. fetch        Repository::fetch  ---raw--> adapter --> ProgressSlot
//!                   interval tick      --------> ProgressSlot::latest --> render
//!   6. complete     stop timer, hide view, clear slot (also on drop);
//!                   caller pops two pages and re-lists repos
//!
//! Any failure resets `working` and is returned to the caller.
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use bon::Builder;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::backend::{Backend, RemoteHandle, Repository};
use crate::config::types::DEFAULT_PROGRESS_INTERVAL_MS;
use crate::error::BrowserResult;
use crate::nav::NavigationStack;
use crate::page::{Page, RepoListPage};
use crate::progress::{ProgressAdapter, ProgressSlot, ProgressTriple};

/// Raw clone form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct CloneFields {
    #[builder(into)]
    pub url: String,
    #[builder(into)]
    pub name: Option<String>,
    #[builder(into)]
    pub description: Option<String>,
}

/// Fully derived clone request handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub url: String,
    pub name: String,
    pub description: String,
}

impl CloneRequest {
    /// Fills in the fields the user left blank.
    #[must_use]
    pub fn derive(fields: &CloneFields) -> Self {
        let url = fields.url.trim().to_string();
        let name = non_blank(fields.name.as_deref()).map_or_else(|| derive_name(&url), str::to_string);
        let description =
            non_blank(fields.description.as_deref()).map_or_else(|| url.clone(), str::to_string);
        Self {
            url,
            name,
            description,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Repository name for `url`: its last path segment without a `.git` suffix.
///
/// ```
/// use git_browser::clone::derive_name;
///
/// assert_eq!(derive_name("git://example.com/foo/bar.git"), "bar");
/// assert_eq!(derive_name("https://example.com/foo/baz"), "baz");
/// ```
#[must_use]
pub fn derive_name(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    segment.strip_suffix(".git").unwrap_or(segment).to_string()
}

/// Progress rendering driven by the pipeline's timer.
pub trait CloneView {
    /// Called once before the fetch starts.
    fn show_progress(&mut self);

    /// Called on a timer tick while a progress value is stored.
    fn render_progress(&mut self, progress: &ProgressTriple);

    /// Called once after the fetch ends, whatever the outcome.
    fn hide_progress(&mut self);
}

/// Result of a submission.
#[derive(Debug)]
pub enum CloneOutcome<R> {
    /// The repository was created and fetched.
    Cloned(R),
    /// A clone was already running; nothing happened.
    Ignored,
}

/// Clears the working flag unless the clone completed.
struct WorkingGuard<'a> {
    flag: &'a AtomicBool,
    armed: bool,
}

impl WorkingGuard<'_> {
    fn complete(mut self) {
        self.armed = false;
    }
}

impl Drop for WorkingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.flag.store(false, Ordering::Release);
            debug!("clone admission released");
        }
    }
}

/// Shown progress for one fetch. Dropping it hides the view and empties
/// the slot, including when the fetch future is dropped mid-flight.
struct ProgressSession<'a, V: CloneView + ?Sized> {
    view: &'a mut V,
    slot: &'a ProgressSlot,
}

impl<'a, V: CloneView + ?Sized> ProgressSession<'a, V> {
    fn start(view: &'a mut V, slot: &'a ProgressSlot) -> Self {
        slot.clear();
        view.show_progress();
        Self { view, slot }
    }
}

impl<V: CloneView + ?Sized> Drop for ProgressSession<'_, V> {
    fn drop(&mut self) {
        self.slot.clear();
        self.view.hide_progress();
    }
}

/// Single clone operation owned by one clone form.
#[derive(Debug)]
pub struct ClonePipeline {
    working: AtomicBool,
    progress: ProgressSlot,
    interval: Duration,
}

impl Default for ClonePipeline {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_PROGRESS_INTERVAL_MS))
    }
}

impl ClonePipeline {
    /// Creates an idle pipeline rendering progress every `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            working: AtomicBool::new(false),
            progress: ProgressSlot::new(),
            interval,
        }
    }

    /// True while a submission is in flight, and after a successful one.
    #[must_use]
    pub fn is_working(&self) -> bool {
        self.working.load(Ordering::Acquire)
    }

    /// Most recent progress of the running fetch.
    #[must_use]
    pub const fn progress(&self) -> &ProgressSlot {
        &self.progress
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs the clone stages for `fields`.
    ///
    /// Returns [`CloneOutcome::Ignored`] without side effects while another
    /// submission holds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first failing stage's error: an input error from remote
    /// construction, or a backend error from creation or fetch. The working
    /// flag is cleared on every failure. A repository created before a
    /// failed fetch is left in place.
    pub async fn submit<B, A, V>(
        &self,
        backend: &B,
        fields: &CloneFields,
        adapter: A,
        view: &mut V,
    ) -> BrowserResult<CloneOutcome<B::Repo>>
    where
        B: Backend + ?Sized,
        A: ProgressAdapter + Send,
        V: CloneView + ?Sized,
    {
        if self.working.swap(true, Ordering::AcqRel) {
            debug!(url = %fields.url, "clone already running, submission ignored");
            return Ok(CloneOutcome::Ignored);
        }
        let guard = WorkingGuard {
            flag: &self.working,
            armed: true,
        };

        let request = CloneRequest::derive(fields);
        info!(url = %request.url, name = %request.name, "clone requested");

        let remote = backend.remote(&request.url).inspect_err(|e| {
            error!(url = %request.url, error = %e, "invalid remote");
        })?;

        let repo = backend.create_repo(&request).await.inspect_err(|e| {
            error!(name = %request.name, error = %e, "repository creation failed");
        })?;
        info!(name = %request.name, "repository created");

        self.fetch_with_progress(&repo, &remote, adapter, view)
            .await
            .inspect_err(|e| {
                error!(url = %request.url, error = %e, "fetch failed");
            })?;
        info!(name = %request.name, "clone finished");

        guard.complete();
        Ok(CloneOutcome::Cloned(repo))
    }

    async fn fetch_with_progress<R, A, V>(
        &self,
        repo: &R,
        remote: &RemoteHandle,
        mut adapter: A,
        view: &mut V,
    ) -> BrowserResult<()>
    where
        R: Repository,
        A: ProgressAdapter + Send,
        V: CloneView + ?Sized,
    {
        let slot = &self.progress;
        let mut session = ProgressSession::start(view, slot);
        let mut on_progress = |raw: &str| {
            if let Some(progress) = adapter.adapt(raw) {
                slot.publish(progress);
            }
        };

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut fetch = repo.fetch(remote, &mut on_progress);

        let result = loop {
            tokio::select! {
                biased;
                result = &mut fetch => break result,
                _ = ticker.tick() => {
                    if let Some(progress) = slot.latest() {
                        session.view.render_progress(&progress);
                    }
                }
            }
        };

        drop(fetch);
        drop(ticker);
        drop(session);
        result
    }
}

/// Completes a clone: drops the form and the list beneath it, then shows
/// a freshly listed repository list on top of the root.
///
/// # Errors
///
/// Returns the listing error; the stack is left at the root page.
pub async fn return_to_repo_list<B>(
    nav: &mut NavigationStack<Page<B::Repo>>,
    backend: &B,
) -> BrowserResult<()>
where
    B: Backend + ?Sized,
{
    drop(nav.pop());
    drop(nav.pop());

    let repos = backend.list_repos().await.inspect_err(|e| {
        error!(error = %e, "listing repositories failed");
    })?;
    debug!(count = repos.len(), "repository list refreshed");
    nav.push(Page::RepoList(RepoListPage::new(repos)));
    Ok(())
}
