// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Paginated consumption of a commit stream.
//!
//! ```text
//!            load_batch()
//!  Idle(stream) ---------> Draining(remaining = chunk)
//!     ^                        |  read -> Record: render, remaining -= 1
//!     |  remaining == 0        |  read -> End:    Exhausted
//!     +------------------------+  read -> Err:    Failed (propagated)
//!
//!  Footer: Loading while draining, LoadMore after a full chunk,
//!          Hidden once the stream is exhausted.
//! ```
//!
//! Reads are strictly sequential: [`CommitStream::read`] consumes the stream
//! and only a resolved read hands it back.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, trace};

use crate::backend::{CommitRecord, CommitStream, StreamRead};
use crate::error::{BackendError, BrowserResult};

/// Trailing row of a history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Footer {
    /// Placeholder shown while a batch drains.
    Loading,
    /// Manual continuation affordance.
    LoadMore,
    /// Pagination is over.
    Hidden,
}

/// Render callbacks driven by the paginator.
pub trait HistoryView {
    /// Appends one row below the previous ones.
    fn append_commit(&mut self, title: &str, commit: &CommitRecord);

    /// Replaces the trailing row.
    fn set_footer(&mut self, footer: Footer);

    /// Reveals the newest row. Not called during the first batch.
    fn scroll_to_end(&mut self);
}

/// Row of a rendered history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRow {
    pub title: String,
    pub commit: CommitRecord,
}

/// Page model of a history list; the rows selectable by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitList {
    rows: Vec<CommitRow>,
    footer: Footer,
    scrolls: usize,
}

impl Default for CommitList {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            footer: Footer::Loading,
            scrolls: 0,
        }
    }
}

impl CommitList {
    #[must_use]
    pub fn rows(&self) -> &[CommitRow] {
        &self.rows
    }

    #[must_use]
    pub const fn footer(&self) -> Footer {
        self.footer
    }

    /// How many times the list was asked to reveal its newest row.
    #[must_use]
    pub const fn scrolls(&self) -> usize {
        self.scrolls
    }
}

impl HistoryView for CommitList {
    fn append_commit(&mut self, title: &str, commit: &CommitRecord) {
        self.rows.push(CommitRow {
            title: title.to_string(),
            commit: commit.clone(),
        });
    }

    fn set_footer(&mut self, footer: Footer) {
        self.footer = footer;
    }

    fn scroll_to_end(&mut self) {
        self.scrolls += 1;
    }
}

/// First line of `message`, cut to `limit` characters with a trailing `...`.
#[must_use]
pub fn truncate_title(message: &str, limit: usize) -> String {
    let title = message.split(['\r', '\n']).next().unwrap_or_default();
    if title.chars().count() <= limit {
        return title.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut out: String = title.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Paginator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginatorState {
    /// Waiting for a continuation; a stream is held.
    Idle,
    /// A batch is in progress.
    Draining,
    /// The stream signalled its end.
    Exhausted,
    /// A read failed; no further reads are issued.
    Failed,
}

/// Outcome of one [`CommitPaginator::load_batch`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Records rendered by this batch.
    pub rendered: usize,
    /// Whether a continuation is offered.
    pub more: bool,
}

/// Bounded, resumable consumer over a commit stream.
pub struct CommitPaginator<S> {
    stream: Option<S>,
    state: PaginatorState,
    chunk_size: NonZeroUsize,
    title_limit: usize,
    batches: usize,
    rendered: usize,
}

impl<S: CommitStream> CommitPaginator<S> {
    pub fn new(stream: S, chunk_size: NonZeroUsize, title_limit: usize) -> Self {
        Self {
            stream: Some(stream),
            state: PaginatorState::Idle,
            chunk_size,
            title_limit,
            batches: 0,
            rendered: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> PaginatorState {
        self.state
    }

    /// Batches started so far.
    #[must_use]
    pub const fn batches(&self) -> usize {
        self.batches
    }

    /// Records rendered across all batches.
    #[must_use]
    pub const fn rendered(&self) -> usize {
        self.rendered
    }

    #[must_use]
    pub const fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// True while a continuation can be requested.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.state == PaginatorState::Idle && self.stream.is_some()
    }

    /// Drains up to one chunk into `view`, rendering each record as it
    /// arrives.
    ///
    /// Once exhausted or failed, returns an empty batch without reading.
    ///
    /// # Errors
    ///
    /// Propagates the stream's read error; rows rendered before it stay.
    /// Returns `BackendError::StreamAbandoned` if a previous batch was
    /// dropped before finishing.
    pub async fn load_batch<V>(&mut self, view: &mut V) -> BrowserResult<Batch>
    where
        V: HistoryView + ?Sized,
    {
        match self.state {
            PaginatorState::Exhausted | PaginatorState::Failed => {
                return Ok(Batch {
                    rendered: 0,
                    more: false,
                });
            }
            PaginatorState::Draining => {
                self.state = PaginatorState::Failed;
                return Err(BackendError::StreamAbandoned.into());
            }
            PaginatorState::Idle => {}
        }
        let Some(mut stream) = self.stream.take() else {
            self.state = PaginatorState::Failed;
            return Err(BackendError::StreamAbandoned.into());
        };

        let first = self.batches == 0;
        self.batches += 1;
        self.state = PaginatorState::Draining;
        view.set_footer(Footer::Loading);
        debug!(batch = self.batches, chunk = self.chunk_size.get(), "draining batch");

        let mut remaining = self.chunk_size.get();
        let mut rendered = 0;
        loop {
            let read = match stream.read().await {
                Ok(read) => read,
                Err(e) => {
                    self.state = PaginatorState::Failed;
                    return Err(e);
                }
            };
            match read {
                StreamRead::Record(commit, renewed) => {
                    trace!(hash = %commit.hash, "commit received");
                    let title = truncate_title(&commit.message, self.title_limit);
                    view.append_commit(&title, &commit);
                    if !first {
                        view.scroll_to_end();
                    }
                    rendered += 1;
                    self.rendered += 1;
                    remaining -= 1;
                    if remaining == 0 {
                        self.stream = Some(renewed);
                        self.state = PaginatorState::Idle;
                        view.set_footer(Footer::LoadMore);
                        return Ok(Batch {
                            rendered,
                            more: true,
                        });
                    }
                    stream = renewed;
                }
                StreamRead::End => {
                    debug!(total = self.rendered, "commit stream exhausted");
                    self.state = PaginatorState::Exhausted;
                    view.set_footer(Footer::Hidden);
                    return Ok(Batch {
                        rendered,
                        more: false,
                    });
                }
            }
        }
    }
}

impl<S> std::fmt::Debug for CommitPaginator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitPaginator")
            .field("state", &self.state)
            .field("chunk_size", &self.chunk_size)
            .field("batches", &self.batches)
            .field("rendered", &self.rendered)
            .finish_non_exhaustive()
    }
}
