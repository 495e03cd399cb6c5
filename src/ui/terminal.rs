// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Line-oriented terminal screen.
//!
//! ```text
//! == conquest ==
//!   [0] Fix the renderer                       3f2a9c1
//!   [1] Add level loader                       77be010
//!   [m] Load More...
//! ```
//!
//! Clone progress is drawn with an indicatif bar on stderr.

use std::io::Write;
use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use super::Screen;
use crate::backend::{CommitRecord, Repository};
use crate::clone::CloneView;
use crate::error::BrowserError;
use crate::history::{Footer, HistoryView};
use crate::page::{Page, short_hash};
use crate::progress::ProgressTriple;

fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} [{wide_bar:.cyan/blue}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-")
        })
        .clone()
}

fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        })
        .clone()
}

/// Screen writing pages as text lines to `out`.
#[derive(Debug)]
pub struct TerminalScreen<W: Write> {
    out: W,
    rows: usize,
    bar: Option<ProgressBar>,
    draw_progress: bool,
}

impl TerminalScreen<std::io::Stdout> {
    /// Screen on stdout with a visible progress bar.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), true)
    }
}

impl<W: Write> TerminalScreen<W> {
    #[must_use]
    pub const fn new(out: W, draw_progress: bool) -> Self {
        Self {
            out,
            rows: 0,
            bar: None,
            draw_progress,
        }
    }

    /// Consumes the screen, returning its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            debug!(error = %e, "screen write failed");
        }
    }

    fn header(&mut self, title: &str) {
        self.line(&format!("== {title} =="));
    }
}

impl<W: Write> HistoryView for TerminalScreen<W> {
    fn append_commit(&mut self, title: &str, commit: &CommitRecord) {
        let row = format!("  [{}] {title:<60} {}", self.rows, short_hash(&commit.hash));
        self.rows += 1;
        self.line(row.trim_end());
    }

    fn set_footer(&mut self, footer: Footer) {
        match footer {
            Footer::Loading => debug!("history loading"),
            Footer::LoadMore => self.line("  [m] Load More..."),
            Footer::Hidden => self.line("  (end of history)"),
        }
    }

    fn scroll_to_end(&mut self) {
        if let Err(e) = self.out.flush() {
            debug!(error = %e, "screen flush failed");
        }
    }
}

impl<W: Write> CloneView for TerminalScreen<W> {
    fn show_progress(&mut self) {
        let bar = if self.draw_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(spinner_style());
        bar.set_message("Connecting...");
        self.bar = Some(bar);
    }

    fn render_progress(&mut self, progress: &ProgressTriple) {
        let Some(bar) = &self.bar else {
            return;
        };
        if let Some(total) = progress.total {
            bar.set_style(bar_style());
            bar.set_length(total);
        } else {
            bar.set_style(spinner_style());
        }
        bar.set_position(progress.completed);
        bar.set_message(progress.to_string());
    }

    fn hide_progress(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn show<R: Repository>(&mut self, page: &Page<R>) {
        self.line("");
        self.header(&page.title());
        match page {
            Page::Home => self.line("  (no repositories listed)"),
            Page::RepoList(list) => {
                for (i, repo) in list.repos().iter().enumerate() {
                    let summary = repo.summary();
                    self.line(&format!("  [{i}] {}", summary.name));
                    if !summary.description.is_empty() {
                        self.line(&format!("      {}", summary.description));
                    }
                }
                self.line("  [+] Clone a repository");
            }
            Page::CloneForm(form) => {
                self.line(&format!("  Remote Url   [{}]", form.default_remote()));
                self.line("  Name         [derived from url]");
                self.line("  Description  [url]");
            }
            Page::History(history) => {
                self.rows = 0;
                for row in history.list.rows() {
                    let row = format!(
                        "  [{}] {:<60} {}",
                        self.rows,
                        row.title,
                        short_hash(&row.commit.hash)
                    );
                    self.rows += 1;
                    self.line(row.trim_end());
                }
                match history.list.footer() {
                    Footer::LoadMore => self.line("  [m] Load More..."),
                    Footer::Hidden => self.line("  (end of history)"),
                    Footer::Loading => {}
                }
            }
            Page::CommitDetail(detail) => {
                for (label, value) in detail.fields() {
                    self.line(&format!("  {label}:"));
                    for text in value.lines() {
                        self.line(&format!("    {text}"));
                    }
                }
                for (i, parent) in detail.commit.parents.iter().enumerate() {
                    self.line(&format!("  [p{i}] ascend to {}", short_hash(parent)));
                }
                self.line("  [t] Enter tree");
            }
            Page::FileTree(tree) => {
                for (i, entry) in tree.entries.iter().enumerate() {
                    let suffix = if entry.is_dir() { "/" } else { "" };
                    let name = format!("{}{suffix}", entry.name);
                    self.line(&format!("  [{i}] {name:<40} {}", short_hash(&entry.hash)));
                }
            }
        }
    }

    fn alert(&mut self, error: &BrowserError) {
        self.line(&format!("!! {error}"));
    }

    fn notice(&mut self, message: &str) {
        self.line(&format!("-- {message}"));
    }
}
