// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Progress normalization and latest-value sampling.
//!
//! ```text
//! raw line ("remote: Counting objects:  45% (450/1000)")
//!        |
//!        v
//!   ProgressAdapter::adapt   (once per line, no buffering)
//!        |
//!        v  Option<ProgressTriple>
//!   ProgressSlot::publish    (single slot, last write wins)
//!        |
//!        v
//!   timer tick --> ProgressSlot::latest --> render
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tokio::sync::watch;

/// Normalized progress: (label, completed, total).
///
/// `total` is `None` while the backend does not know it yet, which is
/// distinct from a known total of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTriple {
    pub label: String,
    pub completed: u64,
    pub total: Option<u64>,
}

impl ProgressTriple {
    #[must_use]
    pub fn new(label: impl Into<String>, completed: u64, total: Option<u64>) -> Self {
        Self {
            label: label.into(),
            completed,
            total,
        }
    }
}

impl fmt::Display for ProgressTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total {
            Some(total) => write!(f, "{} ({}/{})", self.label, self.completed, total),
            None => write!(f, "{} ({})", self.label, self.completed),
        }
    }
}

/// Turns one raw, backend-specific notification into a triple.
///
/// Called synchronously once per notification. Returns `None` for
/// notifications that are not displayable progress.
pub trait ProgressAdapter {
    fn adapt(&mut self, raw: &str) -> Option<ProgressTriple>;
}

impl<F> ProgressAdapter for F
where
    F: FnMut(&str) -> Option<ProgressTriple>,
{
    fn adapt(&mut self, raw: &str) -> Option<ProgressTriple> {
        self(raw)
    }
}

fn progress_line_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        // "Label: NN% (done/total)..." or "Label: done..."
        Regex::new(
            r"^([A-Za-z][A-Za-z ]*?):[ \t]+(?:[0-9]{1,3}%[ \t]+\(([0-9]+)/([0-9]+)\)|([0-9]+))",
        )
        .ok()
    })
    .as_ref()
}

/// Adapter for git sideband progress lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitProgressParser;

impl ProgressAdapter for GitProgressParser {
    fn adapt(&mut self, raw: &str) -> Option<ProgressTriple> {
        let line = raw.trim();
        let line = line.strip_prefix("remote:").map_or(line, str::trim_start);
        let caps = progress_line_regex()?.captures(line)?;

        let label = caps.get(1)?.as_str().trim().to_string();
        if let (Some(done), Some(total)) = (caps.get(2), caps.get(3)) {
            let completed = done.as_str().parse().ok()?;
            let total = total.as_str().parse().ok()?;
            return Some(ProgressTriple::new(label, completed, Some(total)));
        }
        let completed = caps.get(4)?.as_str().parse().ok()?;
        Some(ProgressTriple::new(label, completed, None))
    }
}

/// Single-slot mailbox holding the most recent progress.
///
/// Writers replace the value; readers always see the latest write. Nothing
/// is queued or accumulated.
#[derive(Debug)]
pub struct ProgressSlot {
    tx: watch::Sender<Option<ProgressTriple>>,
}

impl Default for ProgressSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSlot {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Replaces the stored value.
    pub fn publish(&self, progress: ProgressTriple) {
        self.tx.send_replace(Some(progress));
    }

    /// Empties the slot.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Most recent value, if any was published since the last clear.
    #[must_use]
    pub fn latest(&self) -> Option<ProgressTriple> {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests;
