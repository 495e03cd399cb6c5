// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Navigation stack of visible pages.
//!
//! ```text
//! push(p)   [A, B]    -> [A, B, p]
//! pop()     [A, B, C] -> [A, B]      (returns C)
//! pop()     [A]       -> [A]         (no-op, returns None)
//! peer(p)   [A, B, C] -> [A, B, p]   (returns C; back lands on B)
//! ```
//!
//! The stack is never empty. Removed pages are handed back to the caller
//! so their resources are released at a known point.

use tracing::debug;

/// Ordered sequence of pages; the last one is current.
#[derive(Debug)]
pub struct NavigationStack<P> {
    pages: Vec<P>,
}

impl<P> NavigationStack<P> {
    /// Creates a stack holding only `root`.
    pub fn new(root: P) -> Self {
        Self { pages: vec![root] }
    }

    /// Makes `page` current; the previous page stays underneath.
    pub fn push(&mut self, page: P) {
        self.pages.push(page);
        debug!(depth = self.pages.len(), "nav push");
    }

    /// Removes the current page unless it is the root.
    pub fn pop(&mut self) -> Option<P> {
        if self.pages.len() <= 1 {
            debug!("nav pop ignored at root");
            return None;
        }
        let removed = self.pages.pop();
        debug!(depth = self.pages.len(), "nav pop");
        removed
    }

    /// Replaces the current page at the same depth and returns the old one.
    pub fn peer(&mut self, page: P) -> P {
        let last = self.pages.len() - 1;
        let replaced = std::mem::replace(&mut self.pages[last], page);
        debug!(depth = self.pages.len(), "nav peer");
        replaced
    }

    /// Number of pages, always at least one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn current(&self) -> &P {
        &self.pages[self.pages.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut P {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Pages from root to current.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests;
