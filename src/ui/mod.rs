// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Presentation contract of the browser.
//!
//! ```text
//! Browser --show(page)-------> Screen
//!         --append/footer----> Screen (HistoryView)
//!         --progress---------> Screen (CloneView)
//!         --alert/notice-----> Screen
//! ```

pub mod terminal;

use crate::backend::Repository;
use crate::clone::CloneView;
use crate::error::BrowserError;
use crate::history::HistoryView;
use crate::page::Page;

/// Everything the browser draws.
pub trait Screen: HistoryView + CloneView {
    /// Draws `page`, which just became current.
    ///
    /// History rows are not part of this call; they arrive through
    /// [`HistoryView`] as they are read.
    fn show<R: Repository>(&mut self, page: &Page<R>);

    /// Blocking notification naming a failure.
    fn alert(&mut self, error: &BrowserError);

    /// Informational message that does not change the page.
    fn notice(&mut self, message: &str);
}

#[cfg(test)]
mod tests;
