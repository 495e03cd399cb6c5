// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the read-only repository commands.

use clap::Args;

/// Arguments for the `repos` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ReposArgs {
    /// Prints the list as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `log` command.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Repository name.
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Commits per batch, overrides ui.chunk_size.
    #[arg(short = 'n', long = "chunk-size", value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub chunk_size: Option<u16>,

    /// Reads the whole history without asking to load more.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Prints commits as JSON lines; implies --all.
    #[arg(long)]
    pub json: bool,
}

impl LogArgs {
    /// True when no load-more prompt should be shown.
    #[must_use]
    pub const fn unattended(&self) -> bool {
        self.all || self.json
    }
}

/// Arguments for the `show` and `tree` commands.
#[derive(Debug, Clone, Default, Args)]
pub struct ObjectArgs {
    /// Repository name.
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Object hash.
    #[arg(value_name = "HASH")]
    pub hash: String,
}
