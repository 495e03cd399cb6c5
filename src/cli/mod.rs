// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitb using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitb [global options] <command>
//! version
//! options
//! repos [--json]
//! clone <url> [--name N] [--description D]
//! log <repo> [--chunk-size N] [--all] [--json]
//! show <repo> <hash>
//! tree <repo> <hash>
//! browse
//! ```

pub mod clone;
pub mod global;
pub mod repo;

#[cfg(test)]
mod tests;

use crate::cli::clone::CloneArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::repo::{LogArgs, ObjectArgs, ReposArgs};
use clap::{Parser, Subcommand};

/// Git Repository Browser
///
/// Browses a store of bare git repositories.
#[derive(Debug, Parser)]
#[command(
    name = "gitb",
    author,
    version,
    about = "Git Repository Browser",
    long_about = "git-browser Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Browses a store of bare git repositories: clone from a remote,\n\
                  page through history, inspect commits and trees.\n\n\
                  Invoking `gitb browse` starts an interactive session. See\n\
                  `gitb <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  gitb reads `gitb.toml` from the current directory when present.\n\
                  Additional files can be given with --config and are loaded in\n\
                  order, later files overriding earlier ones. GITB_<SECTION>__<KEY>\n\
                  environment variables override files, and command line flags\n\
                  override everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the stored repositories.
    Repos(ReposArgs),

    /// Clones a remote into a new repository.
    Clone(CloneArgs),

    /// Pages through the history of a repository.
    Log(LogArgs),

    /// Shows one commit.
    Show(ObjectArgs),

    /// Lists one tree.
    Tree(ObjectArgs),

    /// Starts an interactive browsing session.
    Browse,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
