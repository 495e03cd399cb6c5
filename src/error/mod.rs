// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        BrowserError (16 bytes)
//!                 |
//!       +---------+---------+
//!       v         v         v
//!     Input    Backend      Io
//!      Box       Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Input    EmptyUrl, InvalidRemote, Selection, WrongPage, UnknownRepo
//!   Backend  List, LogWalk, StreamRead, Load, Create, Fetch, ...
//!
//! ConfigError (MissingKey, InvalidValue) is raised by validation and
//! travels through `anyhow` during configuration loading.
//! ```
//!
//! Stream exhaustion is not an error: it is reported as
//! [`StreamRead::End`](crate::backend::StreamRead::End).

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BrowserError`].
pub type BrowserResult<T> = std::result::Result<T, BrowserError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at 16 bytes on the stack.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// User input was rejected before any side effect.
    #[error("input error: {0}")]
    Input(#[from] Box<InputError>),

    /// A backend operation failed.
    #[error("backend error: {0}")]
    Backend(#[from] Box<BackendError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

impl BrowserError {
    /// Returns true for errors raised synchronously from user input.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BrowserError {
                fn from(err: $error) -> Self {
                    BrowserError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    InputError => Input,
    BackendError => Backend,
    std::io::Error => Io,
}

// --- Input Errors ---

/// Errors detected synchronously from user input.
#[derive(Debug, Error)]
pub enum InputError {
    /// The remote url field was left empty.
    #[error("remote url is required")]
    EmptyUrl,

    /// The remote url could not be turned into a remote handle.
    #[error("invalid remote url '{url}': {message}")]
    InvalidRemote { url: String, message: String },

    /// A list selection pointed outside the current page.
    #[error("no {what} at position {index} (page has {len})")]
    Selection {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The requested action does not apply to the current page.
    #[error("'{action}' is not available on the {page} page")]
    WrongPage {
        action: &'static str,
        page: &'static str,
    },

    /// No repository with the given name exists.
    #[error("repository not found: {0}")]
    UnknownRepo(String),
}

// --- Backend Errors ---

/// Errors from the version-control backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The `git` executable could not be located.
    #[error("git executable not found: {0}")]
    GitNotFound(String),

    /// Listing repositories failed.
    #[error("failed to list repositories: {0}")]
    List(String),

    /// Starting a history walk failed.
    #[error("failed to walk history from '{reference}': {message}")]
    LogWalk { reference: String, message: String },

    /// Reading the next record from a commit stream failed.
    #[error("failed to read commit stream: {0}")]
    StreamRead(String),

    /// A commit stream was dropped in the middle of a batch.
    #[error("commit stream was abandoned mid-batch")]
    StreamAbandoned,

    /// Loading an object failed.
    #[error("failed to load {kind} {hash}: {message}")]
    Load {
        kind: &'static str,
        hash: String,
        message: String,
    },

    /// An object was not of the requested kind.
    #[error("object {hash} is not a {expected}")]
    UnexpectedObject { expected: &'static str, hash: String },

    /// A repository with the same name already exists.
    #[error("repository already exists: {0}")]
    AlreadyExists(String),

    /// Creating a repository failed.
    #[error("failed to create repository '{name}': {message}")]
    Create { name: String, message: String },

    /// Fetching from a remote failed.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A git command exited unsuccessfully.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;
