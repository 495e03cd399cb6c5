// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        repos / clone / log / browse
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          browser          |
//!              |   user actions, alerts    |
//!              '--+--------+--------+------'
//!                 |        |        |
//!                 v        v        v
//!               nav     history   clone ---- progress
//!              pages   paginator  pipeline   parser, slot
//!                 |        |        |
//!                 +--------+--------+
//!                          v
//!                       backend
//!                 git_cli  |  memory
//!
//!   +-----------------------------------------+
//!   |  ui      Screen contract, terminal      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, config    |
//!   +-----------------------------------------+
//! ```

pub mod backend;
pub mod browser;
pub mod cli;
pub mod clone;
pub mod cmd;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod nav;
pub mod page;
pub mod progress;
pub mod ui;
