// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use git_browser::cli::{Cli, Command};

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["gitb", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["gitb"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Repository Commands
// =============================================================================

#[test]
fn cli_repos_json() {
    let cli = Cli::try_parse_from(["gitb", "repos", "--json"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Repos(ref a)) if a.json));
}

#[test]
fn cli_clone_with_description() {
    let cli = Cli::try_parse_from([
        "gitb",
        "clone",
        "https://example.com/a/b.git",
        "-m",
        "Mirror of b",
    ])
    .unwrap();
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone");
    };
    let fields = args.to_fields();
    assert_eq!(fields.url, "https://example.com/a/b.git");
    assert_eq!(fields.name, None);
    assert_eq!(fields.description.as_deref(), Some("Mirror of b"));
}

#[test]
fn cli_clone_requires_url() {
    assert!(Cli::try_parse_from(["gitb", "clone"]).is_err());
}

#[test]
fn cli_log_all() {
    let cli = Cli::try_parse_from(["gitb", "log", "conquest", "--all"]).unwrap();
    let Some(Command::Log(args)) = cli.command else {
        panic!("expected log");
    };
    assert!(args.all);
    assert!(args.unattended());
    assert_eq!(args.chunk_size, None);
}

#[test]
fn cli_show_requires_hash() {
    assert!(Cli::try_parse_from(["gitb", "show", "conquest"]).is_err());
}

#[test]
fn cli_browse_with_globals() {
    let cli = Cli::try_parse_from([
        "gitb",
        "browse",
        "--store",
        "/srv/repos",
        "--log-file",
        "gitb.log",
    ]);
    // Globals are not marked global = true and must precede the command.
    assert!(cli.is_err());

    let cli = Cli::try_parse_from([
        "gitb",
        "--store",
        "/srv/repos",
        "--log-file",
        "gitb.log",
        "browse",
    ])
    .unwrap();
    assert!(matches!(cli.command, Some(Command::Browse)));
    assert_eq!(cli.global.to_config_overrides().len(), 2);
}
