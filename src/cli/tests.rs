// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::{Cli, Command};
use crate::clone::CloneRequest;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["gitb", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "gitb", "-l", "4", "-c", "a.toml", "--config", "b.toml", "--store", "/srv/repos", "repos",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(4));
    assert_eq!(
        cli.global.configs,
        [PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert!(matches!(cli.command, Some(Command::Repos(ref args)) if !args.json));

    let overrides = cli.global.to_config_overrides();
    insta::assert_debug_snapshot!(overrides, @r#"
    [
        (
            "global.output_log_level",
            "4",
        ),
        (
            "global.file_log_level",
            "4",
        ),
        (
            "store.root",
            "/srv/repos",
        ),
    ]
    "#);
}

#[test]
fn test_log_level_out_of_range_is_rejected() {
    assert!(Cli::try_parse_from(["gitb", "-l", "6", "repos"]).is_err());
}

#[test]
fn test_parse_clone() {
    let cli = Cli::try_parse_from([
        "gitb",
        "clone",
        "git://example.com/foo/bar.git",
        "--name",
        "mine",
    ])
    .unwrap();
    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone");
    };
    let request = CloneRequest::derive(&args.to_fields());
    assert_eq!(request.name, "mine");
    assert_eq!(request.description, "git://example.com/foo/bar.git");
}

#[test]
fn test_parse_log() {
    let cli = Cli::try_parse_from(["gitb", "log", "conquest", "-n", "20"]).unwrap();
    let Some(Command::Log(args)) = cli.command else {
        panic!("expected log");
    };
    assert_eq!(args.repo, "conquest");
    assert_eq!(args.chunk_size, Some(20));
    assert!(!args.unattended());

    let cli = Cli::try_parse_from(["gitb", "log", "conquest", "--json"]).unwrap();
    let Some(Command::Log(args)) = cli.command else {
        panic!("expected log");
    };
    assert!(args.unattended());
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    assert!(Cli::try_parse_from(["gitb", "log", "conquest", "--chunk-size", "0"]).is_err());
}

#[test]
fn test_parse_show_and_tree() {
    let cli = Cli::try_parse_from(["gitb", "show", "conquest", "3f2a9c1"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Show(ref a)) if a.hash == "3f2a9c1"));
    let cli = Cli::try_parse_from(["gitb", "tree", "conquest", "77be010"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Tree(ref a)) if a.repo == "conquest"));
}

#[test]
fn test_cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
