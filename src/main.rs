// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Repos | Clone | Log | Show | Tree | Browse | Options
//! ```

use std::process::ExitCode;

use git_browser::cli::global::GlobalOptions;
use git_browser::cli::{self, Command};
use git_browser::cmd::browse::run_browse_command;
use git_browser::cmd::clone::run_clone_command;
use git_browser::cmd::log::run_log_command;
use git_browser::cmd::open_store;
use git_browser::cmd::options::{run_config_files_command, run_options_command};
use git_browser::cmd::repos::run_repos_command;
use git_browser::cmd::show::{run_show_command, run_tree_command};
use git_browser::config::Config;
use git_browser::config::loader::ConfigLoader;
use git_browser::config::types::GlobalConfig;
use git_browser::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if matches!(cli.command, Some(Command::Version)) {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&config.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn build_log_config(global: &GlobalConfig) -> LogConfig {
    LogConfig::builder()
        .with_console_level(global.output_log_level)
        .with_file_level(global.file_log_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_file_format(global.log_format)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_config_files_command(&build_config_loader(&cli.global).format_loaded_files());
            run_options_command(config);
            Ok(())
        }
        Some(Command::Repos(args)) => match open_store(config) {
            Ok(backend) => run_repos_command(args, &backend).await,
            Err(e) => Err(e),
        },
        Some(Command::Clone(args)) => match open_store(config) {
            Ok(backend) => run_clone_command(args, &backend, &config.ui).await,
            Err(e) => Err(e),
        },
        Some(Command::Log(args)) => match open_store(config) {
            Ok(backend) => run_log_command(args, &backend, &config.ui).await,
            Err(e) => Err(e),
        },
        Some(Command::Show(args)) => match open_store(config) {
            Ok(backend) => run_show_command(args, &backend).await,
            Err(e) => Err(e),
        },
        Some(Command::Tree(args)) => match open_store(config) {
            Ok(backend) => run_tree_command(args, &backend).await,
            Err(e) => Err(e),
        },
        Some(Command::Browse) => run_browse_command(config).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("gitb.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader.with_env_prefix("GITB")
}

fn load_config(global: &GlobalOptions) -> git_browser::error::Result<Config> {
    let mut loader = build_config_loader(global);
    for (key, value) in global.to_config_overrides() {
        loader = loader.set(key, value)?;
    }
    loader.build()
}
