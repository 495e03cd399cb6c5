// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogFormat, LogLevel};
use tracing::Level;

#[test]
fn test_log_level_range() {
    assert_eq!(LogLevel::from_u8(0), Some(LogLevel::SILENT));
    assert_eq!(LogLevel::from_u8(5), Some(LogLevel::TRACE));
    assert_eq!(LogLevel::from_u8(6), None);
    assert!(LogLevel::new(9).is_err());
}

#[test]
fn test_log_level_to_tracing() {
    let levels: Vec<_> = (0..=5)
        .map(|n| LogLevel::from_u8(n).and_then(LogLevel::to_tracing_level))
        .collect();
    assert_eq!(
        levels,
        vec![
            None,
            Some(Level::ERROR),
            Some(Level::WARN),
            Some(Level::INFO),
            Some(Level::DEBUG),
            Some(Level::TRACE),
        ]
    );
}

#[test]
fn test_filter_strings_scope_crate_levels() {
    insta::assert_snapshot!(
        LogLevel::INFO.to_filter_string(),
        @"warn,git_browser=info,gitb=info"
    );
    assert_eq!(LogLevel::SILENT.to_filter_string(), "off");
    assert_eq!(LogLevel::TRACE.to_filter_string(), "trace");
}

#[test]
fn test_log_level_deserialize_rejects_out_of_range() {
    let ok: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(ok, LogLevel::DEBUG);

    let err = serde_json::from_str::<LogLevel>("7").unwrap_err();
    assert!(err.to_string().contains("log level must be 0-5"));
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::DEBUG);
    assert_eq!(config.log_file(), None);
    assert_eq!(config.file_format(), LogFormat::Text);
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::TRACE)
        .with_log_file("logs/gitb.log".to_string())
        .with_file_format(LogFormat::Json)
        .build();
    assert_eq!(config.console_level(), LogLevel::TRACE);
    assert_eq!(config.log_file(), Some("logs/gitb.log"));
    assert_eq!(config.file_format(), LogFormat::Json);
}
