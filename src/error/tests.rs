// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BackendError, BrowserError, BrowserResult, ConfigError, InputError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "ui".to_string(),
        key: "chunk_size".to_string(),
        message: "must be at least 1".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'chunk_size' in section '[ui]': must be at least 1"
    );
}

#[test]
fn test_input_error_wraps_into_browser_error() {
    let err: BrowserError = InputError::InvalidRemote {
        url: "http://".to_string(),
        message: "no host".to_string(),
    }
    .into();

    assert!(err.is_input());
    insta::assert_snapshot!(err.to_string(), @"input error: invalid remote url 'http://': no host");
}

#[test]
fn test_backend_error_is_not_input() {
    let err: BrowserError = BackendError::Fetch {
        url: "git://example.com/foo.git".to_string(),
        message: "connection reset".to_string(),
    }
    .into();

    assert!(!err.is_input());
    insta::assert_snapshot!(
        err.to_string(),
        @"backend error: failed to fetch git://example.com/foo.git: connection reset"
    );
}

#[test]
fn test_selection_error_display() {
    let err = InputError::Selection {
        what: "commit",
        index: 12,
        len: 9,
    };
    insta::assert_snapshot!(err.to_string(), @"no commit at position 12 (page has 9)");
}

#[test]
fn test_io_error_wraps_into_browser_error() {
    let err: BrowserError = std::io::Error::other("pipe closed").into();
    assert!(!err.is_input());
    insta::assert_snapshot!(err.to_string(), @"io error: pipe closed");
}

#[test]
fn test_browser_result_size() {
    // Thin boxes plus discriminant.
    let size = std::mem::size_of::<BrowserResult<()>>();
    assert!(size <= 16, "BrowserResult<()> is {size} bytes, expected <= 16");
}
