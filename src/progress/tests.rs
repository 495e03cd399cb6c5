// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{GitProgressParser, ProgressAdapter, ProgressSlot, ProgressTriple};

fn parse(line: &str) -> Option<ProgressTriple> {
    GitProgressParser.adapt(line)
}

#[test]
fn test_parse_known_total() {
    assert_eq!(
        parse("Receiving objects:  45% (450/1000), 1.20 MiB | 1.00 MiB/s"),
        Some(ProgressTriple::new("Receiving objects", 450, Some(1000)))
    );
}

#[test]
fn test_parse_remote_prefix() {
    assert_eq!(
        parse("remote: Compressing objects: 100% (7/7), done."),
        Some(ProgressTriple::new("Compressing objects", 7, Some(7)))
    );
}

#[test]
fn test_parse_unknown_total() {
    assert_eq!(
        parse("remote: Enumerating objects: 1234, done."),
        Some(ProgressTriple::new("Enumerating objects", 1234, None))
    );
}

#[test]
fn test_zero_total_is_not_unknown() {
    let triple = parse("Resolving deltas: 100% (0/0), done.").unwrap();
    assert_eq!(triple.total, Some(0));
    assert_eq!(triple.to_string(), "Resolving deltas (0/0)");
}

#[test]
fn test_non_progress_lines_are_ignored() {
    for line in [
        "",
        "From /tmp/source",
        " * [new branch]      main       -> main",
        "fatal: repository 'nowhere' does not exist",
        "warning: You appear to have cloned an empty repository.",
    ] {
        assert_eq!(parse(line), None, "line {line:?} should not parse");
    }
}

#[test]
fn test_display() {
    insta::assert_snapshot!(
        ProgressTriple::new("Receiving objects", 3, Some(10)).to_string(),
        @"Receiving objects (3/10)"
    );
    insta::assert_snapshot!(
        ProgressTriple::new("Counting objects", 17, None).to_string(),
        @"Counting objects (17)"
    );
}

#[test]
fn test_closure_adapter() {
    let mut calls = 0;
    let mut adapter = |raw: &str| {
        calls += 1;
        raw.parse::<u64>()
            .ok()
            .map(|n| ProgressTriple::new("step", n, None))
    };
    assert_eq!(adapter.adapt("4"), Some(ProgressTriple::new("step", 4, None)));
    assert_eq!(adapter.adapt("x"), None);
    assert_eq!(calls, 2);
}

#[test]
fn test_slot_last_write_wins() {
    let slot = ProgressSlot::new();
    assert_eq!(slot.latest(), None);

    slot.publish(ProgressTriple::new("a", 1, None));
    slot.publish(ProgressTriple::new("a", 2, None));
    slot.publish(ProgressTriple::new("b", 3, Some(9)));
    assert_eq!(slot.latest(), Some(ProgressTriple::new("b", 3, Some(9))));

    // Reading does not consume.
    assert_eq!(slot.latest(), slot.latest());

    slot.clear();
    assert_eq!(slot.latest(), None);
}

#[test]
fn test_slot_shared_across_threads() {
    let slot = ProgressSlot::new();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for n in 1..=5 {
                slot.publish(ProgressTriple::new("x", n, None));
            }
        });
    });
    assert_eq!(slot.latest(), Some(ProgressTriple::new("x", 5, None)));
}
