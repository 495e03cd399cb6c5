// git-browser: Git Repository Browser
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::NavigationStack;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn names(stack: &NavigationStack<&'static str>) -> Vec<&'static str> {
    stack.iter().copied().collect()
}

#[test]
fn test_push_makes_current() {
    let mut stack = NavigationStack::new("home");
    stack.push("repos");
    stack.push("history");
    assert_eq!(*stack.current(), "history");
    assert_eq!(stack.depth(), 3);
}

#[test]
fn test_pop_reactivates_previous_unchanged() {
    let mut stack = NavigationStack::new("home");
    stack.push("repos");
    stack.push("history");
    assert_eq!(stack.pop(), Some("history"));
    assert_eq!(*stack.current(), "repos");
}

#[test]
fn test_pop_at_root_is_noop() {
    let mut stack = NavigationStack::new("home");
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.pop(), None);
    assert_eq!(stack.depth(), 1);
    assert_eq!(*stack.current(), "home");
}

#[test]
fn test_peer_keeps_depth_and_skips_replaced_on_back() {
    let mut stack = NavigationStack::new("home");
    stack.push("history");
    stack.push("commit-a");
    assert_eq!(stack.peer("commit-b"), "commit-a");
    assert_eq!(stack.depth(), 3);
    assert_eq!(names(&stack), ["home", "history", "commit-b"]);

    stack.pop();
    assert_eq!(*stack.current(), "history");
}

#[test]
fn test_peer_on_root_replaces_root() {
    let mut stack = NavigationStack::new("splash");
    assert_eq!(stack.peer("home"), "splash");
    assert_eq!(stack.depth(), 1);
    assert_eq!(*stack.current(), "home");
}

#[test]
fn test_depth_invariant_over_mixed_sequence() {
    // Deterministic pseudo-random walk over push/pop/peer.
    let mut stack = NavigationStack::new(0_u32);
    let mut seed: u32 = 0x2545_f491;
    for step in 1..=500_u32 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let before = stack.depth();
        match seed % 3 {
            0 => {
                stack.push(step);
                assert_eq!(stack.depth(), before + 1);
            }
            1 => {
                let removed = stack.pop();
                if before == 1 {
                    assert!(removed.is_none());
                    assert_eq!(stack.depth(), 1);
                } else {
                    assert_eq!(stack.depth(), before - 1);
                }
            }
            _ => {
                stack.peer(step);
                assert_eq!(stack.depth(), before);
                assert_eq!(*stack.current(), step);
            }
        }
        assert!(stack.depth() >= 1);
    }
}

struct Tracked(Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_replaced_page_is_released_by_caller() {
    let dropped = Arc::new(AtomicUsize::new(0));
    let mut stack = NavigationStack::new(Tracked(Arc::clone(&dropped)));
    stack.push(Tracked(Arc::clone(&dropped)));

    let replaced = stack.peer(Tracked(Arc::clone(&dropped)));
    assert_eq!(dropped.load(Ordering::SeqCst), 0);
    drop(replaced);
    assert_eq!(dropped.load(Ordering::SeqCst), 1);

    drop(stack.pop());
    assert_eq!(dropped.load(Ordering::SeqCst), 2);
}
