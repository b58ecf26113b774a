//! Common assertion helpers for CLI output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for git repository error messages
pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

/// Creates a predicate that checks for a consolidated status name
pub fn has_status(status: &str) -> impl Predicate<str> {
    predicates::str::contains(status.to_string())
}

/// Creates a predicate that checks a capability line of `resolve` output
pub fn has_capability(name: &str, enabled: bool) -> impl Predicate<str> {
    let value = if enabled { "yes" } else { "no" };
    predicates::str::is_match(format!(r"{name}:\S*\s+{value}")).expect("valid regex")
}
