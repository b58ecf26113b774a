//! Fixed-precedence resolution of a [`StatusRecord`] into a [`ConsolidatedStatus`].
//!
//! The precedence lives in [`RULES`], an ordered table of `(status, predicate)` pairs.
//! [`resolve`] walks it top to bottom and returns the status of the first rule whose
//! predicate holds. Earlier rules mask later ones: a file that is behind the remote
//! resolves to `NotAtHead` whatever its local diff says, because remote divergence and
//! foreign locks block safe local edits and cannot be discovered by local diffing.
//!
//! The last rule matches every record, so resolution is total.

use crate::core::git_status::ConsolidatedStatus;
use crate::core::record::{FileState, LockState, RemoteState, StatusRecord, TreeState};
use std::fmt;

/// One entry of the precedence table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub status: ConsolidatedStatus,
    /// Human-readable form of `matches`, for audits and the `rules` command
    pub condition: &'static str,
    pub matches: fn(&StatusRecord) -> bool,
}

impl Rule {
    /// 1-based position in [`RULES`]
    pub fn rank(&self) -> usize {
        self.status.rank()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("status", &self.status)
            .field("condition", &self.condition)
            .finish()
    }
}

/// The precedence table, highest priority first.
pub static RULES: [Rule; 15] = [
    Rule {
        status: ConsolidatedStatus::NotAtHead,
        condition: "remote = not_at_head",
        matches: |r| r.remote == RemoteState::NotAtHead,
    },
    Rule {
        status: ConsolidatedStatus::AddedAtHead,
        condition: "remote = added_at_head",
        matches: |r| r.remote == RemoteState::AddedAtHead,
    },
    Rule {
        status: ConsolidatedStatus::DeletedAtHead,
        condition: "remote = deleted_at_head",
        matches: |r| r.remote == RemoteState::DeletedAtHead,
    },
    Rule {
        status: ConsolidatedStatus::LockedOther,
        condition: "lock = locked_other",
        matches: |r| r.lock == LockState::LockedOther,
    },
    Rule {
        status: ConsolidatedStatus::NotLatest,
        condition: "remote = not_latest",
        matches: |r| r.remote == RemoteState::NotLatest,
    },
    Rule {
        status: ConsolidatedStatus::Unmerged,
        condition: "file = unmerged",
        matches: |r| r.file == FileState::Unmerged,
    },
    Rule {
        status: ConsolidatedStatus::Added,
        condition: "file = added",
        matches: |r| r.file == FileState::Added,
    },
    Rule {
        status: ConsolidatedStatus::Deleted,
        condition: "file = deleted",
        matches: |r| r.file == FileState::Deleted,
    },
    Rule {
        status: ConsolidatedStatus::Modified,
        condition: "file = modified, or tree in {working, staged} with file != unknown",
        matches: |r| {
            r.file == FileState::Modified
                || (matches!(r.tree, TreeState::Working | TreeState::Staged)
                    && r.file != FileState::Unknown)
        },
    },
    Rule {
        status: ConsolidatedStatus::CheckedOut,
        condition: "lock = locked",
        matches: |r| r.lock == LockState::Locked,
    },
    Rule {
        status: ConsolidatedStatus::Untracked,
        condition: "tree = untracked",
        matches: |r| r.tree == TreeState::Untracked,
    },
    Rule {
        status: ConsolidatedStatus::Lockable,
        condition: "lock in {not_locked, unlockable} and tree = unmodified",
        matches: |r| {
            matches!(r.lock, LockState::NotLocked | LockState::Unlockable)
                && r.tree == TreeState::Unmodified
        },
    },
    Rule {
        status: ConsolidatedStatus::Unmodified,
        condition: "tree = unmodified and lock = unknown",
        matches: |r| r.tree == TreeState::Unmodified && r.lock == LockState::Unknown,
    },
    Rule {
        status: ConsolidatedStatus::Ignored,
        condition: "tree = ignored",
        matches: |r| r.tree == TreeState::Ignored,
    },
    Rule {
        status: ConsolidatedStatus::None,
        condition: "otherwise",
        matches: |_| true,
    },
];

/// The first rule in [`RULES`] that matches `record`.
pub fn matching_rule(record: &StatusRecord) -> &'static Rule {
    // The final rule is unconditional, so the search always succeeds.
    RULES
        .iter()
        .find(|rule| (rule.matches)(record))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Collapse `record` into its consolidated status.
pub fn resolve(record: &StatusRecord) -> ConsolidatedStatus {
    let rule = matching_rule(record);
    log::trace!("{} resolved by rule {} to {}", record, rule.rank(), rule.status);
    rule.status
}
