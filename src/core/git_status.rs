//! The consolidated, totally ordered file status.
//!
//! [`ConsolidatedStatus`] is the single value a [`StatusRecord`](crate::core::record::StatusRecord)
//! collapses to. Variants are declared in precedence order: the first variant wins when
//! a record matches several rules (see [`crate::core::resolver`]).
//!
//! The value is what a presentation layer keys its glyph/name/tooltip table on, so the
//! set and its names are stable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A consolidation of status priorities, highest first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsolidatedStatus {
    NotAtHead,
    AddedAtHead,
    DeletedAtHead,
    LockedOther,
    NotLatest,
    /// Modified, with conflicts
    Unmerged,
    Added,
    Deleted,
    Modified,
    /// Not modified, but locked explicitly
    CheckedOut,
    Untracked,
    Lockable,
    Unmodified,
    Ignored,
    /// Whatever else
    #[default]
    None,
}

impl ConsolidatedStatus {
    /// Every status, in precedence order.
    pub const ALL: [ConsolidatedStatus; 15] = [
        ConsolidatedStatus::NotAtHead,
        ConsolidatedStatus::AddedAtHead,
        ConsolidatedStatus::DeletedAtHead,
        ConsolidatedStatus::LockedOther,
        ConsolidatedStatus::NotLatest,
        ConsolidatedStatus::Unmerged,
        ConsolidatedStatus::Added,
        ConsolidatedStatus::Deleted,
        ConsolidatedStatus::Modified,
        ConsolidatedStatus::CheckedOut,
        ConsolidatedStatus::Untracked,
        ConsolidatedStatus::Lockable,
        ConsolidatedStatus::Unmodified,
        ConsolidatedStatus::Ignored,
        ConsolidatedStatus::None,
    ];

    /// 1-based precedence rank; 1 dominates everything else.
    pub fn rank(&self) -> usize {
        *self as usize + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsolidatedStatus::NotAtHead => "not_at_head",
            ConsolidatedStatus::AddedAtHead => "added_at_head",
            ConsolidatedStatus::DeletedAtHead => "deleted_at_head",
            ConsolidatedStatus::LockedOther => "locked_other",
            ConsolidatedStatus::NotLatest => "not_latest",
            ConsolidatedStatus::Unmerged => "unmerged",
            ConsolidatedStatus::Added => "added",
            ConsolidatedStatus::Deleted => "deleted",
            ConsolidatedStatus::Modified => "modified",
            ConsolidatedStatus::CheckedOut => "checked_out",
            ConsolidatedStatus::Untracked => "untracked",
            ConsolidatedStatus::Lockable => "lockable",
            ConsolidatedStatus::Unmodified => "unmodified",
            ConsolidatedStatus::Ignored => "ignored",
            ConsolidatedStatus::None => "none",
        }
    }

    /// Get human-readable description for status
    pub fn description(&self) -> &'static str {
        match self {
            ConsolidatedStatus::NotAtHead => "not at head",
            ConsolidatedStatus::AddedAtHead => "added at head",
            ConsolidatedStatus::DeletedAtHead => "deleted at head",
            ConsolidatedStatus::LockedOther => "locked by another user",
            ConsolidatedStatus::NotLatest => "not at the latest revision",
            ConsolidatedStatus::Unmerged => "conflicted",
            ConsolidatedStatus::Added => "added",
            ConsolidatedStatus::Deleted => "deleted",
            ConsolidatedStatus::Modified => "modified",
            ConsolidatedStatus::CheckedOut => "checked out",
            ConsolidatedStatus::Untracked => "not under source control",
            ConsolidatedStatus::Lockable => "lockable",
            ConsolidatedStatus::Unmodified => "unchanged",
            ConsolidatedStatus::Ignored => "ignored",
            ConsolidatedStatus::None => "unknown",
        }
    }

    /// Remote divergence the user cannot see by diffing locally.
    pub fn is_remote_divergence(&self) -> bool {
        matches!(
            self,
            ConsolidatedStatus::NotAtHead
                | ConsolidatedStatus::AddedAtHead
                | ConsolidatedStatus::DeletedAtHead
                | ConsolidatedStatus::NotLatest
        )
    }

    /// Statuses that carry a local modification or an explicit lock.
    pub fn is_local_change(&self) -> bool {
        matches!(
            self,
            ConsolidatedStatus::Unmerged
                | ConsolidatedStatus::Added
                | ConsolidatedStatus::Deleted
                | ConsolidatedStatus::Modified
                | ConsolidatedStatus::CheckedOut
        )
    }
}

impl fmt::Display for ConsolidatedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
