//! Capability predicates used to gate user commands.
//!
//! [`Capabilities::derive`] is a pure function of a consolidated status and the raw record
//! it came from. Nothing here is cached; callers derive the set from the snapshot they are
//! currently holding.

use crate::core::git_status::ConsolidatedStatus;
use crate::core::record::{LockState, StatusRecord, TreeState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_checkout: bool,
    pub is_checked_out: bool,
    pub is_checked_out_other: bool,
    pub can_checkin: bool,
    pub can_add: bool,
    pub can_delete: bool,
    pub can_revert: bool,
    pub can_edit: bool,
    pub is_conflicted: bool,
    pub is_current: bool,
    pub is_source_controlled: bool,
    pub is_ignored: bool,
    pub is_unknown: bool,
    pub is_modified: bool,
    pub is_added: bool,
    pub is_deleted: bool,
}

impl Capabilities {
    pub fn derive(status: ConsolidatedStatus, record: &StatusRecord) -> Self {
        use ConsolidatedStatus as S;

        let is_source_controlled = is_source_controlled(record);
        Self {
            can_checkout: status == S::Lockable,
            is_checked_out: matches!(
                status,
                S::CheckedOut | S::Added | S::Deleted | S::Modified | S::Unmerged
            ),
            is_checked_out_other: record.lock == LockState::LockedOther,
            can_checkin: matches!(status, S::Added | S::Deleted | S::Modified | S::CheckedOut),
            can_add: status == S::Untracked,
            can_delete: is_source_controlled
                && !matches!(status, S::Deleted | S::Unmerged | S::LockedOther),
            can_revert: status.is_local_change(),
            can_edit: matches!(
                status,
                S::CheckedOut | S::Added | S::Modified | S::Unmerged | S::Untracked | S::Unmodified
            ),
            is_conflicted: status == S::Unmerged,
            is_current: is_source_controlled && !status.is_remote_divergence(),
            is_source_controlled,
            is_ignored: status == S::Ignored,
            is_unknown: status == S::None,
            is_modified: status == S::Modified,
            is_added: status == S::Added,
            is_deleted: status == S::Deleted,
        }
    }
}

pub fn is_source_controlled(record: &StatusRecord) -> bool {
    record.tree != TreeState::NotInRepo
}

/// The lock owner, reported only while the record says someone else holds the lock.
pub fn checked_out_other<'a>(record: &StatusRecord, lock_owner: Option<&'a str>) -> Option<&'a str> {
    match record.lock {
        LockState::LockedOther => lock_owner,
        _ => None,
    }
}
