//! Status records for the reference scenarios

#![allow(dead_code)]

use git_file_state::{FileState, LockState, RemoteState, StatusRecord, TreeState};

/// Scenario A: staged modification
pub fn staged_modification() -> StatusRecord {
    StatusRecord::new(
        FileState::Modified,
        TreeState::Staged,
        RemoteState::Branched,
        LockState::NotLocked,
    )
}

/// Scenario B: unresolved conflict
pub fn conflicted() -> StatusRecord {
    StatusRecord::new(
        FileState::Unmerged,
        TreeState::Working,
        RemoteState::Branched,
        LockState::NotLocked,
    )
}

/// Scenario C: clean locally, behind the remote
pub fn behind_remote() -> StatusRecord {
    StatusRecord::new(
        FileState::Unknown,
        TreeState::Unmodified,
        RemoteState::NotAtHead,
        LockState::NotLocked,
    )
}

/// Scenario D: locked by another user
pub fn locked_by_other() -> StatusRecord {
    StatusRecord::new(
        FileState::Unknown,
        TreeState::Unmodified,
        RemoteState::Branched,
        LockState::LockedOther,
    )
}

/// Scenario E: new file in a tracked project
pub fn untracked() -> StatusRecord {
    StatusRecord::new(
        FileState::Unknown,
        TreeState::Untracked,
        RemoteState::Branched,
        LockState::Unknown,
    )
}
