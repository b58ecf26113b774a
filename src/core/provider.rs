//! Collaborator interfaces and the refresh pipeline.
//!
//! The status model never talks to git, a lock server or the network itself. Those
//! collaborators plug in through the traits below; [`refresh`] runs them for one handle
//! and publishes the result under a [`RefreshToken`](crate::core::state::RefreshToken),
//! so a result that arrives after the path was untracked or re-refreshed is dropped.
//!
//! Provider errors propagate unchanged. Retrying is the caller's decision.

use crate::core::error::Result;
use crate::core::history::{HistoryIndex, RevisionId};
use crate::core::record::{LockState, RemoteState, StatusRecord};
use crate::core::state::{
    DiscardReason, DivergentBranch, FileStatusHandle, RefreshOutcome, StatusUpdate,
};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Supplies the raw status dimensions for a path.
pub trait StatusProvider {
    fn status_record(&self, path: &Path) -> Result<StatusRecord>;
}

/// Supplies a newest-first revision history for a path.
pub trait HistoryProvider {
    fn history(&self, path: &Path) -> Result<HistoryIndex>;

    /// Revision the local copy diverged from, while a conflict is unresolved.
    fn merge_base(&self, _path: &Path) -> Result<Option<RevisionId>> {
        Ok(None)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LockInfo {
    pub state: LockState,
    /// Set when someone else holds the lock
    pub owner: Option<String>,
}

/// Supplies exclusive-lock information for a path.
pub trait LockProvider {
    fn lock_info(&self, path: &Path) -> Result<LockInfo>;
}

/// Reports when the latest commit for a path lives on another branch.
pub trait BranchProvider {
    fn divergent_branch(&self, path: &Path) -> Result<Option<DivergentBranch>>;
}

/// The collaborators one refresh consults. Only the status provider is mandatory.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    status: &'a dyn StatusProvider,
    history: Option<&'a dyn HistoryProvider>,
    locks: Option<&'a dyn LockProvider>,
    branches: Option<&'a dyn BranchProvider>,
}

impl<'a> Collaborators<'a> {
    pub fn new(status: &'a dyn StatusProvider) -> Self {
        Self {
            status,
            history: None,
            locks: None,
            branches: None,
        }
    }

    pub fn with_history(mut self, history: &'a dyn HistoryProvider) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_locks(mut self, locks: &'a dyn LockProvider) -> Self {
        self.locks = Some(locks);
        self
    }

    pub fn with_branches(mut self, branches: &'a dyn BranchProvider) -> Self {
        self.branches = Some(branches);
        self
    }

    /// Query every configured collaborator for `path`.
    pub fn collect(&self, path: &Path, timestamp: DateTime<Utc>) -> Result<StatusUpdate> {
        let mut update = StatusUpdate::new(self.status.status_record(path)?, timestamp);

        if let Some(locks) = self.locks {
            let lock = locks.lock_info(path)?;
            update.record.lock = lock.state;
            update.lock_owner = lock.owner;
        }
        if let Some(history) = self.history {
            update.history = history.history(path)?;
            update.merge_base = history.merge_base(path)?;
        }
        if let Some(branches) = self.branches {
            update.divergent_branch = branches.divergent_branch(path)?;
            // A newer change on another branch means this copy is not the latest one.
            if update.divergent_branch.is_some()
                && update.record.remote == RemoteState::Branched
            {
                update.record.remote = RemoteState::NotLatest;
            }
        }
        Ok(update)
    }
}

/// Refresh `handle` from `collaborators`, stamping the result with `now`.
pub fn refresh(
    handle: &FileStatusHandle,
    collaborators: &Collaborators<'_>,
    now: DateTime<Utc>,
) -> Result<RefreshOutcome> {
    if handle.is_retracted() {
        return Ok(RefreshOutcome::Discarded(DiscardReason::Retracted));
    }
    let token = handle.begin_refresh();
    let update = collaborators.collect(handle.path(), now)?;
    Ok(handle.apply_if_current(token, update))
}
