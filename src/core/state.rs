//! Per-file status snapshots and the shared handle that publishes them.
//!
//! A [`StatusSnapshot`] is an immutable bundle of everything known about one file at one
//! refresh instant: the raw [`StatusRecord`], the status resolved from it, the history,
//! the lock owner, the merge base and the divergent-branch descriptor.
//!
//! A [`FileStatusHandle`] is the long-lived, reference-counted unit shared between the
//! path table, background refresh tasks and foreground readers. It holds the current
//! snapshot behind a single `Arc` that a refresh swaps in one step, so a reader sees either
//! the old snapshot or the new one in its entirety.
//!
//! # Refresh protocol
//! 1. [`FileStatusHandle::begin_refresh`] hands out a [`RefreshToken`].
//! 2. The caller gathers collaborator output off to the side into a [`StatusUpdate`].
//! 3. [`FileStatusHandle::apply_if_current`] publishes it, unless the handle was retracted
//!    or a newer token was issued in the meantime, in which case the update is dropped.

use crate::core::capabilities::{self, Capabilities};
use crate::core::git_status::ConsolidatedStatus;
use crate::core::history::{HistoryEntry, HistoryIndex, RevisionId};
use crate::core::record::StatusRecord;
use crate::core::resolver::resolve;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Where the latest commit for a file lives when that is not the checked-out branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergentBranch {
    pub branch: String,
    pub action: String,
    pub modified_at: DateTime<Utc>,
    pub commit: RevisionId,
}

/// Everything one refresh cycle collected for a file.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub record: StatusRecord,
    pub history: HistoryIndex,
    pub lock_owner: Option<String>,
    /// Present only while the file has unresolved conflict history
    pub merge_base: Option<RevisionId>,
    pub divergent_branch: Option<DivergentBranch>,
    pub timestamp: DateTime<Utc>,
}

impl StatusUpdate {
    pub fn new(record: StatusRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            record,
            history: HistoryIndex::default(),
            lock_owner: None,
            merge_base: None,
            divergent_branch: None,
            timestamp,
        }
    }

    pub fn with_history(mut self, history: HistoryIndex) -> Self {
        self.history = history;
        self
    }

    pub fn with_lock_owner(mut self, owner: impl Into<String>) -> Self {
        self.lock_owner = Some(owner.into());
        self
    }

    pub fn with_merge_base(mut self, merge_base: impl Into<RevisionId>) -> Self {
        self.merge_base = Some(merge_base.into());
        self
    }

    pub fn with_divergent_branch(mut self, branch: DivergentBranch) -> Self {
        self.divergent_branch = Some(branch);
        self
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    record: StatusRecord,
    status: ConsolidatedStatus,
    history: HistoryIndex,
    lock_owner: Option<String>,
    merge_base: Option<RevisionId>,
    divergent_branch: Option<DivergentBranch>,
    refreshed_at: Option<DateTime<Utc>>,
}

impl StatusSnapshot {
    /// The state of a handle before its first refresh.
    pub fn uninitialized() -> Self {
        Self::default()
    }

    pub fn from_update(update: StatusUpdate) -> Self {
        Self {
            status: resolve(&update.record),
            record: update.record,
            history: update.history,
            lock_owner: update.lock_owner,
            merge_base: update.merge_base,
            divergent_branch: update.divergent_branch,
            refreshed_at: Some(update.timestamp),
        }
    }

    pub fn record(&self) -> &StatusRecord {
        &self.record
    }

    pub fn status(&self) -> ConsolidatedStatus {
        self.status
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::derive(self.status, &self.record)
    }

    pub fn history(&self) -> &HistoryIndex {
        &self.history
    }

    pub fn lock_owner(&self) -> Option<&str> {
        self.lock_owner.as_deref()
    }

    /// Who holds the lock, when someone other than the current user does.
    pub fn checked_out_other(&self) -> Option<&str> {
        capabilities::checked_out_other(&self.record, self.lock_owner())
    }

    pub fn merge_base(&self) -> Option<&RevisionId> {
        self.merge_base.as_ref()
    }

    pub fn base_for_merge(&self) -> Option<&HistoryEntry> {
        self.history.base_for_merge(self.merge_base.as_ref())
    }

    pub fn other_branch_head_modification(&self) -> Option<&DivergentBranch> {
        self.divergent_branch.as_ref()
    }

    pub fn is_modified_in_other_branch(&self, current_branch: &str) -> bool {
        self.divergent_branch
            .as_ref()
            .is_some_and(|divergent| divergent.branch != current_branch)
    }

    /// Git locks are not branch-scoped, so a file is never checked out in another branch.
    pub fn is_checked_out_in_other_branch(&self, _current_branch: &str) -> bool {
        false
    }

    pub fn is_checked_out_or_modified_in_other_branch(&self, current_branch: &str) -> bool {
        self.is_checked_out_in_other_branch(current_branch)
            || self.is_modified_in_other_branch(current_branch)
    }

    pub fn is_initialized(&self) -> bool {
        self.refreshed_at.is_some()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Equal in every field except the refresh timestamp.
    pub fn same_content(&self, other: &StatusSnapshot) -> bool {
        self.record == other.record
            && self.history == other.history
            && self.lock_owner == other.lock_owner
            && self.merge_base == other.merge_base
            && self.divergent_branch == other.divergent_branch
    }
}

/// Captured by [`FileStatusHandle::begin_refresh`]; identifies one refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshToken {
    generation: u64,
}

impl RefreshToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The path is no longer tracked
    Retracted,
    /// A newer refresh was started after this one
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { changed: bool },
    Discarded(DiscardReason),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied { .. })
    }
}

#[derive(Debug)]
pub struct FileStatusHandle {
    path: PathBuf,
    current: RwLock<Arc<StatusSnapshot>>,
    generation: AtomicU64,
    retracted: AtomicBool,
}

impl FileStatusHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Arc::new(StatusSnapshot::uninitialized())),
            generation: AtomicU64::new(0),
            retracted: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current snapshot. Holding it never blocks a refresh.
    pub fn snapshot(&self) -> Arc<StatusSnapshot> {
        // Snapshots are immutable, so a poisoned lock still guards a consistent value.
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    pub fn status(&self) -> ConsolidatedStatus {
        self.snapshot().status()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.snapshot().capabilities()
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.snapshot().refreshed_at()
    }

    pub fn begin_refresh(&self) -> RefreshToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshToken { generation }
    }

    /// Start and immediately apply a refresh, superseding any refresh still in flight.
    pub fn apply_refresh(&self, update: StatusUpdate) -> RefreshOutcome {
        let token = self.begin_refresh();
        self.apply_if_current(token, update)
    }

    /// Publish `update` if `token` is still the latest refresh and the handle is tracked.
    pub fn apply_if_current(&self, token: RefreshToken, update: StatusUpdate) -> RefreshOutcome {
        let next = Arc::new(StatusSnapshot::from_update(update));

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if self.retracted.load(Ordering::SeqCst) {
            log::debug!("Discarding refresh of {}: path retracted", self.path.display());
            return RefreshOutcome::Discarded(DiscardReason::Retracted);
        }
        if self.generation.load(Ordering::SeqCst) != token.generation {
            log::debug!(
                "Discarding refresh {} of {}: superseded",
                token.generation,
                self.path.display()
            );
            return RefreshOutcome::Discarded(DiscardReason::Superseded);
        }

        let changed = !current.is_initialized() || !current.same_content(&next);
        log::debug!(
            "Applied refresh {} of {}: {} (changed: {})",
            token.generation,
            self.path.display(),
            next.status(),
            changed
        );
        *current = next;
        RefreshOutcome::Applied { changed }
    }

    /// Stop accepting refreshes. Pending and future results are discarded.
    pub fn retract(&self) {
        // Taken under the write lock so no apply can interleave with retraction.
        let _current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        self.retracted.store(true, Ordering::SeqCst);
    }

    pub fn is_retracted(&self) -> bool {
        self.retracted.load(Ordering::SeqCst)
    }
}
