//! Raw per-file status dimensions.
//!
//! A [`StatusRecord`] bundles the four independent signals an updater collects for one
//! file: the diff relationship with its base ([`FileState`]), its place in the staging
//! pipeline ([`TreeState`]), its relationship with the tracked remote tip
//! ([`RemoteState`]) and its exclusive-lock status ([`LockState`]).
//!
//! Records are plain data. They are built once per refresh cycle and compared
//! structurally, which lets callers skip a repaint when nothing changed.
//!
//! # Public API
//! - [`StatusRecord`]: the four dimensions for one file
//! - [`FileState`], [`TreeState`], [`RemoteState`], [`LockState`]: the dimensions
//!
//! Each dimension converts to and from its snake_case name (`"not_at_head"`,
//! `"locked_other"`, ...) for use on the command line and in JSON.

use crate::core::error::GitStateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Diff relationship between the working copy and its base.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileState {
    #[default]
    Unknown,
    Added,
    Copied,
    Deleted,
    Modified,
    Renamed,
    /// Tracked, but gone from disk
    Missing,
    /// Modified with unresolved conflicts
    Unmerged,
}

/// Where the file sits relative to the staging/commit pipeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeState {
    /// Synced to the current commit
    Unmodified,
    /// Modified, but not in the staging tree
    Working,
    /// In the staging tree
    Staged,
    /// Not tracked by the repository yet
    Untracked,
    /// Ignored by the repository
    Ignored,
    /// Outside the repository folder
    #[default]
    NotInRepo,
}

/// Relationship of the local revision to the tracked remote branch tip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteState {
    /// Local version is behind the remote
    NotAtHead,
    /// The remote has the file, the local copy does not
    AddedAtHead,
    /// The remote deleted the file
    DeletedAtHead,
    /// Not at the latest revision amongst the tracked branches
    NotLatest,
    /// Branched off, tracked branches are not considered
    #[default]
    Branched,
}

/// Exclusive-lock status for assets that need serialized edits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    #[default]
    Unknown,
    Unlockable,
    NotLocked,
    /// Locked by the current user
    Locked,
    /// Locked by someone else
    LockedOther,
}

/// The four raw status dimensions for one file.
///
/// `StatusRecord::default()` is `{Unknown, NotInRepo, Branched, Unknown}`: no
/// information yet, which never resolves to a status that claims anything about the file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusRecord {
    pub file: FileState,
    pub tree: TreeState,
    pub remote: RemoteState,
    pub lock: LockState,
}

impl StatusRecord {
    pub fn new(file: FileState, tree: TreeState, remote: RemoteState, lock: LockState) -> Self {
        Self {
            file,
            tree,
            remote,
            lock,
        }
    }
}

impl FileState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileState::Unknown => "unknown",
            FileState::Added => "added",
            FileState::Copied => "copied",
            FileState::Deleted => "deleted",
            FileState::Modified => "modified",
            FileState::Renamed => "renamed",
            FileState::Missing => "missing",
            FileState::Unmerged => "unmerged",
        }
    }
}

impl TreeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeState::Unmodified => "unmodified",
            TreeState::Working => "working",
            TreeState::Staged => "staged",
            TreeState::Untracked => "untracked",
            TreeState::Ignored => "ignored",
            TreeState::NotInRepo => "not_in_repo",
        }
    }
}

impl RemoteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteState::NotAtHead => "not_at_head",
            RemoteState::AddedAtHead => "added_at_head",
            RemoteState::DeletedAtHead => "deleted_at_head",
            RemoteState::NotLatest => "not_latest",
            RemoteState::Branched => "branched",
        }
    }
}

impl LockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockState::Unknown => "unknown",
            LockState::Unlockable => "unlockable",
            LockState::NotLocked => "not_locked",
            LockState::Locked => "locked",
            LockState::LockedOther => "locked_other",
        }
    }
}

impl FromStr for FileState {
    type Err = GitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(FileState::Unknown),
            "added" => Ok(FileState::Added),
            "copied" => Ok(FileState::Copied),
            "deleted" => Ok(FileState::Deleted),
            "modified" => Ok(FileState::Modified),
            "renamed" => Ok(FileState::Renamed),
            "missing" => Ok(FileState::Missing),
            "unmerged" => Ok(FileState::Unmerged),
            other => Err(GitStateError::invalid_variant("file state", other)),
        }
    }
}

impl FromStr for TreeState {
    type Err = GitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unmodified" => Ok(TreeState::Unmodified),
            "working" => Ok(TreeState::Working),
            "staged" => Ok(TreeState::Staged),
            "untracked" => Ok(TreeState::Untracked),
            "ignored" => Ok(TreeState::Ignored),
            "not_in_repo" => Ok(TreeState::NotInRepo),
            other => Err(GitStateError::invalid_variant("tree state", other)),
        }
    }
}

impl FromStr for RemoteState {
    type Err = GitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_at_head" => Ok(RemoteState::NotAtHead),
            "added_at_head" => Ok(RemoteState::AddedAtHead),
            "deleted_at_head" => Ok(RemoteState::DeletedAtHead),
            "not_latest" => Ok(RemoteState::NotLatest),
            "branched" => Ok(RemoteState::Branched),
            other => Err(GitStateError::invalid_variant("remote state", other)),
        }
    }
}

impl FromStr for LockState {
    type Err = GitStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(LockState::Unknown),
            "unlockable" => Ok(LockState::Unlockable),
            "not_locked" => Ok(LockState::NotLocked),
            "locked" => Ok(LockState::Locked),
            "locked_other" => Ok(LockState::LockedOther),
            other => Err(GitStateError::invalid_variant("lock state", other)),
        }
    }
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TreeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RemoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StatusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}, {}, {}}}",
            self.file, self.tree, self.remote, self.lock
        )
    }
}
