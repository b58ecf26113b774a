//! git2-backed status and history provider.
//!
//! [`GitRepo`] wraps a `git2::Repository` and implements [`StatusProvider`],
//! [`HistoryProvider`] and [`BranchProvider`] on top of it. It does not know about
//! remotes or lock servers: the status provider reports the remote dimension as
//! `Branched`, and the lock dimension reflects only whether LFS locking is enabled. When
//! the branch provider finds a newer change on another local branch,
//! [`Collaborators::collect`](crate::core::provider::Collaborators::collect) lowers the
//! remote dimension to `NotLatest`. While a merge is in progress the history provider
//! reports the merge base of `HEAD` and `MERGE_HEAD`.
//!
//! # Public API
//! - [`GitRepo`]: provider over one repository
//! - [`dimensions_from_git2`]: map `git2::Status` flags onto file and tree dimensions

use crate::core::error::{GitStateError, Result};
use crate::core::history::{HistoryEntry, HistoryIndex, RevisionId};
use crate::core::provider::{BranchProvider, HistoryProvider, StatusProvider};
use crate::core::record::{FileState, LockState, RemoteState, StatusRecord, TreeState};
use crate::core::state::DivergentBranch;
use chrono::{TimeZone, Utc};
use git2::{BranchType, ErrorCode, Oid, Repository, RepositoryState, Status, Tree};
use std::path::{Path, PathBuf};

/// Map git2 status flags to `(FileState, TreeState)`.
///
/// Conflicts win, then staged changes, then working tree changes.
pub fn dimensions_from_git2(flags: Status) -> (FileState, TreeState) {
    if flags.contains(Status::CONFLICTED) {
        return (FileState::Unmerged, TreeState::Working);
    }

    // Staged changes
    if flags.contains(Status::INDEX_NEW) {
        return (FileState::Added, TreeState::Staged);
    }
    if flags.contains(Status::INDEX_DELETED) {
        return (FileState::Deleted, TreeState::Staged);
    }
    if flags.contains(Status::INDEX_RENAMED) {
        return (FileState::Renamed, TreeState::Staged);
    }
    if flags.intersects(Status::INDEX_MODIFIED | Status::INDEX_TYPECHANGE) {
        return (FileState::Modified, TreeState::Staged);
    }

    // Working tree changes
    if flags.contains(Status::WT_NEW) {
        return (FileState::Unknown, TreeState::Untracked);
    }
    if flags.contains(Status::WT_DELETED) {
        return (FileState::Missing, TreeState::Working);
    }
    if flags.contains(Status::WT_RENAMED) {
        return (FileState::Renamed, TreeState::Working);
    }
    if flags.intersects(Status::WT_MODIFIED | Status::WT_TYPECHANGE) {
        return (FileState::Modified, TreeState::Working);
    }

    if flags.contains(Status::IGNORED) {
        return (FileState::Unknown, TreeState::Ignored);
    }

    (FileState::Unknown, TreeState::Unmodified)
}

pub struct GitRepo {
    repo: Repository,
    lfs_locking: bool,
}

impl GitRepo {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitStateError::NotInGitRepo,
            _ => GitStateError::GitRepo(e),
        })?;
        Ok(GitRepo {
            repo,
            lfs_locking: false,
        })
    }

    /// Report tracked files as lockable instead of "lock state unknown".
    pub fn with_lfs_locking(mut self, enabled: bool) -> Self {
        self.lfs_locking = enabled;
        self
    }

    pub fn workdir(&self) -> Result<&Path> {
        self.repo.workdir().ok_or(GitStateError::NotInGitRepo)
    }

    /// `path` relative to the work tree. Relative inputs are taken relative to the
    /// current directory.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = canonical(self.workdir()?)?;
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        let absolute = canonical(&absolute)?;

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| GitStateError::path_outside_repo(path))
    }

    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_string))
    }

    /// Commits reachable from `start` that added, changed or removed `relative`, newest
    /// first, stopping after `limit` matches. Revision numbers are left at 0.
    fn file_changes(
        &self,
        start: Oid,
        relative: &Path,
        limit: Option<usize>,
    ) -> Result<Vec<HistoryEntry>> {
        let mut walk = self.repo.revwalk()?;
        walk.push(start)?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;

        let mut entries = Vec::new();
        for oid in walk {
            if limit.is_some_and(|limit| entries.len() >= limit) {
                break;
            }
            let commit = self.repo.find_commit(oid?)?;
            let blob = blob_id(&commit.tree()?, relative);
            let parent_blob = match commit.parent(0) {
                Ok(parent) => blob_id(&parent.tree()?, relative),
                Err(_) => None,
            };
            let action = match (parent_blob, blob) {
                (None, Some(_)) => "add",
                (Some(_), None) => "delete",
                (Some(before), Some(after)) if before != after => "modify",
                _ => continue,
            };

            let mut entry = HistoryEntry::new(commit.id().to_string(), 0);
            entry.description = commit.summary().unwrap_or_default().to_string();
            entry.author = commit.author().name().unwrap_or_default().to_string();
            entry.action = action.to_string();
            entry.date = Utc.timestamp_opt(commit.time().seconds(), 0).single();
            entry.file_size = match blob {
                Some(id) => Some(self.repo.find_blob(id)?.size() as u64),
                None => None,
            };
            entries.push(entry);
        }
        Ok(entries)
    }

    fn head_oid(&self) -> Option<Oid> {
        self.repo.head().ok().and_then(|head| head.target())
    }

    /// The commit `MERGE_HEAD` points at, if the file exists.
    fn merge_head(&self) -> Result<Option<Oid>> {
        match self.repo.revparse_single("MERGE_HEAD") {
            Ok(object) => Ok(Some(object.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn lock_state(&self, tree: TreeState) -> LockState {
        match tree {
            TreeState::Unmodified | TreeState::Working | TreeState::Staged if self.lfs_locking => {
                LockState::NotLocked
            }
            _ => LockState::Unknown,
        }
    }
}

impl StatusProvider for GitRepo {
    fn status_record(&self, path: &Path) -> Result<StatusRecord> {
        let relative = match self.relative_path(path) {
            Ok(relative) => relative,
            Err(GitStateError::PathOutsideRepo { path }) => {
                log::debug!("{} is outside the work tree", path.display());
                return Ok(StatusRecord::default());
            }
            Err(e) => return Err(e),
        };

        let flags = match self.repo.status_file(&relative) {
            Ok(flags) => flags,
            Err(e) if e.code() == ErrorCode::NotFound => {
                log::debug!("{} is unknown to git", relative.display());
                return Ok(StatusRecord::default());
            }
            Err(e) => return Err(e.into()),
        };

        let (file, tree) = dimensions_from_git2(flags);
        Ok(StatusRecord::new(
            file,
            tree,
            RemoteState::Branched,
            self.lock_state(tree),
        ))
    }
}

impl HistoryProvider for GitRepo {
    /// Commits reachable from HEAD that touched the file, newest first.
    fn history(&self, path: &Path) -> Result<HistoryIndex> {
        let relative = match self.relative_path(path) {
            Ok(relative) => relative,
            Err(GitStateError::PathOutsideRepo { .. }) => return Ok(HistoryIndex::default()),
            Err(e) => return Err(e),
        };
        // No commits yet
        let Some(head) = self.head_oid() else {
            return Ok(HistoryIndex::default());
        };

        let mut entries = self.file_changes(head, &relative, None)?;
        let total = entries.len() as u32;
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.revision_number = total - position as u32;
        }
        Ok(HistoryIndex::new(entries))
    }

    /// Common ancestor of `HEAD` and `MERGE_HEAD` while a merge is in progress.
    fn merge_base(&self, path: &Path) -> Result<Option<RevisionId>> {
        if self.repo.state() != RepositoryState::Merge {
            return Ok(None);
        }
        match self.relative_path(path) {
            Ok(_) => {}
            Err(GitStateError::PathOutsideRepo { .. }) => return Ok(None),
            Err(e) => return Err(e),
        }
        let (Some(head), Some(merge_head)) = (self.head_oid(), self.merge_head()?) else {
            return Ok(None);
        };

        match self.repo.merge_base(head, merge_head) {
            Ok(base) => {
                log::debug!("Merge base of {} is {}", path.display(), base);
                Ok(Some(RevisionId::new(base.to_string())))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl BranchProvider for GitRepo {
    /// The local branch holding the most recent change to the file, when that change is
    /// newer than the latest one reachable from HEAD.
    fn divergent_branch(&self, path: &Path) -> Result<Option<DivergentBranch>> {
        let relative = match self.relative_path(path) {
            Ok(relative) => relative,
            Err(GitStateError::PathOutsideRepo { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let current = self.current_branch()?;
        let head_latest = match self.head_oid() {
            Some(head) => self.file_changes(head, &relative, Some(1))?.pop(),
            None => None,
        };

        let mut newest: Option<DivergentBranch> = None;
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            let Some(name) = branch.name()?.map(str::to_string) else {
                continue;
            };
            if current.as_deref() == Some(name.as_str()) {
                continue;
            }
            let Some(tip) = branch.get().target() else {
                continue;
            };
            let Some(change) = self.file_changes(tip, &relative, Some(1))?.pop() else {
                continue;
            };
            let Some(modified_at) = change.date else {
                continue;
            };

            if let Some(latest) = &head_latest {
                if latest.revision == change.revision || latest.date >= Some(modified_at) {
                    continue;
                }
            }
            if newest
                .as_ref()
                .is_some_and(|found| found.modified_at >= modified_at)
            {
                continue;
            }
            newest = Some(DivergentBranch {
                branch: name,
                action: change.action,
                modified_at,
                commit: change.revision,
            });
        }
        Ok(newest)
    }
}

fn blob_id(tree: &Tree<'_>, path: &Path) -> Option<Oid> {
    tree.get_path(path).ok().map(|entry| entry.id())
}

/// Canonicalize `path`, falling back to its parent for files that no longer exist.
fn canonical(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(path) => Ok(path),
        Err(e) => match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => Ok(canonical(parent)?.join(name)),
            _ => Err(e.into()),
        },
    }
}
