//! git-file-state - per-file source control status for editor integrations.
//!
//! The crate turns four raw status signals for a file (working tree diff, staging,
//! remote divergence and exclusive locks) into one deterministically ranked
//! [`ConsolidatedStatus`] and a set of [`Capabilities`] that gate user commands.
//!
//! # Public API
//! The public interface is re-exported from the [`core`] module:
//! - [`StatusRecord`] and its dimensions, [`resolve`] and the [`RULES`] table
//! - [`Capabilities`] derived from a snapshot
//! - [`HistoryIndex`] lookups
//! - [`FileStatusHandle`] and [`StatusTable`] for sharing snapshots across threads
//! - Collaborator traits and [`refresh`], plus the git2-backed [`GitRepo`]
//!
//! # Example
//! ```
//! use git_file_state::{
//!     ConsolidatedStatus, FileState, FileStatusHandle, LockState, RemoteState, StatusRecord,
//!     StatusUpdate, TreeState,
//! };
//!
//! let handle = FileStatusHandle::new("Content/Hero.uasset");
//! let record = StatusRecord::new(
//!     FileState::Modified,
//!     TreeState::Staged,
//!     RemoteState::Branched,
//!     LockState::NotLocked,
//! );
//! handle.apply_refresh(StatusUpdate::new(record, chrono::Utc::now()));
//!
//! assert_eq!(handle.status(), ConsolidatedStatus::Modified);
//! assert!(handle.capabilities().can_checkin);
//! ```

pub mod core;

// Re-export the core public API for external users
pub use core::{
    matching_rule,
    refresh,
    resolve,
    BranchProvider,
    // Capabilities
    Capabilities,
    Collaborators,
    ConsolidatedStatus,
    DiscardReason,
    DivergentBranch,
    FileState,
    // Snapshots and shared handles
    FileStatusHandle,
    // Error handling
    GitStateError,
    // Collaborators
    GitRepo,
    HistoryEntry,
    // History
    HistoryIndex,
    HistoryProvider,
    LockInfo,
    LockProvider,
    LockState,
    RefreshOutcome,
    RefreshToken,
    RemoteState,
    Result,
    RevisionId,
    Rule,
    // Configuration
    StatusConfig,
    StatusProvider,
    // Status model
    StatusRecord,
    StatusSnapshot,
    StatusTable,
    StatusUpdate,
    TreeState,
    RULES,
};
