//! Core functionality for git-file-state.
//!
//! This module provides the status data model, the precedence resolver, capability
//! derivation, revision history, the shared per-file handles and the collaborator
//! interfaces that feed them.

pub mod capabilities;
pub mod colors;
pub mod config;
pub mod dirs;
pub mod error;
pub mod git;
pub mod git_status;
pub mod history;
pub mod output;
pub mod provider;
pub mod record;
pub mod resolver;
pub mod state;
pub mod table;

// === Error handling ===
pub use error::{GitStateError, Result};

// === Status model ===
// Raw dimensions, the consolidated status and the rule table that links them
pub use git_status::ConsolidatedStatus;
pub use record::{FileState, LockState, RemoteState, StatusRecord, TreeState};
pub use resolver::{matching_rule, resolve, Rule, RULES};

// === Capabilities ===
pub use capabilities::Capabilities;

// === History ===
pub use history::{HistoryEntry, HistoryIndex, RevisionId};

// === Snapshots and shared handles ===
pub use state::{
    DiscardReason, DivergentBranch, FileStatusHandle, RefreshOutcome, RefreshToken,
    StatusSnapshot, StatusUpdate,
};
pub use table::StatusTable;

// === Collaborators ===
pub use git::GitRepo;
pub use provider::{
    refresh, BranchProvider, Collaborators, HistoryProvider, LockInfo, LockProvider,
    StatusProvider,
};

// === Configuration ===
pub use config::StatusConfig;
