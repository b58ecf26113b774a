//! Revision history attached to a file snapshot.
//!
//! A [`HistoryIndex`] is an immutable, newest-first list of [`HistoryEntry`] values
//! supplied by a history provider. The ordering is taken as given and never re-sorted:
//! position 0 is the latest revision. Refreshes replace the whole index.
//!
//! # Public API
//! - [`RevisionId`]: opaque, orderable revision identifier (a commit id for git)
//! - [`HistoryEntry`]: one revision summary
//! - [`HistoryIndex`]: positional and by-identifier lookup

use crate::core::error::{GitStateError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First seven characters, the conventional abbreviated form.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(7) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RevisionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A revision summary. Only `revision` and `revision_number` take part in lookups; the
/// rest is carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub revision: RevisionId,
    /// Sequential number of the revision in the file's history, oldest is 1
    pub revision_number: u32,
    pub description: String,
    pub author: String,
    /// Change kind within the commit ("add", "modify", "delete", ...)
    pub action: String,
    pub date: Option<DateTime<Utc>>,
    pub file_size: Option<u64>,
}

impl HistoryEntry {
    pub fn new(revision: impl Into<RevisionId>, revision_number: u32) -> Self {
        Self {
            revision: revision.into(),
            revision_number,
            description: String::new(),
            author: String::new(),
            action: String::new(),
            date: None,
            file_size: None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryIndex {
    entries: Vec<HistoryEntry>,
}

impl HistoryIndex {
    /// Wrap `entries`, which must already be ordered newest first.
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_at(&self, position: usize) -> Result<&HistoryEntry> {
        self.entries
            .get(position)
            .ok_or_else(|| GitStateError::history_out_of_range(position, self.size()))
    }

    /// The newest revision, if there is any history at all.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn find_by_revision(&self, revision: &str) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.revision.as_str() == revision)
    }

    pub fn find_by_number(&self, revision_number: u32) -> Option<&HistoryEntry> {
        self.entries
            .iter()
            .find(|entry| entry.revision_number == revision_number)
    }

    /// Resolve the merge-base identifier of the owning snapshot against this history.
    pub fn base_for_merge(&self, merge_base: Option<&RevisionId>) -> Option<&HistoryEntry> {
        merge_base.and_then(|base| self.find_by_revision(base.as_str()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a HistoryIndex {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<HistoryEntry> for HistoryIndex {
    fn from_iter<I: IntoIterator<Item = HistoryEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_history() -> HistoryIndex {
        HistoryIndex::new(vec![
            HistoryEntry::new("c3f1a9e0b7d24410", 3),
            HistoryEntry::new("8d02b6c4e1f07733", 2),
            HistoryEntry::new("1a2b3c4d5e6f7081", 1),
        ])
    }

    #[test]
    fn test_size() {
        assert_eq!(sample_history().size(), 3);
        assert_eq!(HistoryIndex::default().size(), 0);
        assert!(HistoryIndex::default().is_empty());
    }

    #[test]
    fn test_entry_at_in_range() -> Result<()> {
        let history = sample_history();
        assert_eq!(history.entry_at(0)?.revision_number, 3);
        assert_eq!(history.entry_at(2)?.revision_number, 1);
        Ok(())
    }

    #[test]
    fn test_entry_at_out_of_range() {
        let history = sample_history();
        let err = history.entry_at(3).unwrap_err();
        assert!(matches!(
            err,
            GitStateError::HistoryOutOfRange {
                position: 3,
                size: 3
            }
        ));
        assert!(history.entry_at(usize::MAX).is_err());
    }

    #[test]
    fn test_entry_at_on_empty_history() {
        let history = HistoryIndex::default();
        assert!(matches!(
            history.entry_at(0),
            Err(GitStateError::HistoryOutOfRange {
                position: 0,
                size: 0
            })
        ));
    }

    #[test]
    fn test_latest_is_first_entry() {
        let history = sample_history();
        assert_eq!(
            history.latest().map(|e| e.revision.as_str()),
            Some("c3f1a9e0b7d24410")
        );
        assert!(HistoryIndex::default().latest().is_none());
    }

    #[test]
    fn test_find_by_revision() {
        let history = sample_history();
        let entry = history.find_by_revision("8d02b6c4e1f07733");
        assert_eq!(entry.map(|e| e.revision_number), Some(2));

        // Prefixes are not matches.
        assert!(history.find_by_revision("8d02b6c").is_none());
        assert!(history.find_by_revision("").is_none());
        assert!(HistoryIndex::default()
            .find_by_revision("8d02b6c4e1f07733")
            .is_none());
    }

    #[test]
    fn test_find_by_number() {
        let history = sample_history();
        assert_eq!(
            history.find_by_number(1).map(|e| e.revision.as_str()),
            Some("1a2b3c4d5e6f7081")
        );
        assert!(history.find_by_number(4).is_none());
    }

    #[test]
    fn test_base_for_merge() {
        let history = sample_history();
        let base = RevisionId::new("1a2b3c4d5e6f7081");
        assert_eq!(
            history.base_for_merge(Some(&base)).map(|e| e.revision_number),
            Some(1)
        );
        assert!(history.base_for_merge(None).is_none());
        assert!(history
            .base_for_merge(Some(&RevisionId::new("ffffffff")))
            .is_none());
    }

    #[test]
    fn test_short_revision() {
        assert_eq!(RevisionId::new("c3f1a9e0b7d24410").short(), "c3f1a9e");
        assert_eq!(RevisionId::new("abc").short(), "abc");
    }

    #[test]
    fn test_collect_preserves_order() {
        let history: HistoryIndex = (1..=3).rev().map(|n| HistoryEntry::new(format!("rev{n}"), n)).collect();
        let numbers: Vec<u32> = history.iter().map(|e| e.revision_number).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
    }
}
