//! Readers never observe a half-applied refresh, and retracted handles stay quiet.

use chrono::{TimeZone, Utc};
use git_file_state::{
    refresh, resolve, Collaborators, DiscardReason, FileState, HistoryEntry, HistoryIndex,
    HistoryProvider, LockState, RefreshOutcome, RemoteState, Result, StatusProvider,
    StatusRecord, StatusTable, StatusUpdate, TreeState,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const RECORDS: [StatusRecord; 4] = [
    StatusRecord {
        file: FileState::Modified,
        tree: TreeState::Working,
        remote: RemoteState::Branched,
        lock: LockState::NotLocked,
    },
    StatusRecord {
        file: FileState::Unknown,
        tree: TreeState::Untracked,
        remote: RemoteState::Branched,
        lock: LockState::Unknown,
    },
    StatusRecord {
        file: FileState::Unmerged,
        tree: TreeState::Working,
        remote: RemoteState::Branched,
        lock: LockState::NotLocked,
    },
    StatusRecord {
        file: FileState::Unknown,
        tree: TreeState::Unmodified,
        remote: RemoteState::NotAtHead,
        lock: LockState::NotLocked,
    },
];

/// History whose size encodes which record it was published with.
fn history_for(index: usize) -> HistoryIndex {
    (1..=index as u32 + 1)
        .rev()
        .map(|n| HistoryEntry::new(format!("rev{n}"), n))
        .collect()
}

fn update_for(index: usize, secs: i64) -> StatusUpdate {
    StatusUpdate::new(RECORDS[index], Utc.timestamp_opt(secs, 0).unwrap())
        .with_history(history_for(index))
}

#[cfg(test)]
mod refresh_concurrency_tests {
    use super::*;

    #[test]
    fn test_readers_see_consistent_snapshots() {
        let table = Arc::new(StatusTable::new());
        let handle = table.track("Content/Map.umap");
        let done = Arc::new(AtomicBool::new(false));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                let done = Arc::clone(&done);
                thread::spawn(move || {
                    let mut observed = 0usize;
                    while !done.load(Ordering::SeqCst) {
                        let snapshot = handle.snapshot();
                        if !snapshot.is_initialized() {
                            continue;
                        }
                        let index = RECORDS
                            .iter()
                            .position(|record| record == snapshot.record())
                            .expect("record comes from the published set");
                        assert_eq!(snapshot.history().size(), index + 1);
                        assert_eq!(snapshot.status(), resolve(snapshot.record()));
                        observed += 1;
                    }
                    observed
                })
            })
            .collect();

        for i in 0..2_000 {
            handle.apply_refresh(update_for(i % RECORDS.len(), i as i64));
        }
        done.store(true, Ordering::SeqCst);

        for reader in readers {
            reader.join().expect("reader thread panicked");
        }
        assert_eq!(handle.snapshot().record(), &RECORDS[1_999 % RECORDS.len()]);
    }

    #[test]
    fn test_superseded_refresh_is_dropped() {
        let table = StatusTable::new();
        let handle = table.track("a.txt");

        let slow = handle.begin_refresh();
        let fast = handle.begin_refresh();

        assert!(handle.apply_if_current(fast, update_for(0, 2)).is_applied());
        assert_eq!(
            handle.apply_if_current(slow, update_for(1, 1)),
            RefreshOutcome::Discarded(DiscardReason::Superseded)
        );
        assert_eq!(handle.snapshot().record(), &RECORDS[0]);
    }

    /// Blocks inside the status query until the test lets it continue.
    struct GatedStatus {
        entered: Arc<Barrier>,
        release: Arc<Barrier>,
    }

    impl StatusProvider for GatedStatus {
        fn status_record(&self, _path: &Path) -> Result<StatusRecord> {
            self.entered.wait();
            self.release.wait();
            Ok(RECORDS[0])
        }
    }

    struct NoHistory;

    impl HistoryProvider for NoHistory {
        fn history(&self, _path: &Path) -> Result<HistoryIndex> {
            Ok(HistoryIndex::default())
        }
    }

    #[test]
    fn test_untrack_during_refresh() {
        let table = Arc::new(StatusTable::new());
        let handle = table.track("Content/Hero.uasset");
        let entered = Arc::new(Barrier::new(2));
        let release = Arc::new(Barrier::new(2));

        let worker = {
            let handle = Arc::clone(&handle);
            let provider = GatedStatus {
                entered: Arc::clone(&entered),
                release: Arc::clone(&release),
            };
            thread::spawn(move || {
                let collaborators = Collaborators::new(&provider).with_history(&NoHistory);
                refresh(&handle, &collaborators, Utc.timestamp_opt(5, 0).unwrap())
            })
        };

        entered.wait();
        assert!(table.untrack("Content/Hero.uasset").is_some());
        release.wait();

        let outcome = worker
            .join()
            .expect("refresh thread panicked")
            .expect("refresh failed");
        assert_eq!(outcome, RefreshOutcome::Discarded(DiscardReason::Retracted));
        assert!(!handle.snapshot().is_initialized());
        assert!(table.get("Content/Hero.uasset").is_none());
    }
}
