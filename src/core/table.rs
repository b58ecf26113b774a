//! Path-keyed table of shared status handles.
//!
//! The surrounding tool keeps one [`StatusTable`] and hands out `Arc<FileStatusHandle>`
//! clones to readers and refresh tasks. Untracking a path retracts its handle, so a
//! refresh that was started before the path was removed is dropped when it completes.

use crate::core::state::FileStatusHandle;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct StatusTable {
    handles: Mutex<HashMap<PathBuf, Arc<FileStatusHandle>>>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle for `path`, creating an uninitialized one on first observation.
    pub fn track(&self, path: impl AsRef<Path>) -> Arc<FileStatusHandle> {
        let path = path.as_ref();
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = handles.get(path) {
            return Arc::clone(handle);
        }
        log::debug!("Tracking {}", path.display());
        let handle = Arc::new(FileStatusHandle::new(path));
        handles.insert(path.to_path_buf(), Arc::clone(&handle));
        handle
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Arc<FileStatusHandle>> {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.get(path.as_ref()).cloned()
    }

    /// Stop tracking `path`. Returns the retracted handle, if there was one.
    pub fn untrack(&self, path: impl AsRef<Path>) -> Option<Arc<FileStatusHandle>> {
        let removed = {
            let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            handles.remove(path.as_ref())
        };
        if let Some(handle) = &removed {
            log::debug!("Untracking {}", handle.path().display());
            handle.retract();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tracked paths, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        let mut paths: Vec<PathBuf> = handles.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Paths never refreshed, or last refreshed more than `max_age` before `now`. Sorted.
    pub fn stale_paths(&self, now: DateTime<Utc>, max_age: Duration) -> Vec<PathBuf> {
        let handles: Vec<Arc<FileStatusHandle>> = {
            let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            handles.values().cloned().collect()
        };
        let mut stale: Vec<PathBuf> = handles
            .iter()
            .filter(|handle| match handle.last_refreshed() {
                Some(refreshed_at) => now - refreshed_at > max_age,
                None => true,
            })
            .map(|handle| handle.path().to_path_buf())
            .collect();
        stale.sort();
        stale
    }
}
