//! Snapshot persistence.
//!
//! The engine talks to a minimal byte store so the same logic runs
//! against a file, an in-memory buffer, or anything else. Loading is
//! infallible by contract: a missing key means first run, unparseable
//! bytes mean a logged fallback to defaults. Saving is best-effort.

use crate::snapshot::ProgressSnapshot;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Minimal byte-oriented key-value seam the engine persists through.
pub trait SnapshotStore {
    /// Read the stored blob. `Ok(None)` means no snapshot yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the stored blob wholesale.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// File-backed store at a fixed path.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)
    }
}

/// In-memory store for tests and embedding without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw bytes (corruption injection in tests).
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}

/// Load a snapshot, falling back to the empty default on a missing or
/// unreadable blob. Never returns an error; losing a corrupted
/// snapshot is accepted, crashing the caller is not.
pub fn load_snapshot(store: &dyn SnapshotStore) -> ProgressSnapshot {
    let bytes = match store.read() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return ProgressSnapshot::default(),
        Err(e) => {
            warn!("Failed to read progress snapshot, starting fresh: {e}");
            return ProgressSnapshot::default();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Progress snapshot is corrupt, starting fresh: {e}");
            ProgressSnapshot::default()
        }
    }
}

/// Write the whole snapshot back. Failures are logged and swallowed;
/// the in-memory snapshot stays authoritative for the session.
pub fn save_snapshot(store: &mut dyn SnapshotStore, snapshot: &ProgressSnapshot) {
    let bytes = match serde_json::to_vec(snapshot) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to serialize progress snapshot: {e}");
            return;
        }
    };
    if let Err(e) = store.write(&bytes) {
        warn!("Failed to persist progress snapshot: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_yields_default() {
        let store = MemoryStore::new();
        assert_eq!(load_snapshot(&store), ProgressSnapshot::default());
    }

    #[test]
    fn test_garbage_bytes_yield_default() {
        let store = MemoryStore::with_bytes(b"{not json at all".to_vec());
        assert_eq!(load_snapshot(&store), ProgressSnapshot::default());
    }

    #[test]
    fn test_memory_roundtrip() {
        let mut store = MemoryStore::new();
        let mut snap = ProgressSnapshot::default();
        snap.unlocked.push("tourist".to_string());
        save_snapshot(&mut store, &snap);
        assert_eq!(load_snapshot(&store), snap);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("progress.json"));
        assert_eq!(store.read().unwrap(), None);

        let mut snap = ProgressSnapshot::default();
        snap.current_streak = 3;
        save_snapshot(&mut store, &snap);
        assert_eq!(load_snapshot(&store), snap);
    }
}
