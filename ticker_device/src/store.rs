//! Persistent snapshot of the last quote service response.
//!
//! The store is plain I/O: it knows nothing about the payload format or when to
//! write. Callers decide what to persist and what a failure means.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Durable slot holding one raw payload.
pub trait SnapshotStore {
    /// Overwrite the snapshot with `payload`.
    fn save(&mut self, payload: &[u8]) -> io::Result<()>;

    /// Read back the last saved snapshot.
    fn load(&self) -> io::Result<Vec<u8>>;
}

/// Snapshot kept in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, payload: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        // Write beside the target and rename over it, so a reader sees either
        // the old snapshot or the new one.
        let staging = self.staging_path();
        let written = File::create(&staging).and_then(|mut file| {
            file.write_all(payload)?;
            file.sync_all()
        });
        let renamed = written.and_then(|()| fs::rename(&staging, &self.path));
        if renamed.is_err() {
            let _ = fs::remove_file(&staging);
        }
        renamed
    }

    fn load(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}
