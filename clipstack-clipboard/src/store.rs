//! Session stores the clipboard persists its snapshot into.
//!
//! The clipboard never looks a store up on its own; callers pass one to
//! [`crate::Clipboard::load_from`] and [`crate::Clipboard::save_to`].

use crate::error::ClipboardResult;
use crate::snapshot::Snapshot;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key/value storage scoped to one user session.
///
/// Each call is treated as a single atomic read or write of a whole snapshot.
pub trait SessionStore {
    /// Returns the snapshot stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Snapshot>;

    /// Stores `snapshot` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, snapshot: Snapshot) -> ClipboardResult<()>;
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, Snapshot>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the snapshot under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Snapshot> {
        self.entries.remove(key)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<Snapshot> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, snapshot: Snapshot) -> ClipboardResult<()> {
        self.entries.insert(key.to_string(), snapshot);
        Ok(())
    }
}

/// Session store keeping one JSON file per key inside a directory.
///
/// Writes go to a temporary file that is then renamed over the target, so a
/// reader sees either the old or the new snapshot.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Opens (or creates) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> ClipboardResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Returns the store's directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a key is stored in.
    ///
    /// Bytes outside `[A-Za-z0-9._-]` are percent-escaped, `%` included, so
    /// distinct keys never share a file.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'_') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<Snapshot> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Some(Snapshot::from_raw(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read session file {:?}: {}", path, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, snapshot: Snapshot) -> ClipboardResult<()> {
        let path = self.path_for(key);
        if let Err(e) = self.write_atomic(&path, snapshot.as_str()) {
            warn!("Failed to write session file {:?}: {}", path, e);
            return Err(e.into());
        }
        debug!("Wrote session file {:?}", path);
        Ok(())
    }
}
