//! Local persistence for the session snapshot.
//!
//! The durable state (balance and history) lives in a single JSON file under
//! the storage root:
//!
//! ```text
//! <root>/
//!   state.json      # Snapshot: credits + newest-first history
//!   config.toml     # Optional configuration (see `config`)
//! ```
//!
//! Writes go to a sibling temp file and are renamed into place, so a reader
//! sees either the previous snapshot or the new one, never a torn write.

#[cfg(test)]
pub mod memory;

use std::{fs, io, path::PathBuf};

use tracing::{debug, warn};

use crate::model::Snapshot;

/// Fixed key the snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "state";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] io::Error),

    #[error("corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// A place a snapshot can be written to and read back from.
pub trait SnapshotStore {
    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Reads the stored snapshot. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;
}

/// Local file-based snapshot storage.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a storage instance rooted at the given directory.
    ///
    /// The directory is created on first save, so an unusable root only
    /// surfaces as a (swallowed) save failure.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the default storage root: `~/.punter/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".punter"))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.root.join(format!("{SNAPSHOT_KEY}.json"))
    }
}

impl SnapshotStore for Storage {
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        let path = self.snapshot_path();
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        let json = match fs::read_to_string(self.snapshot_path()) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        parse_snapshot(&json).map(Some)
    }
}

/// Parses and validates a serialized snapshot.
pub fn parse_snapshot(json: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    snapshot.validate().map_err(StorageError::Invalid)?;
    Ok(snapshot)
}

/// Best-effort persistence on top of a [`SnapshotStore`].
///
/// Saving never fails and loading never errors: storage problems are logged
/// and the session carries on in memory.
pub struct Persistence {
    store: Box<dyn SnapshotStore>,
}

impl Persistence {
    pub fn new(store: impl SnapshotStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn save(&self, snapshot: &Snapshot) {
        match self.store.save(snapshot) {
            Ok(()) => debug!(
                credits = snapshot.credits,
                entries = snapshot.history.len(),
                "snapshot saved"
            ),
            Err(e) => warn!(error = %e, "failed to save snapshot, continuing in memory"),
        }
    }

    /// The stored snapshot, or `None` when absent, unreadable, or corrupt.
    pub fn load(&self) -> Option<Snapshot> {
        match self.store.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "ignoring stored snapshot, starting fresh");
                None
            }
        }
    }
}
