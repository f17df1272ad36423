//! In-memory snapshot store for tests.
//!
//! Clones share the same slot, so a test can keep a handle and inspect or
//! tamper with what the ledger wrote.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use crate::model::Snapshot;

use super::{Result, SnapshotStore, StorageError, parse_snapshot};

#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
    writes: Rc<Cell<usize>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw stored payload, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Overwrites the stored payload with arbitrary text.
    pub fn put_raw(&self, payload: &str) {
        *self.slot.borrow_mut() = Some(payload.to_string());
    }

    pub fn stored(&self) -> Option<Snapshot> {
        self.raw().map(|json| parse_snapshot(&json).unwrap())
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Makes every subsequent save fail.
    pub fn fail_writes(&self) {
        self.failing.set(true);
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.failing.get() {
            return Err(StorageError::Unavailable(io::Error::other("disk full")));
        }
        *self.slot.borrow_mut() = Some(serde_json::to_string(snapshot)?);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        self.raw().map(|json| parse_snapshot(&json)).transpose()
    }
}
