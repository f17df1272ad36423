//! Snapshot: the durable subset of a session.

use serde::{Deserialize, Serialize};

use super::HistoryEntry;

/// Balance and history as stored between runs. History is newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub credits: u64,
    pub history: Vec<HistoryEntry>,
}

impl Snapshot {
    /// A fresh snapshot holding the initial stake and no history.
    pub fn fresh(initial_stake: u64) -> Self {
        Self {
            credits: initial_stake,
            history: Vec::new(),
        }
    }

    /// Checks every history entry is one a resolved wager could produce.
    pub fn validate(&self) -> Result<(), String> {
        for (i, entry) in self.history.iter().enumerate() {
            entry
                .validate()
                .map_err(|e| format!("history[{i}]: {e}"))?;
        }
        Ok(())
    }
}
