//! The wager ledger: balance, history, and the rules for changing them.
//!
//! The ledger is the only owner of the balance. Every mutation goes through
//! [`Ledger::debit`], [`Ledger::credit`], [`Ledger::append_history`],
//! [`Ledger::settle`], or [`Ledger::reset`], and each one is followed by a
//! snapshot. Snapshots are written synchronously in mutation order, so the
//! most recent state is always the one left on disk.

use tracing::{info, warn};

use crate::model::{GameKind, HistoryEntry, Snapshot, Verdict};
use crate::storage::Persistence;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient funds: cannot stake {requested} with {available} available")]
    InsufficientFunds { requested: u64, available: u64 },
}

pub struct Ledger {
    balance: u64,
    history: Vec<HistoryEntry>,
    initial_stake: u64,
    persistence: Persistence,
}

impl Ledger {
    /// Opens the ledger from the persisted snapshot, or starts fresh with
    /// `initial_stake` when there is none.
    pub fn open(persistence: Persistence, initial_stake: u64) -> Self {
        let snapshot = persistence
            .load()
            .unwrap_or_else(|| Snapshot::fresh(initial_stake));

        let ledger = Self {
            balance: snapshot.credits,
            history: snapshot.history,
            initial_stake,
            persistence,
        };

        if !ledger.is_consistent() {
            warn!(
                balance = ledger.balance,
                replayed = %ledger.replayed_balance(),
                "stored balance does not match its history"
            );
        }
        info!(
            balance = ledger.balance,
            entries = ledger.history.len(),
            "ledger opened"
        );
        ledger
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Resolved wagers, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn initial_stake(&self) -> u64 {
        self.initial_stake
    }

    /// Takes a stake out of the balance.
    ///
    /// Fails without touching anything when `amount` is zero or exceeds the
    /// balance. A wager must be debited before its outcome is drawn.
    pub fn debit(&mut self, amount: u64) -> Result<(), LedgerError> {
        if amount == 0 || amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.persist();
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.persist();
    }

    /// Records a resolved wager at the front of the history.
    pub fn append_history(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
        self.persist();
    }

    /// Credits a payout and records its entry as one mutation.
    ///
    /// No snapshot ever holds the payout without its history entry.
    pub fn settle(&mut self, payout: u64, entry: HistoryEntry) {
        self.balance = self.balance.saturating_add(payout);
        self.history.insert(0, entry);
        self.persist();
    }

    /// Restores the initial stake and clears the history in one step.
    pub fn reset(&mut self) {
        self.balance = self.initial_stake;
        self.history.clear();
        info!(balance = self.balance, "ledger reset");
        self.persist();
    }

    /// The balance implied by replaying the history from the initial stake.
    pub fn replayed_balance(&self) -> i128 {
        let net: i128 = self.history.iter().map(HistoryEntry::net).sum();
        i128::from(self.initial_stake) + net
    }

    pub fn is_consistent(&self) -> bool {
        self.replayed_balance() == i128::from(self.balance)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            credits: self.balance,
            history: self.history.clone(),
        }
    }

    /// Per-game totals over the whole history, in [`GameKind::ALL`] order.
    pub fn summary(&self) -> Vec<GameSummary> {
        GameKind::ALL
            .iter()
            .map(|&game| {
                self.history
                    .iter()
                    .filter(|e| e.game == game)
                    .fold(GameSummary::empty(game), |mut acc, e| {
                        acc.plays += 1;
                        if e.verdict == Verdict::Win {
                            acc.wins += 1;
                        }
                        acc.wagered += e.wager;
                        acc.paid_out += e.payout;
                        acc
                    })
            })
            .collect()
    }

    /// Final best-effort write of the current state.
    pub fn flush(&self) {
        self.persist();
    }

    fn persist(&self) {
        self.persistence.save(&self.snapshot());
    }
}

/// Totals for one game across the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub game: GameKind,
    pub plays: u64,
    pub wins: u64,
    pub wagered: u64,
    pub paid_out: u64,
}

impl GameSummary {
    fn empty(game: GameKind) -> Self {
        Self {
            game,
            plays: 0,
            wins: 0,
            wagered: 0,
            paid_out: 0,
        }
    }

    /// Net change to the player's balance from this game.
    pub fn net(&self) -> i128 {
        i128::from(self.paid_out) - i128::from(self.wagered)
    }
}
