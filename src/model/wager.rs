//! Wagers: what a player stakes, before and while it resolves.

use jiff::Timestamp;

use super::{Choice, GameKind};

/// A request to stake `amount` credits on `choice`. Transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WagerRequest {
    pub game: GameKind,
    pub amount: u64,
    pub choice: Choice,
}

/// A wager that has been debited and is waiting for its draw.
///
/// Carries its own game so it always resolves against the game it was
/// placed on, even if the selection changes in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingWager {
    pub request: WagerRequest,
    pub placed_at: Timestamp,
}

impl PendingWager {
    pub fn game(&self) -> GameKind {
        self.request.game
    }

    pub fn amount(&self) -> u64 {
        self.request.amount
    }
}
