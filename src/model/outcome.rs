//! Outcome: what a resolver produced for one wager.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CoinFace, DieFace, GameKind};

/// The raw random draw behind an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Draw {
    Die(DieFace),
    Coin(CoinFace),
    Number(u8),
}

impl Draw {
    pub fn game(self) -> GameKind {
        match self {
            Self::Die(_) => GameKind::DiceGuess,
            Self::Coin(_) => GameKind::CoinGuess,
            Self::Number(_) => GameKind::RangeGuess,
        }
    }
}

impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Die(face) => face.fmt(f),
            Self::Coin(face) => face.fmt(f),
            Self::Number(n) => n.fmt(f),
        }
    }
}

/// A resolved wager, produced once and folded into a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub is_win: bool,

    /// Credits returned to the player. Zero on a loss.
    pub payout: u64,

    /// Human-readable description of the draw against the choice.
    pub narrative: String,

    pub drawn_value: Draw,
}
