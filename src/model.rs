//! Core data model for punter.
//!
//! These types describe a wagering session: the games on offer, what a
//! player stakes on them, what the draw produced, and the durable record
//! left behind in the history.

mod game;
mod history;
mod outcome;
mod snapshot;
mod wager;

pub use game::{Band, Choice, CoinFace, DieFace, GameKind, InvalidChoice};
pub use history::{HistoryEntry, Verdict};
pub use outcome::{Draw, Outcome};
pub use snapshot::Snapshot;
pub use wager::{PendingWager, WagerRequest};
