//! Punter: wager virtual credits on games of chance.
//!
//! The engine is split the way a wager flows through it: [`session`] takes
//! a wager, [`ledger`] debits it, [`resolve`] draws the outcome, the ledger
//! credits the payout and records it, and [`storage`] snapshots the result.
//! [`cli`] is one presentation on top; it holds no game logic.

pub mod cli;
pub mod config;
pub mod ledger;
pub mod model;
pub mod resolve;
pub mod session;
pub mod storage;
