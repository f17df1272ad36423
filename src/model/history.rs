//! History entries: the durable record of each resolved wager.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::GameKind;

/// Whether a wager paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Win,
    Loss,
}

impl Verdict {
    pub fn from_win(is_win: bool) -> Self {
        if is_win { Self::Win } else { Self::Loss }
    }
}

/// One resolved wager. Immutable once recorded.
///
/// Field names on disk follow the snapshot format (`game`, `bet`, `result`,
/// `payout`, `timestamp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub game: GameKind,

    #[serde(rename = "bet")]
    pub wager: u64,

    #[serde(rename = "result")]
    pub verdict: Verdict,

    pub payout: u64,

    #[serde(rename = "timestamp")]
    pub recorded_at: Timestamp,
}

impl HistoryEntry {
    /// Change to the balance caused by this entry: the payout minus the stake.
    pub fn net(&self) -> i128 {
        i128::from(self.payout) - i128::from(self.wager)
    }

    /// Checks the entry could have been produced by a resolved wager.
    pub fn validate(&self) -> Result<(), String> {
        if self.wager == 0 {
            return Err(format!("{} entry has a zero wager", self.game));
        }
        if self.verdict == Verdict::Loss && self.payout != 0 {
            return Err(format!(
                "{} loss carries a payout of {}",
                self.game, self.payout
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(verdict: Verdict, wager: u64, payout: u64) -> HistoryEntry {
        HistoryEntry {
            game: GameKind::CoinGuess,
            wager,
            verdict,
            payout,
            recorded_at: Timestamp::new(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn serializes_with_snapshot_field_names() {
        let json = serde_json::to_value(entry(Verdict::Win, 10, 20)).unwrap();
        assert_eq!(json["game"], "coin-toss");
        assert_eq!(json["bet"], 10);
        assert_eq!(json["result"], "win");
        assert_eq!(json["payout"], 20);
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn reads_browser_style_timestamps() {
        let json = r#"{"game":"dice-roll","bet":5,"result":"loss","payout":0,
            "timestamp":"2024-03-01T12:30:00.000Z"}"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.game, GameKind::DiceGuess);
        assert_eq!(entry.recorded_at.as_second(), 1_709_296_200);
    }

    #[test]
    fn net_is_payout_minus_wager() {
        assert_eq!(entry(Verdict::Win, 10, 20).net(), 10);
        assert_eq!(entry(Verdict::Loss, 10, 0).net(), -10);
    }

    #[test]
    fn validate_rejects_impossible_entries() {
        assert!(entry(Verdict::Win, 10, 20).validate().is_ok());
        assert!(entry(Verdict::Win, 0, 0).validate().is_err());
        assert!(entry(Verdict::Loss, 10, 5).validate().is_err());
    }
}
