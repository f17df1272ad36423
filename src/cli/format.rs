//! Output formatting for CLI display.

use crate::ledger::GameSummary;
use crate::model::{HistoryEntry, Outcome, Verdict};
use crate::resolve::Odds;

/// Format an outcome as a result banner.
pub(super) fn format_outcome(outcome: &Outcome) -> String {
    if outcome.is_win {
        format!("You Won! +{}  {}", outcome.payout, outcome.narrative)
    } else {
        format!("You Lost  {}", outcome.narrative)
    }
}

/// Format one history row: time, game, bet, result, payout.
pub(super) fn format_history_entry(entry: &HistoryEntry) -> String {
    let time = entry.recorded_at.strftime("%Y-%m-%d %H:%M");
    let (result, payout) = match entry.verdict {
        Verdict::Win => ("Win", format!("+{}", entry.payout)),
        Verdict::Loss => ("Loss", "-".to_string()),
    };
    format!(
        "{time}  {:<12}  bet {:>6}  {result:<4}  {payout}",
        entry.game.title(),
        entry.wager
    )
}

pub(super) fn format_summary(summary: &GameSummary) -> String {
    format!(
        "{:<12}  {} played, {} won, {} wagered, net {:+}",
        summary.game.title(),
        summary.plays,
        summary.wins,
        summary.wagered,
        summary.net()
    )
}

pub(super) fn format_odds(label: &str, odds: Odds) -> String {
    format!(
        "{label:<21}  pays {}x, wins {:.1}%, house edge {:.1}%",
        odds.multiplier,
        odds.win_probability() * 100.0,
        odds.house_edge() * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::model::{Band, Choice, CoinFace, Draw, GameKind};

    fn entry(verdict: Verdict, payout: u64) -> HistoryEntry {
        HistoryEntry {
            game: GameKind::CoinGuess,
            wager: 25,
            verdict,
            payout,
            recorded_at: Timestamp::new(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn format_winning_outcome() {
        let outcome = Outcome {
            is_win: true,
            payout: 50,
            narrative: "You correctly guessed heads!".to_string(),
            drawn_value: Draw::Coin(CoinFace::Heads),
        };
        assert_eq!(
            format_outcome(&outcome),
            "You Won! +50  You correctly guessed heads!"
        );
    }

    #[test]
    fn format_history_rows() {
        assert_eq!(
            format_history_entry(&entry(Verdict::Win, 50)),
            "2023-11-14 22:13  Coin Toss     bet     25  Win   +50"
        );
        assert_eq!(
            format_history_entry(&entry(Verdict::Loss, 0)),
            "2023-11-14 22:13  Coin Toss     bet     25  Loss  -"
        );
    }

    #[test]
    fn format_negative_net() {
        let summary = GameSummary {
            game: GameKind::DiceGuess,
            plays: 3,
            wins: 0,
            wagered: 30,
            paid_out: 0,
        };
        assert_eq!(
            format_summary(&summary),
            "Dice Roll     3 played, 0 won, 30 wagered, net -30"
        );
    }

    #[test]
    fn format_break_even_odds() {
        let odds = Odds::for_game(GameKind::CoinGuess);
        assert_eq!(
            format_odds("Coin Toss", odds),
            "Coin Toss              pays 2x, wins 50.0%, house edge 0.0%"
        );
        let high = Odds::for_choice(Choice::Range(Band::High));
        assert!(format_odds("high", high).ends_with("house edge -2.0%"));
    }
}
