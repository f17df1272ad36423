//! Coin: call heads or tails. Pays 2x on a fair coin, so it breaks even.

use crate::model::{CoinFace, Draw, Outcome};

use super::{DrawSource, Odds};

pub(super) const ODDS: Odds = Odds {
    multiplier: 2,
    winning_draws: 1,
    possible_draws: 2,
};

pub(super) fn resolve<D: DrawSource + ?Sized>(
    wager: u64,
    choice: CoinFace,
    source: &mut D,
) -> Outcome {
    let landed = if source.draw(0, 1) == 0 {
        CoinFace::Heads
    } else {
        CoinFace::Tails
    };
    let is_win = landed == choice;

    let narrative = if is_win {
        format!("You correctly guessed {landed}!")
    } else {
        format!("The coin landed on {landed}, you guessed {choice}.")
    };

    Outcome {
        is_win,
        payout: if is_win {
            wager.saturating_mul(ODDS.multiplier)
        } else {
            0
        },
        narrative,
        drawn_value: Draw::Coin(landed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::resolve::scripted::Scripted;

    #[test]
    fn correct_call_doubles_the_wager() {
        let outcome = resolve(40, CoinFace::Tails, &mut Scripted::new([1]));
        assert!(outcome.is_win);
        assert_eq!(outcome.payout, 80);
        assert_eq!(outcome.drawn_value, Draw::Coin(CoinFace::Tails));
        assert_eq!(outcome.narrative, "You correctly guessed tails!");
    }

    #[test]
    fn wrong_call_pays_nothing() {
        let outcome = resolve(40, CoinFace::Tails, &mut Scripted::new([0]));
        assert!(!outcome.is_win);
        assert_eq!(outcome.payout, 0);
        assert_eq!(
            outcome.narrative,
            "The coin landed on heads, you guessed tails."
        );
    }

    #[test]
    fn win_rate_converges_to_one_half() {
        let mut rng = StdRng::seed_from_u64(0xC017);
        let rounds = 40_000;
        let mut wins = 0u32;
        for _ in 0..rounds {
            let outcome = resolve(7, CoinFace::Heads, &mut rng);
            if outcome.is_win {
                assert_eq!(outcome.payout, 14);
                wins += 1;
            }
        }
        let rate = f64::from(wins) / f64::from(rounds);
        assert!((rate - 0.5).abs() < 0.015, "win rate {rate}");
    }
}
