//! Dice: guess the face of a six-sided die. Pays 5x, a one-sixth house edge.

use crate::model::{DieFace, Draw, Outcome};

use super::{DrawSource, Odds};

pub(super) const ODDS: Odds = Odds {
    multiplier: 5,
    winning_draws: 1,
    possible_draws: 6,
};

pub(super) fn resolve<D: DrawSource + ?Sized>(
    wager: u64,
    choice: DieFace,
    source: &mut D,
) -> Outcome {
    let draw = source.draw(1, 6);
    debug_assert!(DieFace::FACES.contains(&draw), "die draw {draw} out of range");
    let rolled = DieFace::clamped(draw);
    let is_win = rolled == choice;

    let narrative = if is_win {
        format!("You correctly guessed {choice}!")
    } else {
        format!("The dice rolled {rolled}, you guessed {choice}.")
    };

    Outcome {
        is_win,
        payout: if is_win {
            wager.saturating_mul(ODDS.multiplier)
        } else {
            0
        },
        narrative,
        drawn_value: Draw::Die(rolled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::resolve::scripted::Scripted;

    fn face(n: u8) -> DieFace {
        DieFace::new(n).unwrap()
    }

    #[test]
    fn matching_face_pays_five_times() {
        let outcome = resolve(100, face(4), &mut Scripted::new([4]));
        assert!(outcome.is_win);
        assert_eq!(outcome.payout, 500);
        assert_eq!(outcome.drawn_value, Draw::Die(face(4)));
        assert_eq!(outcome.narrative, "You correctly guessed 4!");
    }

    #[test]
    fn other_face_pays_nothing() {
        let outcome = resolve(100, face(4), &mut Scripted::new([2]));
        assert!(!outcome.is_win);
        assert_eq!(outcome.payout, 0);
        assert_eq!(outcome.narrative, "The dice rolled 2, you guessed 4.");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "die draw 7 out of range")]
    fn out_of_range_draw_is_caught() {
        resolve(100, face(4), &mut Scripted::new([7]));
    }

    #[test]
    fn win_rate_converges_to_one_sixth() {
        let mut rng = StdRng::seed_from_u64(0xD1CE);
        let rounds = 60_000;
        let mut wins = 0u32;
        for _ in 0..rounds {
            let outcome = resolve(3, face(6), &mut rng);
            if outcome.is_win {
                assert_eq!(outcome.payout, 15);
                wins += 1;
            } else {
                assert_eq!(outcome.payout, 0);
            }
        }
        let rate = f64::from(wins) / f64::from(rounds);
        assert!((rate - 1.0 / 6.0).abs() < 0.01, "win rate {rate}");
    }
}
