//! Outcome resolvers: one per game.
//!
//! A resolver maps a stake and a choice to an [`Outcome`] using nothing but
//! a [`DrawSource`]. Resolvers never touch the ledger; debiting happens
//! before a resolver runs and crediting after it returns.

mod coin;
mod dice;
mod range;

use rand::Rng;

use crate::model::{Band, Choice, GameKind, Outcome};

/// Uniform randomness behind every draw.
///
/// Implemented for every [`rand::Rng`]; tests substitute scripted draws.
pub trait DrawSource {
    /// A uniformly random integer in `low..=high`.
    fn draw(&mut self, low: u8, high: u8) -> u8;
}

impl<R: Rng + ?Sized> DrawSource for R {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        self.gen_range(low..=high)
    }
}

/// Resolve a wager of `wager` credits on `choice`.
pub fn resolve<D: DrawSource + ?Sized>(wager: u64, choice: Choice, source: &mut D) -> Outcome {
    match choice {
        Choice::Dice(face) => dice::resolve(wager, face, source),
        Choice::Coin(face) => coin::resolve(wager, face, source),
        Choice::Range(band) => range::resolve(wager, band, source),
    }
}

/// Pricing of a single choice: how often it wins and what it pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Odds {
    /// Payout as a multiple of the wager, stake included.
    pub multiplier: u64,
    pub winning_draws: u32,
    pub possible_draws: u32,
}

impl Odds {
    /// Odds for a particular choice. Range bands differ in width, so the
    /// range game is priced per band.
    pub fn for_choice(choice: Choice) -> Self {
        match choice {
            Choice::Dice(_) => dice::ODDS,
            Choice::Coin(_) => coin::ODDS,
            Choice::Range(band) => range::odds(band),
        }
    }

    /// Odds for a game's representative choice (the low band for range).
    pub fn for_game(game: GameKind) -> Self {
        match game {
            GameKind::DiceGuess => dice::ODDS,
            GameKind::CoinGuess => coin::ODDS,
            GameKind::RangeGuess => range::odds(Band::Low),
        }
    }

    pub fn win_probability(self) -> f64 {
        f64::from(self.winning_draws) / f64::from(self.possible_draws)
    }

    /// Expected net change per credit wagered. Negative means a house edge.
    pub fn expected_return(self) -> f64 {
        self.expected_payout() - 1.0
    }

    /// The house edge as a fraction of the wager (zero for a fair game).
    pub fn house_edge(self) -> f64 {
        1.0 - self.expected_payout()
    }

    fn expected_payout(self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let multiplier = self.multiplier as f64;
        self.win_probability() * multiplier
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::DrawSource;

    /// Replays a fixed sequence of draws, ignoring the requested bounds.
    pub struct Scripted(VecDeque<u8>);

    impl Scripted {
        pub fn new(draws: impl IntoIterator<Item = u8>) -> Self {
            Self(draws.into_iter().collect())
        }
    }

    impl DrawSource for Scripted {
        fn draw(&mut self, _low: u8, _high: u8) -> u8 {
            self.0.pop_front().expect("scripted draws exhausted")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::model::{CoinFace, DieFace};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn dice_carries_a_sixth_edge() {
        let odds = Odds::for_game(GameKind::DiceGuess);
        assert!((odds.expected_return() + 1.0 / 6.0).abs() < EPSILON);
    }

    #[test]
    fn coin_is_the_only_break_even_game() {
        let coin = Odds::for_game(GameKind::CoinGuess);
        assert!(coin.expected_return().abs() < EPSILON);

        let dice = Odds::for_game(GameKind::DiceGuess);
        assert!(dice.house_edge() > 0.0);
        for band in [Band::Low, Band::Medium] {
            assert!(Odds::for_choice(Choice::Range(band)).house_edge() > 0.0);
        }
    }

    #[test]
    fn range_bands_are_priced_by_width() {
        let low = Odds::for_choice(Choice::Range(Band::Low));
        let high = Odds::for_choice(Choice::Range(Band::High));
        assert!((low.expected_return() + 0.01).abs() < EPSILON);
        assert!((high.expected_return() - 0.02).abs() < EPSILON);
    }

    #[test]
    fn rng_draws_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let n = rng.draw(1, 6);
            assert!((1..=6).contains(&n));
        }
    }

    #[test]
    fn dispatches_on_choice() {
        let mut draws = scripted::Scripted::new([3, 0, 50]);
        let dice = resolve(10, Choice::Dice(DieFace::clamped(3)), &mut draws);
        let coin = resolve(10, Choice::Coin(CoinFace::Heads), &mut draws);
        let range = resolve(10, Choice::Range(Band::Medium), &mut draws);

        assert_eq!(dice.drawn_value.game(), GameKind::DiceGuess);
        assert_eq!(coin.drawn_value.game(), GameKind::CoinGuess);
        assert_eq!(range.drawn_value.game(), GameKind::RangeGuess);
        assert!(dice.is_win && coin.is_win && range.is_win);
    }
}
