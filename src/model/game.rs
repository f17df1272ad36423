//! Games and the selections a player can make on them.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// The games on offer. Each kind has exactly one resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    /// Guess the face of a six-sided die.
    #[serde(rename = "dice-roll")]
    DiceGuess,

    /// Call heads or tails.
    #[serde(rename = "coin-toss")]
    CoinGuess,

    /// Pick the third of 1–100 a number will land in.
    #[serde(rename = "number-range")]
    RangeGuess,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [Self::DiceGuess, Self::CoinGuess, Self::RangeGuess];

    /// Display name shown in history tables and banners.
    pub fn title(self) -> &'static str {
        match self {
            Self::DiceGuess => "Dice Roll",
            Self::CoinGuess => "Coin Toss",
            Self::RangeGuess => "Number Range",
        }
    }

    /// Parse a player's selection for this game.
    ///
    /// Accepts `1`–`6` for dice, `heads`/`tails` (or `h`/`t`) for the coin,
    /// and `low`/`medium`/`high` for the range game. Case-insensitive.
    pub fn parse_choice(self, input: &str) -> Result<Choice, InvalidChoice> {
        let normalized = input.trim().to_ascii_lowercase();
        let choice = match self {
            Self::DiceGuess => normalized
                .parse::<u8>()
                .ok()
                .and_then(DieFace::new)
                .map(Choice::Dice),
            Self::CoinGuess => match normalized.as_str() {
                "heads" | "h" => Some(Choice::Coin(CoinFace::Heads)),
                "tails" | "t" => Some(Choice::Coin(CoinFace::Tails)),
                _ => None,
            },
            Self::RangeGuess => match normalized.as_str() {
                "low" | "l" => Some(Choice::Range(Band::Low)),
                "medium" | "med" | "m" => Some(Choice::Range(Band::Medium)),
                "high" | "h" => Some(Choice::Range(Band::High)),
                _ => None,
            },
        };
        choice.ok_or_else(|| InvalidChoice {
            game: self,
            input: input.to_string(),
        })
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A selection that does not belong to the game it was submitted for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a valid choice for {game}")]
pub struct InvalidChoice {
    pub game: GameKind,
    pub input: String,
}

/// A die face, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    pub const FACES: RangeInclusive<u8> = 1..=6;

    pub fn new(value: u8) -> Option<Self> {
        Self::FACES.contains(&value).then_some(Self(value))
    }

    /// Pins an arbitrary draw onto the die.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(*Self::FACES.start(), *Self::FACES.end()))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DieFace {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("die face out of range: {value}"))
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> Self {
        face.0
    }
}

impl fmt::Display for DieFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinFace {
    Heads,
    Tails,
}

impl fmt::Display for CoinFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heads => f.write_str("heads"),
            Self::Tails => f.write_str("tails"),
        }
    }
}

/// One of three equal-width slices of `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Self::Low, Self::Medium, Self::High];

    /// The numbers this band covers. Bands are disjoint and together cover `1..=100`.
    pub fn bounds(self) -> RangeInclusive<u8> {
        match self {
            Self::Low => 1..=33,
            Self::Medium => 34..=66,
            Self::High => 67..=100,
        }
    }

    pub fn contains(self, number: u8) -> bool {
        self.bounds().contains(&number)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// A game-specific selection. The variant determines which game it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Dice(DieFace),
    Coin(CoinFace),
    Range(Band),
}

impl Choice {
    pub fn game(self) -> GameKind {
        match self {
            Self::Dice(_) => GameKind::DiceGuess,
            Self::Coin(_) => GameKind::CoinGuess,
            Self::Range(_) => GameKind::RangeGuess,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice(face) => face.fmt(f),
            Self::Coin(face) => face.fmt(f),
            Self::Range(band) => band.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_kind_uses_snapshot_names() {
        let json = serde_json::to_string(&GameKind::ALL).unwrap();
        assert_eq!(json, r#"["dice-roll","coin-toss","number-range"]"#);
    }

    #[test]
    fn die_face_rejects_out_of_range() {
        assert!(DieFace::new(0).is_none());
        assert!(DieFace::new(7).is_none());
        assert_eq!(DieFace::new(6).map(DieFace::value), Some(6));
    }

    #[test]
    fn bands_are_disjoint_and_exhaustive() {
        for n in 1..=100u8 {
            let hits = Band::ALL.iter().filter(|b| b.contains(n)).count();
            assert_eq!(hits, 1, "{n} falls in {hits} bands");
        }
        assert!(Band::ALL.iter().all(|b| !b.contains(0) && !b.contains(101)));
    }

    #[test]
    fn parses_choices_per_game() {
        assert_eq!(
            GameKind::DiceGuess.parse_choice("4").unwrap(),
            Choice::Dice(DieFace(4))
        );
        assert_eq!(
            GameKind::CoinGuess.parse_choice("Tails").unwrap(),
            Choice::Coin(CoinFace::Tails)
        );
        assert_eq!(
            GameKind::RangeGuess.parse_choice(" med ").unwrap(),
            Choice::Range(Band::Medium)
        );
    }

    #[test]
    fn rejects_choices_from_other_games() {
        let err = GameKind::DiceGuess.parse_choice("heads").unwrap_err();
        assert_eq!(err.game, GameKind::DiceGuess);
        assert!(GameKind::DiceGuess.parse_choice("9").is_err());
        assert!(GameKind::CoinGuess.parse_choice("low").is_err());
        assert!(GameKind::RangeGuess.parse_choice("3").is_err());
    }

    #[test]
    fn choice_knows_its_game() {
        assert_eq!(Choice::Coin(CoinFace::Heads).game(), GameKind::CoinGuess);
        assert_eq!(Choice::Range(Band::High).game(), GameKind::RangeGuess);
    }
}
