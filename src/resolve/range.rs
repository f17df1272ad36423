//! Range: pick the band a number in 1–100 will land in. Pays 3x.

use crate::model::{Band, Draw, Outcome};

use super::{DrawSource, Odds};

const MULTIPLIER: u64 = 3;

pub(super) fn odds(band: Band) -> Odds {
    let bounds = band.bounds();
    Odds {
        multiplier: MULTIPLIER,
        winning_draws: u32::from(bounds.end() - bounds.start() + 1),
        possible_draws: 100,
    }
}

pub(super) fn resolve<D: DrawSource + ?Sized>(wager: u64, choice: Band, source: &mut D) -> Outcome {
    let draw = source.draw(1, 100);
    debug_assert!((1..=100).contains(&draw), "range draw {draw} out of range");
    let number = draw.clamp(1, 100);
    let is_win = choice.contains(number);

    let narrative = if is_win {
        format!("{number} is in the {choice} range!")
    } else {
        format!("{number} is not in the {choice} range.")
    };

    Outcome {
        is_win,
        payout: if is_win {
            wager.saturating_mul(MULTIPLIER)
        } else {
            0
        },
        narrative,
        drawn_value: Draw::Number(number),
    }
}
