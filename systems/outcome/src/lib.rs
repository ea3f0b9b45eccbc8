#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grades a finished round and prepares the statistics handed to the
//! persistence layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use word_siege_core::{FinalStats, Modifiers, RoundSnapshot, WorldId};
use word_siege_system_scoring as scoring;

/// Highest number of stars a round can earn.
pub const MAX_STARS: u8 = 3;

/// Accuracy required for the second star.
const TWO_STAR_ACCURACY: f64 = 90.0;

/// Number of mistyped characters reported in the final statistics.
const TOP_ERROR_CHARS: usize = 5;

/// Complete grading of a finished round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Star rating between zero and [`MAX_STARS`].
    pub stars: u8,
    /// Coins awarded for the round.
    pub coins: u64,
    /// Statistics handed to the persistence layer.
    pub stats: FinalStats,
}

/// Star rating of a finished round.
///
/// A round that lost the castle or left any monster undefeated earns nothing.
/// Survivors earn one star, a second one at 90% accuracy and the third when
/// the castle additionally took no damage at all.
#[must_use]
pub fn stars(snapshot: &RoundSnapshot) -> u8 {
    let survived = snapshot.castle_hp > 0
        && snapshot.monsters.iter().all(|monster| monster.defeated);
    if !survived {
        return 0;
    }

    if accuracy(snapshot) < TWO_STAR_ACCURACY {
        return 1;
    }
    if snapshot.castle_hp == snapshot.max_castle_hp {
        MAX_STARS
    } else {
        2
    }
}

/// Coins awarded for a finished round.
#[must_use]
pub fn coins_earned(snapshot: &RoundSnapshot, coin_multiplier: f64, modifiers: &Modifiers) -> u64 {
    if stars(snapshot) == 0 {
        return 0;
    }

    let base = scoring::coins_from_score(snapshot.score, accuracy(snapshot)) as f64;
    let bonus = f64::from(modifiers.bonus_coins_percent) + f64::from(modifiers.bonus_both_percent);
    let coins = base * coin_multiplier.max(0.0) * (1.0 + bonus.max(0.0) / 100.0);
    coins.round() as u64
}

/// Statistics describing the typing performance of a round.
#[must_use]
pub fn final_stats(snapshot: &RoundSnapshot) -> FinalStats {
    FinalStats {
        wpm: scoring::wpm(snapshot.correct_chars, snapshot.elapsed.as_secs_f64()),
        accuracy: accuracy(snapshot),
        max_combo: snapshot.max_combo,
        score: snapshot.score,
        words_completed: snapshot.words_completed,
        top_error_chars: top_error_chars(&snapshot.total_errors),
    }
}

/// Grades a round played in the given world.
#[must_use]
pub fn evaluate(snapshot: &RoundSnapshot, world: WorldId, modifiers: &Modifiers) -> RoundReport {
    RoundReport {
        stars: stars(snapshot),
        coins: coins_earned(snapshot, world.coin_multiplier(), modifiers),
        stats: final_stats(snapshot),
    }
}

fn accuracy(snapshot: &RoundSnapshot) -> f64 {
    scoring::accuracy_percent(snapshot.correct_chars, snapshot.total_chars_typed)
}

fn top_error_chars(errors: &[char]) -> Vec<char> {
    let mut counts: BTreeMap<char, u32> = BTreeMap::new();
    for &character in errors {
        *counts.entry(character).or_default() += 1;
    }

    let mut ranked: Vec<(char, u32)> = counts.into_iter().collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1).then(left.0.cmp(&right.0)));
    ranked
        .into_iter()
        .take(TOP_ERROR_CHARS)
        .map(|(character, _)| character)
        .collect()
}
