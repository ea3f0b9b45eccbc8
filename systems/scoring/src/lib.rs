#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure scoring functions shared by the simulation and post-round reporting.
//!
//! Every function is total and deterministic. Accuracy values are expressed
//! in percent on a 0–100 scale.

/// Points awarded per character of a completed word before multipliers.
pub const POINTS_PER_CHARACTER: f64 = 10.0;

/// Upper bound of the combo multiplier.
pub const MAX_COMBO_MULTIPLIER: f64 = 2.0;

/// Score required to earn one coin.
pub const SCORE_PER_COIN: u64 = 50;

/// Characters that make up one "word" when measuring typing speed.
const CHARACTERS_PER_WORD: f64 = 5.0;

/// Multiplier awarded for the running accuracy.
///
/// Step function with inclusive lower bounds: 98% and above yields 1.4,
/// 95% yields 1.2, 90% yields 1.0 and anything lower 0.7.
#[must_use]
pub fn accuracy_multiplier(accuracy: f64) -> f64 {
    if accuracy >= 98.0 {
        1.4
    } else if accuracy >= 95.0 {
        1.2
    } else if accuracy >= 90.0 {
        1.0
    } else {
        0.7
    }
}

/// Multiplier awarded for the current combo: +0.1 per full ten, capped at 2.0.
#[must_use]
pub fn combo_multiplier(combo: u32) -> f64 {
    let tiers = f64::from(combo / 10);
    (1.0 + tiers * 0.1).min(MAX_COMBO_MULTIPLIER)
}

/// Points awarded for completing a word.
#[must_use]
pub fn word_score(word_length: usize, accuracy: f64, combo: u32) -> u64 {
    let base = word_length as f64 * POINTS_PER_CHARACTER;
    let score = base * accuracy_multiplier(accuracy) * combo_multiplier(combo);
    score.round().max(0.0) as u64
}

/// Coins converted from a round score, including the accuracy bonus.
#[must_use]
pub fn coins_from_score(total_score: u64, accuracy: f64) -> u64 {
    let bonus = if accuracy >= 95.0 {
        5
    } else if accuracy >= 90.0 {
        3
    } else {
        1
    };
    total_score / SCORE_PER_COIN + bonus
}

/// Words per minute, counting five correct characters as one word.
#[must_use]
pub fn wpm(correct_chars: u32, elapsed_seconds: f64) -> u32 {
    if elapsed_seconds <= 0.0 || !elapsed_seconds.is_finite() {
        return 0;
    }
    let words = f64::from(correct_chars) / CHARACTERS_PER_WORD;
    let minutes = elapsed_seconds / 60.0;
    (words / minutes).round() as u32
}

/// Share of correct keystrokes in percent.
///
/// A player who has not typed anything yet is treated as perfectly accurate.
#[must_use]
pub fn accuracy_percent(correct_chars: u32, total_chars: u32) -> f64 {
    if total_chars == 0 {
        return 100.0;
    }
    let ratio = f64::from(correct_chars) * 100.0 / f64::from(total_chars);
    ratio.clamp(0.0, 100.0)
}
