use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const FIRST_LETTER: u8 = b'a';
const LETTER_COUNT: u8 = 26;

/// Scripted player that types at a fixed cadence with a fixed error rate.
#[derive(Debug)]
pub(crate) struct Typist {
    rng: ChaCha8Rng,
    miss_chance: f64,
    interval: Duration,
    budget: Duration,
}

impl Typist {
    /// Creates a typist with the given accuracy (percent) and characters per minute.
    pub(crate) fn new(seed: u64, accuracy: f64, characters_per_minute: u32) -> Self {
        let accuracy = if accuracy.is_finite() {
            accuracy.clamp(0.0, 100.0)
        } else {
            100.0
        };
        let interval = if characters_per_minute == 0 {
            Duration::MAX
        } else {
            Duration::from_secs(60) / characters_per_minute
        };
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            miss_chance: 1.0 - accuracy / 100.0,
            interval,
            budget: Duration::ZERO,
        }
    }

    /// Advances the typist's clock and reports how many keys are due.
    pub(crate) fn keys_due(&mut self, dt: Duration) -> u32 {
        self.budget = self.budget.saturating_add(dt);
        let mut due = 0;
        while self.budget >= self.interval {
            self.budget -= self.interval;
            due += 1;
        }
        due
    }

    /// Presses a key aiming for the expected character.
    pub(crate) fn press(&mut self, expected: char) -> char {
        if !self.rng.gen_bool(self.miss_chance) {
            return expected;
        }
        let offset = self.rng.gen_range(1..LETTER_COUNT);
        let base = if expected.is_ascii_lowercase() {
            expected as u8 - FIRST_LETTER
        } else {
            0
        };
        char::from(FIRST_LETTER + (base + offset) % LETTER_COUNT)
    }
}
