#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic factory that turns a level configuration and a batch of
//! words into monster seeds for the round world.

use std::{collections::HashSet, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use word_siege_core::{
    KeyboardLayout, LevelConfig, Modifiers, MonsterId, MonsterSeed, RoundSettings,
    WordLengthRange, WordSource, MIN_MONSTER_SPEED, SPAWN_EDGE,
};

/// Multiplier applied to the base monster hit points for bosses.
pub const BOSS_HP_FACTOR: f32 = 3.0;

/// Multiplier applied to the base speed for bosses.
pub const BOSS_SPEED_FACTOR: f32 = 0.8;

/// Number of staggered starting lanes.
const STAGGER_LANES: u32 = 5;

/// Distance between two staggered starting positions.
const STAGGER_STEP: f32 = 8.0;

/// Synthesis attempts allowed per missing word before duplicates are accepted.
const SYNTHESIS_ATTEMPTS_PER_WORD: usize = 20;

/// Keys used when a word source reports an empty alphabet.
const FALLBACK_ALPHABET: &str = "asdfghjkl";

/// Configuration parameters required to construct the monster factory.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    settings: RoundSettings,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from round settings and a synthesis seed.
    #[must_use]
    pub const fn new(settings: RoundSettings, rng_seed: u64) -> Self {
        Self { settings, rng_seed }
    }
}

/// Words assigned to the monsters of a single round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundWords {
    /// Words of the regular monsters, in spawn order.
    pub minions: Vec<String>,
    /// Word of the boss, if the level has one.
    pub boss: Option<String>,
}

/// Builds monster seeds for rounds.
#[derive(Debug)]
pub struct MonsterFactory {
    settings: RoundSettings,
    rng: ChaCha8Rng,
}

impl MonsterFactory {
    /// Creates a new factory using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            settings: config.settings,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Builds one monster per minion word, followed by the boss on boss levels.
    ///
    /// Empty minion words and a missing boss word are replaced by synthesized
    /// words, so every seed carries at least one typeable character.
    #[must_use]
    pub fn build(
        &mut self,
        level: &LevelConfig,
        words: RoundWords,
        modifiers: &Modifiers,
    ) -> Vec<MonsterSeed> {
        let fallback: Vec<char> = FALLBACK_ALPHABET.chars().collect();
        let minion_speed = slowed(
            self.settings.base_speed * level.speed_multiplier,
            modifiers.monster_slow_percent,
        );

        let mut seeds: Vec<MonsterSeed> = Vec::with_capacity(words.minions.len() + 1);
        for (index, word) in words.minions.into_iter().enumerate() {
            let id = index as u32;
            let word = if word.is_empty() {
                tracing::warn!(id, "empty minion word replaced");
                self.synthesize(&fallback, level.word_length)
            } else {
                word
            };
            seeds.push(MonsterSeed {
                id: MonsterId::new(id),
                word,
                max_hp: self.settings.base_monster_hp,
                position: staggered_position(id),
                speed: minion_speed,
                spawn_delay: self.settings.spawn_interval.saturating_mul(id),
                boss: false,
            });
        }

        if !level.boss {
            return seeds;
        }

        let boss_word = match words.boss.filter(|word| !word.is_empty()) {
            Some(word) => word,
            None => {
                tracing::warn!(
                    world = %level.world,
                    level = level.level,
                    "boss level built without a boss word; synthesizing one"
                );
                self.boss_word(&fallback, level)
            }
        };

        let id = seeds.len() as u32;
        let last_minion_delay = seeds
            .last()
            .map_or(Duration::ZERO, |seed| seed.spawn_delay);
        seeds.push(MonsterSeed {
            id: MonsterId::new(id),
            word: boss_word,
            max_hp: self.settings.base_monster_hp * BOSS_HP_FACTOR,
            position: staggered_position(id),
            speed: slowed(
                self.settings.base_speed * BOSS_SPEED_FACTOR,
                modifiers.boss_slow_percent,
            ),
            spawn_delay: last_minion_delay.saturating_add(self.settings.boss_spawn_gap),
            boss: true,
        });
        seeds
    }

    /// Requests words from a source, repairs any shortfall and builds the seeds.
    pub fn build_from_source<S>(
        &mut self,
        level: &LevelConfig,
        source: &mut S,
        layout: KeyboardLayout,
        modifiers: &Modifiers,
    ) -> Vec<MonsterSeed>
    where
        S: WordSource + ?Sized,
    {
        let count = level.monster_count as usize;
        let mut alphabet = source.alphabet(level.world, layout);
        if alphabet.is_empty() {
            alphabet = FALLBACK_ALPHABET.chars().collect();
        }

        let supplied = source.generate_words(count, level.world, layout, level.word_length);
        let minions = self.complete_words(supplied, count, &alphabet, level.word_length);

        let boss = if level.boss {
            let word = source.generate_boss_word(level.world, layout, level.world.index());
            if word.is_empty() {
                Some(self.boss_word(&alphabet, level))
            } else {
                Some(word)
            }
        } else {
            None
        };

        let seeds = self.build(level, RoundWords { minions, boss }, modifiers);
        tracing::debug!(
            world = %level.world,
            level = level.level,
            monsters = seeds.len(),
            "built round monsters"
        );
        seeds
    }

    fn complete_words(
        &mut self,
        supplied: Vec<String>,
        count: usize,
        alphabet: &[char],
        length: WordLengthRange,
    ) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut words: Vec<String> = Vec::with_capacity(count);
        for word in supplied {
            if words.len() == count {
                break;
            }
            if !word.is_empty() && seen.insert(word.clone()) {
                words.push(word);
            }
        }

        let missing = count - words.len();
        if missing == 0 {
            return words;
        }
        tracing::warn!(
            requested = count,
            supplied = words.len(),
            "word source ran short; synthesizing words"
        );

        let mut attempts = missing * SYNTHESIS_ATTEMPTS_PER_WORD;
        while words.len() < count {
            let candidate = self.synthesize(alphabet, length);
            if attempts > 0 {
                attempts -= 1;
                if !seen.insert(candidate.clone()) {
                    continue;
                }
            }
            words.push(candidate);
        }
        words
    }

    fn boss_word(&mut self, alphabet: &[char], level: &LevelConfig) -> String {
        let length = level.word_length.max() + level.world.index() + 1;
        self.synthesize(alphabet, WordLengthRange::new(length, length))
    }

    fn synthesize(&mut self, alphabet: &[char], length: WordLengthRange) -> String {
        let min = length.min().max(1);
        let max = length.max().max(min);
        let size = self.rng.gen_range(min..=max);
        (0..size)
            .map(|_| alphabet[self.rng.gen_range(0..alphabet.len())])
            .collect()
    }
}

fn slowed(speed: f32, slow_percent: f32) -> f32 {
    let slow = slow_percent.clamp(0.0, 100.0);
    (speed * (1.0 - slow / 100.0)).max(MIN_MONSTER_SPEED)
}

fn staggered_position(id: u32) -> f32 {
    SPAWN_EDGE + (id % STAGGER_LANES) as f32 * STAGGER_STEP
}
