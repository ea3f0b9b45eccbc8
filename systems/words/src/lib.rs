#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Built-in deterministic word source.
//!
//! Each world restricts the keys a player is expected to reach: the first
//! world stays on the home row, the next two add the top and bottom rows and
//! the remaining worlds use the whole alphabet. Randomness is drawn from a
//! ChaCha stream derived from the bank seed, so two banks created with the
//! same seed hand out identical words for identical requests.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use word_siege_core::{KeyboardLayout, WordLengthRange, WordSource, WorldId};

const RNG_STREAM_WORDS: &str = "words";
const RNG_STREAM_BOSS: &str = "boss";

/// Shortest boss word in the first world; each later world adds one letter.
const BOSS_BASE_LENGTH: usize = 6;

const DICTIONARY: &[&str] = &[
    // home row heavy
    "as", "ad", "ah", "ha", "la", "add", "ads", "all", "ash", "ask", "dad", "fad", "gal",
    "gas", "had", "hag", "has", "jag", "lad", "lag", "sad", "sag", "alas", "dash", "fall",
    "flag", "gash", "glad", "half", "hall", "hash", "lads", "lash", "sash", "shall", "flask",
    "flash", "salad", "slash", "halls", "flags", "dahlias", "flasks", "salads", "alfalfa",
    "alfalfas",
    // top row friendly
    "tree", "type", "quit", "ripe", "rope", "wipe", "trip", "port", "tour", "your", "write",
    "quiet", "route", "tower", "power", "paper", "sweet", "story", "water", "quest", "pretty",
    "poetry", "potter", "pottery", "prayer", "quieter", "typewriter", "repertoire", "property",
    "stair", "fire", "light", "great", "sheep", "their", "house", "forest", "spider",
    "whisper", "shelter", "harpist",
    // bottom row friendly
    "band", "hand", "lamb", "calm", "clam", "cash", "fang", "gang", "hang", "jazz", "mass",
    "sank", "scan", "snack", "black", "blank", "flank", "clash", "class", "glass", "small",
    "slang", "scald", "chasm", "bands", "glands", "blanks", "shank", "camels", "landmass",
    "sandbags", "backhands", "handbags",
    // general
    "the", "and", "sun", "moon", "star", "rain", "snow", "wind", "king", "ship", "road",
    "stone", "trade", "snore", "noted", "tones", "hands", "brave", "magic", "sword", "knight",
    "castle", "dragon", "shield", "quiver", "arrows", "goblin", "wizard", "potion", "marble",
    "frozen", "glacier", "blizzard", "snowdrift", "hailstorm", "frostbite", "avalanche",
    "snowflake", "crystal", "volcano", "ember", "magma", "ashen", "inferno", "eruption",
    "earthquake", "combustion", "incinerate", "molten", "cinder", "smolder", "void",
    "shadow", "cosmos", "nebula", "quasar", "eclipse", "phantom", "nothingness",
    "singularity", "dimensional", "constellation", "keyboard", "practice", "monster",
    "village", "journey", "lantern", "meadow", "orchard", "harvest", "thunder", "lightning",
    "whistle", "fortress", "kingdom", "treasure", "adventure", "champion", "guardian",
    "question", "victory", "mystery", "zephyr", "jungle", "oxygen", "jacket", "vivid",
];

/// Deterministic word source backed by an embedded dictionary.
#[derive(Clone, Debug)]
pub struct WordBank {
    seed: u64,
    draws: u64,
    dictionary: Vec<String>,
}

impl WordBank {
    /// Creates a word bank over the built-in dictionary.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_words(seed, DICTIONARY.iter().copied())
    }

    /// Creates a word bank over a caller-provided dictionary.
    ///
    /// Words are lowercased, and blank entries and duplicates are dropped.
    #[must_use]
    pub fn with_words<I, S>(seed: u64, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        dictionary.sort();
        dictionary.dedup();
        Self {
            seed,
            draws: 0,
            dictionary,
        }
    }

    /// Number of distinct words in the dictionary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    /// Reports whether the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    fn eligible(&self, world: WorldId, layout: KeyboardLayout) -> Vec<&str> {
        let alphabet = alphabet_for(world, layout);
        self.dictionary
            .iter()
            .map(String::as_str)
            .filter(|word| word.chars().all(|c| alphabet.contains(&c)))
            .collect()
    }

    fn next_rng(&mut self, world: WorldId, layout: KeyboardLayout, label: &str) -> ChaCha8Rng {
        let seed = derive_seed(self.seed, world, layout, label, self.draws);
        self.draws = self.draws.wrapping_add(1);
        ChaCha8Rng::seed_from_u64(seed)
    }
}

impl WordSource for WordBank {
    fn generate_words(
        &mut self,
        count: usize,
        world: WorldId,
        layout: KeyboardLayout,
        length: WordLengthRange,
    ) -> Vec<String> {
        let mut rng = self.next_rng(world, layout, RNG_STREAM_WORDS);
        let mut candidates: Vec<String> = self
            .eligible(world, layout)
            .into_iter()
            .filter(|word| length.contains(word.chars().count()))
            .map(str::to_owned)
            .collect();
        candidates.shuffle(&mut rng);
        candidates.truncate(count);
        candidates
    }

    fn generate_boss_word(
        &mut self,
        world: WorldId,
        layout: KeyboardLayout,
        world_index: usize,
    ) -> String {
        let mut rng = self.next_rng(world, layout, RNG_STREAM_BOSS);
        let eligible: Vec<String> = self
            .eligible(world, layout)
            .into_iter()
            .map(str::to_owned)
            .collect();
        let minimum = BOSS_BASE_LENGTH + world_index;

        let long: Vec<&String> = eligible
            .iter()
            .filter(|word| word.chars().count() >= minimum)
            .collect();
        if let Some(word) = long.choose(&mut rng) {
            return (*word).clone();
        }

        match eligible.len() {
            0 => String::new(),
            1 => eligible[0].repeat(2),
            len => {
                let first = rng.gen_range(0..len);
                let mut second = rng.gen_range(0..len - 1);
                if second >= first {
                    second += 1;
                }
                format!("{}{}", eligible[first], eligible[second])
            }
        }
    }

    fn alphabet(&self, world: WorldId, layout: KeyboardLayout) -> Vec<char> {
        alphabet_for(world, layout)
    }
}

struct Rows {
    top: &'static str,
    home: &'static str,
    bottom: &'static str,
}

const fn rows(layout: KeyboardLayout) -> Rows {
    match layout {
        KeyboardLayout::Qwerty => Rows {
            top: "qwertyuiop",
            home: "asdfghjkl",
            bottom: "zxcvbnm",
        },
        KeyboardLayout::Dvorak => Rows {
            top: "pyfgcrl",
            home: "aoeuidhtns",
            bottom: "qjkxbmwvz",
        },
        KeyboardLayout::Colemak => Rows {
            top: "qwfpgjluy",
            home: "arstdhneio",
            bottom: "zxcvbkm",
        },
    }
}

fn alphabet_for(world: WorldId, layout: KeyboardLayout) -> Vec<char> {
    let rows = rows(layout);
    let mut keys: Vec<char> = rows.home.chars().collect();
    match world.index() {
        0 => {}
        1 => keys.extend(rows.top.chars()),
        2 => keys.extend(rows.bottom.chars()),
        _ => {
            keys.extend(rows.top.chars());
            keys.extend(rows.bottom.chars());
        }
    }
    keys
}

fn layout_label(layout: KeyboardLayout) -> &'static str {
    match layout {
        KeyboardLayout::Qwerty => "qwerty",
        KeyboardLayout::Dvorak => "dvorak",
        KeyboardLayout::Colemak => "colemak",
    }
}

fn derive_seed(
    base: u64,
    world: WorldId,
    layout: KeyboardLayout,
    label: &str,
    draw: u64,
) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(world.name().as_bytes());
    hasher.update(layout_label(layout).as_bytes());
    hasher.update(label.as_bytes());
    hasher.update(draw.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_le_bytes(bytes)
}
