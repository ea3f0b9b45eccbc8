#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Word Siege engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative round world, and pure systems. Adapters submit [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values that adapters
//! and systems react to deterministically. Consumers never hold references to
//! the round state; they read owned [`RoundSnapshot`] values instead.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// Position, in percent of the lane, at which monsters enter the field.
pub const SPAWN_EDGE: f32 = 100.0;

/// Position, in percent of the lane, at which monsters strike the castle.
pub const CASTLE_EDGE: f32 = 5.0;

/// Slowest speed a monster may be assigned, in percent per nominal tick.
pub const MIN_MONSTER_SPEED: f32 = 0.01;

/// Number of worlds in the campaign.
pub const WORLD_COUNT: usize = 6;

/// Number of levels contained in every world.
pub const LEVELS_PER_WORLD: u8 = 10;

/// Lifecycle phase of the round state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No round is running; the world waits for a start command.
    #[default]
    Menu,
    /// A round is in progress and accepts ticks and keystrokes.
    Playing,
    /// A round is suspended; ticks and keystrokes are ignored.
    Paused,
    /// The round has ended. Terminal until the adapter returns to the menu.
    Results,
}

/// Reason recorded when a round transitions into [`Phase::Results`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The round timer reached zero.
    TimeUp,
    /// The castle lost all of its hit points.
    CastleFallen,
    /// Every monster was defeated or spent itself against the castle.
    Cleared,
}

/// Resolution applied to a single keystroke after shields were considered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeystrokeOutcome {
    /// The typed character matched the expected one.
    Correct,
    /// A mistake was absorbed by an error shield and treated as correct.
    Forgiven,
    /// A mistake was recorded but a combo shield preserved the combo.
    ComboShielded,
    /// A mistake was recorded and the combo was reset.
    Missed,
}

/// Commands that express all permissible round mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a new round using prebuilt monster seeds.
    StartRound {
        /// Configuration of the level being played.
        level: LevelConfig,
        /// Monsters produced by the monster factory, in spawn order.
        monsters: Vec<MonsterSeed>,
        /// Cosmetic modifiers captured once for the whole round.
        modifiers: Modifiers,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Applies a typed character against the active target.
    Keystroke {
        /// Character produced by the player.
        input: char,
    },
    /// Suspends a running round.
    Pause,
    /// Resumes a paused round.
    Resume,
    /// Discards a finished or paused round and returns to the menu.
    ReturnToMenu,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a round started.
    RoundStarted {
        /// Level being played.
        level: LevelConfig,
        /// Castle hit points at the start of the round.
        max_castle_hp: u32,
        /// Number of monsters participating in the round.
        monster_count: usize,
    },
    /// Announces that the state machine entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a monster entered the field.
    MonsterSpawned {
        /// Identifier of the spawned monster.
        monster: MonsterId,
        /// Whether the spawned monster is the level boss.
        boss: bool,
    },
    /// Reports that a boss crossed its enrage threshold.
    BossEnraged {
        /// Identifier of the boss.
        monster: MonsterId,
        /// Speed applied after enraging.
        speed: f32,
    },
    /// Reports that a monster reached the castle and spent itself.
    MonsterReachedCastle {
        /// Identifier of the monster.
        monster: MonsterId,
    },
    /// Reports castle damage dealt during a tick.
    CastleDamaged {
        /// Damage dealt by the monsters that arrived this tick.
        damage: u32,
        /// Castle hit points left after the damage.
        remaining: u32,
    },
    /// Announces a change of the active target.
    TargetChanged {
        /// Newly targeted monster, if any remains.
        target: Option<MonsterId>,
    },
    /// Reports how a keystroke was resolved.
    KeystrokeResolved {
        /// Character expected by the active target.
        expected: char,
        /// Character typed by the player.
        input: char,
        /// Resolution after shields were considered.
        outcome: KeystrokeOutcome,
    },
    /// Confirms that a monster's word was fully typed.
    WordCompleted {
        /// Identifier of the defeated monster.
        monster: MonsterId,
        /// Points awarded for the word.
        score: u64,
    },
    /// Announces that the round reached a terminal state.
    RoundEnded {
        /// Condition that ended the round.
        reason: EndReason,
    },
}

/// Unique identifier assigned to a monster for the duration of a round.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Campaign worlds, ordered by difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WorldId {
    /// First world; home row only.
    Meadow,
    /// Second world; home and top rows.
    Forest,
    /// Third world; home and bottom rows.
    Desert,
    /// Fourth world; the whole alphabet.
    Glacier,
    /// Fifth world.
    Volcano,
    /// Final world.
    Void,
}

impl WorldId {
    /// Every world in campaign order.
    pub const ALL: [WorldId; WORLD_COUNT] = [
        Self::Meadow,
        Self::Forest,
        Self::Desert,
        Self::Glacier,
        Self::Volcano,
        Self::Void,
    ];

    /// Zero-based position of the world in the campaign.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Meadow => 0,
            Self::Forest => 1,
            Self::Desert => 2,
            Self::Glacier => 3,
            Self::Volcano => 4,
            Self::Void => 5,
        }
    }

    /// Resolves a world from its zero-based campaign index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Multiplier applied to coins earned in this world.
    #[must_use]
    pub const fn coin_multiplier(self) -> f64 {
        match self {
            Self::Meadow => 1.0,
            Self::Forest => 1.2,
            Self::Desert => 1.4,
            Self::Glacier => 1.6,
            Self::Volcano => 1.8,
            Self::Void => 2.0,
        }
    }

    /// Stable lowercase name of the world.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Meadow => "meadow",
            Self::Forest => "forest",
            Self::Desert => "desert",
            Self::Glacier => "glacier",
            Self::Volcano => "volcano",
            Self::Void => "void",
        }
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical keyboard layout the player practises on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardLayout {
    /// Standard QWERTY layout.
    #[default]
    Qwerty,
    /// Dvorak simplified layout.
    Dvorak,
    /// Colemak layout.
    Colemak,
}

/// Inclusive range of permitted word lengths measured in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordLengthRange {
    min: usize,
    max: usize,
}

impl WordLengthRange {
    /// Creates a new range. The bounds are reordered when given backwards.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Shortest permitted length.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Longest permitted length.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Reports whether the provided length falls within the range.
    #[must_use]
    pub const fn contains(&self, length: usize) -> bool {
        length >= self.min && length <= self.max
    }
}

/// Immutable parameters of a single level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// World the level belongs to.
    pub world: WorldId,
    /// One-based level number within the world.
    pub level: u8,
    /// Number of regular monsters in the level.
    pub monster_count: u32,
    /// Multiplier applied to the base monster speed.
    pub speed_multiplier: f32,
    /// Permitted lengths of minion words.
    pub word_length: WordLengthRange,
    /// Whether a boss follows the minions.
    pub boss: bool,
}

/// Numeric effects contributed by equipped cosmetic items.
///
/// Percentages are expressed on a 0–100 scale. The values are captured once
/// when a round starts and never consulted again afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Flat castle hit points added to the base value.
    pub castle_hp_flat: u32,
    /// Percentage increase applied to the castle hit points.
    pub castle_hp_percent: f32,
    /// Percentage reduction applied to minion speed.
    pub monster_slow_percent: f32,
    /// Percentage reduction applied to boss speed.
    pub boss_slow_percent: f32,
    /// Number of mistakes whose combo reset is prevented.
    pub combo_shields: u32,
    /// Number of mistakes that are forgiven entirely.
    pub error_shields: u32,
    /// Percentage bonus applied to coins earned.
    pub bonus_coins_percent: f32,
    /// Percentage bonus applied to both coins and experience.
    pub bonus_both_percent: f32,
}

/// Blueprint produced by the monster factory for a single monster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterSeed {
    /// Identifier assigned to the monster.
    pub id: MonsterId,
    /// Word the player must type to defeat the monster.
    pub word: String,
    /// Starting and maximum hit points.
    pub max_hp: f32,
    /// Starting position in percent of the lane.
    pub position: f32,
    /// Distance covered per nominal tick, in percent of the lane.
    pub speed: f32,
    /// Elapsed round time after which the monster may spawn.
    pub spawn_delay: Duration,
    /// Whether the monster is the level boss.
    pub boss: bool,
}

/// Immutable representation of a single monster's state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterSnapshot {
    /// Unique identifier assigned to the monster.
    pub id: MonsterId,
    /// Word attached to the monster.
    pub word: String,
    /// Remaining hit points.
    pub hp: f32,
    /// Maximum hit points.
    pub max_hp: f32,
    /// Position in percent of the lane.
    pub position: f32,
    /// Number of characters confirmed so far.
    pub typed: usize,
    /// Current speed in percent per nominal tick.
    pub speed: f32,
    /// Elapsed round time after which the monster may spawn.
    pub spawn_delay: Duration,
    /// Whether the monster entered the field.
    pub spawned: bool,
    /// Whether the monster has been defeated or spent.
    pub defeated: bool,
    /// Whether the monster reached the castle.
    pub reached_castle: bool,
    /// Whether the monster is the level boss.
    pub boss: bool,
    /// Whether the boss has enraged.
    pub enraged: bool,
}

impl MonsterSnapshot {
    /// Portion of the word that still needs to be typed.
    #[must_use]
    pub fn remaining(&self) -> &str {
        self.word
            .char_indices()
            .nth(self.typed)
            .map_or("", |(offset, _)| &self.word[offset..])
    }
}

/// Owned snapshot of the complete round state handed to consumers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Current phase of the state machine.
    pub phase: Phase,
    /// Level being played, if a round was started.
    pub level: Option<LevelConfig>,
    /// Time left on the round clock.
    pub timer: Duration,
    /// Time elapsed since the round started.
    pub elapsed: Duration,
    /// Castle hit points left.
    pub castle_hp: u32,
    /// Castle hit points at the start of the round.
    pub max_castle_hp: u32,
    /// Monsters in spawn order.
    pub monsters: Vec<MonsterSnapshot>,
    /// Monster currently receiving typed input.
    pub active: Option<MonsterId>,
    /// Total score.
    pub score: u64,
    /// Current streak of correct keystrokes.
    pub combo: u32,
    /// Longest streak reached during the round.
    pub max_combo: u32,
    /// Number of keystrokes applied against a target.
    pub total_chars_typed: u32,
    /// Keystrokes counted as correct after shields.
    pub correct_chars: u32,
    /// Keystrokes counted as wrong after shields.
    pub error_chars: u32,
    /// Expected characters that were genuinely mistyped.
    pub total_errors: Vec<char>,
    /// Number of words typed to completion.
    pub words_completed: u32,
    /// Combo shields left.
    pub combo_shields: u32,
    /// Error shields left.
    pub error_shields: u32,
}

impl RoundSnapshot {
    /// Looks up a monster snapshot by identifier.
    #[must_use]
    pub fn monster(&self, id: MonsterId) -> Option<&MonsterSnapshot> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    /// Snapshot of the monster currently receiving input.
    #[must_use]
    pub fn active_monster(&self) -> Option<&MonsterSnapshot> {
        self.active.and_then(|id| self.monster(id))
    }
}

/// Statistics handed to the persistence layer when a round ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    /// Words per minute derived from correct characters.
    pub wpm: u32,
    /// Accuracy in percent.
    pub accuracy: f64,
    /// Longest combo reached.
    pub max_combo: u32,
    /// Total score.
    pub score: u64,
    /// Number of words typed to completion.
    pub words_completed: u32,
    /// Most frequently mistyped characters, most frequent first.
    pub top_error_chars: Vec<char>,
}

/// Tunable constants of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSettings {
    /// Nominal duration of a simulation tick.
    pub tick_interval: Duration,
    /// Length of the round clock.
    pub round_duration: Duration,
    /// Castle hit points before modifiers.
    pub base_castle_hp: u32,
    /// Damage dealt by each monster that reaches the castle.
    pub castle_damage: u32,
    /// Base monster speed in percent per nominal tick.
    pub base_speed: f32,
    /// Hit points of a regular monster.
    pub base_monster_hp: f32,
    /// Delay between consecutive minion spawns.
    pub spawn_interval: Duration,
    /// Extra delay between the last minion and the boss.
    pub boss_spawn_gap: Duration,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(50),
            round_duration: Duration::from_secs(120),
            base_castle_hp: 100,
            castle_damage: 10,
            base_speed: 0.15,
            base_monster_hp: 100.0,
            spawn_interval: Duration::from_secs(2),
            boss_spawn_gap: Duration::from_secs(4),
        }
    }
}

/// Source of words attached to monsters.
///
/// Implementations decide where words come from; the engine only relies on
/// this interface. Sources may return fewer words than requested.
pub trait WordSource {
    /// Produces up to `count` unique words typeable in the given world.
    fn generate_words(
        &mut self,
        count: usize,
        world: WorldId,
        layout: KeyboardLayout,
        length: WordLengthRange,
    ) -> Vec<String>;

    /// Produces the longer word carried by a world's boss.
    fn generate_boss_word(
        &mut self,
        world: WorldId,
        layout: KeyboardLayout,
        world_index: usize,
    ) -> String;

    /// Characters players are expected to type in the given world.
    fn alphabet(&self, world: WorldId, layout: KeyboardLayout) -> Vec<char>;
}
