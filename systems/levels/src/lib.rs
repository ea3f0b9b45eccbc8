#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static level table and campaign progression for Word Siege.
//!
//! Every world holds ten levels. Difficulty never decreases within a world and
//! the tenth level of each world is guarded by a boss.

use thiserror::Error;
use word_siege_core::{LevelConfig, WordLengthRange, WorldId, LEVELS_PER_WORLD, WORLD_COUNT};
use WorldId::{Desert, Forest, Glacier, Meadow, Void, Volcano};

/// Reasons a level lookup may fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The world index does not name a campaign world.
    #[error("unknown world index {0}")]
    UnknownWorld(usize),
    /// The level number lies outside the world's level range.
    #[error("world {world} has no level {level}")]
    UnknownLevel {
        /// World that was queried.
        world: WorldId,
        /// Level number that was requested.
        level: u8,
    },
}

const fn entry(
    world: WorldId,
    level: u8,
    monster_count: u32,
    speed_multiplier: f32,
    min_length: usize,
    max_length: usize,
) -> LevelConfig {
    LevelConfig {
        world,
        level,
        monster_count,
        speed_multiplier,
        word_length: WordLengthRange::new(min_length, max_length),
        boss: level == LEVELS_PER_WORLD,
    }
}

const LEVELS: [[LevelConfig; LEVELS_PER_WORLD as usize]; WORLD_COUNT] = [
    [
        entry(Meadow, 1, 5, 0.80, 2, 3),
        entry(Meadow, 2, 5, 0.85, 2, 3),
        entry(Meadow, 3, 6, 0.90, 2, 4),
        entry(Meadow, 4, 6, 0.95, 2, 4),
        entry(Meadow, 5, 7, 1.00, 3, 4),
        entry(Meadow, 6, 7, 1.05, 3, 4),
        entry(Meadow, 7, 8, 1.10, 3, 5),
        entry(Meadow, 8, 8, 1.15, 3, 5),
        entry(Meadow, 9, 9, 1.20, 3, 5),
        entry(Meadow, 10, 9, 1.25, 3, 5),
    ],
    [
        entry(Forest, 1, 6, 0.90, 3, 4),
        entry(Forest, 2, 6, 0.95, 3, 4),
        entry(Forest, 3, 7, 1.00, 3, 5),
        entry(Forest, 4, 7, 1.05, 3, 5),
        entry(Forest, 5, 8, 1.10, 3, 5),
        entry(Forest, 6, 8, 1.15, 4, 5),
        entry(Forest, 7, 9, 1.20, 4, 6),
        entry(Forest, 8, 9, 1.25, 4, 6),
        entry(Forest, 9, 10, 1.30, 4, 6),
        entry(Forest, 10, 10, 1.35, 4, 6),
    ],
    [
        entry(Desert, 1, 6, 1.00, 3, 5),
        entry(Desert, 2, 7, 1.05, 3, 5),
        entry(Desert, 3, 7, 1.10, 4, 5),
        entry(Desert, 4, 8, 1.15, 4, 6),
        entry(Desert, 5, 8, 1.20, 4, 6),
        entry(Desert, 6, 9, 1.25, 4, 6),
        entry(Desert, 7, 9, 1.30, 5, 6),
        entry(Desert, 8, 10, 1.35, 5, 7),
        entry(Desert, 9, 10, 1.40, 5, 7),
        entry(Desert, 10, 10, 1.45, 5, 7),
    ],
    [
        entry(Glacier, 1, 7, 1.10, 4, 6),
        entry(Glacier, 2, 7, 1.15, 4, 6),
        entry(Glacier, 3, 8, 1.20, 4, 6),
        entry(Glacier, 4, 8, 1.25, 4, 7),
        entry(Glacier, 5, 9, 1.30, 5, 7),
        entry(Glacier, 6, 9, 1.35, 5, 7),
        entry(Glacier, 7, 10, 1.40, 5, 7),
        entry(Glacier, 8, 10, 1.45, 5, 8),
        entry(Glacier, 9, 11, 1.50, 5, 8),
        entry(Glacier, 10, 11, 1.55, 5, 8),
    ],
    [
        entry(Volcano, 1, 8, 1.20, 4, 7),
        entry(Volcano, 2, 8, 1.25, 4, 7),
        entry(Volcano, 3, 9, 1.30, 5, 7),
        entry(Volcano, 4, 9, 1.35, 5, 8),
        entry(Volcano, 5, 10, 1.40, 5, 8),
        entry(Volcano, 6, 10, 1.45, 5, 8),
        entry(Volcano, 7, 11, 1.50, 6, 8),
        entry(Volcano, 8, 11, 1.55, 6, 9),
        entry(Volcano, 9, 12, 1.60, 6, 9),
        entry(Volcano, 10, 12, 1.65, 6, 9),
    ],
    [
        entry(Void, 1, 8, 1.30, 5, 8),
        entry(Void, 2, 9, 1.35, 5, 8),
        entry(Void, 3, 9, 1.40, 5, 8),
        entry(Void, 4, 10, 1.45, 5, 9),
        entry(Void, 5, 10, 1.50, 6, 9),
        entry(Void, 6, 11, 1.55, 6, 9),
        entry(Void, 7, 11, 1.60, 6, 10),
        entry(Void, 8, 12, 1.65, 6, 10),
        entry(Void, 9, 12, 1.70, 7, 10),
        entry(Void, 10, 12, 1.75, 7, 10),
    ],
];

/// Looks up the configuration of a level.
pub fn resolve(world: WorldId, level: u8) -> Result<LevelConfig, LevelError> {
    if level == 0 || level > LEVELS_PER_WORLD {
        return Err(LevelError::UnknownLevel { world, level });
    }
    Ok(LEVELS[world.index()][usize::from(level - 1)])
}

/// Looks up a level using a raw zero-based world index.
pub fn resolve_index(world_index: usize, level: u8) -> Result<LevelConfig, LevelError> {
    let world = WorldId::from_index(world_index).ok_or(LevelError::UnknownWorld(world_index))?;
    resolve(world, level)
}

/// All levels of a world in ascending order.
#[must_use]
pub fn levels(world: WorldId) -> &'static [LevelConfig] {
    &LEVELS[world.index()]
}

/// Level that follows the provided one in the campaign.
///
/// Returns `None` after the final level of the last world or for unknown
/// levels.
#[must_use]
pub fn next_level(world: WorldId, level: u8) -> Option<(WorldId, u8)> {
    if level == 0 || level > LEVELS_PER_WORLD {
        return None;
    }
    if level < LEVELS_PER_WORLD {
        return Some((world, level + 1));
    }
    WorldId::from_index(world.index() + 1).map(|next| (next, 1))
}
