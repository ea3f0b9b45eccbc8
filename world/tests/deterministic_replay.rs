use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use word_siege_core::{
    Command, Event, KeyboardLayout, LevelConfig, Modifiers, MonsterSeed, Phase, RoundSettings,
    WorldId,
};
use word_siege_system_levels::resolve;
use word_siege_system_monster_factory::{Config, MonsterFactory, RoundWords};
use word_siege_system_outcome::evaluate;
use word_siege_system_words::WordBank;
use word_siege_world::{self as world, query, World};

const MAX_TICKS: usize = 10_000;

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(WorldId::Forest, 4);
    let second = replay(WorldId::Forest, 4);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first.words_completed > 0);
}

#[test]
fn boss_rounds_replay_identically() {
    let first = replay(WorldId::Desert, 10);
    let second = replay(WorldId::Desert, 10);
    assert_eq!(first, second, "boss replay diverged between runs");
}

#[test]
fn fixed_word_list_replays_identically() {
    let level = resolve(WorldId::Meadow, 5).expect("level exists");
    let words = || RoundWords {
        minions: ["ask", "lad", "flag", "glad", "hall", "sash", "dash"]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        boss: None,
    };
    let build = || {
        MonsterFactory::new(Config::new(RoundSettings::default(), 0)).build(
            &level,
            words(),
            &modifiers(),
        )
    };
    let first = replay_round(level, build());
    let second = replay_round(level, build());

    assert_eq!(first, second, "fixed word replay diverged between runs");
    assert!(first.stars > 0);
}

fn modifiers() -> Modifiers {
    Modifiers {
        combo_shields: 1,
        error_shields: 1,
        ..Modifiers::default()
    }
}

fn replay(world_id: WorldId, level_number: u8) -> ReplayOutcome {
    let settings = RoundSettings::default();
    let level = resolve(world_id, level_number).expect("level exists");
    let mut bank = WordBank::new(42);
    let mut factory = MonsterFactory::new(Config::new(settings, 42));
    let monsters =
        factory.build_from_source(&level, &mut bank, KeyboardLayout::Qwerty, &modifiers());
    replay_round(level, monsters)
}

fn replay_round(level: LevelConfig, monsters: Vec<MonsterSeed>) -> ReplayOutcome {
    let settings = RoundSettings::default();
    let modifiers = modifiers();
    let mut world = World::with_settings(settings);
    let mut log = Vec::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::StartRound {
            level,
            monsters,
            modifiers,
        },
        &mut events,
    );
    record_events(&events, &mut log);

    let mut keystrokes = 0_usize;
    for _ in 0..MAX_TICKS {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: settings.tick_interval,
            },
            &mut events,
        );
        record_events(&events, &mut log);
        if query::phase(&world) != Phase::Playing {
            break;
        }

        let Some(target) = query::active_monster(&world) else {
            continue;
        };
        let Some(expected) = target.remaining().chars().next() else {
            continue;
        };
        keystrokes += 1;
        let input = if keystrokes % 11 == 0 { '#' } else { expected };
        events.clear();
        world::apply(&mut world, Command::Keystroke { input }, &mut events);
        record_events(&events, &mut log);
    }

    let snapshot = query::snapshot(&world);
    let report = evaluate(&snapshot, level.world, &modifiers);
    ReplayOutcome {
        score: report.stats.score,
        stars: report.stars,
        coins: report.coins,
        words_completed: report.stats.words_completed,
        events: log,
    }
}

fn record_events(events: &[Event], log: &mut Vec<String>) {
    log.extend(events.iter().map(|event| format!("{event:?}")));
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    score: u64,
    stars: u8,
    coins: u64,
    words_completed: u32,
    events: Vec<String>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

