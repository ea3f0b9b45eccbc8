use std::time::Duration;

use word_siege_core::{
    Command, Event, LevelConfig, Modifiers, MonsterId, MonsterSeed, Phase, WordLengthRange,
    WorldId,
};
use word_siege_world::{self as world, query, World};

const TICK: Duration = Duration::from_millis(50);

fn boss_level() -> LevelConfig {
    LevelConfig {
        world: WorldId::Forest,
        level: 10,
        monster_count: 1,
        speed_multiplier: 1.0,
        word_length: WordLengthRange::new(3, 4),
        boss: true,
    }
}

fn round() -> Vec<MonsterSeed> {
    vec![
        MonsterSeed {
            id: MonsterId::new(0),
            word: "tree".to_owned(),
            max_hp: 100.0,
            position: 100.0,
            speed: 0.2,
            spawn_delay: Duration::ZERO,
            boss: false,
        },
        MonsterSeed {
            id: MonsterId::new(1),
            word: "tower".to_owned(),
            max_hp: 300.0,
            position: 108.0,
            speed: 0.1,
            spawn_delay: Duration::ZERO,
            boss: true,
        },
    ]
}

fn start(world: &mut World) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::StartRound {
            level: boss_level(),
            monsters: round(),
            modifiers: Modifiers::default(),
        },
        &mut events,
    );
}

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: TICK }, &mut events);
    events
}

fn type_text(world: &mut World, text: &str) -> Vec<Event> {
    let mut events = Vec::new();
    for input in text.chars() {
        world::apply(world, Command::Keystroke { input }, &mut events);
    }
    events
}

fn boss_spawned(world: &World) -> bool {
    query::snapshot(world)
        .monsters
        .iter()
        .any(|monster| monster.boss && monster.spawned)
}

#[test]
fn boss_waits_for_every_minion() {
    let mut world = World::new();
    start(&mut world);

    for _ in 0..100 {
        let _ = tick(&mut world);
        assert!(!boss_spawned(&world), "boss spawned while a minion was alive");
    }

    let events = type_text(&mut world, "tree");
    assert_eq!(query::phase(&world), Phase::Playing);
    assert!(events.contains(&Event::TargetChanged { target: None }));

    let events = tick(&mut world);
    assert!(events.contains(&Event::MonsterSpawned {
        monster: MonsterId::new(1),
        boss: true,
    }));
    assert_eq!(query::snapshot(&world).active, Some(MonsterId::new(1)));
}

#[test]
fn boss_is_released_when_the_last_minion_reaches_the_castle() {
    let mut world = World::new();
    start(&mut world);

    let mut ticks = 0;
    while !query::snapshot(&world).monsters[0].reached_castle {
        assert!(!boss_spawned(&world));
        let _ = tick(&mut world);
        ticks += 1;
        assert!(ticks < 1_000, "minion never reached the castle");
    }
    assert!(!boss_spawned(&world));

    let _ = tick(&mut world);
    assert!(boss_spawned(&world));
}

#[test]
fn boss_enrages_once_at_half_health() {
    let mut world = World::new();
    start(&mut world);
    let _ = tick(&mut world);
    let _ = type_text(&mut world, "tree");
    let _ = tick(&mut world);

    let _ = type_text(&mut world, "to");
    assert!(!tick(&mut world)
        .iter()
        .any(|event| matches!(event, Event::BossEnraged { .. })));

    let _ = type_text(&mut world, "w");
    let events = tick(&mut world);
    let enraged: Vec<&Event> = events
        .iter()
        .filter(|event| matches!(event, Event::BossEnraged { .. }))
        .collect();
    assert_eq!(enraged.len(), 1);

    let boss = query::snapshot(&world).monsters[1].clone();
    assert!(boss.enraged);
    assert!((boss.speed - 0.2).abs() < 1e-6);

    let _ = type_text(&mut world, "e");
    assert!(!tick(&mut world)
        .iter()
        .any(|event| matches!(event, Event::BossEnraged { .. })));
    assert!((query::snapshot(&world).monsters[1].speed - 0.2).abs() < 1e-6);
}
