use std::{collections::HashSet, time::Duration};

use word_siege_core::{
    KeyboardLayout, Modifiers, RoundSettings, WordSource, WorldId, MIN_MONSTER_SPEED,
};
use word_siege_system_levels::resolve;
use word_siege_system_monster_factory::{
    Config, MonsterFactory, RoundWords, BOSS_HP_FACTOR, BOSS_SPEED_FACTOR,
};
use word_siege_system_words::WordBank;

fn factory(seed: u64) -> MonsterFactory {
    MonsterFactory::new(Config::new(RoundSettings::default(), seed))
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| (*word).to_owned()).collect()
}

#[test]
fn minions_are_staggered_and_scaled_by_level_speed() {
    let level = resolve(WorldId::Meadow, 3).expect("level exists");
    let settings = RoundSettings::default();
    let seeds = factory(1).build(
        &level,
        RoundWords {
            minions: words(&["ask", "lad", "sad", "flag", "glad", "hall"]),
            boss: None,
        },
        &Modifiers::default(),
    );

    assert_eq!(seeds.len(), 6);
    for (index, seed) in seeds.iter().enumerate() {
        assert_eq!(seed.id.get() as usize, index);
        assert!(!seed.boss);
        assert_eq!(seed.max_hp, settings.base_monster_hp);
        assert_eq!(seed.spawn_delay, Duration::from_secs(2 * index as u64));
        assert!((seed.speed - settings.base_speed * level.speed_multiplier).abs() < 1e-6);
    }
    let positions: Vec<f32> = seeds.iter().map(|seed| seed.position).collect();
    assert_eq!(positions, vec![100.0, 108.0, 116.0, 124.0, 132.0, 100.0]);
}

#[test]
fn monster_slow_reduces_minion_speed() {
    let level = resolve(WorldId::Forest, 1).expect("level exists");
    let modifiers = Modifiers {
        monster_slow_percent: 25.0,
        ..Modifiers::default()
    };
    let seeds = factory(1).build(
        &level,
        RoundWords {
            minions: words(&["tree"]),
            boss: None,
        },
        &modifiers,
    );
    let expected = RoundSettings::default().base_speed * level.speed_multiplier * 0.75;
    assert!((seeds[0].speed - expected).abs() < 1e-6);
}

#[test]
fn full_slow_is_floored_at_minimum_speed() {
    let level = resolve(WorldId::Void, 9).expect("level exists");
    let modifiers = Modifiers {
        monster_slow_percent: 100.0,
        ..Modifiers::default()
    };
    let seeds = factory(1).build(
        &level,
        RoundWords {
            minions: words(&["shadow"]),
            boss: None,
        },
        &modifiers,
    );
    assert_eq!(seeds[0].speed, MIN_MONSTER_SPEED);
}

#[test]
fn boss_is_appended_after_minions() {
    let level = resolve(WorldId::Desert, 10).expect("level exists");
    let settings = RoundSettings::default();
    let modifiers = Modifiers {
        boss_slow_percent: 50.0,
        ..Modifiers::default()
    };
    let seeds = factory(1).build(
        &level,
        RoundWords {
            minions: words(&["band", "hand", "lamb"]),
            boss: Some("sandbags".to_owned()),
        },
        &modifiers,
    );

    assert_eq!(seeds.len(), 4);
    let boss = seeds.last().expect("boss present");
    assert!(boss.boss);
    assert_eq!(boss.id.get(), 3);
    assert_eq!(boss.word, "sandbags");
    assert_eq!(boss.max_hp, settings.base_monster_hp * BOSS_HP_FACTOR);
    assert_eq!(boss.spawn_delay, Duration::from_secs(4 + 4));
    let expected_speed = settings.base_speed * BOSS_SPEED_FACTOR * 0.5;
    assert!((boss.speed - expected_speed).abs() < 1e-6);
}

#[test]
fn regular_levels_never_spawn_a_boss() {
    let level = resolve(WorldId::Desert, 9).expect("level exists");
    let seeds = factory(1).build(
        &level,
        RoundWords {
            minions: words(&["band"]),
            boss: Some("sandbags".to_owned()),
        },
        &Modifiers::default(),
    );
    assert_eq!(seeds.len(), 1);
    assert!(!seeds[0].boss);
}

#[test]
fn build_from_source_produces_requested_count() {
    let level = resolve(WorldId::Glacier, 10).expect("level exists");
    let mut bank = WordBank::new(77);
    let seeds = factory(2).build_from_source(
        &level,
        &mut bank,
        KeyboardLayout::Qwerty,
        &Modifiers::default(),
    );

    assert_eq!(seeds.len(), level.monster_count as usize + 1);
    assert!(seeds.last().expect("boss").boss);
    let unique: HashSet<&str> = seeds.iter().map(|seed| seed.word.as_str()).collect();
    assert_eq!(unique.len(), seeds.len());
}

#[test]
fn shortfall_is_topped_up_with_typeable_words() {
    let level = resolve(WorldId::Meadow, 9).expect("level exists");
    let mut bank = WordBank::with_words(1, ["ask", "lad"]);
    let alphabet = bank.alphabet(level.world, KeyboardLayout::Qwerty);
    let seeds = factory(3).build_from_source(
        &level,
        &mut bank,
        KeyboardLayout::Qwerty,
        &Modifiers::default(),
    );

    assert_eq!(seeds.len(), level.monster_count as usize);
    let unique: HashSet<&str> = seeds.iter().map(|seed| seed.word.as_str()).collect();
    assert_eq!(unique.len(), seeds.len());
    for seed in &seeds {
        assert!(seed.word.chars().all(|c| alphabet.contains(&c)));
    }
    for seed in seeds.iter().filter(|seed| seed.word != "ask" && seed.word != "lad") {
        assert!(level.word_length.contains(seed.word.len()));
    }
}

#[test]
fn empty_source_still_yields_a_boss() {
    let level = resolve(WorldId::Meadow, 10).expect("level exists");
    let mut bank = WordBank::with_words(1, Vec::<String>::new());
    let seeds = factory(4).build_from_source(
        &level,
        &mut bank,
        KeyboardLayout::Qwerty,
        &Modifiers::default(),
    );

    assert_eq!(seeds.len(), level.monster_count as usize + 1);
    let boss = seeds.last().expect("boss");
    assert!(boss.boss);
    assert!(!boss.word.is_empty());
}

#[test]
fn same_seed_builds_identical_rounds() {
    let level = resolve(WorldId::Volcano, 10).expect("level exists");
    let build = || {
        let mut bank = WordBank::with_words(5, ["ember", "magma"]);
        factory(6).build_from_source(
            &level,
            &mut bank,
            KeyboardLayout::Colemak,
            &Modifiers::default(),
        )
    };
    assert_eq!(build(), build());
}

#[test]
fn empty_minion_words_are_replaced_with_typeable_ones() {
    let level = resolve(WorldId::Meadow, 2).expect("level exists");
    let seeds = factory(8).build(
        &level,
        RoundWords {
            minions: words(&["", "ask"]),
            boss: None,
        },
        &Modifiers::default(),
    );

    assert_eq!(seeds.len(), 2);
    assert!(!seeds[0].word.is_empty());
    assert!(level.word_length.contains(seeds[0].word.len()));
    assert_eq!(seeds[1].word, "ask");
}

#[test]
fn boss_level_without_a_boss_word_still_gets_a_boss() {
    let level = resolve(WorldId::Meadow, 10).expect("level exists");
    let minions = words(&["ask", "lad", "sad", "flag", "glad", "hall", "sash", "dash", "gash"]);
    for boss in [None, Some(String::new())] {
        let seeds = factory(9).build(
            &level,
            RoundWords {
                minions: minions.clone(),
                boss,
            },
            &Modifiers::default(),
        );

        assert_eq!(seeds.len(), minions.len() + 1);
        let boss = seeds.last().expect("boss present");
        assert!(boss.boss);
        assert_eq!(boss.word.len(), level.word_length.max() + 1);
    }
}
