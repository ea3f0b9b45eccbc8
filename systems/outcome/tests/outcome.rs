use std::time::Duration;

use word_siege_core::{Modifiers, MonsterId, MonsterSnapshot, Phase, RoundSnapshot, WorldId};
use word_siege_system_outcome::{coins_earned, evaluate, final_stats, stars, MAX_STARS};

fn monster(id: u32, defeated: bool) -> MonsterSnapshot {
    MonsterSnapshot {
        id: MonsterId::new(id),
        word: "flask".to_owned(),
        hp: if defeated { 0.0 } else { 100.0 },
        max_hp: 100.0,
        position: 40.0,
        typed: if defeated { 5 } else { 0 },
        speed: 0.15,
        spawn_delay: Duration::ZERO,
        spawned: true,
        defeated,
        reached_castle: false,
        boss: false,
        enraged: false,
    }
}

fn finished(correct: u32, total: u32, castle_hp: u32) -> RoundSnapshot {
    RoundSnapshot {
        phase: Phase::Results,
        elapsed: Duration::from_secs(60),
        castle_hp,
        max_castle_hp: 100,
        monsters: vec![monster(0, true), monster(1, true)],
        score: 500,
        correct_chars: correct,
        error_chars: total - correct,
        total_chars_typed: total,
        ..RoundSnapshot::default()
    }
}

#[test]
fn flawless_round_earns_three_stars() {
    assert_eq!(stars(&finished(20, 20, 100)), MAX_STARS);
}

#[test]
fn castle_damage_costs_the_third_star() {
    assert_eq!(stars(&finished(20, 20, 99)), 2);
}

#[test]
fn low_accuracy_caps_at_one_star() {
    assert_eq!(stars(&finished(17, 20, 100)), 1);
}

#[test]
fn surviving_monster_means_no_stars_or_coins() {
    let mut snapshot = finished(20, 20, 100);
    snapshot.monsters.push(monster(2, false));
    assert_eq!(stars(&snapshot), 0);
    assert_eq!(coins_earned(&snapshot, 2.0, &Modifiers::default()), 0);
}

#[test]
fn fallen_castle_means_no_stars() {
    assert_eq!(stars(&finished(20, 20, 0)), 0);
}

#[test]
fn monsters_that_reached_the_castle_still_count_as_defeated() {
    let mut snapshot = finished(20, 20, 90);
    snapshot.monsters[1].reached_castle = true;
    assert_eq!(stars(&snapshot), 2);
}

#[test]
fn coins_scale_with_world_and_bonuses() {
    let snapshot = finished(97, 100, 100);
    assert_eq!(coins_earned(&snapshot, 1.0, &Modifiers::default()), 15);
    assert_eq!(coins_earned(&snapshot, 2.0, &Modifiers::default()), 30);

    let modifiers = Modifiers {
        bonus_coins_percent: 10.0,
        bonus_both_percent: 10.0,
        ..Modifiers::default()
    };
    assert_eq!(coins_earned(&snapshot, 1.0, &modifiers), 18);
}

#[test]
fn final_stats_summarise_the_round() {
    let mut snapshot = finished(50, 60, 100);
    snapshot.max_combo = 31;
    snapshot.words_completed = 10;
    snapshot.total_errors = "ssqsqz".chars().collect();

    let stats = final_stats(&snapshot);
    assert_eq!(stats.wpm, 10);
    assert!((stats.accuracy - 83.333).abs() < 0.01);
    assert_eq!(stats.max_combo, 31);
    assert_eq!(stats.score, 500);
    assert_eq!(stats.words_completed, 10);
    assert_eq!(stats.top_error_chars, vec!['s', 'q', 'z']);
}

#[test]
fn evaluate_uses_the_world_coin_multiplier() {
    let snapshot = finished(20, 20, 100);
    let report = evaluate(&snapshot, WorldId::Void, &Modifiers::default());
    assert_eq!(report.stars, 3);
    assert_eq!(report.coins, 30);
    assert_eq!(report.stats, final_stats(&snapshot));
}
