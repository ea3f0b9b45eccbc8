#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state management for Word Siege.
//!
//! The [`World`] owns every piece of mutable round state. Adapters mutate it
//! exclusively through [`apply`], one command at a time, and observe it
//! through the owned snapshots produced by [`query::snapshot`].

use std::time::Duration;

use word_siege_core::{
    Command, EndReason, Event, KeystrokeOutcome, LevelConfig, Modifiers, MonsterId, MonsterSeed,
    Phase, RoundSettings, CASTLE_EDGE, MIN_MONSTER_SPEED,
};
use word_siege_system_scoring as scoring;

/// Portion of its maximum hit points at which a boss enrages.
const ENRAGE_THRESHOLD: f32 = 0.5;

/// Represents the authoritative Word Siege round state.
#[derive(Debug)]
pub struct World {
    settings: RoundSettings,
    phase: Phase,
    level: Option<LevelConfig>,
    timer: Duration,
    elapsed: Duration,
    castle_hp: u32,
    max_castle_hp: u32,
    monsters: Vec<Monster>,
    active: Option<usize>,
    score: u64,
    combo: u32,
    max_combo: u32,
    total_chars_typed: u32,
    correct_chars: u32,
    error_chars: u32,
    total_errors: Vec<char>,
    words_completed: u32,
    combo_shields: u32,
    error_shields: u32,
}

impl World {
    /// Creates a new world in the menu phase using default round settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(RoundSettings::default())
    }

    /// Creates a new world in the menu phase using the provided settings.
    #[must_use]
    pub fn with_settings(settings: RoundSettings) -> Self {
        Self {
            settings,
            phase: Phase::Menu,
            level: None,
            timer: settings.round_duration,
            elapsed: Duration::ZERO,
            castle_hp: settings.base_castle_hp,
            max_castle_hp: settings.base_castle_hp,
            monsters: Vec::new(),
            active: None,
            score: 0,
            combo: 0,
            max_combo: 0,
            total_chars_typed: 0,
            correct_chars: 0,
            error_chars: 0,
            total_errors: Vec::new(),
            words_completed: 0,
            combo_shields: 0,
            error_shields: 0,
        }
    }

    fn start_round(
        &mut self,
        level: LevelConfig,
        seeds: Vec<MonsterSeed>,
        modifiers: &Modifiers,
        out_events: &mut Vec<Event>,
    ) {
        let settings = self.settings;
        let max_castle_hp = castle_hp_with(settings.base_castle_hp, modifiers);

        *self = Self::with_settings(settings);
        self.level = Some(level);
        self.monsters = seeds.into_iter().map(Monster::from_seed).collect();
        self.castle_hp = max_castle_hp;
        self.max_castle_hp = max_castle_hp;
        self.combo_shields = modifiers.combo_shields;
        self.error_shields = modifiers.error_shields;
        self.phase = Phase::Playing;

        tracing::info!(
            world = %level.world,
            level = level.level,
            monsters = self.monsters.len(),
            castle_hp = max_castle_hp,
            "round started"
        );
        out_events.push(Event::RoundStarted {
            level,
            max_castle_hp,
            monster_count: self.monsters.len(),
        });
        out_events.push(Event::PhaseChanged {
            phase: Phase::Playing,
        });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.timer = self.timer.saturating_sub(dt);
        out_events.push(Event::TimeAdvanced { dt });

        let minions_cleared = self
            .monsters
            .iter()
            .filter(|monster| !monster.boss)
            .all(Monster::is_terminal);
        let step = movement_scale(dt, self.settings.tick_interval);

        let mut arrivals: Vec<usize> = Vec::new();
        for (index, monster) in self.monsters.iter_mut().enumerate() {
            if monster.is_terminal() {
                continue;
            }

            if !monster.spawned {
                if monster.boss && !minions_cleared {
                    continue;
                }
                if self.elapsed >= monster.spawn_delay {
                    monster.spawned = true;
                    tracing::debug!(monster = monster.id.get(), boss = monster.boss, "spawned");
                    out_events.push(Event::MonsterSpawned {
                        monster: monster.id,
                        boss: monster.boss,
                    });
                }
                continue;
            }

            monster.position -= monster.speed * step;
            if monster.position <= CASTLE_EDGE {
                monster.position = CASTLE_EDGE;
                monster.reached_castle = true;
                arrivals.push(index);
            }
        }

        for monster in self.monsters.iter_mut() {
            if monster.should_enrage() {
                monster.speed *= 2.0;
                monster.enraged = true;
                tracing::debug!(monster = monster.id.get(), speed = monster.speed, "boss enraged");
                out_events.push(Event::BossEnraged {
                    monster: monster.id,
                    speed: monster.speed,
                });
            }
        }

        let mut damage: u32 = 0;
        for index in arrivals {
            let monster = &mut self.monsters[index];
            if monster.defeated {
                continue;
            }
            monster.defeated = true;
            damage = damage.saturating_add(self.settings.castle_damage);
            out_events.push(Event::MonsterReachedCastle {
                monster: monster.id,
            });
        }
        if damage > 0 {
            self.castle_hp = self.castle_hp.saturating_sub(damage);
            tracing::debug!(damage, remaining = self.castle_hp, "castle damaged");
            out_events.push(Event::CastleDamaged {
                damage,
                remaining: self.castle_hp,
            });
        }

        self.revalidate_target(out_events);

        if let Some(reason) = self.end_reason() {
            self.finish(reason, out_events);
        }
    }

    fn keystroke(&mut self, input: char, out_events: &mut Vec<Event>) {
        let Some(index) = self.active else {
            return;
        };
        let monster = &self.monsters[index];
        if !monster.is_targetable() {
            return;
        }
        let Some(expected) = monster.expected() else {
            return;
        };

        let outcome = if input == expected {
            KeystrokeOutcome::Correct
        } else if self.error_shields > 0 {
            self.error_shields -= 1;
            KeystrokeOutcome::Forgiven
        } else if self.combo_shields > 0 {
            self.combo_shields -= 1;
            KeystrokeOutcome::ComboShielded
        } else {
            KeystrokeOutcome::Missed
        };
        let counts_as_correct = matches!(
            outcome,
            KeystrokeOutcome::Correct | KeystrokeOutcome::Forgiven
        );

        match outcome {
            KeystrokeOutcome::Correct | KeystrokeOutcome::Forgiven => {
                self.combo = self.combo.saturating_add(1);
            }
            KeystrokeOutcome::ComboShielded => {}
            KeystrokeOutcome::Missed => self.combo = 0,
        }
        self.max_combo = self.max_combo.max(self.combo);

        self.total_chars_typed = self.total_chars_typed.saturating_add(1);
        if counts_as_correct {
            self.correct_chars = self.correct_chars.saturating_add(1);
        } else {
            self.error_chars = self.error_chars.saturating_add(1);
        }

        out_events.push(Event::KeystrokeResolved {
            expected,
            input,
            outcome,
        });

        if counts_as_correct {
            self.confirm_character(index, out_events);
        } else {
            let monster = &mut self.monsters[index];
            monster.speed *= 2.0;
            self.total_errors.push(expected);
        }
    }

    fn confirm_character(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let monster = &mut self.monsters[index];
        monster.typed += 1;
        let length = monster.word.len();
        let progress = monster.typed as f32 / length as f32;
        monster.hp = (monster.max_hp * (1.0 - progress)).max(0.0);
        if monster.typed < length {
            return;
        }

        monster.defeated = true;
        monster.hp = 0.0;
        let id = monster.id;

        let accuracy = scoring::accuracy_percent(self.correct_chars, self.total_chars_typed);
        let points = scoring::word_score(length, accuracy, self.combo);
        self.score = self.score.saturating_add(points);
        self.words_completed = self.words_completed.saturating_add(1);
        tracing::debug!(monster = id.get(), points, "word completed");
        out_events.push(Event::WordCompleted {
            monster: id,
            score: points,
        });

        self.select_frontmost(out_events);
        let awaiting_spawn = self
            .monsters
            .iter()
            .any(|monster| !monster.spawned && !monster.is_terminal());
        if self.active.is_none() && !awaiting_spawn {
            self.finish(EndReason::Cleared, out_events);
        }
    }

    fn revalidate_target(&mut self, out_events: &mut Vec<Event>) {
        let valid = self
            .active
            .and_then(|index| self.monsters.get(index))
            .is_some_and(Monster::is_targetable);
        if !valid {
            self.select_frontmost(out_events);
        }
    }

    fn select_frontmost(&mut self, out_events: &mut Vec<Event>) {
        let next = frontmost(&self.monsters);
        if next == self.active {
            return;
        }
        self.active = next;
        let target = next.map(|index| self.monsters[index].id);
        tracing::debug!(monster = ?target.map(|id| id.get()), "target changed");
        out_events.push(Event::TargetChanged { target });
    }

    fn end_reason(&self) -> Option<EndReason> {
        if self.castle_hp == 0 {
            Some(EndReason::CastleFallen)
        } else if self.timer.is_zero() {
            Some(EndReason::TimeUp)
        } else if self.monsters.iter().all(Monster::is_terminal) {
            Some(EndReason::Cleared)
        } else {
            None
        }
    }

    fn finish(&mut self, reason: EndReason, out_events: &mut Vec<Event>) {
        self.phase = Phase::Results;
        tracing::info!(
            ?reason,
            score = self.score,
            words = self.words_completed,
            castle_hp = self.castle_hp,
            "round ended"
        );
        out_events.push(Event::RoundEnded { reason });
        out_events.push(Event::PhaseChanged {
            phase: Phase::Results,
        });
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRound {
            level,
            monsters,
            modifiers,
        } => {
            if matches!(world.phase, Phase::Menu | Phase::Results) {
                world.start_round(level, monsters, &modifiers, out_events);
            }
        }
        Command::Tick { dt } => {
            if world.phase == Phase::Playing {
                world.tick(dt, out_events);
            }
        }
        Command::Keystroke { input } => {
            if world.phase == Phase::Playing {
                world.keystroke(input, out_events);
            }
        }
        Command::Pause => {
            if world.phase == Phase::Playing {
                world.set_phase(Phase::Paused, out_events);
            }
        }
        Command::Resume => {
            if world.phase == Phase::Paused {
                world.set_phase(Phase::Playing, out_events);
            }
        }
        Command::ReturnToMenu => {
            if matches!(world.phase, Phase::Paused | Phase::Results) {
                let settings = world.settings;
                *world = World::with_settings(settings);
                out_events.push(Event::PhaseChanged { phase: Phase::Menu });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use word_siege_core::{MonsterSnapshot, Phase, RoundSettings, RoundSnapshot};
    use word_siege_system_scoring as scoring;

    use super::World;

    /// Current phase of the round state machine.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Settings the world was created with.
    #[must_use]
    pub fn settings(world: &World) -> &RoundSettings {
        &world.settings
    }

    /// Running accuracy of the round in percent.
    #[must_use]
    pub fn accuracy(world: &World) -> f64 {
        scoring::accuracy_percent(world.correct_chars, world.total_chars_typed)
    }

    /// Snapshot of the monster currently receiving input.
    #[must_use]
    pub fn active_monster(world: &World) -> Option<MonsterSnapshot> {
        world
            .active
            .and_then(|index| world.monsters.get(index))
            .map(super::Monster::snapshot)
    }

    /// Captures an owned snapshot of the complete round state.
    #[must_use]
    pub fn snapshot(world: &World) -> RoundSnapshot {
        RoundSnapshot {
            phase: world.phase,
            level: world.level,
            timer: world.timer,
            elapsed: world.elapsed,
            castle_hp: world.castle_hp,
            max_castle_hp: world.max_castle_hp,
            monsters: world.monsters.iter().map(super::Monster::snapshot).collect(),
            active: world
                .active
                .and_then(|index| world.monsters.get(index))
                .map(|monster| monster.id),
            score: world.score,
            combo: world.combo,
            max_combo: world.max_combo,
            total_chars_typed: world.total_chars_typed,
            correct_chars: world.correct_chars,
            error_chars: world.error_chars,
            total_errors: world.total_errors.clone(),
            words_completed: world.words_completed,
            combo_shields: world.combo_shields,
            error_shields: world.error_shields,
        }
    }
}

#[derive(Clone, Debug)]
struct Monster {
    id: MonsterId,
    word: Vec<char>,
    hp: f32,
    max_hp: f32,
    position: f32,
    typed: usize,
    speed: f32,
    spawn_delay: Duration,
    spawned: bool,
    defeated: bool,
    reached_castle: bool,
    boss: bool,
    enraged: bool,
}

impl Monster {
    fn from_seed(seed: MonsterSeed) -> Self {
        let max_hp = seed.max_hp.max(0.0);
        Self {
            id: seed.id,
            word: seed.word.chars().collect(),
            hp: max_hp,
            max_hp,
            position: seed.position,
            typed: 0,
            speed: seed.speed.max(MIN_MONSTER_SPEED),
            spawn_delay: seed.spawn_delay,
            spawned: false,
            defeated: false,
            reached_castle: false,
            boss: seed.boss,
            enraged: false,
        }
    }

    fn is_terminal(&self) -> bool {
        self.defeated || self.reached_castle
    }

    fn is_targetable(&self) -> bool {
        self.spawned && !self.is_terminal() && self.expected().is_some()
    }

    fn expected(&self) -> Option<char> {
        self.word.get(self.typed).copied()
    }

    fn should_enrage(&self) -> bool {
        self.boss
            && !self.enraged
            && !self.defeated
            && self.hp > 0.0
            && self.hp <= self.max_hp * ENRAGE_THRESHOLD
    }

    fn snapshot(&self) -> word_siege_core::MonsterSnapshot {
        word_siege_core::MonsterSnapshot {
            id: self.id,
            word: self.word.iter().collect(),
            hp: self.hp,
            max_hp: self.max_hp,
            position: self.position,
            typed: self.typed,
            speed: self.speed,
            spawn_delay: self.spawn_delay,
            spawned: self.spawned,
            defeated: self.defeated,
            reached_castle: self.reached_castle,
            boss: self.boss,
            enraged: self.enraged,
        }
    }
}

/// Spawned, non-terminal monster closest to the castle; the first one found
/// wins ties.
fn frontmost(monsters: &[Monster]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, monster) in monsters.iter().enumerate() {
        if !monster.is_targetable() {
            continue;
        }
        match best {
            Some((_, position)) if monster.position >= position => {}
            _ => best = Some((index, monster.position)),
        }
    }
    best.map(|(index, _)| index)
}

fn castle_hp_with(base: u32, modifiers: &Modifiers) -> u32 {
    let flat = base.saturating_add(modifiers.castle_hp_flat);
    let percent = modifiers.castle_hp_percent.max(0.0);
    let scaled = (flat as f64 * (1.0 + f64::from(percent) / 100.0)).round();
    scaled.clamp(0.0, f64::from(u32::MAX)) as u32
}

fn movement_scale(dt: Duration, tick_interval: Duration) -> f32 {
    if tick_interval.is_zero() {
        return 1.0;
    }
    dt.as_secs_f32() / tick_interval.as_secs_f32()
}
