use std::time::Duration;

use word_siege_core::{Command, Event, Phase, RoundSnapshot};
use word_siege_world::{self as world, query, World};

use crate::typist::Typist;

/// Drives a started round to completion on a fixed simulation timestep.
///
/// Scheduling stops as soon as the world leaves the playing phase, so no
/// tick or keystroke is ever issued against a finished round.
pub(crate) fn run(
    world: &mut World,
    start: Command,
    typist: &mut Typist,
    hud_every: u32,
) -> RoundSnapshot {
    let tick_interval = query::settings(world).tick_interval;
    let mut events = Vec::new();
    world::apply(world, start, &mut events);
    if query::phase(world) != Phase::Playing {
        tracing::warn!("round did not start");
        return query::snapshot(world);
    }

    let mut ticks: u64 = 0;
    loop {
        events.clear();
        world::apply(world, Command::Tick { dt: tick_interval }, &mut events);
        ticks += 1;
        if left_playing(&events) {
            break;
        }

        if hud_every > 0 && ticks % u64::from(hud_every) == 0 {
            log_hud(&query::snapshot(world));
        }

        if type_due_keys(world, typist, tick_interval) {
            break;
        }
    }

    tracing::debug!(ticks, "session finished");
    query::snapshot(world)
}

fn type_due_keys(world: &mut World, typist: &mut Typist, dt: Duration) -> bool {
    let mut events = Vec::new();
    for _ in 0..typist.keys_due(dt) {
        let Some(expected) = query::active_monster(world)
            .and_then(|monster| monster.remaining().chars().next())
        else {
            break;
        };

        events.clear();
        let input = typist.press(expected);
        world::apply(world, Command::Keystroke { input }, &mut events);
        if left_playing(&events) {
            return true;
        }
    }
    false
}

fn left_playing(events: &[Event]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            Event::PhaseChanged { phase } if *phase != Phase::Playing
        )
    })
}

fn log_hud(snapshot: &RoundSnapshot) {
    let word = snapshot
        .active_monster()
        .map_or("-", |monster| monster.remaining());
    tracing::info!(
        timer = snapshot.timer.as_secs(),
        castle = snapshot.castle_hp,
        score = snapshot.score,
        combo = snapshot.combo,
        word,
        "hud"
    );
}
