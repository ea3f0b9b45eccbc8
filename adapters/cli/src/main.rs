#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays scripted Word Siege rounds.

mod config;
mod session;
mod stats_transfer;
mod typist;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use word_siege_core::{Command, KeyboardLayout, WorldId, LEVELS_PER_WORLD};
use word_siege_system_levels as levels;
use word_siege_system_modifiers::ModifierProvider;
use word_siege_system_monster_factory::{Config, MonsterFactory};
use word_siege_system_outcome as outcome;
use word_siege_system_words::WordBank;
use word_siege_world::World;

use crate::{config::SessionConfig, typist::Typist};

/// Mixed into the seed so the typist and the word stream stay independent.
const TYPIST_SEED_SALT: u64 = 0x5eed_7e57;

#[derive(Debug, Parser)]
#[command(name = "word-siege", version, about = "Plays scripted Word Siege rounds")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Plays one round with a scripted typist and prints the report.
    Play(PlayArgs),
    /// Decodes a persistence payload printed at the end of a round.
    Decode {
        /// Payload in the `siege:v1:<base64>` format.
        payload: String,
    },
}

#[derive(Debug, clap::Args)]
struct PlayArgs {
    /// World to play, by name or by number starting at 1.
    #[arg(long, default_value = "meadow", value_parser = parse_world)]
    world: WorldId,
    /// Level within the world.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=i64::from(LEVELS_PER_WORLD)))]
    level: u8,
    /// Keyboard layout used to pick typeable words.
    #[arg(long, value_enum, default_value_t = LayoutArg::Qwerty)]
    layout: LayoutArg,
    /// Seed for word selection and the scripted typist.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Optional TOML file with round settings and equipped items.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Accuracy of the scripted typist in percent.
    #[arg(long, default_value_t = 95.0)]
    accuracy: f64,
    /// Typing speed of the scripted typist in characters per minute.
    #[arg(long, default_value_t = 240)]
    cpm: u32,
    /// Number of ticks between HUD log lines; zero disables the HUD.
    #[arg(long, default_value_t = 20)]
    hud_every: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Qwerty,
    Dvorak,
    Colemak,
}

impl From<LayoutArg> for KeyboardLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Qwerty => Self::Qwerty,
            LayoutArg::Dvorak => Self::Dvorak,
            LayoutArg::Colemak => Self::Colemak,
        }
    }
}

/// Entry point for the Word Siege command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Play(args) => play(&args),
        CliCommand::Decode { payload } => decode(&payload),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn play(args: &PlayArgs) -> Result<()> {
    let config = SessionConfig::load(args.config.as_deref())?;
    let level = levels::resolve(args.world, args.level)
        .with_context(|| format!("cannot play {} level {}", args.world, args.level))?;
    let modifiers = ModifierProvider::from_equipped(&config.equipped).modifiers();
    tracing::debug!(?modifiers, items = config.equipped.len(), "loadout applied");

    let mut bank = WordBank::new(args.seed);
    let mut factory = MonsterFactory::new(Config::new(config.settings, args.seed));
    let monsters = factory.build_from_source(&level, &mut bank, args.layout.into(), &modifiers);

    let mut world = World::with_settings(config.settings);
    let mut typist = Typist::new(args.seed ^ TYPIST_SEED_SALT, args.accuracy, args.cpm);
    let start = Command::StartRound {
        level,
        monsters,
        modifiers,
    };
    let snapshot = session::run(&mut world, start, &mut typist, args.hud_every);

    let report = outcome::evaluate(&snapshot, level.world, &modifiers);
    let stats = &report.stats;
    println!("{} level {}", level.world, level.level);
    println!(
        "stars: {}/{}  coins: {}  score: {}",
        report.stars,
        outcome::MAX_STARS,
        report.coins,
        stats.score
    );
    println!(
        "wpm: {}  accuracy: {:.1}%  max combo: {}  words: {}",
        stats.wpm, stats.accuracy, stats.max_combo, stats.words_completed
    );
    if !stats.top_error_chars.is_empty() {
        let missed: String = stats.top_error_chars.iter().collect();
        println!("most missed: {missed}");
    }
    if report.stars > 0 {
        if let Some((world, next)) = levels::next_level(level.world, level.level) {
            println!("unlocked: {world} level {next}");
        }
    }

    let payload = stats_transfer::encode(stats).context("failed to encode round statistics")?;
    println!("{payload}");
    Ok(())
}

fn decode(payload: &str) -> Result<()> {
    let stats = stats_transfer::decode(payload).context("failed to decode round statistics")?;
    let rendered =
        serde_json::to_string_pretty(&stats).context("failed to render round statistics")?;
    println!("{rendered}");
    Ok(())
}

fn parse_world(value: &str) -> Result<WorldId, String> {
    let trimmed = value.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(WorldId::from_index)
            .ok_or_else(|| format!("world number must be between 1 and {}", WorldId::ALL.len()));
    }
    WorldId::ALL
        .into_iter()
        .find(|world| world.name().eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| format!("unknown world `{trimmed}`"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn worlds_parse_by_name_or_number() {
        assert_eq!(parse_world("glacier"), Ok(WorldId::Glacier));
        assert_eq!(parse_world("Void"), Ok(WorldId::Void));
        assert_eq!(parse_world("1"), Ok(WorldId::Meadow));
        assert!(parse_world("0").is_err());
        assert!(parse_world("7").is_err());
        assert!(parse_world("moon").is_err());
    }

    #[test]
    fn play_arguments_have_sensible_defaults() {
        let cli = Cli::try_parse_from(["word-siege", "play"]).expect("defaults parse");
        let CliCommand::Play(args) = cli.command else {
            panic!("expected play command");
        };
        assert_eq!(args.world, WorldId::Meadow);
        assert_eq!(args.level, 1);
        assert_eq!(args.layout, LayoutArg::Qwerty);
        assert!(args.config.is_none());
    }

    #[test]
    fn level_outside_the_world_is_rejected() {
        assert!(Cli::try_parse_from(["word-siege", "play", "--level", "11"]).is_err());
        assert!(Cli::try_parse_from(["word-siege", "play", "--level", "0"]).is_err());
    }
}
